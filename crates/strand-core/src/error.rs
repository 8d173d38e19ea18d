use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrandError {
    #[error("Attribute '{name}' ({element}) has {actual} values, expected {expected}")]
    AttributeLength {
        name: String,
        element: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate attribute: {0}")]
    DuplicateAttribute(String),

    #[error("Curve needs at least 2 keys, got {keys}")]
    CurveTooShort { keys: usize },

    #[error("Segment {segment} references key {key}, but the scene has {num_keys} keys")]
    InvalidKeyIndex {
        segment: u32,
        key: u32,
        num_keys: usize,
    },

    #[error("Segment {segment} has coincident keys and no tangent")]
    DegenerateSegment { segment: u32 },

    #[error("Topology error: {0}")]
    Topology(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StrandError>;
