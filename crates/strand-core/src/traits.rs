use crate::error::Result;

/// Validate structural integrity of scene data or configuration.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
