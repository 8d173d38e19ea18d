pub mod config;
pub mod error;
pub mod id;
pub mod traits;

pub use config::{CurveKernelData, KernelConfig};
pub use error::{Result, StrandError};
pub use id::{AttributeOffset, CurveId, KeyIndex, SegmentId};
