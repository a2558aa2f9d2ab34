use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-frame failure causes. A frame carrying a drop reason keeps traveling
/// through its pipeline so that error stages can observe and account for it.
#[derive(Error, Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Copy)]
pub enum DropReason {
    #[error("Empty frame")]
    EmptyFrame,

    #[error("No captured frame available")]
    NoCaptureFrame,

    #[error("Generic codec error")]
    CodecError,
}
