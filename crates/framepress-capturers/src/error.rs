use thiserror::Error;

/// Failures while opening a capture source. These are configuration-tier:
/// they happen before the first frame, never per-frame.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("failed to open capture source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse y4m stream: {0:?}")]
    Y4m(y4m::Error),

    #[error("unsupported y4m colorspace, only 8-bit 4:2:0 streams are supported")]
    UnsupportedColorspace,
}

impl From<y4m::Error> for CaptureError {
    fn from(error: y4m::Error) -> Self {
        CaptureError::Y4m(error)
    }
}
