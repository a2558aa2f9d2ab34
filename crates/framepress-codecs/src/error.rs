use thiserror::Error;

/// Codec-level failures. `UnsupportedFormat` is the fatal configuration tier:
/// it is raised at construction, before any frame is touched.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("JPEG support is not compiled into the image backend")]
    UnsupportedFormat,

    #[error("encode failed: {0}")]
    Encode(image::ImageError),

    #[error("decode failed: {0}")]
    Decode(image::ImageError),

    #[error("size ceiling must be greater than zero")]
    InvalidCeiling,

    #[error("quality ladder has no levels")]
    EmptyLadder,

    #[error("frame geometry mismatch: {reference_width}x{reference_height} vs {candidate_width}x{candidate_height}")]
    DimensionMismatch {
        reference_width: u32,
        reference_height: u32,
        candidate_width: u32,
        candidate_height: u32,
    },
}
