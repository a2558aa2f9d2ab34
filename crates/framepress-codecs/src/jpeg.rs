use std::io::Cursor;

use bytes::{Bytes, BytesMut};
use image::{codecs::jpeg::JpegEncoder, ExtendedColorType, ImageEncoder, ImageFormat};

use framepress_core::types::{PixelFormat, RawFrame};

use crate::error::CodecError;

/// Thin wrapper over the image backend's JPEG support.
///
/// Encoding is deterministic: the same frame at the same quality level always
/// yields byte-identical output.
#[derive(Clone)]
pub struct JpegCodec;

impl JpegCodec {
    /// Fails fast when the backend was built without JPEG read/write support,
    /// so a misconfigured build never reaches the per-frame path.
    pub fn new() -> Result<Self, CodecError> {
        if !ImageFormat::Jpeg.writing_enabled() || !ImageFormat::Jpeg.reading_enabled() {
            return Err(CodecError::UnsupportedFormat);
        }

        Ok(Self)
    }

    /// Compresses a frame at the given quality level in [0, 100].
    ///
    /// The backend's accepted floor is 1, so level 0 maps onto it; BGR input
    /// is reordered for the encoder.
    pub fn encode(&self, frame: &RawFrame, quality: u8) -> Result<Bytes, CodecError> {
        let quality = quality.clamp(1, 100);

        let mut output = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut output, quality);

        match frame.format() {
            PixelFormat::Rgb8 => encoder
                .write_image(
                    frame.data(),
                    frame.width(),
                    frame.height(),
                    ExtendedColorType::Rgb8,
                )
                .map_err(CodecError::Encode)?,
            PixelFormat::Bgr8 => {
                let reordered = swap_red_blue(frame.data());
                encoder
                    .write_image(
                        &reordered,
                        frame.width(),
                        frame.height(),
                        ExtendedColorType::Rgb8,
                    )
                    .map_err(CodecError::Encode)?;
            }
        }

        Ok(Bytes::from(output.into_inner()))
    }

    /// Decompresses an encoded payload back into an RGB frame.
    pub fn decode(&self, bytes: &[u8]) -> Result<RawFrame, CodecError> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
            .map_err(CodecError::Decode)?;

        let rgb = decoded.into_rgb8();
        let (width, height) = rgb.dimensions();
        let data = BytesMut::from(rgb.into_raw().as_slice());

        Ok(RawFrame::new(width, height, PixelFormat::Rgb8, data))
    }
}

pub(crate) fn swap_red_blue(data: &[u8]) -> Vec<u8> {
    let mut reordered = data.to_vec();

    for pixel in reordered.chunks_exact_mut(3) {
        pixel.swap(0, 2);
    }

    reordered
}
