use std::borrow::Cow;

use rayon::prelude::*;

use framepress_core::types::{PixelFormat, RawFrame};

use crate::{error::CodecError, jpeg::swap_red_blue};

const PEAK: f64 = 255.0;

/// Peak signal-to-noise ratio between two frames of identical geometry,
/// in decibels. Channel order is normalized before comparison, so a BGR
/// capture can be scored against its RGB round-trip directly.
///
/// Returns `f64::INFINITY` for pixel-identical inputs.
pub fn psnr(reference: &RawFrame, candidate: &RawFrame) -> Result<f64, CodecError> {
    if reference.width() != candidate.width() || reference.height() != candidate.height() {
        return Err(CodecError::DimensionMismatch {
            reference_width: reference.width(),
            reference_height: reference.height(),
            candidate_width: candidate.width(),
            candidate_height: candidate.height(),
        });
    }

    let reference_rgb = rgb_bytes(reference);
    let candidate_rgb = rgb_bytes(candidate);

    let squared_error: u64 = reference_rgb
        .par_iter()
        .zip(candidate_rgb.par_iter())
        .map(|(a, b)| {
            let diff = *a as i64 - *b as i64;
            (diff * diff) as u64
        })
        .sum();

    let mse = squared_error as f64 / reference_rgb.len() as f64;

    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }

    Ok(10.0 * ((PEAK * PEAK) / mse).log10())
}

fn rgb_bytes(frame: &RawFrame) -> Cow<'_, [u8]> {
    match frame.format() {
        PixelFormat::Rgb8 => Cow::Borrowed(frame.data()),
        PixelFormat::Bgr8 => Cow::Owned(swap_red_blue(frame.data())),
    }
}
