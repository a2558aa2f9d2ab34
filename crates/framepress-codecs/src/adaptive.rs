use bytes::Bytes;
use log::debug;

use framepress_core::types::RawFrame;

use crate::{error::CodecError, jpeg::JpegCodec, ladder::QualityLadder, psnr::psnr};

/// The payload produced by an adaptive search, with the level it was encoded
/// at and how many ladder levels were tried to get there.
#[derive(Debug, Clone)]
pub struct EncodedFrame {
    pub bytes: Bytes,
    pub quality: u8,
    pub attempts: usize,
}

/// Whether a search met its target or ran out of ladder levels.
///
/// `Exhausted` still carries a payload (the last attempted level), so a
/// frame is always delivered; callers that care can tell the degraded case
/// apart instead of treating the two as identical.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Met(EncodedFrame),
    Exhausted(EncodedFrame),
}

impl SearchOutcome {
    pub fn is_met(&self) -> bool {
        matches!(self, SearchOutcome::Met(_))
    }

    pub fn encoded(&self) -> &EncodedFrame {
        match self {
            SearchOutcome::Met(encoded) | SearchOutcome::Exhausted(encoded) => encoded,
        }
    }

    pub fn into_encoded(self) -> EncodedFrame {
        match self {
            SearchOutcome::Met(encoded) | SearchOutcome::Exhausted(encoded) => encoded,
        }
    }
}

/// Re-encodes `frame` along the ladder until the payload fits `ceiling`
/// bytes. With the default descending ladder this walks 100, 95, … and takes
/// the first level that fits; the final ladder level is delivered even when
/// nothing fits.
pub fn encode_within_size(
    codec: &JpegCodec,
    frame: &RawFrame,
    ceiling: usize,
    ladder: &QualityLadder,
) -> Result<SearchOutcome, CodecError> {
    if ceiling == 0 {
        return Err(CodecError::InvalidCeiling);
    }

    let mut attempts = 0;
    let mut last_attempt = None;

    for quality in ladder {
        attempts += 1;

        let bytes = codec.encode(frame, quality)?;
        debug!(
            "Size attempt {} at quality {}: {} bytes against a ceiling of {}",
            attempts,
            quality,
            bytes.len(),
            ceiling
        );

        let fits = bytes.len() <= ceiling;
        let encoded = EncodedFrame {
            bytes,
            quality,
            attempts,
        };

        if fits {
            return Ok(SearchOutcome::Met(encoded));
        }

        last_attempt = Some(encoded);
    }

    last_attempt
        .map(SearchOutcome::Exhausted)
        .ok_or(CodecError::EmptyLadder)
}

/// Re-encodes `frame` along the ladder until the round-tripped result scores
/// at least `target_db` of PSNR against the original. Every attempt pays for
/// a full decode on top of the encode. With the default ascending ladder the
/// search walks 0, 5, … 95 and delivers the 95 payload when the target is
/// out of reach, so it terminates even for unreachable targets.
pub fn encode_to_fidelity(
    codec: &JpegCodec,
    frame: &RawFrame,
    target_db: f64,
    ladder: &QualityLadder,
) -> Result<SearchOutcome, CodecError> {
    let mut attempts = 0;
    let mut last_attempt = None;

    for quality in ladder {
        attempts += 1;

        let bytes = codec.encode(frame, quality)?;
        let roundtrip = codec.decode(&bytes)?;
        let score = psnr(frame, &roundtrip)?;

        debug!(
            "Fidelity attempt {} at quality {}: {:.2} dB against a target of {:.2} dB",
            attempts, quality, score, target_db
        );

        let meets = score >= target_db;
        let encoded = EncodedFrame {
            bytes,
            quality,
            attempts,
        };

        if meets {
            return Ok(SearchOutcome::Met(encoded));
        }

        last_attempt = Some(encoded);
    }

    last_attempt
        .map(SearchOutcome::Exhausted)
        .ok_or(CodecError::EmptyLadder)
}
