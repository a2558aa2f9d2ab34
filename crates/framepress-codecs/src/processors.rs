use std::time::Instant;

use async_trait::async_trait;
use log::warn;

use framepress_core::{error::DropReason, traits::FrameProcessor, types::FrameData};

use crate::{
    adaptive::{encode_to_fidelity, encode_within_size, SearchOutcome},
    jpeg::JpegCodec,
    ladder::QualityLadder,
    target::SharedTarget,
};

/// Pipeline-facing wrapper over the size-bounded search: encodes the captured
/// frame under a byte budget and records the search statistics.
pub struct BandwidthLimitedEncoder {
    codec: JpegCodec,
    ladder: QualityLadder,
    ceiling: usize,
}

impl BandwidthLimitedEncoder {
    pub fn new(codec: JpegCodec, ceiling: usize) -> Self {
        Self {
            codec,
            ladder: QualityLadder::bandwidth_default(),
            ceiling,
        }
    }

    pub fn ladder(mut self, ladder: QualityLadder) -> Self {
        self.ladder = ladder;
        self
    }
}

#[async_trait]
impl FrameProcessor for BandwidthLimitedEncoder {
    async fn process(&mut self, mut frame_data: FrameData) -> Option<FrameData> {
        let Some(frame) = frame_data.take_raw_frame() else {
            frame_data.set_drop_reason(Some(DropReason::NoCaptureFrame));
            return Some(frame_data);
        };

        let encoding_start_time = Instant::now();
        let outcome = encode_within_size(&self.codec, &frame, self.ceiling, &self.ladder);

        frame_data.set("uncompressed_size", frame.byte_size() as u128);
        frame_data.set_raw_frame(Some(frame));

        match outcome {
            Ok(outcome) => {
                frame_data.set("encoding_time", encoding_start_time.elapsed().as_millis());
                record_outcome(&mut frame_data, outcome);
            }
            Err(error) => {
                warn!("Size-bounded search failed: {}", error);
                frame_data.set_drop_reason(Some(DropReason::CodecError));
            }
        }

        Some(frame_data)
    }
}

/// Pipeline-facing wrapper over the fidelity-bounded search, with the dB
/// target read from a shared handle once per frame.
pub struct FidelityTargetedEncoder {
    codec: JpegCodec,
    ladder: QualityLadder,
    target: SharedTarget,
}

impl FidelityTargetedEncoder {
    pub fn new(codec: JpegCodec, target: SharedTarget) -> Self {
        Self {
            codec,
            ladder: QualityLadder::fidelity_default(),
            target,
        }
    }

    pub fn ladder(mut self, ladder: QualityLadder) -> Self {
        self.ladder = ladder;
        self
    }
}

#[async_trait]
impl FrameProcessor for FidelityTargetedEncoder {
    async fn process(&mut self, mut frame_data: FrameData) -> Option<FrameData> {
        let Some(frame) = frame_data.take_raw_frame() else {
            frame_data.set_drop_reason(Some(DropReason::NoCaptureFrame));
            return Some(frame_data);
        };

        let target_db = self.target.get();

        let encoding_start_time = Instant::now();
        let outcome = encode_to_fidelity(&self.codec, &frame, target_db, &self.ladder);

        frame_data.set("uncompressed_size", frame.byte_size() as u128);
        frame_data.set("fidelity_target_db", target_db as u128);
        frame_data.set_raw_frame(Some(frame));

        match outcome {
            Ok(outcome) => {
                frame_data.set("encoding_time", encoding_start_time.elapsed().as_millis());
                record_outcome(&mut frame_data, outcome);
            }
            Err(error) => {
                warn!("Fidelity-bounded search failed: {}", error);
                frame_data.set_drop_reason(Some(DropReason::CodecError));
            }
        }

        Some(frame_data)
    }
}

/// Decodes the encoded payload back into the DTO, the way a display side
/// would before presenting the frame.
pub struct JpegRoundtripDecoder {
    codec: JpegCodec,
}

impl JpegRoundtripDecoder {
    pub fn new(codec: JpegCodec) -> Self {
        Self { codec }
    }
}

#[async_trait]
impl FrameProcessor for JpegRoundtripDecoder {
    async fn process(&mut self, mut frame_data: FrameData) -> Option<FrameData> {
        let Some(bytes) = frame_data.encoded_buffer().cloned() else {
            frame_data.set_drop_reason(Some(DropReason::EmptyFrame));
            return Some(frame_data);
        };

        let decoding_start_time = Instant::now();

        match self.codec.decode(&bytes) {
            Ok(frame) => {
                frame_data.set("decode_time", decoding_start_time.elapsed().as_millis());
                frame_data.set_roundtrip_frame(Some(frame));
            }
            Err(error) => {
                warn!("Roundtrip decode failed: {}", error);
                frame_data.set_drop_reason(Some(DropReason::CodecError));
            }
        }

        Some(frame_data)
    }
}

fn record_outcome(frame_data: &mut FrameData, outcome: SearchOutcome) {
    frame_data.set("quality_target_met", outcome.is_met() as u128);

    let encoded = outcome.into_encoded();
    frame_data.set("encoded_size", encoded.bytes.len() as u128);
    frame_data.set("chosen_quality", encoded.quality as u128);
    frame_data.set("search_attempts", encoded.attempts as u128);

    if frame_data.has("uncompressed_size") {
        let uncompressed = frame_data.get("uncompressed_size");
        frame_data.set(
            "compression_ratio_pct",
            encoded.bytes.len() as u128 * 100 / uncompressed,
        );
    }

    frame_data.set_encoded_buffer(Some(encoded.bytes));
}
