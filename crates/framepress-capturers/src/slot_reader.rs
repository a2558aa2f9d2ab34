use std::time::Instant;

use async_trait::async_trait;

use framepress_core::{
    error::DropReason, slot::FrameSlot, traits::FrameProcessor, types::FrameData,
};

/// Pulls the most recent frame out of a shared slot into the DTO, acting as
/// the consumer end of a capture feed. A frame may be observed more than once if
/// the feed is slower than the pipeline; an empty slot marks the frame as
/// missing its capture.
pub struct SlotFrameCapturer {
    slot: FrameSlot,
}

impl SlotFrameCapturer {
    pub fn new(slot: FrameSlot) -> Self {
        Self { slot }
    }
}

#[async_trait]
impl FrameProcessor for SlotFrameCapturer {
    async fn process(&mut self, mut frame_data: FrameData) -> Option<FrameData> {
        let capture_start_time = Instant::now();

        match self.slot.snapshot() {
            Some(frame) => {
                frame_data.set("capture_time", capture_start_time.elapsed().as_millis());
                frame_data.set_raw_frame(Some(frame));
            }
            None => {
                frame_data.set_drop_reason(Some(DropReason::NoCaptureFrame));
            }
        }

        Some(frame_data)
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use framepress_core::{
        error::DropReason,
        slot::FrameSlot,
        traits::FrameProcessor,
        types::{FrameData, PixelFormat, RawFrame},
    };

    use super::SlotFrameCapturer;

    #[tokio::test]
    async fn test_reads_latest_or_marks_missing() {
        let slot = FrameSlot::new();
        let mut capturer = SlotFrameCapturer::new(slot.clone());

        let frame_data = capturer.process(FrameData::default()).await.unwrap();
        assert_eq!(
            frame_data.get_drop_reason(),
            Some(DropReason::NoCaptureFrame)
        );

        let mut data = BytesMut::new();
        data.resize(8 * 8 * 3, 42);
        slot.publish(RawFrame::new(8, 8, PixelFormat::Bgr8, data));

        let frame_data = capturer.process(FrameData::default()).await.unwrap();
        assert!(frame_data.get_drop_reason().is_none());
        assert_eq!(frame_data.raw_frame().unwrap().data()[0], 42);
    }
}
