use async_trait::async_trait;

use crate::types::{FrameData, RawFrame};

/// One step of a pipeline stage. Returning `None` consumes the frame: the
/// remaining processors of the stage are skipped and nothing is forwarded.
#[async_trait]
pub trait FrameProcessor {
    async fn process(&mut self, frame_data: FrameData) -> Option<FrameData>;
}

/// A device or stream producing raw frames at its own cadence.
pub trait FrameSource {
    /// Pulls the next frame. `None` means the device closed or the stream
    /// ended; the capture path terminates for the rest of the session.
    fn next_frame(&mut self) -> Option<RawFrame>;

    fn width(&self) -> u32;
    fn height(&self) -> u32;
}
