use std::time::Instant;

use async_trait::async_trait;
use log::debug;

use framepress_core::{
    traits::{FrameProcessor, FrameSource},
    types::FrameData,
};

/// Adapts a frame source directly into a pipeline stage: the single-context
/// arrangement, with no slot in between. Consumes the pipeline's seed frame
/// once the source ends.
pub struct SourceCapturer<S: FrameSource> {
    source: S,
}

impl<S: FrameSource> SourceCapturer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S: FrameSource + Send> FrameProcessor for SourceCapturer<S> {
    async fn process(&mut self, mut frame_data: FrameData) -> Option<FrameData> {
        let capture_start_time = Instant::now();

        match self.source.next_frame() {
            Some(frame) => {
                frame_data.set("capture_time", capture_start_time.elapsed().as_millis());
                frame_data.set_raw_frame(Some(frame));
                Some(frame_data)
            }
            None => {
                debug!("No more frames to capture");
                None
            }
        }
    }
}
