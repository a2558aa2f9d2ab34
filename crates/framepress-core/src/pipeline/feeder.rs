use tokio::sync::mpsc::UnboundedSender;

use crate::types::FrameData;

/// Entry point for pushing frames into a feedable pipeline from outside.
pub struct PipelineFeeder {
    sender: UnboundedSender<FrameData>,
}

impl PipelineFeeder {
    pub fn new(sender: UnboundedSender<FrameData>) -> Self {
        Self { sender }
    }

    pub fn feed(&self, frame_data: FrameData) {
        self.sender.send(frame_data).unwrap();
    }
}
