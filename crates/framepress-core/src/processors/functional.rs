use async_trait::async_trait;

use crate::{traits::FrameProcessor, types::FrameData};

/// Wraps a plain function as a processor.
pub struct Function {
    function: fn(FrameData) -> Option<FrameData>,
}

impl Function {
    pub fn new(function: fn(FrameData) -> Option<FrameData>) -> Self {
        Self { function }
    }
}

#[async_trait]
impl FrameProcessor for Function {
    async fn process(&mut self, frame_data: FrameData) -> Option<FrameData> {
        (self.function)(frame_data)
    }
}
