use async_trait::async_trait;
use log::debug;

use crate::{
    pipeline::{feeder::PipelineFeeder, Pipeline},
    traits::FrameProcessor,
    types::FrameData,
};

/// Diverts frames carrying a drop reason to a side pipeline; clean frames
/// pass through untouched.
pub struct OnErrorSwitch {
    feeder: PipelineFeeder,
}

impl OnErrorSwitch {
    pub fn new(destination_pipeline: &mut Pipeline) -> Self {
        Self {
            feeder: destination_pipeline.get_feeder(),
        }
    }
}

#[async_trait]
impl FrameProcessor for OnErrorSwitch {
    async fn process(&mut self, frame_data: FrameData) -> Option<FrameData> {
        if frame_data.get_drop_reason().is_some() {
            debug!("Diverting frame: {:?}", frame_data.get_drop_reason());
            self.feeder.feed(frame_data);
            None
        } else {
            Some(frame_data)
        }
    }
}
