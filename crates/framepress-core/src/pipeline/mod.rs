use log::info;
use tokio::{
    sync::mpsc::{self, UnboundedSender},
    task::JoinHandle,
};

use crate::types::FrameData;

use self::{feeder::PipelineFeeder, stage::Stage};

pub mod feeder;
pub mod stage;

/// A chain of stages connected by channels, each stage running its processors
/// on its own task.
pub struct Pipeline {
    stages: Vec<Stage>,
    feeding_sender: Option<UnboundedSender<FrameData>>,

    tag: String,

    bound: bool,
    to_be_feedable: bool,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            feeding_sender: None,

            tag: "".to_string(),

            bound: false,
            to_be_feedable: false,
        }
    }

    pub fn singleton(stage: Stage) -> Self {
        Self::new().link(stage)
    }

    pub fn link(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    /// Marks the head stage as externally fed instead of self-feeding.
    pub fn feedable(mut self) -> Self {
        self.to_be_feedable = true;
        self
    }

    pub fn get_feeder(&mut self) -> PipelineFeeder {
        if self.to_be_feedable {
            self.make_feedable();
        }

        let sender = self.feeding_sender.as_ref().unwrap().clone();
        PipelineFeeder::new(sender)
    }

    pub fn run(mut self) -> Vec<JoinHandle<()>> {
        info!("[{}] Launching stages...", self.tag);

        if !self.bound {
            self.bind();
        }

        if self.to_be_feedable {
            self.make_feedable();
        }

        let mut handles = Vec::new();

        for stage in self.stages {
            handles.push(stage.launch());
        }

        handles
    }

    fn bind(&mut self) {
        info!("[{}] Binding channels...", self.tag);

        for i in 0..self.stages.len() - 1 {
            let (sender, receiver) = mpsc::unbounded_channel::<FrameData>();

            self.stages.get_mut(i).unwrap().set_sender(sender);
            self.stages.get_mut(i + 1).unwrap().set_receiver(receiver);
        }

        self.bound = true;
    }

    fn make_feedable(&mut self) {
        let head = self.stages.get_mut(0).unwrap();

        let (sender, receiver) = mpsc::unbounded_channel::<FrameData>();
        self.feeding_sender = Some(sender);

        head.set_receiver(receiver);

        self.to_be_feedable = false;
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
