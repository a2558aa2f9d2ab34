use log::{debug, info};
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

use crate::{traits::FrameProcessor, types::FrameData};

/// An ordered group of processors sharing one task. A stage without a
/// receiver is self-feeding: it seeds each loop iteration with an empty DTO
/// (the capture end of a pipeline).
pub struct Stage {
    processors: Vec<Box<dyn FrameProcessor + Send>>,

    receiver: Option<UnboundedReceiver<FrameData>>,
    sender: Option<UnboundedSender<FrameData>>,

    tag: Option<String>,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
            receiver: None,
            sender: None,
            tag: None,
        }
    }

    pub fn append<P: FrameProcessor + Send + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub(crate) fn set_sender(&mut self, sender: UnboundedSender<FrameData>) {
        self.sender = Some(sender);
    }

    pub(crate) fn set_receiver(&mut self, receiver: UnboundedReceiver<FrameData>) {
        self.receiver = Some(receiver);
    }

    pub(crate) fn launch(mut self) -> JoinHandle<()> {
        let tag = self.tag.clone().unwrap_or_default();

        tokio::spawn(async move {
            loop {
                let mut frame_data = match self.receiver.as_mut() {
                    Some(receiver) => match receiver.recv().await {
                        Some(frame_data) => Some(frame_data),
                        None => {
                            info!("[{}] Receive channel closed, terminating", tag);
                            break;
                        }
                    },
                    None => Some(FrameData::default()),
                };

                debug!("[{}] Processing frame data: {}", tag, frame_data.as_ref().unwrap());

                for processor in &mut self.processors {
                    frame_data = processor.process(frame_data.unwrap()).await;

                    if frame_data.is_none() {
                        break;
                    }
                }

                if let Some(sender) = self.sender.as_ref() {
                    if let Some(frame_data) = frame_data {
                        debug!("[{}] Forwarding frame data: {}", tag, frame_data);

                        if sender.send(frame_data).is_err() {
                            info!("[{}] Next stage dropped its receiver, terminating", tag);
                            break;
                        }
                    }
                }
            }
        })
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}
