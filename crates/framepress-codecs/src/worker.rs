use log::{debug, warn};
use tokio::sync::mpsc;

use framepress_core::{error::DropReason, slot::FrameSlot};

use crate::{
    adaptive::{encode_to_fidelity, SearchOutcome},
    jpeg::JpegCodec,
    ladder::QualityLadder,
};

struct EncodeRequest {
    target_db: f64,
}

pub type EncodeReply = Result<SearchOutcome, DropReason>;

/// Off-loads the fidelity search to a dedicated worker thread.
///
/// Request and reply travel over capacity-1 channels, making every
/// `encode_latest` call a rendezvous: the caller does not advance past its
/// per-frame encode until the worker has answered, a barrier rather than a
/// pipeline. The worker keeps the slot locked for the whole multi-attempt
/// search, so capture writes and the search never overlap. A started search
/// always runs to completion; there is no cancellation and no timeout.
pub struct EncodeWorker {
    request_sender: mpsc::Sender<EncodeRequest>,
    reply_receiver: mpsc::Receiver<EncodeReply>,
    handle: std::thread::JoinHandle<()>,
}

impl EncodeWorker {
    pub fn spawn(slot: FrameSlot, codec: JpegCodec, ladder: QualityLadder) -> Self {
        let (request_sender, mut request_receiver) = mpsc::channel::<EncodeRequest>(1);
        let (reply_sender, reply_receiver) = mpsc::channel::<EncodeReply>(1);

        let handle = std::thread::spawn(move || {
            while let Some(request) = request_receiver.blocking_recv() {
                let reply = slot.with_locked(|frame| match frame {
                    Some(frame) => encode_to_fidelity(&codec, frame, request.target_db, &ladder)
                        .map_err(|error| {
                            warn!("Fidelity search failed: {}", error);
                            DropReason::CodecError
                        }),
                    None => Err(DropReason::NoCaptureFrame),
                });

                if reply_sender.blocking_send(reply).is_err() {
                    break;
                }
            }

            debug!("Encode requests channel closed, terminating");
        });

        Self {
            request_sender,
            reply_receiver,
            handle,
        }
    }

    /// Encodes the most recent captured frame against `target_db`, blocking
    /// the caller until the worker replies.
    pub async fn encode_latest(&mut self, target_db: f64) -> EncodeReply {
        self.request_sender
            .send(EncodeRequest { target_db })
            .await
            .expect("encode worker terminated");

        self.reply_receiver
            .recv()
            .await
            .expect("encode worker terminated")
    }

    /// Closes the request channel and joins the worker.
    pub fn shutdown(self) {
        let Self {
            request_sender,
            reply_receiver,
            handle,
        } = self;

        drop(request_sender);
        drop(reply_receiver);

        handle.join().expect("encode worker panicked");
    }
}
