use std::time::Duration;

use clap::Parser;
use log::{info, warn};

use framepress::slot::FrameSlot;

use framepress::capturers::{feed::launch_capture_feed, pattern::TestPatternSource};
use framepress::codecs::{
    jpeg::JpegCodec, ladder::QualityLadder, target::SharedTarget, worker::EncodeWorker,
};

#[derive(Parser)]
#[command(about = "Per-frame rendezvous encoding against a round-trip PSNR target")]
struct Args {
    #[arg(long, default_value_t = 320)]
    width: u32,

    #[arg(long, default_value_t = 240)]
    height: u32,

    /// Round-trip fidelity target in dB
    #[arg(long, default_value_t = 30.0)]
    target_db: f64,

    /// Frames to encode before exiting
    #[arg(long, default_value_t = 120)]
    frames: u64,

    #[arg(long, default_value_t = 30)]
    fps: u64,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse();

    let slot = FrameSlot::new();
    let source = TestPatternSource::new(args.width, args.height).with_frame_limit(args.frames);
    let feed = launch_capture_feed(source, slot.clone(), args.fps);

    // a missing JPEG backend is a configuration error, not a per-frame one
    let codec = JpegCodec::new().expect("JPEG codec unavailable");
    let target = SharedTarget::new(args.target_db);
    let mut worker = EncodeWorker::spawn(slot.clone(), codec, QualityLadder::fidelity_default());

    while slot.is_empty() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let frame_interval = Duration::from_millis(1000 / args.fps.max(1));

    for frame_index in 0..args.frames {
        let target_db = target.get();

        match worker.encode_latest(target_db).await {
            Ok(outcome) => {
                let met = outcome.is_met();
                let encoded = outcome.encoded();
                info!(
                    "Frame {}: {} bytes at quality {} after {} attempts (target {:.1} dB{})",
                    frame_index,
                    encoded.bytes.len(),
                    encoded.quality,
                    encoded.attempts,
                    target_db,
                    if met { "" } else { ", degraded" },
                );
            }
            Err(reason) => warn!("Frame {} dropped: {}", frame_index, reason),
        }

        // nudge the dial the way an operator would; reads stay clamped
        if frame_index % 30 == 29 {
            target.adjust(10.0);
        }

        tokio::time::sleep(frame_interval).await;
    }

    worker.shutdown();
    feed.await.expect("capture feed panicked");

    info!("Finished OK");
}
