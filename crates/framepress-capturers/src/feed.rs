use std::time::{Duration, Instant};

use log::info;
use tokio::task::JoinHandle;

use framepress_core::{slot::FrameSlot, traits::FrameSource};

/// Spawns the capture-side context: pulls frames from `source` at roughly
/// `fps` and publishes each one into the slot, holding its lock only for the
/// copy-in. The feed terminates when the source is exhausted: an empty
/// frame ends the capture path for the rest of the session.
pub fn launch_capture_feed(
    mut source: impl FrameSource + Send + 'static,
    slot: FrameSlot,
    fps: u64,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let spin_time = Duration::from_millis(1000 / fps.max(1));

        loop {
            let capture_start_time = Instant::now();

            let frame = match source.next_frame() {
                Some(frame) => frame,
                None => {
                    info!("Capture device closed, terminating the feed");
                    break;
                }
            };

            slot.publish(frame);

            let elapsed = capture_start_time.elapsed();
            if elapsed < spin_time {
                std::thread::sleep(spin_time - elapsed);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use framepress_core::slot::FrameSlot;

    use crate::pattern::TestPatternSource;

    use super::launch_capture_feed;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_feed_publishes_then_terminates() {
        let slot = FrameSlot::new();
        let source = TestPatternSource::new(16, 16).with_frame_limit(5);

        let feed = launch_capture_feed(source, slot.clone(), 1000);
        feed.await.unwrap();

        // the slot retains the most recent frame after the feed ends
        let frame = slot.snapshot().unwrap();
        assert_eq!(frame.width(), 16);
        assert_eq!(frame.height(), 16);
    }
}
