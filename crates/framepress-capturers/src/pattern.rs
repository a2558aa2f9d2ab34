use bytes::{BufMut, BytesMut};

use framepress_core::{
    traits::FrameSource,
    types::{PixelFormat, RawFrame},
};

/// Deterministic stand-in for a camera: a diagonal gradient that scrolls one
/// pixel per frame, delivered in BGR order like a real capture device.
///
/// Unlimited by default; a frame limit turns it into a finite session whose
/// end behaves like the device closing.
pub struct TestPatternSource {
    width: u32,
    height: u32,
    frames_emitted: u64,
    frame_limit: Option<u64>,
}

impl TestPatternSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames_emitted: 0,
            frame_limit: None,
        }
    }

    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    fn render(&self) -> RawFrame {
        let offset = self.frames_emitted as u32;
        let mut data =
            BytesMut::with_capacity(self.width as usize * self.height as usize * 3);

        for row in 0..self.height {
            for col in 0..self.width {
                data.put_u8((col.wrapping_add(offset) % 256) as u8);
                data.put_u8((row.wrapping_add(offset / 2) % 256) as u8);
                data.put_u8((col.wrapping_add(row) % 256) as u8);
            }
        }

        RawFrame::new(self.width, self.height, PixelFormat::Bgr8, data)
    }
}

impl FrameSource for TestPatternSource {
    fn next_frame(&mut self) -> Option<RawFrame> {
        if let Some(limit) = self.frame_limit {
            if self.frames_emitted >= limit {
                return None;
            }
        }

        let frame = self.render();
        self.frames_emitted += 1;

        Some(frame)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use framepress_core::traits::FrameSource;

    use super::TestPatternSource;

    #[test]
    fn test_pattern_is_deterministic() {
        let mut first = TestPatternSource::new(32, 24);
        let mut second = TestPatternSource::new(32, 24);

        for _ in 0..3 {
            assert_eq!(first.next_frame().unwrap(), second.next_frame().unwrap());
        }
    }

    #[test]
    fn test_pattern_scrolls_between_frames() {
        let mut source = TestPatternSource::new(32, 24);

        let first = source.next_frame().unwrap();
        let second = source.next_frame().unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_frame_limit_closes_the_source() {
        let mut source = TestPatternSource::new(8, 8).with_frame_limit(2);

        assert!(source.next_frame().is_some());
        assert!(source.next_frame().is_some());
        assert!(source.next_frame().is_none());
        assert!(source.next_frame().is_none());
    }
}
