use std::{collections::HashMap, fmt::Display};

use bytes::{Bytes, BytesMut};

use crate::error::DropReason;

/// Channel ordering of an interleaved 8-bit, 3-channel image buffer.
///
/// Capture devices usually deliver BGR; decoders produce RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Bgr8,
    Rgb8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        3
    }
}

/// A raw interleaved image buffer, recreated on every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: BytesMut,
}

impl RawFrame {
    pub fn new(width: u32, height: u32, format: PixelFormat, data: BytesMut) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * format.bytes_per_pixel(),
            "pixel buffer length does not match the frame geometry"
        );

        Self {
            width,
            height,
            format,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut BytesMut {
        &mut self.data
    }

    /// Size of the uncompressed pixel payload in bytes.
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }
}

/// The DTO traveling through a pipeline, one instance per captured frame.
///
/// The encoded buffer is replaced, never appended, each time an encoder
/// retries at a different quality level.
#[derive(Default, Clone, Debug)]
pub struct FrameData {
    raw_frame: Option<RawFrame>,
    encoded_buffer: Option<Bytes>,
    roundtrip_frame: Option<RawFrame>,

    stats: HashMap<String, u128>,

    drop_reason: Option<DropReason>,
}

impl FrameData {
    //*******//
    // Stats //
    //*******//

    pub fn set(&mut self, key: &str, value: u128) {
        self.stats.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> u128 {
        *self
            .stats
            .get(key)
            .unwrap_or_else(|| panic!("Missing key '{}'", key))
    }

    pub fn has(&self, key: &str) -> bool {
        self.stats.contains_key(key)
    }

    pub fn get_stats(&self) -> &HashMap<String, u128> {
        &self.stats
    }

    //*********//
    // Buffers //
    //*********//

    pub fn set_raw_frame(&mut self, frame: Option<RawFrame>) {
        self.raw_frame = frame;
    }

    pub fn take_raw_frame(&mut self) -> Option<RawFrame> {
        self.raw_frame.take()
    }

    pub fn raw_frame(&self) -> Option<&RawFrame> {
        self.raw_frame.as_ref()
    }

    pub fn set_encoded_buffer(&mut self, buffer: Option<Bytes>) {
        self.encoded_buffer = buffer;
    }

    pub fn encoded_buffer(&self) -> Option<&Bytes> {
        self.encoded_buffer.as_ref()
    }

    pub fn take_encoded_buffer(&mut self) -> Option<Bytes> {
        self.encoded_buffer.take()
    }

    pub fn set_roundtrip_frame(&mut self, frame: Option<RawFrame>) {
        self.roundtrip_frame = frame;
    }

    pub fn roundtrip_frame(&self) -> Option<&RawFrame> {
        self.roundtrip_frame.as_ref()
    }

    //*************//
    // Drop reason //
    //*************//

    pub fn set_drop_reason(&mut self, reason: Option<DropReason>) {
        self.drop_reason = reason;
    }

    pub fn get_drop_reason(&self) -> Option<DropReason> {
        self.drop_reason
    }

    //*******//
    // Other //
    //*******//

    pub fn clone_without_buffers(&self) -> Self {
        Self {
            stats: self.stats.clone(),
            drop_reason: self.drop_reason,

            ..Default::default()
        }
    }
}

impl Display for FrameData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FrameData(raw: {}, encoded: {}, stats: {}, drop reason: {:?})",
            self.raw_frame
                .as_ref()
                .map(|frame| format!("{}x{}", frame.width(), frame.height()))
                .unwrap_or_else(|| "none".to_string()),
            self.encoded_buffer
                .as_ref()
                .map(|buffer| format!("{} bytes", buffer.len()))
                .unwrap_or_else(|| "none".to_string()),
            self.stats.len(),
            self.drop_reason
        )
    }
}
