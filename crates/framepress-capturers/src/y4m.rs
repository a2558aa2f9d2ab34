use std::{fs::File, io::Read, path::Path};

use bytes::{BufMut, BytesMut};
use log::debug;

use framepress_core::{
    traits::FrameSource,
    types::{PixelFormat, RawFrame},
};

use crate::{conversion::yuv_to_rgb, error::CaptureError};

/// Reads 4:2:0 frames from a Y4M stream and converts them to RGB on the fly,
/// standing in for a camera that delivers packed frames.
pub struct Y4MFrameSource<R: Read> {
    stream: ::y4m::Decoder<R>,
}

impl Y4MFrameSource<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        Self::new(File::open(path)?)
    }
}

impl<R: Read> Y4MFrameSource<R> {
    pub fn new(reader: R) -> Result<Self, CaptureError> {
        let stream = ::y4m::decode(reader)?;

        match stream.get_colorspace() {
            ::y4m::Colorspace::C420
            | ::y4m::Colorspace::C420jpeg
            | ::y4m::Colorspace::C420paldv
            | ::y4m::Colorspace::C420mpeg2 => {}
            _ => return Err(CaptureError::UnsupportedColorspace),
        }

        Ok(Self { stream })
    }
}

impl<R: Read> FrameSource for Y4MFrameSource<R> {
    fn next_frame(&mut self) -> Option<RawFrame> {
        let width = self.stream.get_width();
        let height = self.stream.get_height();

        let frame = match self.stream.read_frame() {
            Ok(frame) => frame,
            Err(error) => {
                debug!("Y4M stream ended: {:?}", error);
                return None;
            }
        };

        let y_plane = frame.get_y_plane();
        let u_plane = frame.get_u_plane();
        let v_plane = frame.get_v_plane();

        let chroma_stride = (width + 1) / 2;
        let mut data = BytesMut::with_capacity(width * height * 3);

        for row in 0..height {
            for col in 0..width {
                let y = y_plane[row * width + col];
                let u = u_plane[(row / 2) * chroma_stride + col / 2];
                let v = v_plane[(row / 2) * chroma_stride + col / 2];

                let (r, g, b) = yuv_to_rgb(y, u, v);
                data.put_u8(r);
                data.put_u8(g);
                data.put_u8(b);
            }
        }

        Some(RawFrame::new(
            width as u32,
            height as u32,
            PixelFormat::Rgb8,
            data,
        ))
    }

    fn width(&self) -> u32 {
        self.stream.get_width() as u32
    }

    fn height(&self) -> u32 {
        self.stream.get_height() as u32
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use framepress_core::traits::FrameSource;

    use super::Y4MFrameSource;

    fn encoded_stream(width: usize, height: usize, frames: usize) -> Vec<u8> {
        let mut buffer = Vec::new();

        {
            let mut encoder = ::y4m::encode(width, height, ::y4m::Ratio::new(30, 1))
                .with_colorspace(::y4m::Colorspace::C420)
                .write_header(&mut buffer)
                .unwrap();

            let y_plane = vec![128u8; width * height];
            let u_plane = vec![128u8; width * height / 4];
            let v_plane = vec![128u8; width * height / 4];

            for _ in 0..frames {
                encoder
                    .write_frame(&::y4m::Frame::new(
                        [&y_plane[..], &u_plane[..], &v_plane[..]],
                        None,
                    ))
                    .unwrap();
            }
        }

        buffer
    }

    #[test]
    fn test_reads_until_stream_end() {
        let stream = encoded_stream(16, 8, 3);
        let mut source = Y4MFrameSource::new(Cursor::new(stream)).unwrap();

        assert_eq!(source.width(), 16);
        assert_eq!(source.height(), 8);

        for _ in 0..3 {
            let frame = source.next_frame().unwrap();
            assert_eq!(frame.width(), 16);
            assert_eq!(frame.height(), 8);
            assert_eq!(frame.byte_size(), 16 * 8 * 3);

            // neutral chroma over a flat luma plane decodes to gray
            assert!(frame.data().iter().all(|byte| byte.abs_diff(128) <= 1));
        }

        assert!(source.next_frame().is_none());
    }
}
