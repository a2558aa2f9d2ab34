//! Frame sources for framepress pipelines: a Y4M file reader, a synthetic
//! test pattern, plus the capture feed and the processors that move frames
//! from a source into a pipeline or a shared slot.

pub mod conversion;
pub mod error;
pub mod feed;
pub mod pattern;
pub mod slot_reader;
pub mod source;
pub mod y4m;
