//! framepress is a pure Rust framework for building adaptive-quality frame
//! compression pipelines as code: frames flow from a capture source through
//! an adaptive JPEG encoder that searches a quality ladder against a byte
//! budget or a round-trip fidelity target, with per-frame statistics along
//! for the ride.

pub use framepress_core::*;

#[cfg(feature = "codecs")]
pub mod codecs {
    pub use framepress_codecs::*;
}

#[cfg(feature = "capturers")]
pub mod capturers {
    pub use framepress_capturers::*;
}

#[cfg(feature = "loggers")]
pub mod loggers {
    pub use framepress_loggers::*;
}
