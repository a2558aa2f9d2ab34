//! Statistics sinks for framepress pipelines: rolling console averages,
//! drop-reason accounting and CSV serialization of per-frame stats.

pub mod csv;
pub mod errors;
pub mod stats;
