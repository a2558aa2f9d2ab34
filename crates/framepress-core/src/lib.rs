//! framepress-core provides the building blocks for adaptive-quality frame
//! compression pipelines: the per-frame DTO, the shared latest-frame slot,
//! the pipeline-as-code machinery and a set of general purpose processors.

pub mod common;
pub mod error;
pub mod pipeline;
pub mod processors;
pub mod slot;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;
