//! Export pipeline.

pub mod pipeline;
