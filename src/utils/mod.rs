//! Standalone helpers used by the application layer.

pub mod code_generator;
