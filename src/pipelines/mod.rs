//! Render pipelines.
//!
//! Every linked program owns one pipeline built by [`basic`]; the programs
//! differ only in their shader modules.

pub mod basic;
