//! clvecadd CLI library
//!
//! This library exposes internal modules for testing purposes.

pub mod args;
pub mod config;
pub mod exit;
pub mod output;
pub mod workload;
