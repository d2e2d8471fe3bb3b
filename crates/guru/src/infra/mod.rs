//! Infrastructure adapters for Acme, configuration, and the analysis tool.

pub mod acme;
pub mod config;
pub mod tool;
