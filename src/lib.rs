// ABOUTME: Library root for kegd - deployment strategy model, parser, and client boundary.
// ABOUTME: The CLI binary is in main.rs.

pub mod config;
pub mod error;
pub mod kube;
pub mod output;
pub mod strategy;
pub mod types;
