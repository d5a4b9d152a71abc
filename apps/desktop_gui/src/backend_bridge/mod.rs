//! Backend worker: owns the tokio runtime and HTTP client off the UI thread.

pub mod commands;
pub mod runtime;
