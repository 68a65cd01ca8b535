//! Trailing-edge debouncer for concurrent callers
//!
//! This crate provides:
//! - A cancel-and-reschedule debounce engine driven by a tokio runtime
//! - Simple (no argument) and payload (latest value wins) callbacks
//! - A per-round completion notification that re-arms after every firing
//! - TOML-backed configuration for the wait duration

pub mod callback;
pub mod completion;
pub mod config;
pub mod engine;
pub mod error;

// Re-exports
pub use callback::{Callback, Mode};
pub use completion::Completion;
pub use config::DebounceConfig;
pub use engine::Debouncer;
pub use error::{ConfigError, DebounceError};

/// Result type for debouncer operations
pub type Result<T> = std::result::Result<T, DebounceError>;
