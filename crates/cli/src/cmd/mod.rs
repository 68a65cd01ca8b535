//! CLI command implementations

pub mod config;
pub mod count;
pub mod lines;

/// What a debounced stdin session did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Lines read (one signal each)
    pub signals: u64,
    /// Rounds whose callback ran
    pub settled: u64,
}
