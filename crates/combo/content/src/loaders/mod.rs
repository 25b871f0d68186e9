//! Content loaders for reading combo data from files.
//!
//! The action sheet ships embedded in the crate; configuration is read from
//! TOML or RON files supplied by the host.

pub mod actions;
pub mod config;

pub use actions::ActionCatalog;
pub use config::{ComboConfig, ConfigLoader};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
