//! Data-driven combo content and loaders.
//!
//! This crate houses the job content the engine resolves against and
//! provides loaders for RON/TOML data files:
//! - Bard, Dark Knight and Scholar rule sets, openers and upgrade families
//! - Role and variant action helpers shared across jobs
//! - The action sheet (data-driven via RON, embedded)
//! - Player configuration (data-driven via TOML or RON)
//!
//! Content only registers with a [`RegistryBuilder`](combo_core::RegistryBuilder);
//! nothing here holds global state.

pub mod jobs;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use jobs::{build_registry, register, register_all};

#[cfg(feature = "loaders")]
pub use loaders::{ActionCatalog, ComboConfig, ConfigLoader, LoadResult};
