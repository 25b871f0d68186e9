//! Host-facing runtime for the combo engine.
//!
//! This crate wires the pure engine in `combo-core` to the content in
//! `combo-content` and to a host's providers. Consumers embed
//! [`ComboRuntime`], call [`ComboRuntime::begin_tick`] once per update loop
//! iteration and [`ComboRuntime::resolve`] for every attempted action.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`config`] reads runtime settings from the environment
//! - [`providers`] bundles the State Provider, action sheet and configuration
//! - [`snapshot`] is a serializable in-memory State Provider
//! - [`scenario`] replays scripted frames through a runtime
pub mod config;
pub mod error;
pub mod providers;
pub mod runtime;
pub mod scenario;
pub mod snapshot;

pub use config::{RuntimeConfig, default_config_path};
pub use error::{Result, RuntimeError};
pub use providers::ProviderSet;
pub use runtime::{ComboRuntime, ComboRuntimeBuilder};
pub use scenario::{ActionRef, Frame, Press, ReplayReport, ReplayRow, Scenario};
pub use snapshot::{AppliedStatus, PLAYER, SnapshotPatch, SnapshotProvider, StateSnapshot};
