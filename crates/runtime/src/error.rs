//! Errors surfaced by the runtime API.
//!
//! Resolution itself never fails; these cover assembling a runtime and
//! driving replay scenarios.
use std::path::PathBuf;

use combo_core::{ActionId, ComboError, ErrorKind, RegistryError, ResolveError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a state provider before building")]
    MissingState,

    #[error("environment variable {var} has invalid value `{value}`")]
    InvalidEnv { var: &'static str, value: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Load(#[from] anyhow::Error),

    #[error("failed to read scenario {}", path.display())]
    ScenarioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario {}", path.display())]
    ScenarioParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("unknown action `{0}` in scenario")]
    UnknownAction(String),

    #[error("frame {frame}: pressing {pressed} resolved to {actual}, expected {expected}")]
    Mismatch {
        frame: usize,
        pressed: ActionId,
        expected: ActionId,
        actual: ActionId,
    },
}

impl ComboError for RuntimeError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Registry(err) => err.kind(),
            Self::Resolve(err) => err.kind(),
            Self::Mismatch { .. } => ErrorKind::SequenceDesync,
            Self::MissingState => ErrorKind::ProviderFault,
            Self::InvalidEnv { .. }
            | Self::Load(_)
            | Self::ScenarioRead { .. }
            | Self::ScenarioParse { .. }
            | Self::UnknownAction(_) => ErrorKind::Configuration,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingState => "RUNTIME_MISSING_STATE",
            Self::InvalidEnv { .. } => "RUNTIME_INVALID_ENV",
            Self::Registry(err) => err.error_code(),
            Self::Resolve(err) => err.error_code(),
            Self::Load(_) => "RUNTIME_LOAD_FAILED",
            Self::ScenarioRead { .. } => "RUNTIME_SCENARIO_READ",
            Self::ScenarioParse { .. } => "RUNTIME_SCENARIO_PARSE",
            Self::UnknownAction(_) => "RUNTIME_UNKNOWN_ACTION",
            Self::Mismatch { .. } => "RUNTIME_REPLAY_MISMATCH",
        }
    }
}
