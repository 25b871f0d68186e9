//! Oracle access errors.
//!
//! Errors related to oracle availability and host state reads.

use crate::error::{ComboError, ErrorKind};
use crate::ids::{ActionId, Job, ObjectId};

/// Errors that occur when reading from the host through an oracle.
///
/// None of these are allowed to reach the player: predicates turn them into
/// safe defaults and the resolution boundary turns them into a pass-through.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// StateOracle is not available in the environment.
    #[error("StateOracle not available")]
    StateNotAvailable,

    /// ActionOracle is not available in the environment.
    #[error("ActionOracle not available")]
    ActionsNotAvailable,

    /// ConfigOracle is not available in the environment.
    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    /// The local player is not loaded (zoning, cutscene, title screen).
    #[error("local player is not loaded")]
    PlayerUnavailable,

    /// The object despawned between enumeration and query.
    #[error("{0} no longer exists")]
    ObjectNotFound(ObjectId),

    /// The host has no gauge for the requested job.
    #[error("no gauge available for {0}")]
    GaugeUnavailable(Job),

    /// The host has no cooldown entry for the action.
    #[error("no cooldown data for {0}")]
    UnknownAction(ActionId),

    /// The host returned data that violates its own contract.
    #[error("host returned invalid data: {0}")]
    InvalidData(&'static str),
}

impl ComboError for OracleError {
    fn kind(&self) -> ErrorKind {
        use OracleError::*;
        match self {
            StateNotAvailable | ActionsNotAvailable | ConfigNotAvailable | InvalidData(_) => {
                ErrorKind::ProviderFault
            }
            PlayerUnavailable | ObjectNotFound(_) | GaugeUnavailable(_) | UnknownAction(_) => {
                ErrorKind::MissingState
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            StateNotAvailable => "ORACLE_STATE_NOT_AVAILABLE",
            ActionsNotAvailable => "ORACLE_ACTIONS_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            PlayerUnavailable => "ORACLE_PLAYER_UNAVAILABLE",
            ObjectNotFound(_) => "ORACLE_OBJECT_NOT_FOUND",
            GaugeUnavailable(_) => "ORACLE_GAUGE_UNAVAILABLE",
            UnknownAction(_) => "ORACLE_UNKNOWN_ACTION",
            InvalidData(_) => "ORACLE_INVALID_DATA",
        }
    }
}
