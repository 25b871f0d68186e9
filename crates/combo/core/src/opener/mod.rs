//! Opener state machine: scripted action sequences at the start of a pull.
//!
//! An [`Opener`] walks an [`OpenerScript`] through three states:
//!
//! ```text
//! PreOpener ──arm──▶ InOpener ──complete / abort──▶ PostOpener(reason)
//!     ▲                                                   │
//!     └──────────────── combat end / next pull ───────────┘
//! ```
//!
//! # Arming
//!
//! In `PreOpener`, each [`Opener::step`] checks the level range, the job,
//! the job gauge and the script's precondition. If they all hold, the opener
//! arms and hands out the first step. A failed check while in combat ends the
//! opener for the whole pull. Out of combat it stays in `PreOpener`, since
//! the pull has not started yet.
//!
//! # Advancing
//!
//! The cursor only moves forward. Under [`AdvancePolicy::OnConfirm`] it moves
//! when the host's action history reports the expected step as executed.
//! Under [`AdvancePolicy::OnIssue`] it moves each time a step is handed out.
//!
//! # Aborting
//!
//! An armed opener ends early when:
//! - an execution is reported that is neither the expected step nor one of
//!   the script's interjections ([`OpenerEnd::Desync`])
//! - no progress was made for the step timeout ([`OpenerEnd::Stalled`])
//! - the level leaves the script's range, the job changes or the gauge
//!   becomes unreadable
//!
//! An aborted opener never resumes mid-pull.
mod bank;
mod machine;
mod script;

pub use bank::{OpenerBank, OpenerHandle};
pub use machine::Opener;
pub use script::OpenerScript;

use core::fmt;

use crate::ids::ActionId;

/// How an opener's cursor advances.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AdvancePolicy {
    /// Advance when the host confirms the expected step was executed.
    #[default]
    #[strum(to_string = "on_confirm", serialize = "confirm")]
    OnConfirm,
    /// Advance every time a step is handed out.
    #[strum(to_string = "on_issue", serialize = "issue")]
    OnIssue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenerState {
    PreOpener,
    InOpener,
    PostOpener(OpenerEnd),
}

impl OpenerState {
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::InOpener)
    }

    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::PostOpener(_))
    }
}

impl fmt::Display for OpenerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreOpener => f.write_str("pre_opener"),
            Self::InOpener => f.write_str("in_opener"),
            Self::PostOpener(end) => write!(f, "post_opener({end})"),
        }
    }
}

/// Why an opener reached `PostOpener`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OpenerEnd {
    #[error("completed")]
    Completed,

    #[error("precondition failed")]
    PreconditionFailed,

    #[error("level out of range")]
    LevelOutOfRange,

    #[error("job changed")]
    JobChanged,

    #[error("expected {expected}, host executed {actual}")]
    Desync {
        expected: ActionId,
        actual: ActionId,
    },

    #[error("no progress within step timeout")]
    Stalled,

    #[error("required state unavailable")]
    MissingState,
}

impl crate::error::ComboError for OpenerEnd {
    fn kind(&self) -> crate::error::ErrorKind {
        use crate::error::ErrorKind;
        match self {
            Self::Desync { .. } | Self::Stalled => ErrorKind::SequenceDesync,
            Self::Completed
            | Self::PreconditionFailed
            | Self::LevelOutOfRange
            | Self::JobChanged
            | Self::MissingState => ErrorKind::MissingState,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Completed => "OPENER_COMPLETED",
            Self::PreconditionFailed => "OPENER_PRECONDITION_FAILED",
            Self::LevelOutOfRange => "OPENER_LEVEL_OUT_OF_RANGE",
            Self::JobChanged => "OPENER_JOB_CHANGED",
            Self::Desync { .. } => "OPENER_DESYNC",
            Self::Stalled => "OPENER_STALLED",
            Self::MissingState => "OPENER_MISSING_STATE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn policy_accepts_short_names() {
        assert_eq!(AdvancePolicy::from_str("issue").unwrap(), AdvancePolicy::OnIssue);
        assert_eq!(
            AdvancePolicy::from_str("On_Confirm").unwrap(),
            AdvancePolicy::OnConfirm
        );
        assert!(AdvancePolicy::from_str("sometimes").is_err());
    }

    #[test]
    fn state_display_names_end_reason() {
        let state = OpenerState::PostOpener(OpenerEnd::Stalled);
        assert_eq!(state.to_string(), "post_opener(no progress within step timeout)");
    }
}
