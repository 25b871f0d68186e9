//! Traits describing the host the engine reads from.
//!
//! Oracles expose live combat state, the static action sheet and the player's
//! configuration. The [`Env`] aggregate bundles them so the engine can access
//! everything it needs without hard coupling to concrete implementations.
mod actions;
mod config;
mod content;
mod error;
mod gauge;
mod state;

pub use actions::{ActionData, ActionOracle, AttackType};
pub use config::{
    BossAvoidance, ConfigOracle, OptionKey, OptionValue, PartyRequirement, Toggle,
    content_flags_option,
};
pub use content::ContentFlags;
pub use error::OracleError;
pub use gauge::{BardGauge, DarkKnightGauge, JobGauge, ScholarGauge, Song};
pub use state::{
    ComboState, CooldownState, GcdTiming, PartyList, StateOracle, TargetInfo, UsedAction,
};

/// Aggregates the read-only oracles a resolution pass needs.
#[derive(Debug)]
pub struct Env<'a, S, A, C>
where
    S: StateOracle + ?Sized,
    A: ActionOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    state: Option<&'a S>,
    actions: Option<&'a A>,
    config: Option<&'a C>,
}

pub type ComboEnv<'a> = Env<'a, dyn StateOracle + 'a, dyn ActionOracle + 'a, dyn ConfigOracle + 'a>;

// Manual impls: a derive would demand `S: Clone` which trait objects are not.
impl<S, A, C> Clone for Env<'_, S, A, C>
where
    S: StateOracle + ?Sized,
    A: ActionOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, A, C> Copy for Env<'_, S, A, C>
where
    S: StateOracle + ?Sized,
    A: ActionOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
}

impl<'a, S, A, C> Env<'a, S, A, C>
where
    S: StateOracle + ?Sized,
    A: ActionOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    pub fn new(state: Option<&'a S>, actions: Option<&'a A>, config: Option<&'a C>) -> Self {
        Self {
            state,
            actions,
            config,
        }
    }

    pub fn with_all(state: &'a S, actions: &'a A, config: &'a C) -> Self {
        Self::new(Some(state), Some(actions), Some(config))
    }

    pub fn empty() -> Self {
        Self {
            state: None,
            actions: None,
            config: None,
        }
    }

    /// Returns the StateOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::StateNotAvailable` if no state oracle was provided.
    pub fn state(&self) -> Result<&'a S, OracleError> {
        self.state.ok_or(OracleError::StateNotAvailable)
    }

    /// Returns the ActionOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ActionsNotAvailable` if no action oracle was provided.
    pub fn actions(&self) -> Result<&'a A, OracleError> {
        self.actions.ok_or(OracleError::ActionsNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }
}

impl<'a, S, A, C> Env<'a, S, A, C>
where
    S: StateOracle + 'a,
    A: ActionOracle + 'a,
    C: ConfigOracle + 'a,
{
    /// Converts this environment into a trait-object based `ComboEnv`.
    pub fn into_combo_env(self) -> ComboEnv<'a> {
        let state: Option<&'a dyn StateOracle> = self.state.map(|state| state as _);
        let actions: Option<&'a dyn ActionOracle> = self.actions.map(|actions| actions as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        Env::new(state, actions, config)
    }
}
