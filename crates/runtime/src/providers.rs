//! Bundle of the three host providers.
//!
//! The engine borrows them through a [`ComboEnv`] built fresh for each call;
//! the set itself owns shared handles so hosts can keep their own references
//! to the state they mutate.
use std::sync::Arc;

use combo_core::{ActionOracle, ComboEnv, ConfigOracle, Env, StateOracle};

#[derive(Clone)]
pub struct ProviderSet {
    pub(crate) state: Arc<dyn StateOracle>,
    pub(crate) actions: Arc<dyn ActionOracle>,
    pub(crate) config: Arc<dyn ConfigOracle>,
}

impl ProviderSet {
    pub fn new(
        state: Arc<dyn StateOracle>,
        actions: Arc<dyn ActionOracle>,
        config: Arc<dyn ConfigOracle>,
    ) -> Self {
        Self {
            state,
            actions,
            config,
        }
    }

    /// Environment borrowing every provider.
    pub fn env(&self) -> ComboEnv<'_> {
        let state: &dyn StateOracle = self.state.as_ref();
        let actions: &dyn ActionOracle = self.actions.as_ref();
        let config: &dyn ConfigOracle = self.config.as_ref();
        Env::with_all(state, actions, config)
    }

    pub fn state(&self) -> &dyn StateOracle {
        self.state.as_ref()
    }

    pub fn actions(&self) -> &dyn ActionOracle {
        self.actions.as_ref()
    }

    pub fn config(&self) -> &dyn ConfigOracle {
        self.config.as_ref()
    }

    pub(crate) fn set_config(&mut self, config: Arc<dyn ConfigOracle>) {
        self.config = config;
    }
}
