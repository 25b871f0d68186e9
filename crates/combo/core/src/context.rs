//! Read-only evaluation context handed to every guard and rule set.
//!
//! A [`ComboContext`] is built once per resolution call. It borrows the host
//! oracles, the tick's [`EffectCache`] and the registry's static tables, and
//! captures the values nearly every guard needs (player id, level, job) so
//! they are read from the host only once.

use tracing::debug;

use crate::config::EngineConfig;
use crate::env::{ActionOracle, ComboEnv, ConfigOracle, OracleError, StateOracle};
use crate::ids::{Job, ObjectId, Tick};
use crate::opener::{Opener, OpenerBank, OpenerHandle};
use crate::status::EffectCache;
use crate::tier::UpgradeTable;

/// Everything a guard can look at during one resolution call.
#[derive(Clone, Copy)]
pub struct ComboContext<'a> {
    env: ComboEnv<'a>,
    cache: &'a EffectCache,
    tiers: &'a UpgradeTable,
    openers: &'a OpenerBank,
    settings: &'a EngineConfig,
    player: Option<ObjectId>,
    job: Option<Job>,
    level: u8,
}

impl<'a> ComboContext<'a> {
    pub fn new(
        env: ComboEnv<'a>,
        cache: &'a EffectCache,
        tiers: &'a UpgradeTable,
        openers: &'a OpenerBank,
        settings: &'a EngineConfig,
    ) -> Self {
        let (player, job, level) = match env.state() {
            Ok(state) => {
                let level = state.level().unwrap_or_else(|err| {
                    debug!(target: "combo::context", error = %err, "level unavailable");
                    0
                });
                (state.player(), state.job(), level)
            }
            Err(_) => (None, None, 0),
        };

        Self {
            env,
            cache,
            tiers,
            openers,
            settings,
            player,
            job,
            level,
        }
    }

    pub fn env(&self) -> ComboEnv<'a> {
        self.env
    }

    /// Returns the StateOracle.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::StateNotAvailable` if the host supplied none.
    pub fn state(&self) -> Result<&'a dyn StateOracle, OracleError> {
        self.env.state()
    }

    pub fn actions(&self) -> Result<&'a dyn ActionOracle, OracleError> {
        self.env.actions()
    }

    pub fn config(&self) -> Result<&'a dyn ConfigOracle, OracleError> {
        self.env.config()
    }

    pub fn cache(&self) -> &'a EffectCache {
        self.cache
    }

    pub fn tiers(&self) -> &'a UpgradeTable {
        self.tiers
    }

    pub fn settings(&self) -> &'a EngineConfig {
        self.settings
    }

    pub fn tick(&self) -> Tick {
        self.cache.tick()
    }

    pub fn player(&self) -> Option<ObjectId> {
        self.player
    }

    pub fn job(&self) -> Option<Job> {
        self.job
    }

    /// Player level, 0 when the host could not report it.
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn opener(&self, handle: OpenerHandle) -> Option<&'a Opener> {
        self.openers.get(handle)
    }
}
