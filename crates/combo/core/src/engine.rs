//! Resolution orchestrator.
//!
//! [`ComboEngine`] owns the registry, the effect cache and the tick counter.
//! The host drives it with two calls:
//!
//! 1. [`ComboEngine::begin_tick`] once per update loop iteration, before any
//!    resolution. This is the only place engine state is written.
//! 2. [`ComboEngine::resolve`] once per attempted action. It never fails and
//!    never panics past its boundary: any fault returns the pressed action.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, error, warn};

use crate::config::EngineConfig;
use crate::context::ComboContext;
use crate::env::{ComboEnv, ConfigOracle, OracleError};
use crate::error::{ComboError, ErrorKind};
use crate::ids::{ActionId, Tick};
use crate::opener::OpenerState;
use crate::registry::{RegistryError, RuleRegistry};
use crate::status::{CacheStats, EffectCache};

/// Failures observed while resolving one action.
///
/// Only [`ComboEngine::try_resolve`] returns these; [`ComboEngine::resolve`]
/// logs them and returns the pressed action instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("host provider panicked: {0}")]
    ProviderPanic(String),
}

impl ComboError for ResolveError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Oracle(err) => err.kind(),
            Self::ProviderPanic(_) => ErrorKind::ProviderFault,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(err) => err.error_code(),
            Self::ProviderPanic(_) => "RESOLVE_PROVIDER_PANIC",
        }
    }
}

pub struct ComboEngine {
    registry: RuleRegistry,
    cache: EffectCache,
    settings: EngineConfig,
    tick: Tick,
}

impl ComboEngine {
    pub fn new(registry: RuleRegistry, settings: EngineConfig) -> Self {
        Self {
            registry,
            cache: EffectCache::new(),
            settings,
            tick: Tick::ZERO,
        }
    }

    // ========================================================================
    // Tick boundary
    // ========================================================================

    /// Starts a new tick: clears the effect cache and lets every opener see
    /// combat transitions and the host's latest executed action.
    pub fn begin_tick(&mut self, env: ComboEnv<'_>) -> Tick {
        self.tick = self.tick.next();
        self.cache.begin_tick(self.tick);

        if env.state().is_ok() {
            let ctx = self.context(env);
            let openers = self.registry.openers();
            let observed = catch_unwind(AssertUnwindSafe(|| openers.observe(&ctx)));
            if let Err(payload) = observed {
                error!(
                    target: "combo::engine",
                    tick = self.tick.0,
                    panic = %panic_message(payload.as_ref()),
                    "host provider panicked at tick boundary"
                );
            }
        }
        self.tick
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolves the pressed action.
    ///
    /// Never fails: errors and provider panics are logged and the pressed
    /// action is returned unchanged.
    pub fn resolve(&self, action: ActionId, env: ComboEnv<'_>) -> ActionId {
        let outcome = catch_unwind(AssertUnwindSafe(|| self.try_resolve(action, env)))
            .unwrap_or_else(|payload| {
                Err(ResolveError::ProviderPanic(panic_message(payload.as_ref())))
            });

        match outcome {
            Ok(resolved) => resolved,
            Err(err) => {
                self.report(action, &err);
                action
            }
        }
    }

    /// Resolves the pressed action, surfacing failures to the caller.
    ///
    /// Rule sets registered for `action` run in `(stage, registration)`
    /// order. The first one that replaces the action decides.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Oracle`] when the state oracle is missing or
    /// the player is not loaded.
    pub fn try_resolve(&self, action: ActionId, env: ComboEnv<'_>) -> Result<ActionId, ResolveError> {
        if action.is_none() || !self.registry.is_triggered(action) {
            return Ok(action);
        }
        let state = env.state()?;
        if state.player().is_none() {
            return Err(OracleError::PlayerUnavailable.into());
        }

        let ctx = self.context(env);
        for rule in self.registry.rules_for(action) {
            let resolved = rule.resolve(action, &ctx);
            if resolved != action {
                debug!(
                    target: "combo::engine",
                    tick = self.tick.0,
                    rule = rule.name(),
                    %action,
                    %resolved,
                    "resolved"
                );
                return Ok(resolved);
            }
        }
        Ok(action)
    }

    fn report(&self, action: ActionId, err: &ResolveError) {
        match err.kind() {
            ErrorKind::ProviderFault => error!(
                target: "combo::engine",
                tick = self.tick.0,
                %action,
                code = err.error_code(),
                error = %err,
                "resolution fault, passing action through"
            ),
            ErrorKind::Configuration => warn!(
                target: "combo::engine",
                %action,
                code = err.error_code(),
                error = %err,
                "passing action through"
            ),
            ErrorKind::MissingState | ErrorKind::SequenceDesync => debug!(
                target: "combo::engine",
                %action,
                code = err.error_code(),
                "passing action through"
            ),
        }
    }

    fn context<'a>(&'a self, env: ComboEnv<'a>) -> ComboContext<'a> {
        ComboContext::new(
            env,
            &self.cache,
            self.registry.tiers(),
            self.registry.openers(),
            &self.settings,
        )
    }

    // ========================================================================
    // Configuration and introspection
    // ========================================================================

    /// Re-reads which rule sets are enabled.
    ///
    /// # Errors
    ///
    /// See [`RuleRegistry::reconfigure`].
    pub fn reconfigure(&mut self, config: &dyn ConfigOracle) -> Result<(), RegistryError> {
        self.registry.reconfigure(config)
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &EngineConfig {
        &self.settings
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// State of the opener named `name`, if one is registered.
    pub fn opener_state(&self, name: &str) -> Option<OpenerState> {
        self.registry
            .openers()
            .iter()
            .find(|(_, opener)| opener.script().name == name)
            .map(|(_, opener)| opener.state())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
