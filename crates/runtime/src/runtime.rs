//! High-level runtime for hosts.
//!
//! [`ComboRuntime`] owns the engine and the provider bundle. A host calls
//! [`ComboRuntime::begin_tick`] at the top of its update loop and
//! [`ComboRuntime::resolve`] for every attempted action in that iteration.
use std::sync::Arc;

use tracing::info;

use combo_content::{ActionCatalog, ComboConfig, build_registry};
use combo_core::{
    ActionId, ActionOracle, ComboEngine, Job, OpenerState, ResolveError, StateOracle, Tick,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::providers::ProviderSet;

pub struct ComboRuntime {
    engine: ComboEngine,
    providers: ProviderSet,
    jobs: Vec<Job>,
}

impl ComboRuntime {
    /// Create a new runtime builder
    pub fn builder() -> ComboRuntimeBuilder {
        ComboRuntimeBuilder::new()
    }

    /// Starts a new tick. Call once per host loop iteration, before any
    /// [`ComboRuntime::resolve`].
    pub fn begin_tick(&mut self) -> Tick {
        let env = self.providers.env();
        self.engine.begin_tick(env)
    }

    /// Resolves a pressed action. Faults return `action` unchanged.
    pub fn resolve(&self, action: ActionId) -> ActionId {
        self.engine.resolve(action, self.providers.env())
    }

    /// Resolves a pressed action, surfacing failures.
    ///
    /// # Errors
    ///
    /// See [`ComboEngine::try_resolve`].
    pub fn try_resolve(&self, action: ActionId) -> std::result::Result<ActionId, ResolveError> {
        self.engine.try_resolve(action, self.providers.env())
    }

    /// Swaps in a new player configuration and re-reads which rule sets are
    /// enabled. Engine settings stay as they were at build time.
    ///
    /// # Errors
    ///
    /// Fails when the new configuration enables conflicting rule sets; the
    /// previous configuration stays in effect.
    pub fn reconfigure(&mut self, config: ComboConfig) -> Result<()> {
        self.engine.reconfigure(&config)?;
        self.providers.set_config(Arc::new(config));
        info!(target: "combo::runtime", rules = self.engine.registry().len(), "reconfigured");
        Ok(())
    }

    pub fn opener_state(&self, name: &str) -> Option<OpenerState> {
        self.engine.opener_state(name)
    }

    pub fn engine(&self) -> &ComboEngine {
        &self.engine
    }

    pub fn providers(&self) -> &ProviderSet {
        &self.providers
    }

    /// Jobs whose content is registered.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn tick(&self) -> Tick {
        self.engine.tick()
    }
}

/// Builder for [`ComboRuntime`].
///
/// Only the state provider is required. The action sheet defaults to the one
/// shipped with `combo-content`; the configuration is loaded as described by
/// [`RuntimeConfig`].
pub struct ComboRuntimeBuilder {
    config: RuntimeConfig,
    combo_config: Option<ComboConfig>,
    state: Option<Arc<dyn StateOracle>>,
    actions: Option<Arc<dyn ActionOracle>>,
}

impl ComboRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            combo_config: None,
            state: None,
            actions: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this player configuration instead of loading one.
    ///
    /// The runtime configuration's opener policy override still applies.
    pub fn combo_config(mut self, config: ComboConfig) -> Self {
        self.combo_config = Some(config);
        self
    }

    /// Set required state provider
    pub fn state(mut self, state: Arc<dyn StateOracle>) -> Self {
        self.state = Some(state);
        self
    }

    /// Use a custom action sheet.
    pub fn actions(mut self, actions: Arc<dyn ActionOracle>) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn jobs(mut self, jobs: impl IntoIterator<Item = Job>) -> Self {
        self.config.jobs = jobs.into_iter().collect();
        self
    }

    /// Build the runtime
    ///
    /// # Errors
    ///
    /// Fails without a state provider, when the configuration or action
    /// sheet cannot be loaded, or when the enabled rule sets conflict.
    pub fn build(self) -> Result<ComboRuntime> {
        let state = self.state.ok_or(RuntimeError::MissingState)?;

        let mut combo_config = match self.combo_config {
            Some(config) => config,
            None => self.config.load_combo_config()?,
        };
        if let Some(policy) = self.config.opener_policy {
            combo_config.engine.opener_policy = policy;
        }

        let actions: Arc<dyn ActionOracle> = match self.actions {
            Some(actions) => actions,
            None => Arc::new(ActionCatalog::embedded()?),
        };

        let jobs = self.config.jobs();
        let registry = build_registry(jobs.iter().copied(), &combo_config)?;
        let engine = ComboEngine::new(registry, combo_config.engine.clone());

        info!(
            target: "combo::runtime",
            jobs = ?jobs,
            rules = engine.registry().len(),
            policy = %combo_config.engine.opener_policy,
            "runtime built"
        );

        Ok(ComboRuntime {
            engine,
            providers: ProviderSet::new(state, actions, Arc::new(combo_config)),
            jobs,
        })
    }
}
