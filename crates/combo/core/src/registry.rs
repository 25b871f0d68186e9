//! Explicit rule registry: trigger action → ordered rule set handles.
//!
//! Content registers every rule set, opener and upgrade family with a
//! [`RegistryBuilder`]. [`RegistryBuilder::build`] reads the configuration
//! once, keeps only enabled rule sets, and indexes them by trigger in
//! `(stage, registration order)` order. The result is passed to the engine;
//! nothing is global.

use std::collections::{HashMap, HashSet};

use arrayvec::ArrayVec;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::env::{ConfigOracle, Toggle};
use crate::error::{ComboError, ErrorKind};
use crate::ids::ActionId;
use crate::opener::{OpenerBank, OpenerHandle, OpenerScript};
use crate::rule::RuleSet;
use crate::tier::{ActionFamily, UpgradeTable};

type Handles = ArrayVec<usize, { EngineConfig::MAX_RULES_PER_TRIGGER }>;

/// Errors raised while assembling a registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("rule set name `{0}` registered twice")]
    DuplicateName(&'static str),

    #[error("more than {limit} rule sets enabled for {trigger}")]
    TooManyRules { trigger: ActionId, limit: usize },

    #[error("opener `{name}` is invalid: {reason}")]
    InvalidOpener {
        name: &'static str,
        reason: &'static str,
    },
}

impl ComboError for RegistryError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) => "REGISTRY_DUPLICATE_NAME",
            Self::TooManyRules { .. } => "REGISTRY_TOO_MANY_RULES",
            Self::InvalidOpener { .. } => "REGISTRY_INVALID_OPENER",
        }
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    rules: Vec<Box<dyn RuleSet>>,
    openers: OpenerBank,
    tiers: UpgradeTable,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an opener and returns the handle rule sets use to drive it.
    pub fn opener(&mut self, script: OpenerScript) -> OpenerHandle {
        self.openers.insert(script)
    }

    pub fn tier(&mut self, family: ActionFamily) -> &mut Self {
        if let Some(previous) = self.tiers.insert(family) {
            debug!(target: "combo::registry", family = previous.name, "upgrade family replaced");
        }
        self
    }

    pub fn register<R>(&mut self, rule: R) -> &mut Self
    where
        R: RuleSet + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn register_boxed(&mut self, rule: Box<dyn RuleSet>) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn tiers(&self) -> &UpgradeTable {
        &self.tiers
    }

    /// Validates the registrations and indexes enabled rule sets.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] for duplicate rule names, malformed openers,
    /// or more enabled rule sets on one trigger than the index can hold.
    pub fn build(self, config: &dyn ConfigOracle) -> Result<RuleRegistry, RegistryError> {
        let mut names = HashSet::with_capacity(self.rules.len());
        for rule in &self.rules {
            if !names.insert(rule.name()) {
                return Err(RegistryError::DuplicateName(rule.name()));
            }
        }
        for (_, opener) in self.openers.iter() {
            validate_opener(opener.script())?;
        }

        let mut registry = RuleRegistry {
            rules: self.rules,
            openers: self.openers,
            tiers: self.tiers,
            index: HashMap::new(),
        };
        registry.reindex(config)?;
        Ok(registry)
    }
}

fn validate_opener(script: &OpenerScript) -> Result<(), RegistryError> {
    let reason = if script.is_empty() {
        "no steps"
    } else if script.min_level > script.max_level {
        "min level above max level"
    } else if script.actions.iter().any(|a| script.is_interjection(*a)) {
        "step listed as interjection"
    } else {
        return Ok(());
    };
    Err(RegistryError::InvalidOpener {
        name: script.name,
        reason,
    })
}

/// Immutable registry handed to the engine.
pub struct RuleRegistry {
    rules: Vec<Box<dyn RuleSet>>,
    openers: OpenerBank,
    tiers: UpgradeTable,
    index: HashMap<ActionId, Handles>,
}

impl RuleRegistry {
    /// Rebuilds the trigger index from a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TooManyRules`] if the new configuration
    /// enables too many rule sets for one trigger; the previous index is kept.
    pub fn reconfigure(&mut self, config: &dyn ConfigOracle) -> Result<(), RegistryError> {
        self.reindex(config)
    }

    fn reindex(&mut self, config: &dyn ConfigOracle) -> Result<(), RegistryError> {
        let mut index: HashMap<ActionId, Handles> = HashMap::new();

        for (handle, rule) in self.rules.iter().enumerate() {
            if !config.is_enabled(rule.toggle()) {
                continue;
            }
            let mut seen = HashSet::new();
            for &trigger in rule.triggers() {
                if !seen.insert(trigger) {
                    continue;
                }
                index
                    .entry(trigger)
                    .or_default()
                    .try_push(handle)
                    .map_err(|_| RegistryError::TooManyRules {
                        trigger,
                        limit: EngineConfig::MAX_RULES_PER_TRIGGER,
                    })?;
            }
        }

        for (trigger, handles) in index.iter_mut() {
            // Stable: registration order survives within a stage.
            handles.sort_by_key(|&handle| self.rules[handle].stage());
            self.warn_conflicts(*trigger, handles);
        }

        debug!(
            target: "combo::registry",
            rules = self.rules.len(),
            triggers = index.len(),
            "index built"
        );
        self.index = index;
        Ok(())
    }

    fn warn_conflicts(&self, trigger: ActionId, handles: &Handles) {
        for pair in handles.windows(2) {
            let (first, second) = (&self.rules[pair[0]], &self.rules[pair[1]]);
            if first.stage() == second.stage() {
                warn!(
                    target: "combo::registry",
                    %trigger,
                    stage = %first.stage(),
                    first = first.name(),
                    shadowed = second.name(),
                    "two enabled rule sets claim the same trigger; registration order decides"
                );
            }
        }
    }

    /// Enabled rule sets for `action`, in evaluation order.
    pub fn rules_for(&self, action: ActionId) -> impl Iterator<Item = &dyn RuleSet> + '_ {
        self.index
            .get(&action)
            .into_iter()
            .flatten()
            .map(|&handle| self.rules[handle].as_ref())
    }

    /// Every registered rule set, enabled or not.
    pub fn rules(&self) -> impl Iterator<Item = &dyn RuleSet> + '_ {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn rule(&self, name: &str) -> Option<&dyn RuleSet> {
        self.rules().find(|rule| rule.name() == name)
    }

    /// Every toggle any rule set reads, sorted.
    pub fn toggles(&self) -> Vec<Toggle> {
        let mut toggles: Vec<Toggle> = self
            .rules
            .iter()
            .flat_map(|rule| std::iter::once(rule.toggle()).chain(rule.sub_toggles()))
            .collect();
        toggles.sort_unstable();
        toggles.dedup();
        toggles
    }

    pub fn openers(&self) -> &OpenerBank {
        &self.openers
    }

    pub fn tiers(&self) -> &UpgradeTable {
        &self.tiers
    }

    pub fn is_triggered(&self, action: ActionId) -> bool {
        self.index.contains_key(&action)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
