//! Player configuration loader.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, bail};
use combo_core::{ConfigOracle, EngineConfig, OptionKey, OptionValue, Toggle};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const DEFAULT_CONFIG: &str = include_str!("../../data/config/default.toml");

/// Toggle states and option values, as edited by the player.
///
/// ```toml
/// enabled = ["drk.st.adv", "drk.st.adv.opener"]
///
/// [options]
/// "drk.mit.living_dead.health" = 15
///
/// [engine]
/// opener_policy = "on_confirm"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboConfig {
    pub enabled: BTreeSet<String>,
    pub options: BTreeMap<String, OptionValue>,
    pub engine: EngineConfig,
}

impl ComboConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration shipped with the crate.
    pub fn embedded_default() -> LoadResult<Self> {
        toml::from_str(DEFAULT_CONFIG).context("failed to parse embedded default config")
    }

    pub fn enable(&mut self, toggle: Toggle) -> &mut Self {
        self.enabled.insert(toggle.name().to_owned());
        self
    }

    pub fn enable_all(&mut self, toggles: impl IntoIterator<Item = Toggle>) -> &mut Self {
        self.enabled
            .extend(toggles.into_iter().map(|t| t.name().to_owned()));
        self
    }

    pub fn disable(&mut self, toggle: Toggle) -> &mut Self {
        self.enabled.remove(toggle.name());
        self
    }

    pub fn set(&mut self, key: OptionKey, value: OptionValue) -> &mut Self {
        self.options.insert(key.0.to_owned(), value);
        self
    }
}

impl ConfigOracle for ComboConfig {
    fn is_enabled(&self, toggle: Toggle) -> bool {
        self.enabled.contains(toggle.name())
    }

    fn option(&self, key: OptionKey) -> Option<OptionValue> {
        self.options.get(key.0).copied()
    }
}

/// Loader for [`ComboConfig`] files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads a configuration file, choosing the format by extension.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a `.toml` or `.ron` file
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, has another extension, or does
    /// not parse.
    pub fn load(path: &Path) -> LoadResult<ComboConfig> {
        let content = read_file(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content)
                .with_context(|| format!("failed to parse config {}", path.display())),
            Some("ron") => Self::from_ron(&content)
                .with_context(|| format!("failed to parse config {}", path.display())),
            _ => bail!("unsupported config format: {}", path.display()),
        }
    }

    pub fn from_toml(content: &str) -> LoadResult<ComboConfig> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_ron(content: &str) -> LoadResult<ComboConfig> {
        Ok(ron::from_str(content)?)
    }
}
