//! Runtime configuration read from the process environment.
//!
//! | Variable | Meaning |
//! |---|---|
//! | `COMBO_CONFIG_PATH` | Player configuration file (`.toml` or `.ron`) |
//! | `COMBO_OPENER_POLICY` | `confirm` or `issue`, overrides the file |
//! | `COMBO_JOBS` | Comma separated jobs to register (`brd,drk`) |
//!
//! Without `COMBO_CONFIG_PATH` the runtime looks for `combo.toml` in the
//! platform config directory and falls back to the configuration shipped
//! with `combo-content`.
use std::path::{Path, PathBuf};
use std::str::FromStr;

use combo_content::{ComboConfig, ConfigLoader};
use combo_core::{AdvancePolicy, Job};
use directories::ProjectDirs;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::error::{Result, RuntimeError};

pub const CONFIG_PATH_VAR: &str = "COMBO_CONFIG_PATH";
pub const OPENER_POLICY_VAR: &str = "COMBO_OPENER_POLICY";
pub const JOBS_VAR: &str = "COMBO_JOBS";

const CONFIG_FILE_NAME: &str = "combo.toml";

/// Host-level settings that sit above the player configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuntimeConfig {
    /// Explicit configuration file. `None` means the default location.
    pub config_path: Option<PathBuf>,
    /// Opener policy override; `None` keeps the file's setting.
    pub opener_policy: Option<AdvancePolicy>,
    /// Jobs whose content is registered. Empty means every job.
    pub jobs: Vec<Job>,
}

impl RuntimeConfig {
    /// Reads the `COMBO_*` variables from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::InvalidEnv`] when a variable is set to a value
    /// that does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`RuntimeConfig::from_env`], reading variables through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup(CONFIG_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            config.config_path = Some(PathBuf::from(path));
        }

        if let Some(value) = lookup(OPENER_POLICY_VAR).filter(|v| !v.trim().is_empty()) {
            let policy = AdvancePolicy::from_str(value.trim()).map_err(|_| {
                RuntimeError::InvalidEnv {
                    var: OPENER_POLICY_VAR,
                    value: value.clone(),
                }
            })?;
            config.opener_policy = Some(policy);
        }

        if let Some(value) = lookup(JOBS_VAR) {
            config.jobs = parse_jobs(&value).ok_or_else(|| RuntimeError::InvalidEnv {
                var: JOBS_VAR,
                value: value.clone(),
            })?;
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_opener_policy(mut self, policy: AdvancePolicy) -> Self {
        self.opener_policy = Some(policy);
        self
    }

    #[must_use]
    pub fn with_jobs(mut self, jobs: impl IntoIterator<Item = Job>) -> Self {
        self.jobs = jobs.into_iter().collect();
        self
    }

    /// Jobs to register, every job when none were named.
    pub fn jobs(&self) -> Vec<Job> {
        if self.jobs.is_empty() {
            Job::iter().collect()
        } else {
            self.jobs.clone()
        }
    }

    /// Loads the player configuration and applies the overrides.
    ///
    /// # Errors
    ///
    /// An explicit path that cannot be loaded is an error. A missing file at
    /// the default location is not: the embedded default is used instead.
    pub fn load_combo_config(&self) -> Result<ComboConfig> {
        let mut config = match &self.config_path {
            Some(path) => {
                info!(target: "combo::runtime", path = %path.display(), "loading configuration");
                ConfigLoader::load(path)?
            }
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => {
                    info!(target: "combo::runtime", path = %path.display(), "loading configuration");
                    ConfigLoader::load(&path)?
                }
                None => {
                    debug!(target: "combo::runtime", "using embedded default configuration");
                    ComboConfig::embedded_default()?
                }
            },
        };

        if let Some(policy) = self.opener_policy {
            config.engine.opener_policy = policy;
        }
        Ok(config)
    }
}

/// `combo.toml` in the platform config directory, if one can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "combo").map(|dirs| config_file_in(dirs.config_dir()))
}

fn config_file_in(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Parses `brd, drk` style job lists. Blank entries are ignored.
fn parse_jobs(value: &str) -> Option<Vec<Job>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| Job::from_str(name).ok())
        .collect()
}
