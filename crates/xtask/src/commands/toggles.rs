//! List registered toggles
//!
//! Builds the registry for one job (or every job) and shows each rule set
//! and toggle next to its state in the active configuration.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use strum::IntoEnumIterator;

use combo_content::{ComboConfig, ConfigLoader, build_registry};
use combo_core::{ConfigOracle, Job};
use combo_runtime::RuntimeConfig;

/// List the toggles a job registers
#[derive(Parser)]
pub struct Toggles {
    /// Job to inspect (e.g., brd, drk, scholar). Every job if omitted
    #[arg(value_name = "JOB", value_parser = parse_job)]
    job: Option<Job>,

    /// Configuration file (defaults to COMBO_CONFIG_PATH, then the platform
    /// config directory, then the shipped default)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only list toggles that are enabled
    #[arg(short, long)]
    enabled: bool,
}

impl Toggles {
    pub fn execute(self) -> Result<()> {
        let config = self.load_config()?;
        let jobs: Vec<Job> = match self.job {
            Some(job) => vec![job],
            None => Job::iter().collect(),
        };

        for job in jobs {
            let registry =
                build_registry([job], &config).with_context(|| format!("Failed to register {job}"))?;

            println!("{}", style(format!("=== {job} ===")).bold().green());

            println!("{}", style("Rule sets:").bold().yellow());
            for rule in registry.rules() {
                println!(
                    "  {} {:<28} {:<10} triggers {}",
                    mark(config.is_enabled(rule.toggle())),
                    rule.name(),
                    rule.stage(),
                    rule.triggers().len()
                );
            }

            println!("{}", style("Toggles:").bold().yellow());
            for toggle in registry.toggles() {
                let enabled = config.is_enabled(toggle);
                if self.enabled && !enabled {
                    continue;
                }
                println!("  {} {}", mark(enabled), toggle.name());
            }

            let openers: Vec<_> = registry.openers().iter().collect();
            if !openers.is_empty() {
                println!("{}", style("Openers:").bold().yellow());
                for (_, opener) in openers {
                    let script = opener.script();
                    println!(
                        "  {:<20} levels {}-{}, {} steps",
                        script.name,
                        script.min_level,
                        script.max_level,
                        script.actions.len()
                    );
                }
            }
            println!();
        }
        Ok(())
    }

    fn load_config(&self) -> Result<ComboConfig> {
        match &self.config {
            Some(path) => ConfigLoader::load(path),
            None => {
                let runtime = RuntimeConfig::from_env().context("Invalid COMBO_* environment")?;
                Ok(runtime.load_combo_config()?)
            }
        }
    }
}

fn parse_job(value: &str) -> Result<Job, String> {
    Job::from_str(value).map_err(|_| format!("unknown job `{value}` (expected brd, drk or sch)"))
}

fn mark(enabled: bool) -> console::StyledObject<&'static str> {
    if enabled {
        style("✓").green()
    } else {
        style("✗").dim()
    }
}
