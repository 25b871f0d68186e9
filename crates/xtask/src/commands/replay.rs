//! Replay a scenario through the runtime
//!
//! Loads a RON scenario, drives every frame through a fresh runtime and
//! prints one row per pressed button.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use combo_content::ActionCatalog;
use combo_core::ActionId;
use combo_runtime::{ReplayRow, Scenario};

/// Replay a RON scenario
#[derive(Parser)]
pub struct Replay {
    /// Scenario file (e.g., crates/runtime/scenarios/drk_opener.ron)
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Only print presses that did not resolve as expected
    #[arg(short, long)]
    failures_only: bool,

    /// Exit with an error if any press did not resolve as expected
    #[arg(long)]
    strict: bool,
}

impl Replay {
    pub fn execute(self) -> Result<()> {
        let scenario = Scenario::load(&self.path)
            .with_context(|| format!("Failed to load scenario {}", self.path.display()))?;
        let catalog = ActionCatalog::embedded().context("Failed to load action sheet")?;
        let report = scenario.replay().context("Replay failed")?;

        let title = if report.name.is_empty() {
            self.path.display().to_string()
        } else {
            report.name.clone()
        };
        println!("{} {}", style("Scenario:").bold().cyan(), title);
        println!("{} {}", style("Frames:").bold().cyan(), scenario.frames.len());
        println!();

        println!(
            "{:>5}  {:>5}  {:<24} {:<24} {}",
            style("frame").bold(),
            style("tick").bold(),
            style("pressed").bold(),
            style("resolved").bold(),
            style("expected").bold()
        );
        for row in &report.rows {
            if self.failures_only && row.passed() {
                continue;
            }
            print_row(row, &catalog);
        }

        if !report.openers.is_empty() {
            println!();
            println!("{}", style("Openers:").bold().yellow());
            for (name, state) in &report.openers {
                println!("  {name:<20} {state}");
            }
        }

        let failures = report.mismatches().count();
        println!();
        if failures == 0 {
            println!(
                "{} {} presses resolved as expected",
                style("✓").green(),
                report.rows.len()
            );
        } else {
            println!(
                "{} {} of {} presses did not resolve as expected",
                style("✗").red(),
                failures,
                report.rows.len()
            );
        }

        if self.strict {
            report.ensure_passed()?;
        }
        Ok(())
    }
}

fn print_row(row: &ReplayRow, catalog: &ActionCatalog) {
    let expected = match row.expected {
        None => style(String::from("-")).dim(),
        Some(action) if row.passed() => style(name_of(action, catalog)).green(),
        Some(action) => style(name_of(action, catalog)).red().bold(),
    };
    println!(
        "{:>5}  {:>5}  {:<24} {:<24} {}",
        row.frame,
        row.tick.0,
        name_of(row.pressed, catalog),
        name_of(row.resolved, catalog),
        expected
    );
}

fn name_of(action: ActionId, catalog: &ActionCatalog) -> String {
    catalog
        .get(action)
        .map(|data| data.name.clone())
        .unwrap_or_else(|| action.to_string())
}
