//! Per-job rule sets, openers and upgrade families.

pub mod bard;
pub mod dark_knight;
pub mod role;
pub mod scholar;

use combo_core::{ConfigOracle, Job, RegistryBuilder, RegistryError, RuleRegistry};
use strum::IntoEnumIterator;

/// Registers one job's content.
pub fn register(job: Job, builder: &mut RegistryBuilder) {
    match job {
        Job::Bard => bard::register(builder),
        Job::DarkKnight => dark_knight::register(builder),
        Job::Scholar => scholar::register(builder),
    }
}

/// Registers every job's content.
pub fn register_all(builder: &mut RegistryBuilder) {
    for job in Job::iter() {
        register(job, builder);
    }
}

/// Builds a registry holding the content of `jobs`.
///
/// # Errors
///
/// Propagates [`RegistryError`] from [`RegistryBuilder::build`].
pub fn build_registry(
    jobs: impl IntoIterator<Item = Job>,
    config: &dyn ConfigOracle,
) -> Result<RuleRegistry, RegistryError> {
    let mut builder = RegistryBuilder::new();
    for job in jobs {
        register(job, &mut builder);
    }
    builder.build(config)
}
