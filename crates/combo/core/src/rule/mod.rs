//! Rule sets: the unit of registration and dispatch.
//!
//! A rule set claims one or more trigger actions and, when the player presses
//! one of them, either replaces it or lets it through unchanged. Most content
//! is written as a [`Cascade`] of guarded branches; rotations whose logic does
//! not fit a flat table implement [`RuleSet`] directly.
mod cascade;

pub use cascade::{Branch, Cascade, Target};

use crate::context::ComboContext;
use crate::env::Toggle;
use crate::ids::ActionId;

/// Resolution phase of a rule set.
///
/// When several rule sets claim the same trigger, earlier stages run first.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RuleStage {
    /// Survival: mitigation and emergency heals.
    Defensive,
    /// Interrupts, role utility, cleanses.
    Utility,
    /// Resource spenders and sequence-critical buffs.
    Resource,
    /// Rotation filler.
    #[default]
    Filler,
}

/// Capability interface every rule set implements.
pub trait RuleSet: Send + Sync {
    /// Unique, stable name used in logs and registry diagnostics.
    fn name(&self) -> &'static str;

    /// Toggle that enables the whole rule set.
    fn toggle(&self) -> Toggle;

    fn stage(&self) -> RuleStage {
        RuleStage::Filler
    }

    /// Actions this rule set is dispatched on.
    fn triggers(&self) -> &[ActionId];

    /// Toggles of individual branches, for configuration surfaces.
    fn sub_toggles(&self) -> Vec<Toggle> {
        Vec::new()
    }

    /// Evaluates a matching action.
    ///
    /// # Returns
    ///
    /// `Some(action)` to replace the input, `None` to let it through.
    fn evaluate(&self, action: ActionId, ctx: &ComboContext<'_>) -> Option<ActionId>;

    fn matches(&self, action: ActionId) -> bool {
        self.triggers().contains(&action)
    }

    /// Resolves `action`, returning it unchanged when this rule set does not
    /// claim it or no branch applies.
    fn resolve(&self, action: ActionId, ctx: &ComboContext<'_>) -> ActionId {
        if !self.matches(action) {
            return action;
        }
        self.evaluate(action, ctx).unwrap_or(action)
    }
}
