//! Level-based action upgrades.
//!
//! Many actions are replaced by a stronger version once the player reaches a
//! level (Heavy Shot becomes Burst Shot at 76). Rule sets name the family's
//! base action and ask [`UpgradeTable::upgrade_tier`] which member applies.

use std::collections::HashMap;

use crate::ids::ActionId;

/// One upgrade chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionFamily {
    pub name: &'static str,
    pub base: ActionId,
    /// `(min_level, action)` pairs in ascending level order.
    pub tiers: &'static [(u8, ActionId)],
}

impl ActionFamily {
    pub const fn new(name: &'static str, base: ActionId, tiers: &'static [(u8, ActionId)]) -> Self {
        Self { name, base, tiers }
    }

    /// Highest tier available at `level`, or the base below every tier.
    pub fn at_level(&self, level: u8) -> ActionId {
        self.tiers
            .iter()
            .rev()
            .find(|(min_level, _)| *min_level <= level)
            .map(|(_, action)| *action)
            .unwrap_or(self.base)
    }
}

/// Total mapping from (family, level) to the concrete action.
#[derive(Clone, Debug, Default)]
pub struct UpgradeTable {
    families: HashMap<ActionId, ActionFamily>,
}

impl UpgradeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a family. A later family with the same base replaces the
    /// earlier one.
    pub fn insert(&mut self, family: ActionFamily) -> Option<ActionFamily> {
        self.families.insert(family.base, family)
    }

    pub fn family(&self, base: ActionId) -> Option<&ActionFamily> {
        self.families.get(&base)
    }

    /// Resolves `base` to its tier at `level`. Actions that belong to no
    /// family map to themselves.
    pub fn upgrade_tier(&self, base: ActionId, level: u8) -> ActionId {
        self.families
            .get(&base)
            .map(|family| family.at_level(level))
            .unwrap_or(base)
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}
