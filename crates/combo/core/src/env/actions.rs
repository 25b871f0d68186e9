//! Action sheet oracle.
use crate::ids::ActionId;

/// Static per-action data from the game's action sheet.
pub trait ActionOracle: Send + Sync {
    fn action(&self, id: ActionId) -> Option<&ActionData>;

    /// Level at which the action is learned. Unknown actions are never learned.
    fn required_level(&self, id: ActionId) -> Option<u8> {
        self.action(id).map(|data| data.level)
    }

    fn attack_type(&self, id: ActionId) -> AttackType {
        self.action(id)
            .map(|data| data.kind)
            .unwrap_or(AttackType::Unknown)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionData {
    pub id: ActionId,
    pub name: String,
    pub level: u8,
    pub kind: AttackType,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub max_charges: u8,
    /// Range in yalms; 0 for self-targeted actions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: f32,
}

#[cfg(feature = "serde")]
const fn one() -> u8 {
    1
}

/// Which class of action this is; drives the blocking-status check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackType {
    Weaponskill,
    Spell,
    Ability,
    #[default]
    Unknown,
}
