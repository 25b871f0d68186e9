//! Identifier newtypes shared by every layer of the engine.
//!
//! Identifiers are plain `Copy` values so they can be used as hash keys,
//! stored in fixed-capacity arrays and compared without allocation.

use core::fmt;

/// Opaque identifier of a base or concrete action.
///
/// The same type is used as the dispatch key of a rule set (the button the
/// player pressed) and as the resolved result (the action to execute).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionId(pub u32);

impl ActionId {
    /// Placeholder used by the host when no action applies.
    pub const NONE: Self = Self(0);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

/// Identifier of a status effect (buff or debuff).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusId(pub u16);

impl StatusId {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status#{}", self.0)
    }
}

/// Identity of a live game object (player, party member, enemy).
///
/// Object ids are only meaningful for the tick in which they were read; an
/// object can despawn between enumeration and query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// Sentinel the host uses for "no object".
    pub const INVALID: Self = Self(0xE000_0000);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0 && self.0 != 0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{:X}", self.0)
    }
}

/// Monotonic counter of host update-loop iterations.
///
/// The tick is the engine's unit of consistency: every cached read is valid
/// for exactly one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Player job. Determines which gauge the host exposes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Job {
    #[strum(to_string = "bard", serialize = "brd")]
    Bard,
    #[strum(to_string = "dark_knight", serialize = "drk")]
    DarkKnight,
    #[strum(to_string = "scholar", serialize = "sch")]
    Scholar,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn job_parses_abbreviation_and_full_name() {
        assert_eq!(Job::from_str("BRD").unwrap(), Job::Bard);
        assert_eq!(Job::from_str("dark_knight").unwrap(), Job::DarkKnight);
        assert_eq!(Job::Scholar.to_string(), "scholar");
    }

    #[test]
    fn invalid_object_sentinel_is_not_valid() {
        assert!(!ObjectId::INVALID.is_valid());
        assert!(!ObjectId::new(0).is_valid());
        assert!(ObjectId::new(0x1000_0001).is_valid());
    }
}
