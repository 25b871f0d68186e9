//! Configuration oracle: toggles and typed options.
//!
//! Configuration is owned by the host's UI and is read-only to the engine.
//! Toggles and option keys are dotted names (`"brd.st.advanced"`) so content
//! crates can declare them as constants and config files can list them.

use core::fmt;

use super::ContentFlags;

/// Named boolean feature flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Toggle(pub &'static str);

impl Toggle {
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Named numeric or enum option (thresholds, modes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionKey(pub &'static str);

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl OptionValue {
    pub fn as_int(self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(v),
            Self::Bool(b) => Some(i64::from(b)),
            Self::Float(_) => None,
        }
    }

    pub fn as_float(self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(v),
            Self::Int(v) => Some(v as f64),
            Self::Bool(_) => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(b),
            Self::Int(v) => Some(v != 0),
            Self::Float(_) => None,
        }
    }
}

/// Read-only view of the player's configuration.
pub trait ConfigOracle: Send + Sync {
    fn is_enabled(&self, toggle: Toggle) -> bool;

    fn option(&self, key: OptionKey) -> Option<OptionValue>;
}

/// Whether a behaviour is restricted to boss targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BossAvoidance {
    /// Use against any target.
    #[default]
    Off,
    /// Skip when the current target is a boss.
    On,
}

impl BossAvoidance {
    pub fn from_option(value: Option<OptionValue>) -> Self {
        match value.and_then(OptionValue::as_int) {
            Some(1) => Self::On,
            _ => Self::Off,
        }
    }
}

/// Whether a party-wide behaviour requires being in a party.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PartyRequirement {
    #[default]
    No,
    Yes,
}

impl PartyRequirement {
    pub fn from_option(value: Option<OptionValue>) -> Self {
        match value.and_then(OptionValue::as_int) {
            Some(1) => Self::Yes,
            _ => Self::No,
        }
    }
}

/// Decodes a content-difficulty option stored as raw bits.
pub fn content_flags_option(value: Option<OptionValue>) -> ContentFlags {
    value
        .and_then(OptionValue::as_int)
        .and_then(|bits| u16::try_from(bits).ok())
        .map(ContentFlags::from_bits_truncate)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_options_fall_back_to_default() {
        assert_eq!(BossAvoidance::from_option(None), BossAvoidance::Off);
        assert_eq!(
            BossAvoidance::from_option(Some(OptionValue::Int(1))),
            BossAvoidance::On
        );
        assert_eq!(
            PartyRequirement::from_option(Some(OptionValue::Float(1.0))),
            PartyRequirement::No
        );
    }

    #[test]
    fn content_flags_ignore_out_of_range_bits() {
        assert_eq!(
            content_flags_option(Some(OptionValue::Int(-1))),
            ContentFlags::empty()
        );
        assert_eq!(
            content_flags_option(Some(OptionValue::Int(ContentFlags::SAVAGE.bits() as i64))),
            ContentFlags::SAVAGE
        );
    }
}
