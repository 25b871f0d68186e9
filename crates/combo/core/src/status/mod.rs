//! Status effects and the per-tick effect cache.
mod cache;

pub use cache::{CacheStats, EffectCache};

use crate::ids::{ObjectId, StatusId};

/// A status effect as observed on one target.
///
/// Values are ephemeral: they are rebuilt from the host on every uncached
/// query and never outlive the tick they were read in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub status: StatusId,
    /// Seconds left on the effect.
    pub remaining: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacks: u16,
    /// Object that applied the effect, if the host knows it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Option<ObjectId>,
}

impl StatusEffect {
    pub const fn new(status: StatusId, remaining: f32) -> Self {
        Self {
            status,
            remaining,
            stacks: 0,
            source: None,
        }
    }

    #[must_use]
    pub const fn with_stacks(mut self, stacks: u16) -> Self {
        self.stacks = stacks;
        self
    }

    #[must_use]
    pub const fn from_source(mut self, source: ObjectId) -> Self {
        self.source = Some(source);
        self
    }

    /// Reports a pending timer (negative remaining) as time left after the
    /// current animation lock resolves.
    #[must_use]
    pub fn normalized(mut self, animation_lock: f32) -> Self {
        if self.remaining < 0.0 {
            self.remaining = -self.remaining + animation_lock;
        }
        self
    }
}

/// Which sources a status lookup accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum OwnerFilter {
    /// Effects applied by anyone.
    Any,
    /// Effects applied by the local player only.
    #[default]
    Player,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_timer_is_reported_past_animation_lock() {
        let effect = StatusEffect::new(StatusId(125), -2.0).normalized(0.6);
        assert!((effect.remaining - 2.6).abs() < f32::EPSILON);

        let running = StatusEffect::new(StatusId(125), 10.0).normalized(0.6);
        assert_eq!(running.remaining, 10.0);
    }
}
