use crate::ids::StatusId;
use crate::opener::AdvancePolicy;

/// Engine constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Window in seconds for "just used" history checks.
    pub just_used_window: f32,
    /// Seconds of combat an opener may wait on one step before it is abandoned.
    pub opener_step_timeout: f32,
    /// How opener cursors advance.
    pub opener_policy: AdvancePolicy,
    /// Statuses that block weaponskills, spells and abilities respectively.
    pub blocking: BlockingStatuses,
}

/// Status ids that prevent a whole class of actions from being used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockingStatuses {
    pub pacification: StatusId,
    pub silence: StatusId,
    pub amnesia: StatusId,
}

impl Default for BlockingStatuses {
    fn default() -> Self {
        Self {
            pacification: StatusId(6),
            silence: StatusId(7),
            amnesia: StatusId(5),
        }
    }
}

impl EngineConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of party members the host enumerates.
    pub const MAX_PARTY_MEMBERS: usize = 8;
    /// Maximum number of rule sets that may claim one trigger action.
    pub const MAX_RULES_PER_TRIGGER: usize = 8;
    /// Initial capacity of the per-tick status cache.
    pub const STATUS_CACHE_CAPACITY: usize = 64;

    // ===== weave timing (seconds) =====
    /// Estimated animation lock of an instant ability.
    pub const WEAVE_WINDOW: f32 = 0.6;
    /// A delayed (late) weave must start with at most this much GCD left.
    pub const DELAYED_WEAVE_START: f32 = 1.25;
    /// A delayed weave must leave at least this much GCD left.
    pub const DELAYED_WEAVE_END: f32 = 0.6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_JUST_USED_WINDOW: f32 = 3.0;
    pub const DEFAULT_OPENER_STEP_TIMEOUT: f32 = 8.0;

    pub fn new() -> Self {
        Self {
            just_used_window: Self::DEFAULT_JUST_USED_WINDOW,
            opener_step_timeout: Self::DEFAULT_OPENER_STEP_TIMEOUT,
            opener_policy: AdvancePolicy::default(),
            blocking: BlockingStatuses::default(),
        }
    }

    #[must_use]
    pub fn with_opener_policy(mut self, policy: AdvancePolicy) -> Self {
        self.opener_policy = policy;
        self
    }

    #[must_use]
    pub fn with_opener_step_timeout(mut self, seconds: f32) -> Self {
        self.opener_step_timeout = seconds;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
