//! State Provider: point-in-time reads of live combat state.
//!
//! The host implements [`StateOracle`] over its own memory structures. Every
//! method is a pure query; the engine never mutates the host. Methods that can
//! fail because an object vanished or a structure is not loaded return
//! [`OracleError`]; the condition library maps those to safe defaults.

use arrayvec::ArrayVec;

use super::{ContentFlags, JobGauge, OracleError};
use crate::config::EngineConfig;
use crate::ids::{ActionId, Job, ObjectId, StatusId};
use crate::status::StatusEffect;

/// Party members the host enumerated this tick, player included.
pub type PartyList = ArrayVec<ObjectId, { EngineConfig::MAX_PARTY_MEMBERS }>;

/// Read-only view of live combat state.
pub trait StateOracle: Send + Sync {
    // ========================================================================
    // Player
    // ========================================================================

    /// Object id of the local player, or `None` while not loaded.
    fn player(&self) -> Option<ObjectId>;

    fn job(&self) -> Option<Job>;

    fn level(&self) -> Result<u8, OracleError>;

    fn in_combat(&self) -> bool;

    /// Seconds since combat started, zero out of combat.
    fn combat_time(&self) -> f32;

    fn mp(&self) -> Result<u32, OracleError>;

    // ========================================================================
    // Statuses
    // ========================================================================

    /// Returns the status on `target`.
    ///
    /// # Arguments
    ///
    /// * `source` - `Some(id)` restricts the match to effects applied by `id`;
    ///   `None` matches effects from any source.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the status is absent. The remaining time is reported
    /// raw: a negative value means the effect's timer has not started yet.
    fn status(
        &self,
        status: StatusId,
        target: ObjectId,
        source: Option<ObjectId>,
    ) -> Result<Option<StatusEffect>, OracleError>;

    /// Whether `target` carries a debuff that Esuna-style actions can remove.
    fn has_cleansable_debuff(&self, _target: ObjectId) -> Result<bool, OracleError> {
        Ok(false)
    }

    fn is_invincible(&self, _target: ObjectId) -> Result<bool, OracleError> {
        Ok(false)
    }

    // ========================================================================
    // Actions
    // ========================================================================

    fn cooldown(&self, action: ActionId) -> Result<CooldownState, OracleError>;

    fn timing(&self) -> Result<GcdTiming, OracleError>;

    /// Current combo chain (last combo action and remaining combo timer).
    fn combo(&self) -> ComboState;

    /// Most recent action the host reports as executed.
    fn last_used(&self) -> Option<UsedAction>;

    /// Seconds since `action` was last executed, `None` if never (or too long
    /// ago for the host to remember).
    fn time_since_used(&self, action: ActionId) -> Option<f32>;

    // ========================================================================
    // Gauges
    // ========================================================================

    fn gauge(&self, job: Job) -> Result<JobGauge, OracleError>;

    // ========================================================================
    // Targets and party
    // ========================================================================

    fn current_target(&self) -> Option<ObjectId>;

    fn target_info(&self, target: ObjectId) -> Result<TargetInfo, OracleError>;

    /// Health of `target` in percent, 0.0..=100.0.
    fn health_percent(&self, target: ObjectId) -> Result<f32, OracleError>;

    fn party(&self) -> PartyList;

    /// Number of hostile targetable enemies within `radius` yalms of the player.
    fn enemies_within(&self, radius: f32) -> u8;

    fn in_action_range(&self, action: ActionId, target: ObjectId) -> bool;

    fn content(&self) -> ContentFlags {
        ContentFlags::empty()
    }
}

/// Cooldown and charge state of one action.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CooldownState {
    /// Seconds until the next charge (or the only use) is available.
    pub remaining: f32,
    /// Charges currently available. Single-charge actions report 0 or 1.
    pub charges: u8,
    pub max_charges: u8,
}

impl CooldownState {
    pub const fn ready() -> Self {
        Self {
            remaining: 0.0,
            charges: 1,
            max_charges: 1,
        }
    }

    pub const fn cooling(remaining: f32) -> Self {
        Self {
            remaining,
            charges: 0,
            max_charges: 1,
        }
    }

    /// An action is usable when it has a charge or nothing left to wait on.
    pub fn is_ready(&self) -> bool {
        self.charges > 0 || self.remaining <= 0.0
    }
}

/// Timing of the current GCD and animation lock, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GcdTiming {
    pub animation_lock: f32,
    pub gcd_elapsed: f32,
    pub gcd_total: f32,
    pub casting: bool,
}

impl GcdTiming {
    pub fn gcd_remaining(&self) -> f32 {
        (self.gcd_total - self.gcd_elapsed).max(0.0)
    }
}

/// The combo chain the host tracks for combo-continuation actions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComboState {
    pub action: ActionId,
    pub timer: f32,
}

/// One entry of the host's action history.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsedAction {
    pub action: ActionId,
    /// Monotonic execution counter; a new value means a new execution.
    pub sequence: u64,
    /// Seconds since execution.
    pub elapsed: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TargetInfo {
    pub hostile: bool,
    pub boss: bool,
    pub interruptible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charges_make_an_action_ready_while_recharging() {
        let state = CooldownState {
            remaining: 12.0,
            charges: 1,
            max_charges: 2,
        };
        assert!(state.is_ready());
        assert!(!CooldownState::cooling(0.5).is_ready());
    }

    #[test]
    fn gcd_remaining_never_goes_negative() {
        let timing = GcdTiming {
            gcd_elapsed: 3.0,
            gcd_total: 2.5,
            ..GcdTiming::default()
        };
        assert_eq!(timing.gcd_remaining(), 0.0);
    }
}
