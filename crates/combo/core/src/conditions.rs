//! Condition library: side-effect-free predicates over the tick's state.
//!
//! Every predicate resolves host failures to a safe default instead of
//! returning an error: "not ready", "absent", "cannot weave". Status reads go
//! through the [`EffectCache`](crate::status::EffectCache) so repeated
//! predicates within one tick agree with each other.

use tracing::debug;

use crate::config::EngineConfig;
use crate::context::ComboContext;
use crate::env::{
    AttackType, BardGauge, DarkKnightGauge, JobGauge, OptionKey, OptionValue, OracleError,
    ScholarGauge, StateOracle, TargetInfo, Toggle, content_flags_option,
};
use crate::ids::{ActionId, ObjectId, StatusId};
use crate::status::{OwnerFilter, StatusEffect};

/// When an off-GCD action may be fitted between two GCDs.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeaveTiming {
    /// Any slot that fits one ability before the next GCD.
    #[default]
    Weave,
    /// The first of two slots; leaves room for a second weave.
    Early,
    /// Late in the GCD; used for actions that should land just before it.
    Delayed,
}

fn quiet<T>(what: &'static str, result: Result<T, OracleError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(target: "combo::conditions", query = what, error = %err, "defaulting");
            None
        }
    }
}

impl<'a> ComboContext<'a> {
    fn with_state<T>(&self, default: T, f: impl FnOnce(&'a dyn StateOracle) -> T) -> T {
        match self.state() {
            Ok(state) => f(state),
            Err(_) => default,
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Whether `toggle` is on. Without a configuration every toggle is off.
    pub fn is_enabled(&self, toggle: Toggle) -> bool {
        self.config().map(|c| c.is_enabled(toggle)).unwrap_or(false)
    }

    pub fn option(&self, key: OptionKey) -> Option<OptionValue> {
        self.config().ok().and_then(|c| c.option(key))
    }

    pub fn int_option(&self, key: OptionKey, default: i64) -> i64 {
        self.option(key).and_then(OptionValue::as_int).unwrap_or(default)
    }

    pub fn float_option(&self, key: OptionKey, default: f64) -> f64 {
        self.option(key).and_then(OptionValue::as_float).unwrap_or(default)
    }

    pub fn flag_option(&self, key: OptionKey, default: bool) -> bool {
        self.option(key).and_then(OptionValue::as_bool).unwrap_or(default)
    }

    /// Whether the current duty matches the content set stored under `key`.
    ///
    /// An unset option admits every duty.
    pub fn in_configured_content(&self, key: OptionKey) -> bool {
        let allowed = content_flags_option(self.option(key));
        allowed.admits(self.with_state(Default::default(), |s| s.content()))
    }

    // ========================================================================
    // Statuses
    // ========================================================================

    /// Looks up `status` on `target` (the player when `None`).
    pub fn status_on(
        &self,
        status: StatusId,
        target: Option<ObjectId>,
        filter: OwnerFilter,
    ) -> Option<StatusEffect> {
        let state = self.state().ok()?;
        let target = target.or(self.player())?;
        self.cache()
            .lookup(state, status, target, filter, self.player())
    }

    /// Player carries `status` applied by the player.
    pub fn has_effect(&self, status: StatusId) -> bool {
        self.status_on(status, None, OwnerFilter::Player).is_some()
    }

    /// Player carries `status` applied by anyone.
    pub fn has_effect_any(&self, status: StatusId) -> bool {
        self.status_on(status, None, OwnerFilter::Any).is_some()
    }

    pub fn target_has_effect(&self, status: StatusId) -> bool {
        self.current_target()
            .and_then(|t| self.status_on(status, Some(t), OwnerFilter::Player))
            .is_some()
    }

    pub fn target_has_effect_any(&self, status: StatusId) -> bool {
        self.current_target()
            .and_then(|t| self.status_on(status, Some(t), OwnerFilter::Any))
            .is_some()
    }

    /// Seconds left on a player-owned effect on the player, 0 when absent.
    pub fn effect_remaining(&self, status: StatusId) -> f32 {
        self.status_on(status, None, OwnerFilter::Player)
            .map(|e| e.remaining)
            .unwrap_or(0.0)
    }

    /// Seconds left on a player-owned effect on the current target.
    pub fn target_effect_remaining(&self, status: StatusId) -> f32 {
        self.current_target()
            .and_then(|t| self.status_on(status, Some(t), OwnerFilter::Player))
            .map(|e| e.remaining)
            .unwrap_or(0.0)
    }

    pub fn effect_stacks(&self, status: StatusId) -> u16 {
        self.status_on(status, None, OwnerFilter::Player)
            .map(|e| e.stacks)
            .unwrap_or(0)
    }

    pub fn has_cleansable_debuff(&self, target: ObjectId) -> bool {
        self.with_state(false, |s| {
            quiet("cleansable", s.has_cleansable_debuff(target)).unwrap_or(false)
        })
    }

    pub fn target_is_invincible(&self) -> bool {
        let Some(target) = self.current_target() else {
            return false;
        };
        self.with_state(false, |s| {
            quiet("invincible", s.is_invincible(target)).unwrap_or(false)
        })
    }

    /// No status prevents using `action`.
    ///
    /// Weaponskills are blocked by pacification, spells by silence and
    /// abilities by amnesia. Actions of unknown type are never blocked.
    pub fn no_blocking_status(&self, action: ActionId) -> bool {
        let Ok(actions) = self.actions() else {
            return true;
        };
        let blocking = &self.settings().blocking;
        let status = match actions.attack_type(action) {
            AttackType::Weaponskill => blocking.pacification,
            AttackType::Spell => blocking.silence,
            AttackType::Ability => blocking.amnesia,
            AttackType::Unknown => return true,
        };
        !self.has_effect_any(status)
    }

    // ========================================================================
    // Actions, cooldowns and history
    // ========================================================================

    /// Action is learned at the player's current level.
    pub fn level_checked(&self, action: ActionId) -> bool {
        self.actions()
            .ok()
            .and_then(|a| a.required_level(action))
            .is_some_and(|required| required <= self.level())
    }

    /// Action is learned and has a charge or no cooldown left.
    pub fn action_ready(&self, action: ActionId) -> bool {
        self.level_checked(action)
            && self.with_state(false, |s| {
                quiet("cooldown", s.cooldown(action)).is_some_and(|cd| cd.is_ready())
            })
    }

    /// Seconds until `action` is available; unknown actions report 0.
    pub fn cooldown_remaining(&self, action: ActionId) -> f32 {
        self.with_state(0.0, |s| {
            quiet("cooldown", s.cooldown(action))
                .map(|cd| cd.remaining.max(0.0))
                .unwrap_or(0.0)
        })
    }

    pub fn remaining_charges(&self, action: ActionId) -> u8 {
        self.with_state(0, |s| {
            quiet("cooldown", s.cooldown(action))
                .map(|cd| cd.charges)
                .unwrap_or(0)
        })
    }

    pub fn max_charges(&self, action: ActionId) -> u8 {
        self.with_state(0, |s| {
            quiet("cooldown", s.cooldown(action))
                .map(|cd| cd.max_charges)
                .unwrap_or(0)
        })
    }

    /// Action was executed within the engine's "just used" window.
    pub fn just_used(&self, action: ActionId) -> bool {
        self.just_used_within(action, self.settings().just_used_window)
    }

    pub fn just_used_within(&self, action: ActionId, window: f32) -> bool {
        self.with_state(false, |s| {
            s.time_since_used(action).is_some_and(|elapsed| elapsed <= window)
        })
    }

    pub fn was_last_action(&self, action: ActionId) -> bool {
        self.with_state(false, |s| {
            s.last_used().is_some_and(|used| used.action == action)
        })
    }

    pub fn combo_action(&self) -> ActionId {
        self.with_state(ActionId::NONE, |s| s.combo().action)
    }

    pub fn combo_timer(&self) -> f32 {
        self.with_state(0.0, |s| s.combo().timer)
    }

    /// The combo chain is live and its last step was `action`.
    pub fn in_combo_after(&self, action: ActionId) -> bool {
        self.with_state(false, |s| {
            let combo = s.combo();
            combo.action == action && combo.timer > 0.0
        })
    }

    /// Concrete action of the upgrade family rooted at `base`.
    pub fn tier(&self, base: ActionId) -> ActionId {
        self.tiers().upgrade_tier(base, self.level())
    }

    /// Whether an off-GCD action fits now.
    ///
    /// Reads the tick's memoized timing, so the answer cannot change within a
    /// tick. Missing timing data reports "cannot weave".
    pub fn can_weave(&self, timing: WeaveTiming) -> bool {
        let Some(gcd) = self.state().ok().and_then(|s| self.cache().timing(s)) else {
            return false;
        };
        if gcd.casting {
            return false;
        }
        let remaining = gcd.gcd_remaining();
        match timing {
            WeaveTiming::Weave => remaining > gcd.animation_lock + EngineConfig::WEAVE_WINDOW,
            WeaveTiming::Early => {
                remaining > gcd.animation_lock + 2.0 * EngineConfig::WEAVE_WINDOW
            }
            WeaveTiming::Delayed => {
                gcd.animation_lock <= 0.0
                    && remaining <= EngineConfig::DELAYED_WEAVE_START
                    && remaining >= EngineConfig::DELAYED_WEAVE_END
            }
        }
    }

    // ========================================================================
    // Player resources
    // ========================================================================

    pub fn in_combat(&self) -> bool {
        self.with_state(false, |s| s.in_combat())
    }

    pub fn combat_time(&self) -> f32 {
        self.with_state(0.0, |s| s.combat_time())
    }

    /// Player health in percent; 100 when unknown so threshold guards stay quiet.
    pub fn player_hp_percent(&self) -> f32 {
        let Some(player) = self.player() else {
            return 100.0;
        };
        self.with_state(100.0, |s| {
            quiet("player hp", s.health_percent(player)).unwrap_or(100.0)
        })
    }

    pub fn player_mp(&self) -> u32 {
        self.with_state(0, |s| quiet("mp", s.mp()).unwrap_or(0))
    }

    /// Gauge of the current job, `None` when unavailable.
    pub fn gauge(&self) -> Option<JobGauge> {
        let job = self.job()?;
        self.with_state(None, |s| quiet("gauge", s.gauge(job)))
            .filter(|gauge| gauge.job() == job)
    }

    pub fn bard_gauge(&self) -> Option<BardGauge> {
        self.gauge().and_then(|g| g.as_bard())
    }

    pub fn dark_knight_gauge(&self) -> Option<DarkKnightGauge> {
        self.gauge().and_then(|g| g.as_dark_knight())
    }

    pub fn scholar_gauge(&self) -> Option<ScholarGauge> {
        self.gauge().and_then(|g| g.as_scholar())
    }

    // ========================================================================
    // Targets and party
    // ========================================================================

    pub fn current_target(&self) -> Option<ObjectId> {
        self.with_state(None, |s| s.current_target())
            .filter(|t| t.is_valid())
    }

    fn target_info(&self) -> Option<TargetInfo> {
        let target = self.current_target()?;
        self.with_state(None, |s| quiet("target", s.target_info(target)))
    }

    pub fn has_battle_target(&self) -> bool {
        self.target_info().is_some_and(|t| t.hostile)
    }

    pub fn has_friendly_target(&self) -> bool {
        self.target_info().is_some_and(|t| !t.hostile)
    }

    pub fn target_is_boss(&self) -> bool {
        self.target_info().is_some_and(|t| t.hostile && t.boss)
    }

    pub fn in_boss_encounter(&self) -> bool {
        self.in_combat() && self.target_is_boss()
    }

    pub fn target_can_be_interrupted(&self) -> bool {
        self.target_info().is_some_and(|t| t.hostile && t.interruptible)
    }

    /// Current target's health; 0 without a target so "no waste" guards fail.
    pub fn target_hp_percent(&self) -> f32 {
        self.current_target()
            .map(|t| self.hp_percent_of(t, 0.0))
            .unwrap_or(0.0)
    }

    pub fn hp_percent_of(&self, target: ObjectId, default: f32) -> f32 {
        self.with_state(default, |s| {
            quiet("hp", s.health_percent(target)).unwrap_or(default)
        })
    }

    pub fn in_party(&self) -> bool {
        self.with_state(false, |s| s.party().len() > 1)
    }

    pub fn party_size(&self) -> usize {
        self.with_state(0, |s| s.party().len())
    }

    pub fn enemies_within(&self, radius: f32) -> u8 {
        self.with_state(0, |s| s.enemies_within(radius))
    }

    pub fn in_action_range(&self, action: ActionId) -> bool {
        let Some(target) = self.current_target() else {
            return false;
        };
        self.with_state(false, |s| s.in_action_range(action, target))
    }
}
