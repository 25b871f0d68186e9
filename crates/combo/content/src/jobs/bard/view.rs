use combo_core::{
    ActionId, BardGauge, ComboContext, OwnerFilter, Song, StatusEffect, StatusId, WeaveTiming,
};

use super::actions::*;
use super::{buffs, debuffs};

/// DoTs are refreshed with less than this many seconds left.
const DOT_REFRESH: f32 = 4.0;

/// Bard-specific reads over one context, with the gauge read once.
pub(super) struct BardView<'c, 'a> {
    ctx: &'c ComboContext<'a>,
    gauge: BardGauge,
}

impl<'c, 'a> BardView<'c, 'a> {
    /// `None` when the host has no Bard gauge for the player.
    pub fn new(ctx: &'c ComboContext<'a>) -> Option<Self> {
        let gauge = ctx.bard_gauge()?;
        Some(Self { ctx, gauge })
    }

    pub fn ctx(&self) -> &'c ComboContext<'a> {
        self.ctx
    }

    // ===== gauge =====

    pub fn song(&self) -> Song {
        self.gauge.song
    }

    pub fn song_timer(&self) -> f32 {
        self.gauge.song_timer_secs()
    }

    pub fn repertoire(&self) -> u8 {
        self.gauge.repertoire
    }

    pub fn soul_voice(&self) -> u8 {
        self.gauge.soul_voice
    }

    // ===== timing =====

    pub fn can_weave(&self) -> bool {
        self.ctx.can_weave(WeaveTiming::Weave)
    }

    pub fn can_weave_delayed(&self) -> bool {
        self.ctx.can_weave(WeaveTiming::Delayed)
    }

    pub fn has_target(&self) -> bool {
        self.ctx.has_battle_target()
    }

    pub fn raging_cd(&self) -> f32 {
        self.ctx.cooldown_remaining(RAGING_STRIKES)
    }

    pub fn empyreal_cd(&self) -> f32 {
        self.ctx.cooldown_remaining(EMPYREAL_ARROW)
    }

    pub fn raging_remaining(&self) -> f32 {
        self.ctx.effect_remaining(buffs::RAGING_STRIKES)
    }

    pub fn radiant_remaining(&self) -> f32 {
        self.ctx.effect_remaining(buffs::RADIANT_FINALE)
    }

    /// Raging Strikes comes off cooldown within the next GCD.
    pub fn buff_time(&self) -> bool {
        self.ctx.level_checked(RAGING_STRIKES) && self.raging_cd() < 2.7
    }

    // ===== DoTs =====

    /// Poison DoT (Caustic Bite or Venomous Bite) applied by the player.
    pub fn purple(&self) -> Option<StatusEffect> {
        self.own_dot(debuffs::CAUSTIC_BITE)
            .or_else(|| self.own_dot(debuffs::VENOMOUS_BITE))
    }

    /// Wind DoT (Stormbite or Windbite) applied by the player.
    pub fn blue(&self) -> Option<StatusEffect> {
        self.own_dot(debuffs::STORMBITE)
            .or_else(|| self.own_dot(debuffs::WINDBITE))
    }

    pub fn purple_remaining(&self) -> f32 {
        self.purple().map_or(0.0, |e| e.remaining)
    }

    pub fn blue_remaining(&self) -> f32 {
        self.blue().map_or(0.0, |e| e.remaining)
    }

    fn own_dot(&self, status: StatusId) -> Option<StatusEffect> {
        let target = self.ctx.current_target()?;
        self.ctx.status_on(status, Some(target), OwnerFilter::Player)
    }

    pub fn can_iron_jaws(&self) -> bool {
        self.ctx.level_checked(IRON_JAWS)
    }

    /// Both DoTs are up and at least one is about to fall off.
    pub fn use_iron_jaws(&self) -> bool {
        self.ctx.action_ready(IRON_JAWS)
            && self.purple().is_some()
            && self.blue().is_some()
            && (self.purple_remaining() < DOT_REFRESH || self.blue_remaining() < DOT_REFRESH)
    }

    pub fn apply_blue_dot(&self) -> bool {
        self.apply_dot(WINDBITE, self.blue())
    }

    pub fn apply_purple_dot(&self) -> bool {
        self.apply_dot(VENOMOUS_BITE, self.purple())
    }

    /// Missing DoT, or an expiring one when Iron Jaws is not learned yet.
    fn apply_dot(&self, base: ActionId, current: Option<StatusEffect>) -> bool {
        let action = self.ctx.tier(base);
        if !self.ctx.action_ready(action) || self.ctx.just_used(action) {
            return false;
        }
        match current {
            None => true,
            Some(dot) => !self.can_iron_jaws() && dot.remaining < DOT_REFRESH,
        }
    }

    /// DoTs were applied before Raging Strikes and should snapshot it.
    pub fn raging_jaws_refresh(&self) -> bool {
        self.ctx.action_ready(IRON_JAWS)
            && self.ctx.has_effect(buffs::RAGING_STRIKES)
            && self.purple_remaining() < 35.0
            && self.blue_remaining() < 35.0
    }

    // ===== resources =====

    /// Repertoire should be spent now rather than overcapped.
    pub fn pitch_perfected(&self) -> bool {
        self.ctx.level_checked(PITCH_PERFECT)
            && self.song() == Song::Wanderer
            && (self.repertoire() == 3
                || (self.repertoire() == 2
                    && self.ctx.level_checked(EMPYREAL_ARROW)
                    && self.empyreal_cd() < 2.0))
    }

    /// Raid buffs that pooled resources are held for are active.
    pub fn buffs_active(&self) -> bool {
        let ctx = self.ctx;
        ctx.has_effect(buffs::RAGING_STRIKES)
            && (ctx.has_effect(buffs::BATTLE_VOICE) || !ctx.level_checked(BATTLE_VOICE))
            && (ctx.has_effect(buffs::RADIANT_FINALE) || !ctx.level_checked(RADIANT_FINALE))
    }

    pub fn use_pooled_sidewinder(&self) -> bool {
        self.buffs_active() || self.raging_cd() > 10.0
    }

    /// Bloodletter and Rain of Death share charges.
    pub fn use_pooled_blood_rain(&self) -> bool {
        let charges = self.ctx.remaining_charges(BLOODLETTER);
        self.ctx.has_effect(buffs::RAGING_STRIKES)
            || charges >= self.ctx.max_charges(BLOODLETTER)
            || (self.song() != Song::Wanderer && self.raging_cd() > 30.0)
    }

    pub fn use_pooled_apex(&self) -> bool {
        if !self.ctx.level_checked(APEX_ARROW) {
            return false;
        }
        let soul_voice = self.soul_voice();
        if self.ctx.has_effect(buffs::RAGING_STRIKES) {
            soul_voice == 100 || (soul_voice >= 80 && self.raging_remaining() < 3.0)
        } else {
            soul_voice == 100 && self.raging_cd() > 10.0
        }
    }

    pub fn bloodletter_charges(&self) -> u8 {
        self.ctx.remaining_charges(BLOODLETTER)
    }
}
