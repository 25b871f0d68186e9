//! Full single-button Bard rotation.
//!
//! One rule set covers the four rotation buttons. [`Mode::Advanced`] gates
//! every section behind its own toggle and reads thresholds from options;
//! [`Mode::Simple`] runs every section with fixed thresholds.

use combo_core::{
    ActionId, AttackType, ComboContext, OpenerHandle, OptionKey, RuleSet, Song, Toggle,
    WeaveTiming,
};
use tracing::trace;

use super::actions::*;
use super::view::BardView;
use super::{buffs, options, toggles};
use crate::jobs::role;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    Advanced,
    Simple,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Scope {
    Single,
    Aoe,
}

/// Section toggles. `None` means the section always runs.
#[derive(Clone, Copy, Debug, Default)]
struct Switches {
    opener: Option<Toggle>,
    songs: Option<Toggle>,
    buffs: Option<Toggle>,
    raging: Option<Toggle>,
    battle_voice: Option<Toggle>,
    barrage: Option<Toggle>,
    radiant: Option<Toggle>,
    ogcd: Option<Toggle>,
    pooling: Option<Toggle>,
    interrupt: Option<Toggle>,
    dots: Option<Toggle>,
    raging_jaws: Option<Toggle>,
    apex: Option<Toggle>,
    apex_pooling: Option<Toggle>,
    encore: Option<Toggle>,
    resonant: Option<Toggle>,
    second_wind: Option<Toggle>,
    wardens: Option<Toggle>,
    /// Toggle and HP option of the "don't waste resources on dying targets" check.
    no_waste: Option<(Toggle, OptionKey)>,
}

impl Switches {
    fn advanced(scope: Scope) -> Self {
        let shared = Self {
            encore: Some(toggles::ADV_ENCORE),
            resonant: Some(toggles::ADV_RESONANT),
            second_wind: Some(toggles::SECOND_WIND),
            wardens: Some(toggles::WARDENS),
            ..Self::default()
        };
        match scope {
            Scope::Single => Self {
                opener: Some(toggles::ST_ADV_OPENER),
                songs: Some(toggles::ST_ADV_SONGS),
                buffs: Some(toggles::ST_ADV_BUFFS),
                raging: Some(toggles::ST_ADV_RAGING),
                battle_voice: Some(toggles::ST_ADV_BATTLE_VOICE),
                barrage: Some(toggles::ST_ADV_BARRAGE),
                radiant: Some(toggles::ST_ADV_RADIANT),
                ogcd: Some(toggles::ST_ADV_OGCD),
                pooling: Some(toggles::ST_ADV_POOLING),
                interrupt: Some(toggles::ST_ADV_INTERRUPT),
                dots: Some(toggles::ST_ADV_DOTS),
                raging_jaws: Some(toggles::ST_ADV_RAGING_JAWS),
                apex: Some(toggles::ST_ADV_APEX),
                apex_pooling: Some(toggles::ST_ADV_APEX_POOLING),
                no_waste: Some((toggles::ST_ADV_NO_WASTE, options::ST_NO_WASTE_HP)),
                ..shared
            },
            Scope::Aoe => Self {
                songs: Some(toggles::AOE_ADV_SONGS),
                buffs: Some(toggles::AOE_ADV_BUFFS),
                raging: Some(toggles::AOE_ADV_RAGING),
                battle_voice: Some(toggles::AOE_ADV_BATTLE_VOICE),
                barrage: Some(toggles::AOE_ADV_BARRAGE),
                radiant: Some(toggles::AOE_ADV_RADIANT),
                ogcd: Some(toggles::AOE_ADV_OGCD),
                pooling: Some(toggles::AOE_ADV_POOLING),
                interrupt: Some(toggles::AOE_ADV_INTERRUPT),
                apex: Some(toggles::AOE_ADV_APEX),
                apex_pooling: Some(toggles::AOE_ADV_APEX_POOLING),
                no_waste: Some((toggles::AOE_ADV_NO_WASTE, options::AOE_NO_WASTE_HP)),
                ..shared
            },
        }
    }

    fn toggles(&self) -> Vec<Toggle> {
        [
            self.opener,
            self.songs,
            self.buffs,
            self.raging,
            self.battle_voice,
            self.barrage,
            self.radiant,
            self.ogcd,
            self.pooling,
            self.interrupt,
            self.dots,
            self.raging_jaws,
            self.apex,
            self.apex_pooling,
            self.encore,
            self.resonant,
            self.second_wind,
            self.wardens,
            self.no_waste.map(|(toggle, _)| toggle),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn on(ctx: &ComboContext<'_>, switch: Option<Toggle>) -> bool {
    switch.is_none_or(|toggle| ctx.is_enabled(toggle))
}

/// Bard rotation on Heavy Shot (single target) or Quick Nock (AoE).
#[derive(Debug)]
pub struct BardRotation {
    mode: Mode,
    scope: Scope,
    switches: Switches,
    opener: Option<OpenerHandle>,
}

impl BardRotation {
    pub fn new(mode: Mode, scope: Scope) -> Self {
        let switches = match mode {
            Mode::Advanced => Switches::advanced(scope),
            Mode::Simple => Switches::default(),
        };
        Self {
            mode,
            scope,
            switches,
            opener: None,
        }
    }

    /// Drives `handle` at the top of the rotation. Only the advanced single
    /// target rotation has an opener toggle; elsewhere it always runs.
    #[must_use]
    pub fn with_opener(mut self, handle: OpenerHandle) -> Self {
        self.opener = Some(handle);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    fn is_simple(&self) -> bool {
        self.mode == Mode::Simple
    }

    /// Reads an option in advanced mode, the fixed value in simple mode.
    fn threshold(&self, ctx: &ComboContext<'_>, key: OptionKey, advanced: i64, simple: i64) -> f32 {
        match self.mode {
            Mode::Advanced => ctx.int_option(key, advanced) as f32,
            Mode::Simple => simple as f32,
        }
    }

    fn enemy_health_high(&self, ctx: &ComboContext<'_>) -> bool {
        match self.switches.no_waste {
            Some((toggle, key)) if ctx.is_enabled(toggle) => {
                ctx.target_hp_percent() > ctx.int_option(key, 3) as f32
            }
            _ => true,
        }
    }

    // ========================================================================
    // Sections
    // ========================================================================

    fn variant(&self, ctx: &ComboContext<'_>) -> Option<ActionId> {
        let cure_hp = self.threshold(ctx, options::VARIANT_CURE_HP, 50, 50);
        if role::can_variant_cure(ctx, toggles::VARIANT_CURE, cure_hp) {
            return Some(role::VARIANT_CURE);
        }
        role::can_variant_rampart(ctx, toggles::VARIANT_RAMPART, WeaveTiming::Weave)
            .then_some(role::VARIANT_RAMPART)
    }

    /// Scripted opener, weaving Pitch Perfect and Heartbreak Shot under
    /// Raging Strikes between scripted GCDs.
    fn opener(&self, bard: &BardView<'_, '_>) -> Option<ActionId> {
        let ctx = bard.ctx();
        let handle = self.opener?;
        if !on(ctx, self.switches.opener) {
            return None;
        }
        let opener = ctx.opener(handle)?;

        if let Some(next) = opener.current_action()
            && ctx.actions().map_or(AttackType::Unknown, |a| a.attack_type(next))
                != AttackType::Ability
            && bard.can_weave()
            && ctx.has_effect(buffs::RAGING_STRIKES)
        {
            if bard.repertoire() == 3 || (bard.repertoire() == 2 && bard.empyreal_cd() < 2.0) {
                return Some(PITCH_PERFECT);
            }
            if ctx.action_ready(HEARTBREAK_SHOT) {
                return Some(HEARTBREAK_SHOT);
            }
        }
        opener.step(ctx)
    }

    fn songs(&self, bard: &BardView<'_, '_>, health_high: bool) -> Option<ActionId> {
        let ctx = bard.ctx();
        if !on(ctx, self.switches.songs) || !health_high {
            return None;
        }
        let timer = bard.song_timer();

        if !ctx.level_checked(WANDERERS_MINUET) {
            // Before Wanderer's Minuet the two songs alternate.
            if timer <= 3.0 && bard.can_weave_delayed() {
                return [MAGES_BALLAD, ARMYS_PAEON]
                    .into_iter()
                    .find(|song| ctx.action_ready(*song));
            }
            return None;
        }

        if self.is_simple()
            && self.scope == Scope::Single
            && ctx.action_ready(EMPYREAL_ARROW)
            && ctx.just_used(WANDERERS_MINUET)
        {
            return Some(EMPYREAL_ARROW);
        }

        if bard.can_weave() || !bard.has_target() {
            if bard.song() == Song::None && ctx.in_combat() {
                let songs = [WANDERERS_MINUET, MAGES_BALLAD, ARMYS_PAEON];
                let first = songs.into_iter().find(|&song| {
                    ctx.action_ready(song)
                        && !songs
                            .iter()
                            .any(|&other| other != song && ctx.just_used(other))
                });
                if first.is_some() {
                    return first;
                }
            }

            if bard.song() == Song::Wanderer && timer <= 3.0 {
                // Spend repertoire before switching.
                if bard.repertoire() > 0 && bard.has_target() {
                    return Some(PITCH_PERFECT);
                }
                if ctx.action_ready(MAGES_BALLAD) {
                    return Some(MAGES_BALLAD);
                }
            }

            if bard.song() == Song::Mage && timer <= 3.0 && ctx.action_ready(ARMYS_PAEON) {
                // Empyreal Arrow goes first so it does not drift.
                if ctx.action_ready(EMPYREAL_ARROW) && bard.has_target() {
                    return Some(EMPYREAL_ARROW);
                }
                return Some(ARMYS_PAEON);
            }
        }

        (bard.song() == Song::Army
            && (bard.can_weave_delayed() || !bard.has_target())
            && ctx.action_ready(WANDERERS_MINUET)
            && (timer <= 12.0 || bard.repertoire() == 4))
            .then_some(WANDERERS_MINUET)
    }

    fn buffs(&self, bard: &BardView<'_, '_>, health_high: bool) -> Option<ActionId> {
        let ctx = bard.ctx();
        let sw = &self.switches;
        if !on(ctx, sw.buffs)
            || !health_high
            || (bard.song() == Song::None && ctx.level_checked(MAGES_BALLAD))
        {
            return None;
        }
        let raging_on = on(ctx, sw.raging);
        let battle_voice_on = on(ctx, sw.battle_voice);
        let radiant_on = on(ctx, sw.radiant);

        // Radiant Finale late-woven first so the three buffs line up.
        if radiant_on
            && bard.can_weave_delayed()
            && ctx.action_ready(RADIANT_FINALE)
            && (bard.raging_cd() < 2.3 || !raging_on)
            && !ctx.has_effect(buffs::RADIANT_ENCORE_READY)
        {
            return Some(RADIANT_FINALE);
        }

        if battle_voice_on
            && bard.can_weave()
            && ctx.action_ready(BATTLE_VOICE)
            && (ctx.has_effect(buffs::RADIANT_FINALE)
                || !ctx.level_checked(RADIANT_FINALE)
                || !radiant_on)
        {
            return Some(BATTLE_VOICE);
        }

        if raging_on
            && bard.can_weave()
            && ctx.action_ready(RAGING_STRIKES)
            && (ctx.just_used(BATTLE_VOICE)
                || !ctx.level_checked(BATTLE_VOICE)
                || ctx.has_effect(buffs::BATTLE_VOICE)
                || !battle_voice_on)
        {
            return Some(RAGING_STRIKES);
        }

        (on(ctx, sw.barrage)
            && bard.can_weave()
            && ctx.action_ready(BARRAGE)
            && (ctx.has_effect(buffs::RAGING_STRIKES) || !raging_on)
            && !ctx.has_effect(buffs::RESONANT_ARROW_READY))
        .then_some(BARRAGE)
    }

    fn ogcds(&self, bard: &BardView<'_, '_>) -> Option<ActionId> {
        let ctx = bard.ctx();
        let sw = &self.switches;
        if !bard.can_weave() || !on(ctx, sw.ogcd) {
            return None;
        }
        // Hold oGCDs for the buff window in advanced mode.
        if !self.is_simple() && bard.buff_time() && on(ctx, sw.buffs) {
            return None;
        }
        let pooling = on(ctx, sw.pooling);

        if ctx.action_ready(EMPYREAL_ARROW) {
            return Some(EMPYREAL_ARROW);
        }
        if bard.pitch_perfected() {
            return Some(PITCH_PERFECT);
        }
        if ctx.action_ready(SIDEWINDER) && (!pooling || bard.use_pooled_sidewinder()) {
            return Some(SIDEWINDER);
        }
        if role::can_head_graze(ctx, sw.interrupt) && bard.can_weave_delayed() {
            return Some(role::HEAD_GRAZE);
        }
        match self.scope {
            Scope::Single => (ctx.action_ready(BLOODLETTER)
                && (!pooling || bard.use_pooled_blood_rain()))
            .then(|| ctx.tier(BLOODLETTER)),
            Scope::Aoe => {
                if ctx.action_ready(RAIN_OF_DEATH) && (!pooling || bard.use_pooled_blood_rain()) {
                    return Some(RAIN_OF_DEATH);
                }
                (!ctx.level_checked(RAIN_OF_DEATH)
                    && ctx.action_ready(BLOODLETTER)
                    && !(ctx.was_last_action(BLOODLETTER) && bard.bloodletter_charges() > 0))
                    .then(|| ctx.tier(BLOODLETTER))
            }
        }
    }

    fn self_care(&self, bard: &BardView<'_, '_>) -> Option<ActionId> {
        let ctx = bard.ctx();
        if !bard.can_weave() {
            return None;
        }
        let second_wind_hp = self.threshold(ctx, options::SECOND_WIND_HP, 40, 40);
        if on(ctx, self.switches.second_wind) && role::can_second_wind(ctx, second_wind_hp) {
            return Some(role::SECOND_WIND);
        }
        let player = ctx.player()?;
        (on(ctx, self.switches.wardens)
            && ctx.action_ready(WARDENS_PAEAN)
            && ctx.has_cleansable_debuff(player))
        .then_some(WARDENS_PAEAN)
    }

    fn dots(&self, bard: &BardView<'_, '_>, health_high: bool) -> Option<ActionId> {
        let ctx = bard.ctx();
        if self.scope != Scope::Single || !health_high || !on(ctx, self.switches.dots) {
            return None;
        }
        if bard.use_iron_jaws() {
            return Some(IRON_JAWS);
        }
        if bard.apply_blue_dot() {
            return Some(ctx.tier(WINDBITE));
        }
        if bard.apply_purple_dot() {
            return Some(ctx.tier(VENOMOUS_BITE));
        }
        let renew = self.threshold(ctx, options::RAGING_JAWS_RENEW, 5, 6);
        (on(ctx, self.switches.raging_jaws)
            && bard.raging_jaws_refresh()
            && bard.raging_remaining() < renew)
            .then_some(IRON_JAWS)
    }

    fn gcds(&self, bard: &BardView<'_, '_>) -> Option<ActionId> {
        let ctx = bard.ctx();
        let sw = &self.switches;

        if ctx.has_effect(buffs::HAWKS_EYE) || ctx.has_effect(buffs::BARRAGE) {
            return Some(match self.scope {
                Scope::Single => ctx.tier(STRAIGHT_SHOT),
                Scope::Aoe => ctx.tier(WIDE_VOLLEY),
            });
        }

        let encore = (on(ctx, sw.encore)
            && ctx.has_effect(buffs::RADIANT_ENCORE_READY)
            && bard.radiant_remaining() < 15.0)
            .then_some(RADIANT_ENCORE);
        // Advanced spends Radiant Encore before Apex; simple after Resonant Arrow.
        if !self.is_simple() && encore.is_some() {
            return encore;
        }

        if on(ctx, sw.apex) {
            if ctx.has_effect(buffs::BLAST_ARROW_READY) {
                return Some(BLAST_ARROW);
            }
            let apex = if on(ctx, sw.apex_pooling) {
                bard.use_pooled_apex()
            } else {
                bard.soul_voice() == 100
            };
            if apex {
                return Some(APEX_ARROW);
            }
        }

        if on(ctx, sw.resonant) && ctx.has_effect(buffs::RESONANT_ARROW_READY) {
            return Some(RESONANT_ARROW);
        }
        encore
    }
}

impl RuleSet for BardRotation {
    fn name(&self) -> &'static str {
        match (self.mode, self.scope) {
            (Mode::Advanced, Scope::Single) => "brd.st.adv",
            (Mode::Advanced, Scope::Aoe) => "brd.aoe.adv",
            (Mode::Simple, Scope::Single) => "brd.st.simple",
            (Mode::Simple, Scope::Aoe) => "brd.aoe.simple",
        }
    }

    fn toggle(&self) -> Toggle {
        match (self.mode, self.scope) {
            (Mode::Advanced, Scope::Single) => toggles::ST_ADV,
            (Mode::Advanced, Scope::Aoe) => toggles::AOE_ADV,
            (Mode::Simple, Scope::Single) => toggles::ST_SIMPLE,
            (Mode::Simple, Scope::Aoe) => toggles::AOE_SIMPLE,
        }
    }

    fn triggers(&self) -> &[ActionId] {
        match self.scope {
            Scope::Single => &[HEAVY_SHOT, BURST_SHOT],
            Scope::Aoe => &[QUICK_NOCK, LADONSBITE],
        }
    }

    fn sub_toggles(&self) -> Vec<Toggle> {
        let mut list = self.switches.toggles();
        list.extend([toggles::VARIANT_CURE, toggles::VARIANT_RAMPART]);
        list.sort_unstable();
        list.dedup();
        list
    }

    fn evaluate(&self, _action: ActionId, ctx: &ComboContext<'_>) -> Option<ActionId> {
        if let Some(action) = self.variant(ctx) {
            return Some(action);
        }
        let bard = BardView::new(ctx)?;
        let health_high = self.enemy_health_high(ctx);

        let action = self
            .opener(&bard)
            .or_else(|| self.songs(&bard, health_high))
            .or_else(|| self.buffs(&bard, health_high))
            .or_else(|| self.ogcds(&bard))
            .or_else(|| self.self_care(&bard))
            .or_else(|| self.dots(&bard, health_high))
            .or_else(|| self.gcds(&bard))?;

        trace!(target: "combo::bard", rule = self.name(), %action);
        Some(action)
    }
}
