use combo_core::{
    ActionId, Branch, Candidate, Cascade, ComboContext, OpenerHandle, PriorityEntry,
    PriorityList, Target, WeaveTiming,
};

use super::actions::*;
use super::{MP_COST, buffs, options, should_tbn_self, toggles};
use crate::jobs::role;

/// MP at which Edge or Flood is spent regardless of Darkside, to avoid overcapping.
const MP_OVERCAP: u32 = 8500;

fn weave_window(ctx: &ComboContext<'_>) -> bool {
    ctx.in_combat() && ctx.has_battle_target() && ctx.can_weave(WeaveTiming::Weave)
}

fn in_delirium(ctx: &ComboContext<'_>) -> bool {
    ctx.has_effect(buffs::DELIRIUM) || ctx.has_effect(buffs::ENHANCED_DELIRIUM)
}

fn blood(ctx: &ComboContext<'_>) -> u8 {
    ctx.dark_knight_gauge().map_or(0, |g| g.blood)
}

fn can_tbn(ctx: &ComboContext<'_>, aoe: bool) -> bool {
    ctx.can_weave(WeaveTiming::Weave)
        && ctx.action_ready(BLACKEST_NIGHT)
        && ctx.player_mp() >= MP_COST
        && should_tbn_self(ctx, aoe)
}

/// Edge or Flood: free with Dark Arts, otherwise spent while keeping
/// enough MP for The Blackest Night.
fn darkness_spender_ready(ctx: &ComboContext<'_>, base: ActionId) -> bool {
    let Some(gauge) = ctx.dark_knight_gauge() else {
        return false;
    };
    if !ctx.level_checked(base) {
        return false;
    }
    if gauge.dark_arts {
        return true;
    }
    let mp = ctx.player_mp();
    let reserve = ctx.int_option(options::ST_MP_RESERVE, i64::from(MP_COST));
    let reserve = u32::try_from(reserve).unwrap_or(MP_COST);
    let darkside = gauge.darkside_timer_ms as f32 / 1000.0;

    mp >= MP_COST + reserve && (darkside < 10.0 || mp >= MP_OVERCAP || in_delirium(ctx))
}

/// Scarlet Delirium → Comeuppance → Torcleaver while Enhanced Delirium lasts.
fn delirium_chain(_: ActionId, ctx: &ComboContext<'_>) -> Option<ActionId> {
    if !ctx.has_effect(buffs::ENHANCED_DELIRIUM) || !ctx.level_checked(SCARLET_DELIRIUM) {
        return None;
    }
    if ctx.in_combo_after(COMEUPPANCE) {
        Some(TORCLEAVER)
    } else if ctx.in_combo_after(SCARLET_DELIRIUM) {
        Some(COMEUPPANCE)
    } else {
        Some(SCARLET_DELIRIUM)
    }
}

fn variant_branches(cascade: Cascade) -> Cascade {
    cascade
        .rule(
            "variant_cure",
            |ctx| {
                let hp = ctx.float_option(options::VARIANT_CURE_HP, 50.0) as f32;
                role::can_variant_cure(ctx, toggles::VARIANT_CURE, hp)
            },
            Target::Action(role::VARIANT_CURE),
        )
        .rule(
            "variant_rampart",
            |ctx| role::can_variant_rampart(ctx, toggles::VARIANT_RAMPART, WeaveTiming::Weave),
            Target::Action(role::VARIANT_RAMPART),
        )
}

fn st_cooldowns() -> PriorityList {
    PriorityList::new("drk.st.cds")
        .entry(PriorityEntry::new("living_shadow", LIVING_SHADOW).toggle(toggles::ST_LIVING_SHADOW))
        .entry(
            PriorityEntry::new("delirium", Candidate::Tier(BLOOD_WEAPON))
                .toggle(toggles::ST_DELIRIUM),
        )
        .entry(
            PriorityEntry::new("salted_earth", SALTED_EARTH)
                .toggle(toggles::ST_SALTED_EARTH)
                .when(|ctx| !ctx.has_effect(buffs::SALTED_EARTH)),
        )
        .entry(
            PriorityEntry::new("salt_and_darkness", SALT_AND_DARKNESS)
                .toggle(toggles::ST_SALTED_EARTH)
                .when(|ctx| ctx.has_effect(buffs::SALTED_EARTH)),
        )
        .entry(PriorityEntry::new("carve_and_spit", CARVE_AND_SPIT).toggle(toggles::ST_CARVE))
        .entry(
            PriorityEntry::new("shadowbringer", SHADOWBRINGER)
                .toggle(toggles::ST_SHADOWBRINGER)
                .when(|ctx| in_delirium(ctx) || ctx.remaining_charges(SHADOWBRINGER) >= 2),
        )
}

/// Single-target rotation on Hard Slash, with the level 100 opener on top.
pub fn st_rotation(opener: OpenerHandle) -> Cascade {
    let cascade = Cascade::new("drk.st.adv", toggles::ST_ADV)
        .triggers(&[HARD_SLASH])
        .reads(&[toggles::ST_MITIGATION, toggles::ST_TBN]);
    variant_branches(cascade)
        .branch(Branch::new("opener", Target::Opener(opener)).toggle(toggles::ST_OPENER))
        .rule(
            "blackest_night",
            |ctx| can_tbn(ctx, false),
            Target::Action(BLACKEST_NIGHT),
        )
        .branch(
            Branch::new("cooldowns", Target::Select(st_cooldowns()))
                .toggle(toggles::ST_CDS)
                .when(weave_window),
        )
        .branch(
            Branch::new("edge", Target::Tier(EDGE_OF_DARKNESS))
                .toggle(toggles::ST_EDGE)
                .when(|ctx| weave_window(ctx) && darkness_spender_ready(ctx, EDGE_OF_DARKNESS)),
        )
        .branch(
            Branch::new("disesteem", Target::Action(DISESTEEM))
                .toggle(toggles::ST_DISESTEEM)
                .when(|ctx| ctx.has_effect(buffs::SCORN) && ctx.level_checked(DISESTEEM)),
        )
        .branch(
            Branch::new("delirium_chain", Target::with(delirium_chain))
                .toggle(toggles::ST_DELIRIUM_CHAIN),
        )
        .branch(
            Branch::new("bloodspiller", Target::Action(BLOODSPILLER))
                .toggle(toggles::ST_BLOODSPILLER)
                .when(|ctx| {
                    ctx.level_checked(BLOODSPILLER)
                        && (ctx.has_effect(buffs::DELIRIUM) || blood(ctx) >= 50)
                }),
        )
        .rule(
            "souleater",
            |ctx| ctx.in_combo_after(SYPHON_STRIKE) && ctx.level_checked(SOULEATER),
            Target::Action(SOULEATER),
        )
        .rule(
            "syphon_strike",
            |ctx| ctx.in_combo_after(HARD_SLASH) && ctx.level_checked(SYPHON_STRIKE),
            Target::Action(SYPHON_STRIKE),
        )
        .otherwise(Target::Action(HARD_SLASH))
}

fn aoe_cooldowns() -> PriorityList {
    PriorityList::new("drk.aoe.cds")
        .entry(PriorityEntry::new("living_shadow", LIVING_SHADOW).toggle(toggles::AOE_LIVING_SHADOW))
        .entry(
            PriorityEntry::new("delirium", Candidate::Tier(BLOOD_WEAPON))
                .toggle(toggles::AOE_DELIRIUM),
        )
        .entry(
            PriorityEntry::new("salted_earth", SALTED_EARTH)
                .toggle(toggles::AOE_SALTED_EARTH)
                .when(|ctx| !ctx.has_effect(buffs::SALTED_EARTH)),
        )
        .entry(
            PriorityEntry::new("salt_and_darkness", SALT_AND_DARKNESS)
                .toggle(toggles::AOE_SALTED_EARTH)
                .when(|ctx| ctx.has_effect(buffs::SALTED_EARTH)),
        )
        .entry(
            PriorityEntry::new("shadowbringer", SHADOWBRINGER).toggle(toggles::AOE_SHADOWBRINGER),
        )
}

/// AoE rotation on Unleash.
pub fn aoe_rotation() -> Cascade {
    let cascade = Cascade::new("drk.aoe.adv", toggles::AOE_ADV)
        .triggers(&[UNLEASH])
        .reads(&[toggles::AOE_MITIGATION, toggles::AOE_TBN]);
    variant_branches(cascade)
        .rule(
            "blackest_night",
            |ctx| can_tbn(ctx, true),
            Target::Action(BLACKEST_NIGHT),
        )
        .branch(
            Branch::new("cooldowns", Target::Select(aoe_cooldowns()))
                .toggle(toggles::AOE_CDS)
                .when(weave_window),
        )
        .branch(
            Branch::new("abyssal_drain", Target::Action(ABYSSAL_DRAIN))
                .toggle(toggles::AOE_ABYSSAL_DRAIN)
                .when(|ctx| {
                    let hp = ctx.float_option(options::AOE_ABYSSAL_DRAIN_HP, 60.0) as f32;
                    weave_window(ctx)
                        && ctx.action_ready(ABYSSAL_DRAIN)
                        && ctx.player_hp_percent() <= hp
                }),
        )
        .branch(
            Branch::new("flood", Target::Tier(FLOOD_OF_DARKNESS))
                .toggle(toggles::AOE_FLOOD)
                .when(|ctx| weave_window(ctx) && darkness_spender_ready(ctx, FLOOD_OF_DARKNESS)),
        )
        .branch(
            Branch::new("disesteem", Target::Action(DISESTEEM))
                .toggle(toggles::AOE_DISESTEEM)
                .when(|ctx| ctx.has_effect(buffs::SCORN) && ctx.level_checked(DISESTEEM)),
        )
        .branch(
            Branch::new("impalement", Target::Action(IMPALEMENT))
                .toggle(toggles::AOE_QUIETUS)
                .when(|ctx| {
                    ctx.has_effect(buffs::ENHANCED_DELIRIUM) && ctx.level_checked(IMPALEMENT)
                }),
        )
        .branch(
            Branch::new("quietus", Target::Action(QUIETUS))
                .toggle(toggles::AOE_QUIETUS)
                .when(|ctx| {
                    ctx.level_checked(QUIETUS)
                        && (ctx.has_effect(buffs::DELIRIUM) || blood(ctx) >= 50)
                }),
        )
        .rule(
            "stalwart_soul",
            |ctx| ctx.in_combo_after(UNLEASH) && ctx.level_checked(STALWART_SOUL),
            Target::Action(STALWART_SOUL),
        )
}
