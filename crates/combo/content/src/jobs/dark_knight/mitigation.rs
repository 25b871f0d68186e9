use combo_core::{
    BossAvoidance, Candidate, Cascade, ComboContext, PartyRequirement, PriorityEntry,
    PriorityList, RuleStage, Target,
};

use super::actions::*;
use super::{MP_COST, buffs, has_any_tbn, options, toggles};
use crate::jobs::role;

fn oblation_missing(ctx: &ComboContext<'_>) -> bool {
    if ctx.has_friendly_target() {
        !ctx.target_has_effect_any(buffs::OBLATION)
    } else {
        !ctx.has_effect_any(buffs::OBLATION)
    }
}

/// Defensive cooldowns in the order the one-button mitigation spends them.
pub fn mitigation_priority() -> PriorityList {
    PriorityList::new("drk.mit")
        .entry(
            PriorityEntry::new("living_dead_emergency", LIVING_DEAD)
                .toggle(toggles::MIT_LIVING_DEAD_MAX)
                .when(|ctx| {
                    let health = ctx.int_option(options::MIT_LIVING_DEAD_HEALTH, 15) as f32;
                    ctx.player_hp_percent() < health
                        && ctx.in_configured_content(options::MIT_LIVING_DEAD_CONTENT)
                }),
        )
        .entry(
            PriorityEntry::new("blackest_night", BLACKEST_NIGHT)
                .toggle(toggles::MIT_BLACKEST_NIGHT)
                .when(|ctx| !has_any_tbn(ctx) && ctx.player_mp() > MP_COST),
        )
        .entry(
            PriorityEntry::new("oblation", OBLATION)
                .toggle(toggles::MIT_OBLATION)
                .when(|ctx| {
                    let reserve = ctx.int_option(options::MIT_OBLATION_CHARGES, 0);
                    oblation_missing(ctx) && i64::from(ctx.remaining_charges(OBLATION)) > reserve
                }),
        )
        .entry(
            PriorityEntry::new("reprisal", role::REPRISAL)
                .toggle(toggles::MIT_REPRISAL)
                .when(|ctx| ctx.in_action_range(role::REPRISAL)),
        )
        .entry(
            PriorityEntry::new("dark_missionary", DARK_MISSIONARY)
                .toggle(toggles::MIT_DARK_MISSIONARY)
                .when(|ctx| {
                    PartyRequirement::from_option(ctx.option(options::MIT_DARK_MISSIONARY_PARTY))
                        == PartyRequirement::No
                        || ctx.in_party()
                }),
        )
        .entry(PriorityEntry::new("rampart", role::RAMPART).toggle(toggles::MIT_RAMPART))
        .entry(PriorityEntry::new("dark_mind", DARK_MIND).toggle(toggles::MIT_DARK_MIND))
        .entry(
            PriorityEntry::new("arms_length", role::ARMS_LENGTH)
                .toggle(toggles::MIT_ARMS_LENGTH)
                .when(|ctx| {
                    let enemies = ctx.int_option(options::MIT_ARMS_LENGTH_ENEMIES, 3);
                    i64::from(ctx.enemies_within(7.0)) >= enemies
                        && (BossAvoidance::from_option(ctx.option(options::MIT_ARMS_LENGTH_BOSS))
                            == BossAvoidance::Off
                            || ctx.in_boss_encounter())
                }),
        )
        .entry(
            PriorityEntry::new("shadow_wall", Candidate::Tier(SHADOW_WALL))
                .toggle(toggles::MIT_SHADOW_WALL),
        )
        .entry(
            PriorityEntry::new("living_dead", LIVING_DEAD)
                .toggle(toggles::MIT_LIVING_DEAD)
                .when(|ctx| ctx.in_configured_content(options::MIT_LIVING_DEAD_CONTENT)),
        )
}

/// Dark Mind becomes the best defensive cooldown available right now.
pub fn one_button_mitigation() -> Cascade {
    Cascade::new("drk.mit.one_button", toggles::MIT_ONE_BUTTON)
        .stage(RuleStage::Defensive)
        .triggers(&[DARK_MIND])
        .otherwise(Target::Select(mitigation_priority()))
}
