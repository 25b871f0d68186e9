//! Single-button Bard features.

use combo_core::{
    ActionId, Branch, Cascade, ComboContext, PriorityEntry, PriorityList, Song, Target,
};

use super::actions::*;
use super::buffs;
use super::toggles;
use super::view::BardView;

pub(super) fn all() -> Vec<Cascade> {
    vec![
        straight_shot_upgrade(),
        iron_jaws(),
        iron_jaws_alternate(),
        aoe_ogcd(),
        st_ogcd(),
        aoe_combo(),
        buff_button(),
        one_button_songs(),
    ]
}

fn soul_voice_full(ctx: &ComboContext<'_>) -> bool {
    BardView::new(ctx).is_some_and(|bard| bard.soul_voice() == 100)
}

fn hawks_eye_or_barrage(ctx: &ComboContext<'_>) -> bool {
    ctx.has_effect(buffs::HAWKS_EYE) || ctx.has_effect(buffs::BARRAGE)
}

/// Re-applies whichever DoT is about to fall off.
fn dot_upkeep(_: ActionId, ctx: &ComboContext<'_>) -> Option<ActionId> {
    let bard = BardView::new(ctx)?;
    let refresh = |base| {
        if bard.can_iron_jaws() {
            IRON_JAWS
        } else {
            ctx.tier(base)
        }
    };
    if bard.purple().is_some() && bard.purple_remaining() < 4.0 {
        return Some(refresh(VENOMOUS_BITE));
    }
    if bard.blue().is_some() && bard.blue_remaining() < 4.0 {
        return Some(refresh(WINDBITE));
    }
    None
}

fn straight_shot_upgrade() -> Cascade {
    Cascade::new("brd.straight_shot_upgrade", toggles::STRAIGHT_SHOT_UPGRADE)
        .triggers(&[HEAVY_SHOT, BURST_SHOT])
        .branch(
            Branch::new("dots", Target::with(dot_upkeep))
                .toggle(toggles::STRAIGHT_SHOT_DOTS)
                .when(|ctx| ctx.in_combat()),
        )
        .branch(
            Branch::new("apex", Target::Action(APEX_ARROW))
                .toggle(toggles::STRAIGHT_SHOT_APEX)
                .when(soul_voice_full),
        )
        .branch(
            Branch::new("blast", Target::Action(BLAST_ARROW))
                .toggle(toggles::STRAIGHT_SHOT_APEX)
                .when(|ctx| ctx.has_effect(buffs::BLAST_ARROW_READY)),
        )
        .rule("straight_shot", hawks_eye_or_barrage, Target::Tier(STRAIGHT_SHOT))
}

fn iron_jaws() -> Cascade {
    Cascade::new("brd.iron_jaws", toggles::IRON_JAWS)
        .triggers(&[IRON_JAWS])
        .rule(
            "iron_jaws",
            |ctx| BardView::new(ctx).is_some_and(|bard| bard.use_iron_jaws()),
            Target::Action(IRON_JAWS),
        )
        .rule(
            "windbite",
            |ctx| BardView::new(ctx).is_some_and(|bard| bard.apply_blue_dot()),
            Target::Tier(WINDBITE),
        )
        .rule(
            "venomous_bite",
            |ctx| BardView::new(ctx).is_some_and(|bard| bard.apply_purple_dot()),
            Target::Tier(VENOMOUS_BITE),
        )
        .branch(
            Branch::new("blast", Target::Action(BLAST_ARROW))
                .toggle(toggles::IRON_JAWS_APEX)
                .when(|ctx| {
                    ctx.level_checked(BLAST_ARROW) && ctx.has_effect(buffs::BLAST_ARROW_READY)
                }),
        )
        .branch(
            Branch::new("apex", Target::Action(APEX_ARROW))
                .toggle(toggles::IRON_JAWS_APEX)
                .when(soul_voice_full),
        )
}

/// Iron Jaws once both DoTs are up, otherwise whichever DoT is shorter.
fn iron_jaws_alternate() -> Cascade {
    Cascade::new("brd.iron_jaws_alternate", toggles::IRON_JAWS_ALTERNATE)
        .triggers(&[IRON_JAWS])
        .rule(
            "iron_jaws",
            |ctx| BardView::new(ctx).is_some_and(|bard| bard.use_iron_jaws()),
            Target::Action(IRON_JAWS),
        )
        .otherwise(Target::with(|_, ctx| {
            let bard = BardView::new(ctx)?;
            if ctx.level_checked(WINDBITE) && bard.blue_remaining() <= bard.purple_remaining() {
                Some(ctx.tier(WINDBITE))
            } else {
                Some(ctx.tier(VENOMOUS_BITE))
            }
        }))
}

fn songs(name: &'static str) -> PriorityList {
    PriorityList::new(name)
        .entry(PriorityEntry::new("wanderers_minuet", WANDERERS_MINUET))
        .entry(PriorityEntry::new("mages_ballad", MAGES_BALLAD))
        .entry(PriorityEntry::new("armys_paeon", ARMYS_PAEON))
}

fn song_ending_or_army(ctx: &ComboContext<'_>) -> bool {
    BardView::new(ctx).is_some_and(|bard| bard.song_timer() < 1.0 || bard.song() == Song::Army)
}

fn pitch_perfected(ctx: &ComboContext<'_>) -> bool {
    BardView::new(ctx).is_some_and(|bard| bard.pitch_perfected())
}

fn aoe_ogcd() -> Cascade {
    Cascade::new("brd.aoe_ogcd", toggles::AOE_OGCD)
        .triggers(&[RAIN_OF_DEATH])
        .branch(
            Branch::new("songs", Target::Select(songs("brd.aoe_ogcd.songs")))
                .toggle(toggles::AOE_OGCD_SONGS)
                .when(song_ending_or_army),
        )
        .rule("empyreal_arrow", |ctx| ctx.action_ready(EMPYREAL_ARROW), Target::Action(EMPYREAL_ARROW))
        .rule("pitch_perfect", pitch_perfected, Target::Action(PITCH_PERFECT))
        .rule("rain_of_death", |ctx| ctx.action_ready(RAIN_OF_DEATH), Target::Action(RAIN_OF_DEATH))
        .rule("sidewinder", |ctx| ctx.action_ready(SIDEWINDER), Target::Action(SIDEWINDER))
}

fn st_ogcd() -> Cascade {
    Cascade::new("brd.st_ogcd", toggles::ST_OGCD)
        .triggers(&[BLOODLETTER, HEARTBREAK_SHOT])
        .branch(
            Branch::new("songs", Target::Select(songs("brd.st_ogcd.songs")))
                .toggle(toggles::ST_OGCD_SONGS)
                .when(song_ending_or_army),
        )
        .rule("pitch_perfect", pitch_perfected, Target::Action(PITCH_PERFECT))
        .rule("empyreal_arrow", |ctx| ctx.action_ready(EMPYREAL_ARROW), Target::Action(EMPYREAL_ARROW))
        .rule("sidewinder", |ctx| ctx.action_ready(SIDEWINDER), Target::Action(SIDEWINDER))
        .rule("bloodletter", |ctx| ctx.action_ready(BLOODLETTER), Target::Tier(BLOODLETTER))
}

fn aoe_combo() -> Cascade {
    Cascade::new("brd.aoe_combo", toggles::AOE_COMBO)
        .triggers(&[QUICK_NOCK, LADONSBITE])
        .branch(
            Branch::new("apex", Target::Action(APEX_ARROW))
                .toggle(toggles::AOE_COMBO_APEX)
                .when(soul_voice_full),
        )
        .branch(
            Branch::new("blast", Target::Action(BLAST_ARROW))
                .toggle(toggles::AOE_COMBO_APEX)
                .when(|ctx| ctx.has_effect(buffs::BLAST_ARROW_READY)),
        )
        .rule(
            "wide_volley",
            |ctx| ctx.action_ready(WIDE_VOLLEY) && ctx.has_effect(buffs::HAWKS_EYE),
            Target::Tier(WIDE_VOLLEY),
        )
}

/// Collapses the three raid buffs onto Barrage.
fn buff_button() -> Cascade {
    Cascade::new("brd.buffs", toggles::BUFFS)
        .triggers(&[BARRAGE])
        .otherwise(Target::Select(
            PriorityList::new("brd.buffs")
                .entry(PriorityEntry::new("raging_strikes", RAGING_STRIKES))
                .entry(PriorityEntry::new("battle_voice", BATTLE_VOICE))
                .entry(PriorityEntry::new("radiant_finale", RADIANT_FINALE)),
        ))
}

/// Cycles the three songs on Wanderer's Minuet.
fn one_button_songs() -> Cascade {
    fn playing(ctx: &ComboContext<'_>, song: Song, above: f32) -> bool {
        BardView::new(ctx).is_some_and(|bard| bard.song() == song && bard.song_timer() > above)
    }

    Cascade::new("brd.one_button_songs", toggles::ONE_BUTTON_SONGS)
        .triggers(&[WANDERERS_MINUET])
        .rule(
            "wanderers_minuet",
            |ctx| ctx.action_ready(WANDERERS_MINUET) || playing(ctx, Song::Wanderer, 11.0),
            Target::Action(WANDERERS_MINUET),
        )
        .rule(
            "mages_ballad",
            |ctx| ctx.action_ready(MAGES_BALLAD) || playing(ctx, Song::Mage, 2.0),
            Target::Action(MAGES_BALLAD),
        )
        .rule(
            "armys_paeon",
            |ctx| ctx.action_ready(ARMYS_PAEON) || playing(ctx, Song::Army, 2.0),
            Target::Action(ARMYS_PAEON),
        )
}
