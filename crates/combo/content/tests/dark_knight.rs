//! Dark Knight content against a scripted host.

mod common;

use combo_content::ComboConfig;
use combo_content::jobs::dark_knight::{actions::*, buffs, toggles};
use combo_content::jobs::role;
use combo_core::{DarkKnightGauge, Job, JobGauge, OpenerEnd, OpenerState};

use common::{Harness, Host, NO_WEAVE, PLAYER};

fn host() -> Host {
    Host::new(Job::DarkKnight, JobGauge::DarkKnight(DarkKnightGauge::default()))
}

/// Below the opener's level range, so the rotation runs on its own.
fn level_90() -> Host {
    let mut host = host();
    host.level = 90;
    host
}

// ============================================================================
// One-button mitigation
// ============================================================================

#[test]
fn emergency_living_dead_comes_first() {
    let mut host = host();
    host.hp(PLAYER, 10.0);
    let mut harness = Harness::with_defaults(host);

    assert_eq!(harness.press(DARK_MIND), LIVING_DEAD);
}

#[test]
fn blackest_night_is_the_first_regular_pick() {
    let mut harness = Harness::with_defaults(host());

    assert_eq!(harness.press(DARK_MIND), BLACKEST_NIGHT);
}

#[test]
fn spent_or_active_cooldowns_are_skipped() {
    let mut host = host();
    host.own_status(PLAYER, buffs::BLACKEST_NIGHT_SHIELD, 7.0)
        .own_status(PLAYER, buffs::OBLATION, 10.0)
        .cooling(&[role::REPRISAL], 40.0);
    let mut harness = Harness::with_defaults(host);

    // Dark Missionary wants a party by default; Rampart is next.
    assert_eq!(harness.press(DARK_MIND), role::RAMPART);
}

#[test]
fn disabled_entries_are_passed_over() {
    let mut config = ComboConfig::embedded_default().expect("default config");
    config.disable(toggles::MIT_BLACKEST_NIGHT);
    let mut harness = Harness::new(config, host());

    assert_eq!(harness.press(DARK_MIND), OBLATION);
}

#[test]
fn nothing_ready_passes_dark_mind_through() {
    let mut host = host();
    host.cooling(
        &[
            LIVING_DEAD,
            BLACKEST_NIGHT,
            OBLATION,
            role::REPRISAL,
            DARK_MISSIONARY,
            role::RAMPART,
            DARK_MIND,
            SHADOW_WALL,
            SHADOWED_VIGIL,
        ],
        60.0,
    );
    let mut harness = Harness::with_defaults(host);

    assert_eq!(harness.press(DARK_MIND), DARK_MIND);
}

#[test]
fn disabled_one_button_leaves_dark_mind_alone() {
    let mut config = ComboConfig::embedded_default().expect("default config");
    config.disable(toggles::MIT_ONE_BUTTON);
    let mut host = host();
    host.hp(PLAYER, 10.0);
    let mut harness = Harness::new(config, host);

    assert_eq!(harness.press(DARK_MIND), DARK_MIND);
}

// ============================================================================
// Single-target rotation
// ============================================================================

#[test]
fn blackest_night_under_the_health_threshold() {
    let mut host = level_90();
    host.hp(PLAYER, 80.0);
    let mut harness = Harness::with_defaults(host);

    assert_eq!(harness.press(HARD_SLASH), BLACKEST_NIGHT);
}

#[test]
fn cooldowns_weave_when_healthy() {
    let mut harness = Harness::with_defaults(level_90());

    assert_eq!(harness.press(HARD_SLASH), LIVING_SHADOW);
}

#[test]
fn combo_continues_outside_weave_windows() {
    let mut host = level_90();
    host.timing = NO_WEAVE;
    host.after_combo(SYPHON_STRIKE);
    let mut harness = Harness::with_defaults(host);
    assert_eq!(harness.press(HARD_SLASH), SOULEATER);

    harness.update(|h| {
        h.after_combo(HARD_SLASH);
    });
    assert_eq!(harness.press(HARD_SLASH), SYPHON_STRIKE);
}

#[test]
fn blood_is_spent_on_bloodspiller() {
    let mut host = level_90();
    host.timing = NO_WEAVE;
    host.gauge = Some(JobGauge::DarkKnight(DarkKnightGauge {
        blood: 60,
        ..DarkKnightGauge::default()
    }));
    let mut harness = Harness::with_defaults(host);

    assert_eq!(harness.press(HARD_SLASH), BLOODSPILLER);
}

#[test]
fn enhanced_delirium_walks_the_chain() {
    let mut config = ComboConfig::embedded_default().expect("default config");
    config.disable(toggles::ST_OPENER);
    let mut host = host();
    host.timing = NO_WEAVE;
    host.own_status(PLAYER, buffs::ENHANCED_DELIRIUM, 15.0);
    let mut harness = Harness::new(config, host);

    assert_eq!(harness.press(HARD_SLASH), SCARLET_DELIRIUM);

    harness.update(|h| {
        h.after_combo(SCARLET_DELIRIUM);
    });
    assert_eq!(harness.press(HARD_SLASH), COMEUPPANCE);

    harness.update(|h| {
        h.after_combo(COMEUPPANCE);
    });
    assert_eq!(harness.press(HARD_SLASH), TORCLEAVER);
}

#[test]
fn dark_arts_makes_edge_free() {
    let mut host = level_90();
    host.mp = 0;
    host.gauge = Some(JobGauge::DarkKnight(DarkKnightGauge {
        dark_arts: true,
        darkside_timer_ms: 30_000,
        ..DarkKnightGauge::default()
    }));
    host.cooling(
        &[LIVING_SHADOW, BLOOD_WEAPON, DELIRIUM, SALTED_EARTH, CARVE_AND_SPIT, SHADOWBRINGER],
        30.0,
    );
    let mut harness = Harness::with_defaults(host);

    assert_eq!(harness.press(HARD_SLASH), EDGE_OF_SHADOW);
}

// ============================================================================
// AoE rotation
// ============================================================================

#[test]
fn aoe_combo_finishes_with_stalwart_soul() {
    let mut host = level_90();
    host.timing = NO_WEAVE;
    host.after_combo(UNLEASH);
    let mut harness = Harness::with_defaults(host);

    assert_eq!(harness.press(UNLEASH), STALWART_SOUL);
}

#[test]
fn aoe_without_combo_passes_unleash_through() {
    let mut host = level_90();
    host.timing = NO_WEAVE;
    let mut harness = Harness::with_defaults(host);

    assert_eq!(harness.press(UNLEASH), UNLEASH);
}

// ============================================================================
// Opener
// ============================================================================

fn opener_ready() -> Host {
    let mut host = host();
    host.charges(SHADOWBRINGER, 2, 2);
    host
}

#[test]
fn opener_drives_hard_slash_step_by_step() {
    let mut harness = Harness::with_defaults(opener_ready());

    assert_eq!(harness.press(HARD_SLASH), HARD_SLASH);
    assert_eq!(harness.opener_state("drk.standard"), Some(OpenerState::InOpener));

    harness.execute(HARD_SLASH);
    assert_eq!(harness.press(HARD_SLASH), EDGE_OF_SHADOW);

    harness.execute(EDGE_OF_SHADOW);
    assert_eq!(harness.press(HARD_SLASH), LIVING_SHADOW);
}

#[test]
fn blackest_night_does_not_break_the_opener() {
    let mut harness = Harness::with_defaults(opener_ready());

    assert_eq!(harness.press(HARD_SLASH), HARD_SLASH);
    harness.execute(HARD_SLASH);
    assert_eq!(harness.press(HARD_SLASH), EDGE_OF_SHADOW);

    harness.execute(BLACKEST_NIGHT);
    assert_eq!(harness.press(HARD_SLASH), EDGE_OF_SHADOW);
    assert_eq!(harness.opener_state("drk.standard"), Some(OpenerState::InOpener));
}

#[test]
fn off_script_action_ends_the_opener() {
    let mut harness = Harness::with_defaults(opener_ready());

    assert_eq!(harness.press(HARD_SLASH), HARD_SLASH);
    harness.execute(UNLEASH);
    harness.press(HARD_SLASH);

    assert_eq!(
        harness.opener_state("drk.standard"),
        Some(OpenerState::PostOpener(OpenerEnd::Desync {
            expected: HARD_SLASH,
            actual: UNLEASH,
        }))
    );
}

#[test]
fn opener_waits_for_its_cooldowns() {
    let mut host = opener_ready();
    host.in_combat = false;
    host.cooling(&[LIVING_SHADOW], 50.0);
    let mut harness = Harness::with_defaults(host);

    harness.press(HARD_SLASH);
    assert_eq!(harness.opener_state("drk.standard"), Some(OpenerState::PreOpener));
}
