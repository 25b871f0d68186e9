//! Scholar heal buttons against a scripted host.

mod common;

use combo_content::ComboConfig;
use combo_content::jobs::scholar::{actions::*, buffs, options};
use combo_core::{Job, JobGauge, OptionValue, ScholarGauge};

use common::{ALLY, Harness, Host, PLAYER};

fn host(aetherflow: u8) -> Host {
    Host::new(
        Job::Scholar,
        JobGauge::Scholar(ScholarGauge {
            aetherflow,
            fairy_gauge: 50,
            seraph_timer_ms: 0,
        }),
    )
}

fn target_ally(host: &mut Host, hp: f32) {
    host.target = Some(ALLY);
    host.hp(ALLY, hp);
}

// ============================================================================
// Single-target heal
// ============================================================================

#[test]
fn lustrate_is_ranked_first_by_default() {
    let mut host = host(2);
    host.hp(PLAYER, 50.0);
    let mut harness = Harness::with_defaults(host);

    assert_eq!(harness.press(PHYSICK), LUSTRATE);
}

#[test]
fn priority_options_reorder_heals() {
    let mut config = ComboConfig::embedded_default().expect("default config");
    config.set(options::LUSTRATE_PRIORITY, OptionValue::Int(9));
    let mut host = host(2);
    host.hp(PLAYER, 50.0);
    let mut harness = Harness::new(config, host);

    assert_eq!(harness.press(PHYSICK), EXCOGITATION);
}

#[test]
fn friendly_target_is_healed_instead_of_the_player() {
    let mut host = host(2);
    host.hp(PLAYER, 20.0);
    target_ally(&mut host, 95.0);
    let mut harness = Harness::with_defaults(host);

    // The ally is above every threshold.
    assert_eq!(harness.press(PHYSICK), PHYSICK);

    harness.update(|h| {
        h.hp(ALLY, 65.0);
    });
    assert_eq!(harness.press(PHYSICK), LUSTRATE);
}

#[test]
fn heals_without_aetherflow_fall_back_to_protraction() {
    let mut host = host(0);
    host.hp(PLAYER, 50.0);
    let mut harness = Harness::with_defaults(host);

    assert_eq!(harness.press(PHYSICK), PROTRACTION);
}

#[test]
fn existing_excogitation_is_not_overwritten() {
    let mut config = ComboConfig::embedded_default().expect("default config");
    config.set(options::LUSTRATE_PRIORITY, OptionValue::Int(9));
    let mut host = host(2);
    host.hp(PLAYER, 68.0)
        .own_status(PLAYER, buffs::EXCOGITATION, 30.0);
    let mut harness = Harness::new(config, host);

    // Protraction waits for 60%; Aetherpact is next in line.
    assert_eq!(harness.press(PHYSICK), AETHERPACT);
}

// ============================================================================
// Party heal
// ============================================================================

#[test]
fn succor_becomes_the_first_ready_fairy_heal() {
    let mut harness = Harness::with_defaults(host(2));
    assert_eq!(harness.press(SUCCOR), WHISPERING_DAWN);

    harness.update(|h| {
        h.cooling(&[WHISPERING_DAWN], 30.0);
    });
    assert_eq!(harness.press(SUCCOR), FEY_ILLUMINATION);
}

#[test]
fn seraph_swaps_the_fairy_heals() {
    let mut host = host(2);
    host.gauge = Some(JobGauge::Scholar(ScholarGauge {
        aetherflow: 2,
        fairy_gauge: 0,
        seraph_timer_ms: 15_000,
    }));
    let mut harness = Harness::with_defaults(host);

    assert_eq!(harness.press(SUCCOR), ANGELS_WHISPER);
}
