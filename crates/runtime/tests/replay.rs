//! Scenario files replayed end to end.

use std::path::PathBuf;

use combo_core::{ActionId, OpenerState};
use combo_runtime::{RuntimeError, Scenario};

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

#[test]
fn dark_knight_opener_scenario_passes() {
    let scenario = Scenario::load(&scenario_path("drk_opener.ron")).expect("scenario loads");
    let report = scenario.replay().expect("replay runs");

    report.ensure_passed().expect("every press resolves as expected");
    assert_eq!(report.rows.len(), 4);
    assert!(report.rows.windows(2).all(|pair| pair[0].tick <= pair[1].tick));
    assert!(
        report
            .openers
            .iter()
            .any(|(name, state)| name == "drk.standard" && *state == OpenerState::InOpener)
    );
}

#[test]
fn wrong_expectation_is_reported_not_raised() {
    let scenario: Scenario = ron::from_str(
        r#"#![enable(implicit_some)]
        (
            snapshot: (job: Scholar, level: 100, gauge: Scholar((aetherflow: 2))),
            frames: [
                (press: [(action: "Physick", expect: "Lustrate")]),
            ],
        )"#,
    )
    .expect("scenario parses");

    // Full health: nothing needs healing, Physick passes through.
    let report = scenario.replay().expect("replay runs");
    assert_eq!(report.rows[0].resolved, ActionId(190));
    assert!(matches!(
        report.ensure_passed(),
        Err(RuntimeError::Mismatch { frame: 0, .. })
    ));
}

#[test]
fn unknown_action_names_fail_the_replay() {
    let scenario: Scenario = ron::from_str(
        r#"#![enable(implicit_some)]
        (snapshot: (job: Bard), frames: [(press: [(action: "Meteor")])])"#,
    )
    .expect("scenario parses");

    assert!(matches!(
        scenario.replay(),
        Err(RuntimeError::UnknownAction(name)) if name == "Meteor"
    ));
}

#[test]
fn missing_scenario_file_names_the_path() {
    let err = Scenario::load(&scenario_path("absent.ron")).expect_err("missing file");

    assert!(matches!(err, RuntimeError::ScenarioRead { .. }));
    assert!(err.to_string().contains("absent.ron"));
}
