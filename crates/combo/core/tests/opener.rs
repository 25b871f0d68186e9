mod common;

use combo_core::{
    ActionId, AdvancePolicy, Branch, Cascade, ComboContext, ComboEngine, EngineConfig, Env, Job,
    OpenerEnd, OpenerHandle, OpenerScript, OpenerState, RegistryBuilder, Target, Toggle,
};

use common::{FakeActions, FakeConfig, FakeState, Host};

const TRIGGER: ActionId = ActionId(3617);
const FILLER: ActionId = ActionId(3623);
const OFF_SCRIPT: ActionId = ActionId(7531);
const INTERJECTION: ActionId = ActionId(7393);
const SCRIPT: [ActionId; 5] = [
    ActionId(3643),
    ActionId(16472),
    ActionId(7390),
    ActionId(16470),
    ActionId(3639),
];

const ROTATION: Toggle = Toggle("test.rotation");
const OPENER: Toggle = Toggle("test.rotation.opener");

fn has_cooldowns(ctx: &ComboContext<'_>) -> bool {
    ctx.player_mp() >= 7000 && SCRIPT.iter().all(|&a| ctx.action_ready(a))
}

struct Harness {
    state: FakeState,
    actions: FakeActions,
    config: FakeConfig,
    engine: ComboEngine,
    handle: OpenerHandle,
}

impl Harness {
    fn new(host: Host, settings: EngineConfig) -> Self {
        let mut builder = RegistryBuilder::new();
        let handle = builder.opener(
            OpenerScript::new("test.opener", Job::DarkKnight, &SCRIPT)
                .levels(100, 109)
                .precondition(has_cooldowns)
                .interjections(&[INTERJECTION]),
        );
        builder.register(
            Cascade::new("test.rotation", ROTATION)
                .triggers(&[TRIGGER])
                .branch(Branch::new("opener", Target::Opener(handle)).toggle(OPENER))
                .otherwise(Target::Action(FILLER)),
        );
        let config = FakeConfig::default().enable(ROTATION).enable(OPENER);
        let registry = builder.build(&config).expect("registry builds");

        let mut actions = FakeActions::default().learn_all(&SCRIPT);
        actions = actions.learn_all(&[TRIGGER, FILLER, OFF_SCRIPT, INTERJECTION]);

        Self {
            state: FakeState::new(host),
            actions,
            config,
            engine: ComboEngine::new(registry, settings),
            handle,
        }
    }

    fn tick(&mut self) {
        let env = Env::with_all(&self.state, &self.actions, &self.config).into_combo_env();
        self.engine.begin_tick(env);
    }

    fn press(&self) -> ActionId {
        let env = Env::with_all(&self.state, &self.actions, &self.config).into_combo_env();
        self.engine.resolve(TRIGGER, env)
    }

    /// Presses, executes what was returned, and moves to the next tick.
    fn press_and_execute(&mut self) -> ActionId {
        let action = self.press();
        self.state.execute(action);
        self.state.update(|host| host.combat_time += 2.5);
        self.tick();
        action
    }

    fn opener_state(&self) -> OpenerState {
        self.engine.opener_state("test.opener").expect("opener registered")
    }

    fn cursor(&self) -> usize {
        self.engine
            .registry()
            .openers()
            .get(self.handle)
            .expect("handle valid")
            .cursor()
    }

    fn pull(&self) -> u32 {
        self.engine
            .registry()
            .openers()
            .get(self.handle)
            .expect("handle valid")
            .pull()
    }
}

fn in_combat() -> Host {
    Host {
        in_combat: true,
        ..Host::default()
    }
}

// ============================================================================
// Arming and advancing
// ============================================================================

#[test]
fn ready_player_receives_script_in_order() {
    let mut h = Harness::new(in_combat(), EngineConfig::default());
    h.tick();

    assert_eq!(h.press_and_execute(), SCRIPT[0]);
    assert_eq!(h.opener_state(), OpenerState::InOpener);
    assert_eq!(h.press_and_execute(), SCRIPT[1]);
    assert_eq!(h.cursor(), 2);
}

#[test]
fn issue_policy_advances_on_every_call() {
    let mut h = Harness::new(
        in_combat(),
        EngineConfig::default().with_opener_policy(AdvancePolicy::OnIssue),
    );
    h.tick();

    assert_eq!(h.press(), SCRIPT[0]);
    assert_eq!(h.press(), SCRIPT[1]);
    assert_eq!(h.cursor(), 2);
}

#[test]
fn confirm_policy_repeats_step_until_executed() {
    let mut h = Harness::new(in_combat(), EngineConfig::default());
    h.tick();

    assert_eq!(h.press(), SCRIPT[0]);
    assert_eq!(h.press(), SCRIPT[0]);
    h.tick();
    assert_eq!(h.press(), SCRIPT[0]);
    assert_eq!(h.cursor(), 0);
}

#[test]
fn completed_opener_falls_back_to_rotation() {
    let mut h = Harness::new(in_combat(), EngineConfig::default());
    h.tick();

    let executed: Vec<_> = (0..SCRIPT.len()).map(|_| h.press_and_execute()).collect();
    assert_eq!(executed, SCRIPT);
    assert_eq!(h.press(), FILLER);
    assert_eq!(h.opener_state(), OpenerState::PostOpener(OpenerEnd::Completed));
}

#[test]
fn opener_arms_before_the_pull() {
    let mut h = Harness::new(Host::default(), EngineConfig::default());
    h.tick();

    assert_eq!(h.press(), SCRIPT[0]);
    h.state.execute(SCRIPT[0]);
    h.state.update(|host| host.in_combat = true);
    h.tick();
    assert_eq!(h.press(), SCRIPT[1]);
}

// ============================================================================
// Fallback
// ============================================================================

#[test]
fn failed_precondition_never_yields_script_actions() {
    let mut h = Harness::new(
        Host {
            mp: 3000,
            ..in_combat()
        },
        EngineConfig::default(),
    );
    h.tick();

    for tick in 0..20 {
        if tick == 5 {
            // Resources recover mid-pull; the opener must stay off.
            h.state.update(|host| host.mp = 10_000);
        }
        let action = h.press_and_execute();
        assert!(!SCRIPT.contains(&action), "tick {tick} returned {action}");
        assert_eq!(action, FILLER);
    }
    assert_eq!(
        h.opener_state(),
        OpenerState::PostOpener(OpenerEnd::PreconditionFailed)
    );
}

#[test]
fn precondition_failure_on_first_press_holds_for_the_pull() {
    let mut h = Harness::new(
        Host {
            mp: 3000,
            ..Host::default()
        },
        EngineConfig::default(),
    );
    // Last boundary saw the player out of combat; the pull starts before the next one.
    h.tick();
    h.state.update(|host| host.in_combat = true);

    assert_eq!(h.press(), FILLER);
    assert_eq!(
        h.opener_state(),
        OpenerState::PostOpener(OpenerEnd::PreconditionFailed)
    );

    h.state.update(|host| host.mp = 10_000);
    for _ in 0..5 {
        h.tick();
        assert_eq!(h.press(), FILLER);
        assert_eq!(
            h.opener_state(),
            OpenerState::PostOpener(OpenerEnd::PreconditionFailed)
        );
    }
}

#[test]
fn off_script_execution_aborts_for_the_pull() {
    let mut h = Harness::new(in_combat(), EngineConfig::default());
    h.tick();
    assert_eq!(h.press_and_execute(), SCRIPT[0]);

    h.state.execute(OFF_SCRIPT);
    h.tick();
    assert_eq!(
        h.opener_state(),
        OpenerState::PostOpener(OpenerEnd::Desync {
            expected: SCRIPT[1],
            actual: OFF_SCRIPT,
        })
    );

    let mut last_cursor = h.cursor();
    for _ in 0..10 {
        assert_eq!(h.press_and_execute(), FILLER);
        assert!(h.opener_state().is_finished());
        assert!(h.cursor() >= last_cursor);
        last_cursor = h.cursor();
    }
}

#[test]
fn interjections_do_not_desync() {
    let mut h = Harness::new(in_combat(), EngineConfig::default());
    h.tick();
    assert_eq!(h.press_and_execute(), SCRIPT[0]);

    h.state.execute(INTERJECTION);
    h.tick();
    assert_eq!(h.press(), SCRIPT[1]);
    assert!(h.opener_state().is_running());
}

#[test]
fn no_progress_within_timeout_stalls() {
    let mut h = Harness::new(
        in_combat(),
        EngineConfig::default().with_opener_step_timeout(5.0),
    );
    h.tick();
    assert_eq!(h.press(), SCRIPT[0]);

    h.state.update(|host| host.combat_time = 6.0);
    h.tick();
    assert_eq!(h.press(), FILLER);
    assert_eq!(h.opener_state(), OpenerState::PostOpener(OpenerEnd::Stalled));
}

#[test]
fn level_outside_range_never_arms() {
    let mut h = Harness::new(
        Host {
            level: 90,
            ..in_combat()
        },
        EngineConfig::default(),
    );
    h.tick();

    assert_eq!(h.press(), FILLER);
    assert_eq!(
        h.opener_state(),
        OpenerState::PostOpener(OpenerEnd::LevelOutOfRange)
    );
}

#[test]
fn lost_gauge_mid_sequence_aborts() {
    let mut h = Harness::new(in_combat(), EngineConfig::default());
    h.tick();
    assert_eq!(h.press_and_execute(), SCRIPT[0]);

    h.state.update(|host| host.gauge = None);
    h.tick();
    assert_eq!(h.press(), FILLER);
    assert_eq!(
        h.opener_state(),
        OpenerState::PostOpener(OpenerEnd::MissingState)
    );
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn combat_end_starts_a_new_pull() {
    let mut h = Harness::new(in_combat(), EngineConfig::default());
    h.tick();
    assert_eq!(h.press_and_execute(), SCRIPT[0]);
    h.state.execute(OFF_SCRIPT);
    h.tick();
    assert!(h.opener_state().is_finished());
    let pull = h.pull();

    h.state.update(|host| {
        host.in_combat = false;
        host.combat_time = 0.0;
    });
    h.tick();
    assert_eq!(h.opener_state(), OpenerState::PreOpener);
    assert_eq!(h.pull(), pull + 1);
    assert_eq!(h.cursor(), 0);

    h.state.update(|host| host.in_combat = true);
    h.tick();
    assert_eq!(h.press(), SCRIPT[0]);
}
