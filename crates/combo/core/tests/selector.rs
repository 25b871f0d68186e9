mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use combo_core::{
    ActionFamily, ActionId, ComboContext, CooldownState, EffectCache, EngineConfig, OpenerBank,
    PriorityEntry, PriorityList, Tick, Toggle, UpgradeTable,
};

use common::{FakeActions, FakeConfig, FakeState, Host, env};

const SHIELD: ActionId = ActionId(7393);
const REPRISAL: ActionId = ActionId(7535);
const RAMPART: ActionId = ActionId(7531);
const SHADOW_WALL: ActionId = ActionId(3636);
const SHADOWED_VIGIL: ActionId = ActionId(36927);

const MIT_SHIELD: Toggle = Toggle("test.mit.shield");
const MIT_REPRISAL: Toggle = Toggle("test.mit.reprisal");
const MIT_RAMPART: Toggle = Toggle("test.mit.rampart");

struct Fixture {
    actions: FakeActions,
    config: FakeConfig,
    tiers: UpgradeTable,
    openers: OpenerBank,
    settings: EngineConfig,
    cache: EffectCache,
}

impl Fixture {
    fn new(config: FakeConfig) -> Self {
        let mut cache = EffectCache::new();
        cache.begin_tick(Tick(1));
        let mut tiers = UpgradeTable::new();
        tiers.insert(ActionFamily::new(
            "shadow_wall",
            SHADOW_WALL,
            &[(38, SHADOW_WALL), (92, SHADOWED_VIGIL)],
        ));
        Self {
            actions: FakeActions::default().learn_all(&[
                SHIELD,
                REPRISAL,
                RAMPART,
                SHADOW_WALL,
                SHADOWED_VIGIL,
            ]),
            config,
            tiers,
            openers: OpenerBank::new(),
            settings: EngineConfig::default(),
            cache,
        }
    }

    fn ctx<'a>(&'a self, state: &'a FakeState) -> ComboContext<'a> {
        ComboContext::new(
            env(state, &self.actions, &self.config),
            &self.cache,
            &self.tiers,
            &self.openers,
            &self.settings,
        )
    }
}

fn all_enabled() -> FakeConfig {
    FakeConfig::default()
        .enable(MIT_SHIELD)
        .enable(MIT_REPRISAL)
        .enable(MIT_RAMPART)
}

fn mitigation() -> PriorityList {
    PriorityList::new("mitigation")
        .entry(
            PriorityEntry::new("shield", SHIELD)
                .toggle(MIT_SHIELD)
                .when(|ctx| ctx.player_hp_percent() < 50.0),
        )
        .entry(PriorityEntry::new("reprisal", REPRISAL).toggle(MIT_REPRISAL))
}

#[test]
fn mitigation_skips_failed_guard() {
    let fixture = Fixture::new(all_enabled());
    let state = FakeState::new(Host {
        player_hp: 80.0,
        ..Host::default()
    });

    assert_eq!(mitigation().select_first(&fixture.ctx(&state)), Some(REPRISAL));
}

#[test]
fn mitigation_prefers_first_qualifying_entry() {
    let fixture = Fixture::new(all_enabled());
    let state = FakeState::new(Host {
        player_hp: 30.0,
        ..Host::default()
    });

    assert_eq!(mitigation().select_first(&fixture.ctx(&state)), Some(SHIELD));
}

#[test]
fn selection_is_repeatable_within_a_tick() {
    let fixture = Fixture::new(all_enabled());
    let state = FakeState::new(Host {
        player_hp: 45.0,
        ..Host::default()
    });
    let list = mitigation();
    let ctx = fixture.ctx(&state);

    let first = list.select_first(&ctx);
    for _ in 0..16 {
        assert_eq!(list.select_first(&ctx), first);
    }
}

#[test]
fn disabled_toggle_and_cooldown_disqualify() {
    let fixture = Fixture::new(FakeConfig::default().enable(MIT_REPRISAL).enable(MIT_RAMPART));
    let state = FakeState::new(Host {
        player_hp: 10.0,
        ..Host::default()
    });
    state.update(|host| {
        host.cooldowns.insert(REPRISAL, CooldownState::cooling(40.0));
    });

    let list = mitigation().entry(PriorityEntry::new("rampart", RAMPART).toggle(MIT_RAMPART));
    assert_eq!(list.select_first(&fixture.ctx(&state)), Some(RAMPART));
}

#[test]
fn unlearned_actions_never_qualify() {
    let fixture = Fixture::new(all_enabled());
    let state = FakeState::new(Host::default());
    let list = PriorityList::new("unknown").entry(PriorityEntry::new("ghost", ActionId(999_999)));

    assert_eq!(list.select_first(&fixture.ctx(&state)), None);
}

#[test]
fn tier_candidates_follow_level() {
    let fixture = Fixture::new(FakeConfig::default());
    let list = PriorityList::new("wall").entry(PriorityEntry::new(
        "shadow_wall",
        combo_core::Candidate::Tier(SHADOW_WALL),
    ));

    let high = FakeState::new(Host::default());
    assert_eq!(list.select_first(&fixture.ctx(&high)), Some(SHADOWED_VIGIL));

    let low = FakeState::new(Host {
        level: 80,
        ..Host::default()
    });
    assert_eq!(list.select_first(&fixture.ctx(&low)), Some(SHADOW_WALL));
}

fn counted(
    calls: &Arc<AtomicUsize>,
    result: bool,
) -> impl Fn(&ComboContext<'_>) -> bool + Send + Sync + 'static {
    let calls = Arc::clone(calls);
    move |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        result
    }
}

#[test]
fn later_guards_are_not_evaluated_after_a_match() {
    let fixture = Fixture::new(all_enabled());
    let state = FakeState::new(Host::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let list = PriorityList::new("counted")
        .entry(PriorityEntry::new("a", SHIELD).when(counted(&calls, false)))
        .entry(PriorityEntry::new("b", REPRISAL).when(counted(&calls, true)))
        .entry(PriorityEntry::new("c", RAMPART).when(counted(&calls, true)));

    assert_eq!(list.select_first(&fixture.ctx(&state)), Some(REPRISAL));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn ranked_lists_sort_stably() {
    let fixture = Fixture::new(FakeConfig::default());
    let state = FakeState::new(Host::default());
    let list = PriorityList::from_ranked(
        "ranked",
        [
            (3, PriorityEntry::new("rampart", RAMPART)),
            (1, PriorityEntry::new("reprisal", REPRISAL)),
            (1, PriorityEntry::new("shield", SHIELD)),
        ],
    );

    let labels: Vec<_> = list.entries().iter().map(|e| e.label()).collect();
    assert_eq!(labels, ["reprisal", "shield", "rampart"]);
    assert_eq!(list.select_first(&fixture.ctx(&state)), Some(REPRISAL));
}
