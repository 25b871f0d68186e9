mod common;

use combo_core::{
    ComboContext, EffectCache, EngineConfig, OpenerBank, OwnerFilter, StatusEffect, StatusId,
    Tick, UpgradeTable,
};

use common::{ENEMY, FakeActions, FakeConfig, FakeState, Host, OTHER_PLAYER, PLAYER, env};

const MISSING: StatusId = StatusId(1234);
const RAGING_STRIKES: StatusId = StatusId(125);
const STORMBITE: StatusId = StatusId(1201);

fn fixtures() -> (FakeActions, FakeConfig, UpgradeTable, OpenerBank, EngineConfig) {
    (
        FakeActions::default(),
        FakeConfig::default(),
        UpgradeTable::new(),
        OpenerBank::new(),
        EngineConfig::default(),
    )
}

#[test]
fn absence_is_cached_for_the_whole_tick() {
    let state = FakeState::new(Host::default());
    let (actions, config, tiers, openers, settings) = fixtures();
    let mut cache = EffectCache::new();
    cache.begin_tick(Tick(1));

    let env = env(&state, &actions, &config);
    let first = cache.lookup(env.state().unwrap(), MISSING, ENEMY, OwnerFilter::Player, Some(PLAYER));
    assert_eq!(first, None);

    // The status appears on the host mid-tick.
    state.update(|host| {
        host.statuses
            .push((ENEMY, StatusEffect::new(MISSING, 30.0).from_source(PLAYER)));
    });

    let ctx = ComboContext::new(env, &cache, &tiers, &openers, &settings);
    let second = ctx.status_on(MISSING, Some(ENEMY), OwnerFilter::Player);
    assert_eq!(second, None);
    assert_eq!(state.queries(), 1, "second lookup must not reach the host");

    // The next tick sees the new state.
    cache.begin_tick(Tick(2));
    let third = cache.lookup(env.state().unwrap(), MISSING, ENEMY, OwnerFilter::Player, Some(PLAYER));
    assert_eq!(third.map(|e| e.remaining), Some(30.0));
    assert_eq!(state.queries(), 2);
}

#[test]
fn identical_keys_agree_despite_provider_drift() {
    let state = FakeState::new(Host {
        statuses: vec![(PLAYER, StatusEffect::new(RAGING_STRIKES, 18.0).from_source(PLAYER))],
        ..Host::default()
    });
    let (actions, config, tiers, openers, settings) = fixtures();
    let mut cache = EffectCache::new();
    cache.begin_tick(Tick(1));
    let env = env(&state, &actions, &config);
    let ctx = ComboContext::new(env, &cache, &tiers, &openers, &settings);

    let before = ctx.effect_remaining(RAGING_STRIKES);
    state.update(|host| host.statuses.clear());
    let after = ctx.effect_remaining(RAGING_STRIKES);

    assert_eq!(before, 18.0);
    assert_eq!(before, after);
    assert!(ctx.has_effect(RAGING_STRIKES));
}

#[test]
fn owner_filter_is_part_of_the_key() {
    let state = FakeState::new(Host {
        statuses: vec![(ENEMY, StatusEffect::new(STORMBITE, 40.0).from_source(OTHER_PLAYER))],
        ..Host::default()
    });
    let (actions, config, tiers, openers, settings) = fixtures();
    let mut cache = EffectCache::new();
    cache.begin_tick(Tick(1));
    let ctx = ComboContext::new(env(&state, &actions, &config), &cache, &tiers, &openers, &settings);

    assert!(!ctx.target_has_effect(STORMBITE), "another bard's DoT is not ours");
    assert!(ctx.target_has_effect_any(STORMBITE));
    assert_eq!(cache.stats().entries, 2);
}

#[test]
fn provider_failure_is_absence() {
    let state = FakeState::new(Host {
        fail_status: true,
        ..Host::default()
    });
    let (actions, config, tiers, openers, settings) = fixtures();
    let mut cache = EffectCache::new();
    cache.begin_tick(Tick(1));
    let ctx = ComboContext::new(env(&state, &actions, &config), &cache, &tiers, &openers, &settings);

    assert!(!ctx.target_has_effect(STORMBITE));
    assert_eq!(ctx.target_effect_remaining(STORMBITE), 0.0);
    assert_eq!(state.queries(), 1, "the failure itself is cached");
}

#[test]
fn pending_timers_are_normalised() {
    let state = FakeState::new(Host {
        statuses: vec![(PLAYER, StatusEffect::new(RAGING_STRIKES, -1.5).from_source(PLAYER))],
        ..Host::default()
    });
    state.update(|host| host.timing.animation_lock = 0.5);
    let (actions, config, tiers, openers, settings) = fixtures();
    let mut cache = EffectCache::new();
    cache.begin_tick(Tick(1));
    let ctx = ComboContext::new(env(&state, &actions, &config), &cache, &tiers, &openers, &settings);

    assert!((ctx.effect_remaining(RAGING_STRIKES) - 2.0).abs() < 1e-6);
}

#[test]
fn begin_tick_resets_counters() {
    let state = FakeState::new(Host::default());
    let (actions, config, ..) = fixtures();
    let mut cache = EffectCache::new();
    cache.begin_tick(Tick(7));
    let env = env(&state, &actions, &config);
    let oracle = env.state().unwrap();

    cache.lookup(oracle, MISSING, PLAYER, OwnerFilter::Any, Some(PLAYER));
    cache.lookup(oracle, MISSING, PLAYER, OwnerFilter::Any, Some(PLAYER));
    let stats = cache.stats();
    assert_eq!((stats.tick, stats.hits, stats.misses, stats.entries), (Tick(7), 1, 1, 1));

    cache.begin_tick(Tick(8));
    let stats = cache.stats();
    assert_eq!((stats.tick, stats.hits, stats.misses, stats.entries), (Tick(8), 0, 0, 0));
}
