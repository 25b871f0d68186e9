//! Scripted host for content tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use combo_content::{ActionCatalog, ComboConfig, build_registry};
use combo_core::{
    ActionId, ComboEngine, ComboState, ContentFlags, CooldownState, Env, GcdTiming, Job,
    JobGauge, ObjectId, OpenerState, OracleError, PartyList, StateOracle, StatusEffect, StatusId,
    TargetInfo, UsedAction,
};

pub const PLAYER: ObjectId = ObjectId(0x1000_0001);
pub const ALLY: ObjectId = ObjectId(0x1000_0002);
pub const ENEMY: ObjectId = ObjectId(0x4000_0010);

/// GCD timing with room for one weave.
pub const WEAVE: GcdTiming = GcdTiming {
    animation_lock: 0.0,
    gcd_elapsed: 0.5,
    gcd_total: 2.5,
    casting: false,
};

/// GCD timing inside the late-weave window.
pub const LATE_WEAVE: GcdTiming = GcdTiming {
    animation_lock: 0.0,
    gcd_elapsed: 1.5,
    gcd_total: 2.5,
    casting: false,
};

/// GCD about to roll; nothing can be woven.
pub const NO_WEAVE: GcdTiming = GcdTiming {
    animation_lock: 0.0,
    gcd_elapsed: 2.3,
    gcd_total: 2.5,
    casting: false,
};

#[derive(Clone, Debug)]
pub struct Host {
    pub job: Job,
    pub level: u8,
    pub in_combat: bool,
    pub combat_time: f32,
    pub mp: u32,
    pub health: HashMap<ObjectId, f32>,
    pub statuses: Vec<(ObjectId, StatusEffect)>,
    pub cooldowns: HashMap<ActionId, CooldownState>,
    pub gauge: Option<JobGauge>,
    pub target: Option<ObjectId>,
    pub targets: HashMap<ObjectId, TargetInfo>,
    pub party: Vec<ObjectId>,
    pub combo: ComboState,
    pub timing: GcdTiming,
    pub last_used: Option<UsedAction>,
    pub recent: HashMap<ActionId, f32>,
    pub enemies: u8,
    pub content: ContentFlags,
}

impl Host {
    pub fn new(job: Job, gauge: JobGauge) -> Self {
        let mut health = HashMap::new();
        health.insert(PLAYER, 100.0);
        health.insert(ENEMY, 100.0);
        health.insert(ALLY, 100.0);

        let mut targets = HashMap::new();
        targets.insert(
            ENEMY,
            TargetInfo {
                hostile: true,
                boss: true,
                interruptible: false,
            },
        );
        targets.insert(ALLY, TargetInfo::default());

        Self {
            job,
            level: 100,
            in_combat: true,
            combat_time: 1.0,
            mp: 10_000,
            health,
            statuses: Vec::new(),
            cooldowns: HashMap::new(),
            gauge: Some(gauge),
            target: Some(ENEMY),
            targets,
            party: vec![PLAYER],
            combo: ComboState::default(),
            timing: WEAVE,
            last_used: None,
            recent: HashMap::new(),
            enemies: 1,
            content: ContentFlags::empty(),
        }
    }

    pub fn hp(&mut self, object: ObjectId, percent: f32) -> &mut Self {
        self.health.insert(object, percent);
        self
    }

    /// Adds a status applied by the player.
    pub fn own_status(&mut self, on: ObjectId, status: StatusId, remaining: f32) -> &mut Self {
        self.statuses
            .push((on, StatusEffect::new(status, remaining).from_source(PLAYER)));
        self
    }

    pub fn clear_status(&mut self, status: StatusId) -> &mut Self {
        self.statuses.retain(|(_, effect)| effect.status != status);
        self
    }

    pub fn cooling(&mut self, actions: &[ActionId], remaining: f32) -> &mut Self {
        for &action in actions {
            self.cooldowns.insert(action, CooldownState::cooling(remaining));
        }
        self
    }

    pub fn charges(&mut self, action: ActionId, charges: u8, max: u8) -> &mut Self {
        self.cooldowns.insert(
            action,
            CooldownState {
                remaining: 0.0,
                charges,
                max_charges: max,
            },
        );
        self
    }

    pub fn after_combo(&mut self, action: ActionId) -> &mut Self {
        self.combo = ComboState {
            action,
            timer: 20.0,
        };
        self
    }
}

/// State oracle over a [`Host`] the test mutates between ticks.
pub struct FakeState {
    host: Mutex<Host>,
}

impl FakeState {
    pub fn new(host: Host) -> Self {
        Self {
            host: Mutex::new(host),
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut Host)) {
        let mut host = self.host.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut host);
    }

    /// Reports `action` as the newest executed action.
    pub fn execute(&self, action: ActionId) {
        self.update(|host| {
            let sequence = host.last_used.map_or(1, |u| u.sequence + 1);
            host.last_used = Some(UsedAction {
                action,
                sequence,
                elapsed: 0.0,
            });
            host.recent.insert(action, 0.0);
        });
    }

    fn read<T>(&self, f: impl FnOnce(&Host) -> T) -> T {
        let host = self.host.lock().unwrap_or_else(|e| e.into_inner());
        f(&host)
    }
}

impl StateOracle for FakeState {
    fn player(&self) -> Option<ObjectId> {
        Some(PLAYER)
    }

    fn job(&self) -> Option<Job> {
        self.read(|h| Some(h.job))
    }

    fn level(&self) -> Result<u8, OracleError> {
        self.read(|h| Ok(h.level))
    }

    fn in_combat(&self) -> bool {
        self.read(|h| h.in_combat)
    }

    fn combat_time(&self) -> f32 {
        self.read(|h| h.combat_time)
    }

    fn mp(&self) -> Result<u32, OracleError> {
        self.read(|h| Ok(h.mp))
    }

    fn status(
        &self,
        status: StatusId,
        target: ObjectId,
        source: Option<ObjectId>,
    ) -> Result<Option<StatusEffect>, OracleError> {
        self.read(|h| {
            Ok(h.statuses
                .iter()
                .find(|(on, effect)| {
                    *on == target
                        && effect.status == status
                        && (source.is_none() || effect.source == source)
                })
                .map(|(_, effect)| *effect))
        })
    }

    fn cooldown(&self, action: ActionId) -> Result<CooldownState, OracleError> {
        self.read(|h| Ok(h.cooldowns.get(&action).copied().unwrap_or_else(CooldownState::ready)))
    }

    fn timing(&self) -> Result<GcdTiming, OracleError> {
        self.read(|h| Ok(h.timing))
    }

    fn combo(&self) -> ComboState {
        self.read(|h| h.combo)
    }

    fn last_used(&self) -> Option<UsedAction> {
        self.read(|h| h.last_used)
    }

    fn time_since_used(&self, action: ActionId) -> Option<f32> {
        self.read(|h| h.recent.get(&action).copied())
    }

    fn gauge(&self, job: Job) -> Result<JobGauge, OracleError> {
        self.read(|h| h.gauge.ok_or(OracleError::GaugeUnavailable(job)))
    }

    fn current_target(&self) -> Option<ObjectId> {
        self.read(|h| h.target)
    }

    fn target_info(&self, target: ObjectId) -> Result<TargetInfo, OracleError> {
        self.read(|h| {
            h.targets
                .get(&target)
                .copied()
                .ok_or(OracleError::ObjectNotFound(target))
        })
    }

    fn health_percent(&self, target: ObjectId) -> Result<f32, OracleError> {
        self.read(|h| {
            h.health
                .get(&target)
                .copied()
                .ok_or(OracleError::ObjectNotFound(target))
        })
    }

    fn party(&self) -> PartyList {
        self.read(|h| h.party.iter().copied().collect())
    }

    fn enemies_within(&self, _radius: f32) -> u8 {
        self.read(|h| h.enemies)
    }

    fn in_action_range(&self, _action: ActionId, _target: ObjectId) -> bool {
        true
    }

    fn content(&self) -> ContentFlags {
        self.read(|h| h.content)
    }
}

/// Engine wired to the shipped content, the embedded action sheet and a
/// scripted host.
pub struct Harness {
    pub state: FakeState,
    actions: ActionCatalog,
    config: ComboConfig,
    engine: ComboEngine,
}

impl Harness {
    pub fn new(config: ComboConfig, host: Host) -> Self {
        let registry = build_registry([host.job], &config).expect("content registers");
        let engine = ComboEngine::new(registry, config.engine.clone());
        Self {
            state: FakeState::new(host),
            actions: ActionCatalog::embedded().expect("action sheet"),
            config,
            engine,
        }
    }

    /// Harness with the configuration shipped with the crate.
    pub fn with_defaults(host: Host) -> Self {
        Self::new(ComboConfig::embedded_default().expect("default config"), host)
    }

    /// Starts a tick and resolves `action` in it.
    pub fn press(&mut self, action: ActionId) -> ActionId {
        let env = Env::with_all(&self.state, &self.actions, &self.config).into_combo_env();
        self.engine.begin_tick(env);
        self.engine.resolve(action, env)
    }

    pub fn execute(&self, action: ActionId) {
        self.state.execute(action);
    }

    pub fn update(&self, f: impl FnOnce(&mut Host)) {
        self.state.update(f);
    }

    pub fn opener_state(&self, name: &str) -> Option<OpenerState> {
        self.engine.opener_state(name)
    }

    pub fn engine(&self) -> &ComboEngine {
        &self.engine
    }
}
