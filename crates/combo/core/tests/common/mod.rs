//! Scripted host for integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use combo_core::{
    ActionData, ActionId, ActionOracle, AttackType, ComboEnv, ComboState, ConfigOracle,
    CooldownState, Env, GcdTiming, Job, JobGauge, ObjectId, OptionKey, OptionValue, OracleError,
    PartyList, StateOracle, StatusEffect, StatusId, TargetInfo, Toggle, UsedAction,
};

pub const PLAYER: ObjectId = ObjectId(0x1000_0001);
pub const ENEMY: ObjectId = ObjectId(0x4000_0010);
pub const OTHER_PLAYER: ObjectId = ObjectId(0x1000_0002);

#[derive(Clone, Debug)]
pub struct Host {
    pub player: Option<ObjectId>,
    pub job: Option<Job>,
    pub level: u8,
    pub in_combat: bool,
    pub combat_time: f32,
    pub mp: u32,
    pub player_hp: f32,
    pub statuses: Vec<(ObjectId, StatusEffect)>,
    pub cooldowns: HashMap<ActionId, CooldownState>,
    pub gauge: Option<JobGauge>,
    pub target: Option<ObjectId>,
    pub target_hp: f32,
    pub boss: bool,
    pub timing: GcdTiming,
    pub last_used: Option<UsedAction>,
    pub fail_status: bool,
    pub fail_timing: bool,
    pub panic_on_cooldown: bool,
}

impl Default for Host {
    fn default() -> Self {
        Self {
            player: Some(PLAYER),
            job: Some(Job::DarkKnight),
            level: 100,
            in_combat: false,
            combat_time: 0.0,
            mp: 10_000,
            player_hp: 100.0,
            statuses: Vec::new(),
            cooldowns: HashMap::new(),
            gauge: Some(JobGauge::DarkKnight(Default::default())),
            target: Some(ENEMY),
            target_hp: 100.0,
            boss: true,
            timing: GcdTiming {
                animation_lock: 0.0,
                gcd_elapsed: 0.5,
                gcd_total: 2.5,
                casting: false,
            },
            last_used: None,
            fail_status: false,
            fail_timing: false,
            panic_on_cooldown: false,
        }
    }
}

/// State oracle whose answers can change between (or during) ticks.
#[derive(Default)]
pub struct FakeState {
    host: Mutex<Host>,
    pub status_queries: AtomicUsize,
}

impl FakeState {
    pub fn new(host: Host) -> Self {
        Self {
            host: Mutex::new(host),
            status_queries: AtomicUsize::new(0),
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut Host)) {
        let mut host = self.host.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut host);
    }

    /// Reports `action` as the newest executed action.
    pub fn execute(&self, action: ActionId) {
        self.update(|host| {
            let sequence = host.last_used.map(|u| u.sequence + 1).unwrap_or(1);
            host.last_used = Some(UsedAction {
                action,
                sequence,
                elapsed: 0.0,
            });
        });
    }

    pub fn queries(&self) -> usize {
        self.status_queries.load(Ordering::SeqCst)
    }

    fn read<T>(&self, f: impl FnOnce(&Host) -> T) -> T {
        let host = self.host.lock().unwrap_or_else(|e| e.into_inner());
        f(&host)
    }
}

impl StateOracle for FakeState {
    fn player(&self) -> Option<ObjectId> {
        self.read(|h| h.player)
    }

    fn job(&self) -> Option<Job> {
        self.read(|h| h.job)
    }

    fn level(&self) -> Result<u8, OracleError> {
        self.read(|h| h.player.map(|_| h.level).ok_or(OracleError::PlayerUnavailable))
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
        self.status_queries.fetch_add(1, Ordering::SeqCst);
        self.read(|h| {
            if h.fail_status {
                return Err(OracleError::ObjectNotFound(target));
            }
            Ok(h.statuses
                .iter()
                .filter(|(on, effect)| {
                    *on == target
                        && effect.status == status
                        && (source.is_none() || effect.source == source)
                })
                .map(|(_, effect)| *effect)
                .next())
        })
    }

    fn cooldown(&self, action: ActionId) -> Result<CooldownState, OracleError> {
        let (panics, cooldown) = self.read(|h| {
            let cooldown = h.cooldowns.get(&action).copied();
            (h.panic_on_cooldown, cooldown)
        });
        if panics {
            panic!("cooldown table unmapped");
        }
        Ok(cooldown.unwrap_or_else(CooldownState::ready))
    }

    fn timing(&self) -> Result<GcdTiming, OracleError> {
        self.read(|h| {
            if h.fail_timing {
                return Err(OracleError::PlayerUnavailable);
            }
            Ok(h.timing)
        })
    }

    fn combo(&self) -> ComboState {
        ComboState::default()
    }

    fn last_used(&self) -> Option<UsedAction> {
        self.read(|h| h.last_used)
    }

    fn time_since_used(&self, action: ActionId) -> Option<f32> {
        self.read(|h| {
            h.last_used
                .filter(|u| u.action == action)
                .map(|u| u.elapsed)
        })
    }

    fn gauge(&self, job: Job) -> Result<JobGauge, OracleError> {
        self.read(|h| h.gauge.ok_or(OracleError::GaugeUnavailable(job)))
    }

    fn current_target(&self) -> Option<ObjectId> {
        self.read(|h| h.target)
    }

    fn target_info(&self, target: ObjectId) -> Result<TargetInfo, OracleError> {
        self.read(|h| {
            if h.target != Some(target) {
                return Err(OracleError::ObjectNotFound(target));
            }
            Ok(TargetInfo {
                hostile: true,
                boss: h.boss,
                interruptible: false,
            })
        })
    }

    fn health_percent(&self, target: ObjectId) -> Result<f32, OracleError> {
        self.read(|h| {
            if Some(target) == h.player {
                Ok(h.player_hp)
            } else if Some(target) == h.target {
                Ok(h.target_hp)
            } else {
                Err(OracleError::ObjectNotFound(target))
            }
        })
    }

    fn party(&self) -> PartyList {
        self.read(|h| h.player.into_iter().collect())
    }

    fn enemies_within(&self, _radius: f32) -> u8 {
        self.read(|h| u8::from(h.target.is_some()))
    }

    fn in_action_range(&self, _action: ActionId, _target: ObjectId) -> bool {
        true
    }
}

#[derive(Default)]
pub struct FakeActions {
    actions: HashMap<ActionId, ActionData>,
}

impl FakeActions {
    pub fn learn(mut self, id: ActionId, level: u8, kind: AttackType) -> Self {
        self.actions.insert(
            id,
            ActionData {
                id,
                name: format!("action {}", id.0),
                level,
                kind,
                max_charges: 1,
                range: 25.0,
            },
        );
        self
    }

    pub fn learn_all(mut self, ids: &[ActionId]) -> Self {
        for &id in ids {
            self = self.learn(id, 1, AttackType::Ability);
        }
        self
    }
}

impl ActionOracle for FakeActions {
    fn action(&self, id: ActionId) -> Option<&ActionData> {
        self.actions.get(&id)
    }
}

#[derive(Default)]
pub struct FakeConfig {
    enabled: HashSet<&'static str>,
    options: HashMap<&'static str, OptionValue>,
}

impl FakeConfig {
    pub fn enable(mut self, toggle: Toggle) -> Self {
        self.enabled.insert(toggle.0);
        self
    }

    pub fn set(mut self, key: OptionKey, value: OptionValue) -> Self {
        self.options.insert(key.0, value);
        self
    }
}

impl ConfigOracle for FakeConfig {
    fn is_enabled(&self, toggle: Toggle) -> bool {
        self.enabled.contains(toggle.0)
    }

    fn option(&self, key: OptionKey) -> Option<OptionValue> {
        self.options.get(key.0).copied()
    }
}

pub fn env<'a>(
    state: &'a FakeState,
    actions: &'a FakeActions,
    config: &'a FakeConfig,
) -> ComboEnv<'a> {
    Env::with_all(state, actions, config).into_combo_env()
}
