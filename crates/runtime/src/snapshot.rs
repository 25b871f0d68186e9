//! Serializable combat state and an in-memory State Provider over it.
//!
//! [`StateSnapshot`] is a plain record of everything [`StateOracle`] can be
//! asked. Replay scenarios and tests describe combat with it;
//! [`SnapshotProvider`] serves it to the engine and lets the driver change it
//! between ticks.
use std::collections::BTreeMap;
use std::sync::RwLock;

use combo_core::{
    ActionId, ComboState, ContentFlags, CooldownState, GcdTiming, Job, JobGauge, ObjectId,
    OracleError, PartyList, StateOracle, StatusEffect, StatusId, TargetInfo, UsedAction,
};
use serde::{Deserialize, Serialize};

/// Default object id of the local player.
pub const PLAYER: ObjectId = ObjectId(0x1000_0001);

/// A status effect together with the object carrying it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedStatus {
    pub on: ObjectId,
    pub effect: StatusEffect,
}

/// Point-in-time combat state.
///
/// Missing entries read as the safe default the oracle contract allows:
/// cooldowns are ready, actions are in range, objects without a health entry
/// do not exist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSnapshot {
    pub player: Option<ObjectId>,
    pub job: Option<Job>,
    pub level: u8,
    pub in_combat: bool,
    pub combat_time: f32,
    pub mp: u32,
    pub gauge: Option<JobGauge>,
    pub health: BTreeMap<ObjectId, f32>,
    pub statuses: Vec<AppliedStatus>,
    pub cooldowns: BTreeMap<ActionId, CooldownState>,
    pub timing: GcdTiming,
    pub combo: ComboState,
    pub last_used: Option<UsedAction>,
    /// Seconds since each action was last executed.
    pub recent: BTreeMap<ActionId, f32>,
    pub target: Option<ObjectId>,
    pub targets: BTreeMap<ObjectId, TargetInfo>,
    /// Party members other than the player.
    pub party: Vec<ObjectId>,
    pub enemies_nearby: u8,
    pub content: ContentFlags,
    pub cleansable: Vec<ObjectId>,
    pub invincible: Vec<ObjectId>,
    pub out_of_range: Vec<ActionId>,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        let mut health = BTreeMap::new();
        health.insert(PLAYER, 100.0);
        Self {
            player: Some(PLAYER),
            job: None,
            level: 100,
            in_combat: false,
            combat_time: 0.0,
            mp: 10_000,
            gauge: None,
            health,
            statuses: Vec::new(),
            cooldowns: BTreeMap::new(),
            timing: GcdTiming::default(),
            combo: ComboState::default(),
            last_used: None,
            recent: BTreeMap::new(),
            target: None,
            targets: BTreeMap::new(),
            party: Vec::new(),
            enemies_nearby: 0,
            content: ContentFlags::empty(),
            cleansable: Vec::new(),
            invincible: Vec::new(),
            out_of_range: Vec::new(),
        }
    }
}

impl StateSnapshot {
    /// A loaded player of `job` at `level`, out of combat, with its gauge empty.
    pub fn for_job(job: Job, level: u8) -> Self {
        let gauge = match job {
            Job::Bard => JobGauge::Bard(Default::default()),
            Job::DarkKnight => JobGauge::DarkKnight(Default::default()),
            Job::Scholar => JobGauge::Scholar(Default::default()),
        };
        Self {
            job: Some(job),
            level,
            gauge: Some(gauge),
            ..Self::default()
        }
    }

    /// Records `action` as the newest executed action.
    pub fn execute(&mut self, action: ActionId) {
        let sequence = self.last_used.map_or(1, |used| used.sequence + 1);
        self.last_used = Some(UsedAction {
            action,
            sequence,
            elapsed: 0.0,
        });
        self.recent.insert(action, 0.0);
    }

    /// Lets `seconds` of time pass.
    ///
    /// Timers count down and expired statuses drop off. Combat time only
    /// moves while in combat.
    pub fn elapse(&mut self, seconds: f32) {
        if seconds <= 0.0 {
            return;
        }
        if self.in_combat {
            self.combat_time += seconds;
        }
        self.statuses.retain_mut(|applied| {
            applied.effect.remaining -= seconds;
            applied.effect.remaining > 0.0
        });
        for cooldown in self.cooldowns.values_mut() {
            cooldown.remaining = (cooldown.remaining - seconds).max(0.0);
        }
        for since in self.recent.values_mut() {
            *since += seconds;
        }
        if let Some(used) = self.last_used.as_mut() {
            used.elapsed += seconds;
        }
        self.combo.timer = (self.combo.timer - seconds).max(0.0);
        if self.combo.timer == 0.0 {
            self.combo.action = ActionId::NONE;
        }
    }

    /// Applies the fields a patch sets and leaves the rest alone.
    pub fn apply(&mut self, patch: &SnapshotPatch) {
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(in_combat) = patch.in_combat {
            if !in_combat {
                self.combat_time = 0.0;
            }
            self.in_combat = in_combat;
        }
        if let Some(mp) = patch.mp {
            self.mp = mp;
        }
        if let Some(gauge) = patch.gauge {
            self.gauge = Some(gauge);
        }
        if let Some(timing) = patch.timing {
            self.timing = timing;
        }
        if let Some(combo) = patch.combo {
            self.combo = combo;
        }
        if let Some(target) = patch.target {
            self.target = target;
        }
        if let Some(enemies) = patch.enemies_nearby {
            self.enemies_nearby = enemies;
        }
        self.health.extend(&patch.health);
        self.cooldowns.extend(&patch.cooldowns);

        if !patch.remove_statuses.is_empty() {
            self.statuses
                .retain(|applied| !patch.remove_statuses.contains(&applied.effect.status));
        }
        for added in &patch.statuses {
            self.statuses.retain(|applied| {
                applied.on != added.on
                    || applied.effect.status != added.effect.status
                    || applied.effect.source != added.effect.source
            });
            self.statuses.push(*added);
        }
    }

    fn player_or_err(&self) -> Result<ObjectId, OracleError> {
        self.player.ok_or(OracleError::PlayerUnavailable)
    }
}

/// Partial update of a [`StateSnapshot`].
///
/// `None` fields are left untouched; maps are merged entry by entry;
/// `statuses` replace any effect with the same carrier, id and source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotPatch {
    pub level: Option<u8>,
    pub in_combat: Option<bool>,
    pub mp: Option<u32>,
    pub gauge: Option<JobGauge>,
    pub timing: Option<GcdTiming>,
    pub combo: Option<ComboState>,
    pub target: Option<Option<ObjectId>>,
    pub enemies_nearby: Option<u8>,
    pub health: BTreeMap<ObjectId, f32>,
    pub cooldowns: BTreeMap<ActionId, CooldownState>,
    pub statuses: Vec<AppliedStatus>,
    pub remove_statuses: Vec<StatusId>,
}

impl StateOracle for StateSnapshot {
    fn player(&self) -> Option<ObjectId> {
        self.player
    }

    fn job(&self) -> Option<Job> {
        self.job
    }

    fn level(&self) -> Result<u8, OracleError> {
        self.player_or_err()?;
        Ok(self.level)
    }

    fn in_combat(&self) -> bool {
        self.in_combat
    }

    fn combat_time(&self) -> f32 {
        if self.in_combat { self.combat_time } else { 0.0 }
    }

    fn mp(&self) -> Result<u32, OracleError> {
        self.player_or_err()?;
        Ok(self.mp)
    }

    fn status(
        &self,
        status: StatusId,
        target: ObjectId,
        source: Option<ObjectId>,
    ) -> Result<Option<StatusEffect>, OracleError> {
        if !self.health.contains_key(&target) {
            return Err(OracleError::ObjectNotFound(target));
        }
        Ok(self
            .statuses
            .iter()
            .find(|applied| {
                applied.on == target
                    && applied.effect.status == status
                    && (source.is_none() || applied.effect.source == source)
            })
            .map(|applied| applied.effect))
    }

    fn has_cleansable_debuff(&self, target: ObjectId) -> Result<bool, OracleError> {
        Ok(self.cleansable.contains(&target))
    }

    fn is_invincible(&self, target: ObjectId) -> Result<bool, OracleError> {
        Ok(self.invincible.contains(&target))
    }

    fn cooldown(&self, action: ActionId) -> Result<CooldownState, OracleError> {
        Ok(self
            .cooldowns
            .get(&action)
            .copied()
            .unwrap_or_else(CooldownState::ready))
    }

    fn timing(&self) -> Result<GcdTiming, OracleError> {
        Ok(self.timing)
    }

    fn combo(&self) -> ComboState {
        self.combo
    }

    fn last_used(&self) -> Option<UsedAction> {
        self.last_used
    }

    fn time_since_used(&self, action: ActionId) -> Option<f32> {
        self.recent.get(&action).copied()
    }

    fn gauge(&self, job: Job) -> Result<JobGauge, OracleError> {
        self.gauge
            .filter(|gauge| gauge.job() == job)
            .ok_or(OracleError::GaugeUnavailable(job))
    }

    fn current_target(&self) -> Option<ObjectId> {
        self.target
    }

    fn target_info(&self, target: ObjectId) -> Result<TargetInfo, OracleError> {
        self.targets
            .get(&target)
            .copied()
            .ok_or(OracleError::ObjectNotFound(target))
    }

    fn health_percent(&self, target: ObjectId) -> Result<f32, OracleError> {
        self.health
            .get(&target)
            .copied()
            .ok_or(OracleError::ObjectNotFound(target))
    }

    fn party(&self) -> PartyList {
        let mut party = PartyList::new();
        if let Some(player) = self.player {
            party.push(player);
        }
        for &member in &self.party {
            if party.try_push(member).is_err() {
                break;
            }
        }
        party
    }

    fn enemies_within(&self, _radius: f32) -> u8 {
        self.enemies_nearby
    }

    fn in_action_range(&self, action: ActionId, _target: ObjectId) -> bool {
        !self.out_of_range.contains(&action)
    }

    fn content(&self) -> ContentFlags {
        self.content
    }
}

/// Shared, mutable [`StateSnapshot`] served as a State Provider.
///
/// The engine only reads between [`SnapshotProvider::update`] calls; writes
/// happen on the driver's side of the tick boundary.
#[derive(Debug, Default)]
pub struct SnapshotProvider {
    inner: RwLock<StateSnapshot>,
}

impl SnapshotProvider {
    pub fn new(snapshot: StateSnapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    pub fn update<T>(&self, f: impl FnOnce(&mut StateSnapshot) -> T) -> T {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    pub fn read<T>(&self, f: impl FnOnce(&StateSnapshot) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> StateSnapshot {
        self.read(StateSnapshot::clone)
    }
}

impl StateOracle for SnapshotProvider {
    fn player(&self) -> Option<ObjectId> {
        self.read(StateOracle::player)
    }

    fn job(&self) -> Option<Job> {
        self.read(StateOracle::job)
    }

    fn level(&self) -> Result<u8, OracleError> {
        self.read(StateOracle::level)
    }

    fn in_combat(&self) -> bool {
        self.read(StateOracle::in_combat)
    }

    fn combat_time(&self) -> f32 {
        self.read(StateOracle::combat_time)
    }

    fn mp(&self) -> Result<u32, OracleError> {
        self.read(StateOracle::mp)
    }

    fn status(
        &self,
        status: StatusId,
        target: ObjectId,
        source: Option<ObjectId>,
    ) -> Result<Option<StatusEffect>, OracleError> {
        self.read(|s| s.status(status, target, source))
    }

    fn has_cleansable_debuff(&self, target: ObjectId) -> Result<bool, OracleError> {
        self.read(|s| s.has_cleansable_debuff(target))
    }

    fn is_invincible(&self, target: ObjectId) -> Result<bool, OracleError> {
        self.read(|s| s.is_invincible(target))
    }

    fn cooldown(&self, action: ActionId) -> Result<CooldownState, OracleError> {
        self.read(|s| s.cooldown(action))
    }

    fn timing(&self) -> Result<GcdTiming, OracleError> {
        self.read(StateOracle::timing)
    }

    fn combo(&self) -> ComboState {
        self.read(StateOracle::combo)
    }

    fn last_used(&self) -> Option<UsedAction> {
        self.read(StateOracle::last_used)
    }

    fn time_since_used(&self, action: ActionId) -> Option<f32> {
        self.read(|s| s.time_since_used(action))
    }

    fn gauge(&self, job: Job) -> Result<JobGauge, OracleError> {
        self.read(|s| s.gauge(job))
    }

    fn current_target(&self) -> Option<ObjectId> {
        self.read(StateOracle::current_target)
    }

    fn target_info(&self, target: ObjectId) -> Result<TargetInfo, OracleError> {
        self.read(|s| s.target_info(target))
    }

    fn health_percent(&self, target: ObjectId) -> Result<f32, OracleError> {
        self.read(|s| s.health_percent(target))
    }

    fn party(&self) -> PartyList {
        self.read(StateOracle::party)
    }

    fn enemies_within(&self, radius: f32) -> u8 {
        self.read(|s| s.enemies_within(radius))
    }

    fn in_action_range(&self, action: ActionId, target: ObjectId) -> bool {
        self.read(|s| s.in_action_range(action, target))
    }

    fn content(&self) -> ContentFlags {
        self.read(StateOracle::content)
    }
}
