use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use tracing::{debug, warn};

use super::{OwnerFilter, StatusEffect};
use crate::config::EngineConfig;
use crate::env::{GcdTiming, OracleError, StateOracle};
use crate::error::ComboError;
use crate::ids::{ObjectId, StatusId, Tick};

type CacheKey = (StatusId, ObjectId, OwnerFilter);

/// Memoizes status lookups for exactly one tick.
///
/// Absence is cached too, so a status that appears on the host mid-tick stays
/// absent until the next [`begin_tick`](Self::begin_tick). The cache is the
/// only engine state that changes during a tick; interior mutability is
/// confined to filling it, and clearing requires `&mut self`.
#[derive(Debug)]
pub struct EffectCache {
    entries: RefCell<HashMap<CacheKey, Option<StatusEffect>>>,
    timing: Cell<Option<Option<GcdTiming>>>,
    tick: Tick,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

/// Counters for the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub tick: Tick,
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl EffectCache {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::with_capacity(
                EngineConfig::STATUS_CACHE_CAPACITY,
            )),
            timing: Cell::new(None),
            tick: Tick::ZERO,
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Drops every cached value. Called once per tick by the host loop.
    pub fn begin_tick(&mut self, tick: Tick) {
        self.entries.get_mut().clear();
        self.timing.set(None);
        self.hits.set(0);
        self.misses.set(0);
        self.tick = tick;
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Returns the status on `target`, consulting the host only on a miss.
    ///
    /// # Arguments
    ///
    /// * `player` - Local player id, required for [`OwnerFilter::Player`].
    ///   Without it a player-owned lookup is absent.
    ///
    /// Provider failures are logged and cached as absence.
    pub fn lookup(
        &self,
        state: &dyn StateOracle,
        status: StatusId,
        target: ObjectId,
        filter: OwnerFilter,
        player: Option<ObjectId>,
    ) -> Option<StatusEffect> {
        let key = (status, target, filter);
        if let Some(cached) = self.entries.borrow().get(&key) {
            self.hits.set(self.hits.get() + 1);
            return *cached;
        }
        self.misses.set(self.misses.get() + 1);

        // The provider is called with no borrow held so a panicking provider
        // leaves the cache usable.
        let value = self.fetch(state, status, target, filter, player);
        self.entries.borrow_mut().insert(key, value);
        value
    }

    fn fetch(
        &self,
        state: &dyn StateOracle,
        status: StatusId,
        target: ObjectId,
        filter: OwnerFilter,
        player: Option<ObjectId>,
    ) -> Option<StatusEffect> {
        let source = match filter {
            OwnerFilter::Any => None,
            OwnerFilter::Player => Some(player?),
        };
        if !target.is_valid() {
            return None;
        }

        match state.status(status, target, source) {
            Ok(found) => {
                let lock = self.timing(state).map(|t| t.animation_lock).unwrap_or(0.0);
                found
                    .filter(|effect| source.is_none() || effect.source == source)
                    .map(|effect| effect.normalized(lock))
            }
            Err(err) => {
                log_fault(&err, status, target);
                None
            }
        }
    }

    /// GCD timing, read from the host at most once per tick.
    pub fn timing(&self, state: &dyn StateOracle) -> Option<GcdTiming> {
        if let Some(memo) = self.timing.get() {
            return memo;
        }
        let value = match state.timing() {
            Ok(timing) => Some(timing),
            Err(err) => {
                debug!(target: "combo::cache", error = %err, "timing unavailable");
                None
            }
        };
        self.timing.set(Some(value));
        value
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            tick: self.tick,
            entries: self.entries.borrow().len(),
            hits: self.hits.get(),
            misses: self.misses.get(),
        }
    }
}

impl Default for EffectCache {
    fn default() -> Self {
        Self::new()
    }
}

fn log_fault(err: &OracleError, status: StatusId, target: ObjectId) {
    if err.kind().is_fault() {
        warn!(
            target: "combo::cache",
            %status,
            %target,
            code = err.error_code(),
            "status provider fault, treating as absent"
        );
    } else {
        debug!(target: "combo::cache", %status, %target, error = %err, "status absent");
    }
}
