//! Priority selector: a declarative, ordered table of candidate actions.
//!
//! A [`PriorityList`] evaluates its entries top to bottom and returns the
//! first one that qualifies. Position is the only tiebreak, so the outcome is
//! a pure function of the tick's state and configuration.
//!
//! # Semantics
//!
//! An entry qualifies when, in this order:
//! - its enabling toggle is on (entries without a toggle are always on)
//! - its action is usable: learned at the current level and off cooldown
//! - its guard predicate holds
//!
//! Later checks are skipped as soon as one fails, and later entries are never
//! looked at once one qualifies.

use core::fmt;

use tracing::debug;

use crate::context::ComboContext;
use crate::env::Toggle;
use crate::ids::ActionId;

/// Boolean condition gating an entry or branch.
pub type Guard = Box<dyn Fn(&ComboContext<'_>) -> bool + Send + Sync>;

/// What an entry proposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Candidate {
    /// A fixed action.
    Action(ActionId),
    /// The current upgrade tier of a family base action.
    Tier(ActionId),
}

impl Candidate {
    pub fn resolve(self, ctx: &ComboContext<'_>) -> ActionId {
        match self {
            Self::Action(action) => action,
            Self::Tier(base) => ctx.tier(base),
        }
    }
}

impl From<ActionId> for Candidate {
    fn from(action: ActionId) -> Self {
        Self::Action(action)
    }
}

pub struct PriorityEntry {
    label: &'static str,
    candidate: Candidate,
    toggle: Option<Toggle>,
    guard: Guard,
}

impl PriorityEntry {
    pub fn new(label: &'static str, candidate: impl Into<Candidate>) -> Self {
        Self {
            label,
            candidate: candidate.into(),
            toggle: None,
            guard: Box::new(|_| true),
        }
    }

    #[must_use]
    pub fn toggle(mut self, toggle: Toggle) -> Self {
        self.toggle = Some(toggle);
        self
    }

    #[must_use]
    pub fn when<F>(mut self, guard: F) -> Self
    where
        F: Fn(&ComboContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.guard = Box::new(guard);
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn enabling_toggle(&self) -> Option<Toggle> {
        self.toggle
    }

    /// Returns the entry's action when it qualifies.
    fn qualify(&self, ctx: &ComboContext<'_>) -> Option<ActionId> {
        if let Some(toggle) = self.toggle
            && !ctx.is_enabled(toggle)
        {
            return None;
        }
        let action = self.candidate.resolve(ctx);
        if !ctx.action_ready(action) {
            return None;
        }
        (self.guard)(ctx).then_some(action)
    }
}

impl fmt::Debug for PriorityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityEntry")
            .field("label", &self.label)
            .field("candidate", &self.candidate)
            .field("toggle", &self.toggle)
            .finish_non_exhaustive()
    }
}

/// Ordered candidate table.
#[derive(Debug)]
pub struct PriorityList {
    name: &'static str,
    entries: Vec<PriorityEntry>,
}

impl PriorityList {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// Builds a list ordered by ascending rank.
    ///
    /// Entries with equal rank keep their relative order, so the result is
    /// still a total order.
    pub fn from_ranked(
        name: &'static str,
        ranked: impl IntoIterator<Item = (i64, PriorityEntry)>,
    ) -> Self {
        let mut ranked: Vec<_> = ranked.into_iter().collect();
        ranked.sort_by_key(|(rank, _)| *rank);
        Self {
            name,
            entries: ranked.into_iter().map(|(_, entry)| entry).collect(),
        }
    }

    #[must_use]
    pub fn entry(mut self, entry: PriorityEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn push(&mut self, entry: PriorityEntry) {
        self.entries.push(entry);
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn entries(&self) -> &[PriorityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first qualifying entry's action, or `None`.
    pub fn select_first(&self, ctx: &ComboContext<'_>) -> Option<ActionId> {
        let (entry, action) = self
            .entries
            .iter()
            .find_map(|entry| entry.qualify(ctx).map(|action| (entry, action)))?;
        debug!(
            target: "combo::selector",
            list = self.name,
            entry = entry.label,
            %action,
            "selected"
        );
        Some(action)
    }

    pub fn toggles(&self) -> impl Iterator<Item = Toggle> + '_ {
        self.entries.iter().filter_map(|entry| entry.toggle)
    }
}
