use super::AdvancePolicy;
use crate::context::ComboContext;
use crate::ids::{ActionId, Job};

/// Immutable description of an opener.
#[derive(Clone, Debug)]
pub struct OpenerScript {
    pub name: &'static str,
    pub job: Job,
    pub actions: Vec<ActionId>,
    pub min_level: u8,
    pub max_level: u8,
    /// Resource/cooldown check that must hold when the opener arms.
    pub precondition: fn(&ComboContext<'_>) -> bool,
    /// Off-script actions that may be executed without aborting.
    pub interjections: Vec<ActionId>,
    /// Overrides the engine's step timeout.
    pub step_timeout: Option<f32>,
    /// Overrides the engine's advance policy.
    pub policy: Option<AdvancePolicy>,
}

fn always(_: &ComboContext<'_>) -> bool {
    true
}

impl OpenerScript {
    pub fn new(name: &'static str, job: Job, actions: &[ActionId]) -> Self {
        Self {
            name,
            job,
            actions: actions.to_vec(),
            min_level: 1,
            max_level: u8::MAX,
            precondition: always,
            interjections: Vec::new(),
            step_timeout: None,
            policy: None,
        }
    }

    #[must_use]
    pub fn levels(mut self, min_level: u8, max_level: u8) -> Self {
        self.min_level = min_level;
        self.max_level = max_level;
        self
    }

    #[must_use]
    pub fn precondition(mut self, check: fn(&ComboContext<'_>) -> bool) -> Self {
        self.precondition = check;
        self
    }

    #[must_use]
    pub fn interjections(mut self, actions: &[ActionId]) -> Self {
        self.interjections.extend_from_slice(actions);
        self
    }

    #[must_use]
    pub fn step_timeout(mut self, seconds: f32) -> Self {
        self.step_timeout = Some(seconds);
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: AdvancePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn level_in_range(&self, level: u8) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }

    pub fn is_interjection(&self, action: ActionId) -> bool {
        self.interjections.contains(&action)
    }
}
