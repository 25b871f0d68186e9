use core::fmt;

use tracing::trace;

use super::{RuleSet, RuleStage};
use crate::context::ComboContext;
use crate::env::Toggle;
use crate::ids::ActionId;
use crate::opener::OpenerHandle;
use crate::selector::{Guard, PriorityList};

type Produce = Box<dyn Fn(ActionId, &ComboContext<'_>) -> Option<ActionId> + Send + Sync>;

/// Result of a branch whose guard holds.
pub enum Target {
    Action(ActionId),
    /// Current upgrade tier of a family base.
    Tier(ActionId),
    /// First qualifying entry of a nested priority list.
    Select(PriorityList),
    /// Next scripted step of an opener, if it is running.
    Opener(OpenerHandle),
    /// Arbitrary computation over the pressed action and context.
    With(Produce),
}

impl Target {
    pub fn with<F>(f: F) -> Self
    where
        F: Fn(ActionId, &ComboContext<'_>) -> Option<ActionId> + Send + Sync + 'static,
    {
        Self::With(Box::new(f))
    }

    fn produce(&self, pressed: ActionId, ctx: &ComboContext<'_>) -> Option<ActionId> {
        match self {
            Self::Action(action) => Some(*action),
            Self::Tier(base) => Some(ctx.tier(*base)),
            Self::Select(list) => list.select_first(ctx),
            Self::Opener(handle) => ctx.opener(*handle)?.step(ctx),
            Self::With(f) => f(pressed, ctx),
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Self::Tier(base) => f.debug_tuple("Tier").field(base).finish(),
            Self::Select(list) => f.debug_tuple("Select").field(&list.name()).finish(),
            Self::Opener(handle) => f.debug_tuple("Opener").field(handle).finish(),
            Self::With(_) => f.write_str("With(..)"),
        }
    }
}

/// One guarded branch of a [`Cascade`].
pub struct Branch {
    label: &'static str,
    toggle: Option<Toggle>,
    guard: Guard,
    target: Target,
}

impl Branch {
    pub fn new(label: &'static str, target: Target) -> Self {
        Self {
            label,
            toggle: None,
            guard: Box::new(|_| true),
            target,
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

    fn fire(&self, pressed: ActionId, ctx: &ComboContext<'_>) -> Option<ActionId> {
        if let Some(toggle) = self.toggle
            && !ctx.is_enabled(toggle)
        {
            return None;
        }
        if !(self.guard)(ctx) {
            return None;
        }
        self.target.produce(pressed, ctx)
    }
}

impl fmt::Debug for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branch")
            .field("label", &self.label)
            .field("toggle", &self.toggle)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Ordered list of guarded branches bound to one enabling toggle.
///
/// # Semantics
///
/// Branches are tried top to bottom. The first branch whose toggle is on,
/// whose guard holds and whose target produces an action wins; no later
/// branch is looked at. A target that produces nothing (an empty selector,
/// an opener that is not running) lets evaluation continue with the next
/// branch. If no branch wins the pressed action passes through.
#[derive(Debug)]
pub struct Cascade {
    name: &'static str,
    toggle: Toggle,
    stage: RuleStage,
    triggers: Vec<ActionId>,
    branches: Vec<Branch>,
    /// Toggles only read inside guards.
    guard_toggles: Vec<Toggle>,
}

impl Cascade {
    pub fn new(name: &'static str, toggle: Toggle) -> Self {
        Self {
            name,
            toggle,
            stage: RuleStage::default(),
            triggers: Vec::new(),
            branches: Vec::new(),
            guard_toggles: Vec::new(),
        }
    }

    #[must_use]
    pub fn stage(mut self, stage: RuleStage) -> Self {
        self.stage = stage;
        self
    }

    #[must_use]
    pub fn triggers(mut self, triggers: &[ActionId]) -> Self {
        self.triggers.extend_from_slice(triggers);
        self
    }

    #[must_use]
    pub fn branch(mut self, branch: Branch) -> Self {
        self.branches.push(branch);
        self
    }

    /// Shorthand for an untoggled branch.
    #[must_use]
    pub fn rule<F>(self, label: &'static str, guard: F, target: Target) -> Self
    where
        F: Fn(&ComboContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.branch(Branch::new(label, target).when(guard))
    }

    /// Unconditional last branch.
    #[must_use]
    pub fn otherwise(self, target: Target) -> Self {
        self.branch(Branch::new("otherwise", target))
    }

    /// Declares toggles that guards read, so configuration surfaces list them.
    #[must_use]
    pub fn reads(mut self, toggles: &[Toggle]) -> Self {
        self.guard_toggles.extend_from_slice(toggles);
        self
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }
}

impl RuleSet for Cascade {
    fn name(&self) -> &'static str {
        self.name
    }

    fn toggle(&self) -> Toggle {
        self.toggle
    }

    fn stage(&self) -> RuleStage {
        self.stage
    }

    fn triggers(&self) -> &[ActionId] {
        &self.triggers
    }

    fn sub_toggles(&self) -> Vec<Toggle> {
        let mut toggles: Vec<Toggle> = self.guard_toggles.clone();
        for branch in &self.branches {
            toggles.extend(branch.toggle);
            if let Target::Select(list) = &branch.target {
                toggles.extend(list.toggles());
            }
        }
        toggles.sort_unstable();
        toggles.dedup();
        toggles
    }

    fn evaluate(&self, action: ActionId, ctx: &ComboContext<'_>) -> Option<ActionId> {
        self.branches.iter().find_map(|branch| {
            let fired = branch.fire(action, ctx)?;
            trace!(target: "combo::rule", rule = self.name, branch = branch.label, %fired);
            Some(fired)
        })
    }
}
