use std::cell::Cell;

use tracing::{debug, warn};

use super::{AdvancePolicy, OpenerEnd, OpenerScript, OpenerState};
use crate::context::ComboContext;
use crate::ids::ActionId;

/// Mutable cursor state of one opener.
#[derive(Clone, Copy, Debug)]
struct Progress {
    state: OpenerState,
    cursor: usize,
    /// Sequence number of the last history entry already accounted for.
    seen: Option<u64>,
    /// Pull generation; bumped on every reset.
    pull: u32,
    /// Combat time of the last forward move.
    last_progress_at: f32,
    was_in_combat: bool,
}

impl Progress {
    const fn fresh(pull: u32) -> Self {
        Self {
            state: OpenerState::PreOpener,
            cursor: 0,
            seen: None,
            pull,
            last_progress_at: 0.0,
            was_in_combat: false,
        }
    }
}

/// An opener script plus its cursor.
#[derive(Debug)]
pub struct Opener {
    script: OpenerScript,
    progress: Cell<Progress>,
}

impl Opener {
    pub fn new(script: OpenerScript) -> Self {
        Self {
            script,
            progress: Cell::new(Progress::fresh(0)),
        }
    }

    pub fn script(&self) -> &OpenerScript {
        &self.script
    }

    pub fn state(&self) -> OpenerState {
        self.progress.get().state
    }

    /// Index of the next step to execute.
    pub fn cursor(&self) -> usize {
        self.progress.get().cursor
    }

    pub fn pull(&self) -> u32 {
        self.progress.get().pull
    }

    /// The step the opener expects next, while running.
    pub fn current_action(&self) -> Option<ActionId> {
        let progress = self.progress.get();
        if !progress.state.is_running() {
            return None;
        }
        self.script.actions.get(progress.cursor).copied()
    }

    /// Returns to `PreOpener` under a new pull generation.
    pub fn reset(&self) {
        let mut progress = self.progress.get();
        let was_in_combat = progress.was_in_combat;
        progress = Progress::fresh(progress.pull.wrapping_add(1));
        progress.was_in_combat = was_in_combat;
        self.progress.set(progress);
    }

    /// Returns the scripted action to execute now, or `None` when the opener
    /// is not (or no longer) running.
    pub fn step(&self, ctx: &ComboContext<'_>) -> Option<ActionId> {
        let mut progress = self.progress.get();
        let action = self.advance(&mut progress, ctx);
        // Combat may start between tick boundaries; a pull seen here must not
        // read as a new one at the next boundary.
        progress.was_in_combat |= ctx.in_combat();
        self.progress.set(progress);
        action
    }

    /// Tick-boundary hook: handles combat transitions and reconciles the
    /// host's action history even when no step is requested.
    pub fn observe(&self, ctx: &ComboContext<'_>) {
        let mut progress = self.progress.get();
        let in_combat = ctx.in_combat();

        let combat_ended = progress.was_in_combat && !in_combat;
        let new_pull = !progress.was_in_combat && in_combat && progress.state.is_finished();
        if combat_ended || new_pull {
            debug!(
                target: "combo::opener",
                opener = self.script.name,
                pull = progress.pull.wrapping_add(1),
                "reset"
            );
            progress = Progress::fresh(progress.pull.wrapping_add(1));
        } else if progress.state.is_running()
            && let Err(end) = self.reconcile(&mut progress, ctx)
        {
            self.abort(&mut progress, ctx, end);
        }

        progress.was_in_combat = in_combat;
        self.progress.set(progress);
    }

    fn policy(&self, ctx: &ComboContext<'_>) -> AdvancePolicy {
        self.script.policy.unwrap_or(ctx.settings().opener_policy)
    }

    fn advance(&self, progress: &mut Progress, ctx: &ComboContext<'_>) -> Option<ActionId> {
        match progress.state {
            OpenerState::PostOpener(_) => None,
            OpenerState::PreOpener => {
                if let Err(end) = self.validate(ctx) {
                    self.abort(progress, ctx, end);
                    return None;
                }
                if !(self.script.precondition)(ctx) {
                    self.abort(progress, ctx, OpenerEnd::PreconditionFailed);
                    return None;
                }
                self.arm(progress, ctx);
                self.emit(progress, ctx)
            }
            OpenerState::InOpener => {
                if let Err(end) = self
                    .reconcile(progress, ctx)
                    .and_then(|()| self.validate(ctx))
                    .and_then(|()| self.check_stall(progress, ctx))
                {
                    self.abort(progress, ctx, end);
                    return None;
                }
                self.emit(progress, ctx)
            }
        }
    }

    /// Level, job and gauge must stay valid for the whole sequence.
    fn validate(&self, ctx: &ComboContext<'_>) -> Result<(), OpenerEnd> {
        if ctx.job() != Some(self.script.job) {
            return Err(OpenerEnd::JobChanged);
        }
        if !self.script.level_in_range(ctx.level()) {
            return Err(OpenerEnd::LevelOutOfRange);
        }
        if ctx.gauge().is_none() {
            return Err(OpenerEnd::MissingState);
        }
        Ok(())
    }

    fn check_stall(&self, progress: &Progress, ctx: &ComboContext<'_>) -> Result<(), OpenerEnd> {
        if !ctx.in_combat() {
            return Ok(());
        }
        let timeout = self
            .script
            .step_timeout
            .unwrap_or(ctx.settings().opener_step_timeout);
        if ctx.combat_time() - progress.last_progress_at > timeout {
            return Err(OpenerEnd::Stalled);
        }
        Ok(())
    }

    fn arm(&self, progress: &mut Progress, ctx: &ComboContext<'_>) {
        progress.state = OpenerState::InOpener;
        progress.cursor = 0;
        // History from before arming belongs to no step.
        progress.seen = ctx.state().ok().and_then(|s| s.last_used()).map(|u| u.sequence);
        progress.last_progress_at = ctx.combat_time();
        debug!(
            target: "combo::opener",
            opener = self.script.name,
            pull = progress.pull,
            steps = self.script.len(),
            "armed"
        );
    }

    /// Hands out the step under the cursor, or completes the opener.
    fn emit(&self, progress: &mut Progress, ctx: &ComboContext<'_>) -> Option<ActionId> {
        let Some(&action) = self.script.actions.get(progress.cursor) else {
            progress.state = OpenerState::PostOpener(OpenerEnd::Completed);
            debug!(target: "combo::opener", opener = self.script.name, "completed");
            return None;
        };
        if self.policy(ctx) == AdvancePolicy::OnIssue {
            progress.cursor += 1;
            progress.last_progress_at = ctx.combat_time();
        }
        Some(action)
    }

    /// Accounts for the newest history entry, if it has not been seen yet.
    fn reconcile(&self, progress: &mut Progress, ctx: &ComboContext<'_>) -> Result<(), OpenerEnd> {
        let Some(used) = ctx.state().ok().and_then(|s| s.last_used()) else {
            return Ok(());
        };
        if progress.seen.is_some_and(|seen| used.sequence <= seen) {
            return Ok(());
        }
        progress.seen = Some(used.sequence);

        if self.script.is_interjection(used.action) {
            return Ok(());
        }

        match self.policy(ctx) {
            AdvancePolicy::OnConfirm => {
                let expected = self.script.actions.get(progress.cursor).copied();
                if expected == Some(used.action) {
                    progress.cursor += 1;
                    progress.last_progress_at = ctx.combat_time();
                    return Ok(());
                }
                Err(OpenerEnd::Desync {
                    expected: expected.unwrap_or(ActionId::NONE),
                    actual: used.action,
                })
            }
            AdvancePolicy::OnIssue => {
                // Issued steps may execute late, but never steps not yet handed out.
                if self.script.actions[..progress.cursor].contains(&used.action) {
                    return Ok(());
                }
                let expected = progress
                    .cursor
                    .checked_sub(1)
                    .and_then(|last| self.script.actions.get(last).copied());
                Err(OpenerEnd::Desync {
                    expected: expected.unwrap_or(ActionId::NONE),
                    actual: used.action,
                })
            }
        }
    }

    /// Ends the opener for this pull, or stays disarmed before the pull.
    fn abort(&self, progress: &mut Progress, ctx: &ComboContext<'_>, end: OpenerEnd) {
        if !ctx.in_combat() {
            let mut fresh = Progress::fresh(progress.pull);
            fresh.was_in_combat = progress.was_in_combat;
            *progress = fresh;
            debug!(target: "combo::opener", opener = self.script.name, reason = %end, "not armed");
            return;
        }

        progress.state = OpenerState::PostOpener(end);
        match end {
            OpenerEnd::Desync { expected, actual } => warn!(
                target: "combo::opener",
                opener = self.script.name,
                step = progress.cursor,
                %expected,
                %actual,
                "desync, falling back to rotation"
            ),
            _ => debug!(
                target: "combo::opener",
                opener = self.script.name,
                step = progress.cursor,
                reason = %end,
                "aborted"
            ),
        }
    }
}
