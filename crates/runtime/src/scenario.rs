//! Replay scenarios.
//!
//! A scenario is an initial [`StateSnapshot`] followed by frames. Each frame
//! is one host tick: time passes, the snapshot is patched, reported
//! executions are recorded, the tick boundary runs and the listed buttons
//! are pressed. A press may name the action it expects and may report the
//! resolved action as executed, which is how openers are walked.
//!
//! ```ron
//! #![enable(implicit_some)]
//! (
//!     name: "opener",
//!     snapshot: (job: DarkKnight, in_combat: true),
//!     frames: [
//!         (press: [(action: "Hard Slash", expect: "Hard Slash", execute: true)]),
//!         (elapse: 2.5, press: [(action: "Hard Slash", expect: "Edge of Shadow")]),
//!     ],
//! )
//! ```
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use combo_content::{ActionCatalog, ComboConfig};
use combo_core::{ActionId, ActionOracle, Job, OpenerState, Tick};

use crate::error::{Result, RuntimeError};
use crate::runtime::ComboRuntime;
use crate::snapshot::{SnapshotPatch, SnapshotProvider, StateSnapshot};

/// An action by id or by its name in the action sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionRef {
    Id(u32),
    Name(String),
}

impl ActionRef {
    /// Looks the action up in `catalog`. Ids are taken as they are.
    pub fn resolve(&self, catalog: &ActionCatalog) -> Result<ActionId> {
        match self {
            Self::Id(raw) => Ok(ActionId(*raw)),
            Self::Name(name) => catalog
                .by_name(name)
                .map(|data| data.id)
                .ok_or_else(|| RuntimeError::UnknownAction(name.clone())),
        }
    }
}

impl From<ActionId> for ActionRef {
    fn from(id: ActionId) -> Self {
        Self::Id(id.raw())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Press {
    pub action: ActionRef,
    #[serde(default)]
    pub expect: Option<ActionRef>,
    /// Report the resolved action as executed once the frame's presses are done.
    #[serde(default)]
    pub execute: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    /// Seconds that pass before this frame.
    pub elapse: f32,
    pub patch: SnapshotPatch,
    /// Actions the host reports as executed before the tick.
    pub execute: Vec<ActionRef>,
    pub press: Vec<Press>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    /// Jobs to register; the snapshot's job when empty.
    pub jobs: Vec<Job>,
    /// Player configuration; the shipped default when absent.
    pub config: Option<ComboConfig>,
    pub snapshot: StateSnapshot,
    pub frames: Vec<Frame>,
}

/// One press and what it resolved to.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayRow {
    pub frame: usize,
    pub tick: Tick,
    pub pressed: ActionId,
    pub resolved: ActionId,
    pub expected: Option<ActionId>,
}

impl ReplayRow {
    pub fn passed(&self) -> bool {
        self.expected.is_none_or(|expected| expected == self.resolved)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReplayReport {
    pub name: String,
    pub rows: Vec<ReplayRow>,
    /// Opener states after the last frame, by opener name.
    pub openers: Vec<(String, OpenerState)>,
}

impl ReplayReport {
    pub fn mismatches(&self) -> impl Iterator<Item = &ReplayRow> {
        self.rows.iter().filter(|row| !row.passed())
    }

    /// Fails on the first press that did not resolve as expected.
    pub fn ensure_passed(&self) -> Result<()> {
        match self.mismatches().next() {
            Some(row) => Err(RuntimeError::Mismatch {
                frame: row.frame,
                pressed: row.pressed,
                expected: row.expected.unwrap_or(ActionId::NONE),
                actual: row.resolved,
            }),
            None => Ok(()),
        }
    }
}

impl Scenario {
    /// Load scenario from a RON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::ScenarioRead {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| RuntimeError::ScenarioParse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn jobs(&self) -> Vec<Job> {
        if self.jobs.is_empty() {
            self.snapshot.job.into_iter().collect()
        } else {
            self.jobs.clone()
        }
    }

    /// Replays every frame against the shipped content and action sheet.
    ///
    /// # Errors
    ///
    /// Fails when the runtime cannot be built or an action name is unknown.
    /// Presses that resolve to something unexpected are reported in the
    /// returned rows, not as errors.
    pub fn replay(&self) -> Result<ReplayReport> {
        let catalog = Arc::new(ActionCatalog::embedded()?);
        let state = Arc::new(SnapshotProvider::new(self.snapshot.clone()));
        let config = match &self.config {
            Some(config) => config.clone(),
            None => ComboConfig::embedded_default()?,
        };

        let mut runtime = ComboRuntime::builder()
            .state(state.clone())
            .actions(catalog.clone() as Arc<dyn ActionOracle>)
            .combo_config(config)
            .jobs(self.jobs())
            .build()?;

        let mut report = ReplayReport {
            name: self.name.clone(),
            ..ReplayReport::default()
        };

        for (index, frame) in self.frames.iter().enumerate() {
            let executed = frame
                .execute
                .iter()
                .map(|action| action.resolve(&catalog))
                .collect::<Result<Vec<_>>>()?;
            state.update(|snapshot| {
                snapshot.elapse(frame.elapse);
                snapshot.apply(&frame.patch);
                for &action in &executed {
                    snapshot.execute(action);
                }
            });

            let tick = runtime.begin_tick();
            let mut follow_up = Vec::new();
            for press in &frame.press {
                let pressed = press.action.resolve(&catalog)?;
                let expected = press
                    .expect
                    .as_ref()
                    .map(|action| action.resolve(&catalog))
                    .transpose()?;
                let resolved = runtime.resolve(pressed);
                debug!(
                    target: "combo::replay",
                    frame = index,
                    tick = tick.0,
                    %pressed,
                    %resolved,
                    "press"
                );
                if press.execute {
                    follow_up.push(resolved);
                }
                report.rows.push(ReplayRow {
                    frame: index,
                    tick,
                    pressed,
                    resolved,
                    expected,
                });
            }

            state.update(|snapshot| {
                for &action in &follow_up {
                    snapshot.execute(action);
                }
            });
        }

        report.openers = runtime
            .engine()
            .registry()
            .openers()
            .iter()
            .map(|(_, opener)| (opener.script().name.to_string(), opener.state()))
            .collect();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_refs_accept_ids_and_names() {
        let catalog = ActionCatalog::embedded().expect("action sheet");
        let by_id: ActionRef = ron::from_str("3617").expect("id parses");
        let by_name: ActionRef = ron::from_str(r#""hard slash""#).expect("name parses");

        assert_eq!(by_id.resolve(&catalog).expect("id"), ActionId(3617));
        assert_eq!(by_name.resolve(&catalog).expect("name"), ActionId(3617));

        let unknown = ActionRef::Name("Holy".into()).resolve(&catalog);
        assert!(matches!(unknown, Err(RuntimeError::UnknownAction(_))));
    }

    #[test]
    fn jobs_default_to_the_snapshot_job() {
        let scenario = Scenario {
            snapshot: StateSnapshot::for_job(Job::Scholar, 100),
            ..Scenario::default()
        };
        assert_eq!(scenario.jobs(), vec![Job::Scholar]);
    }

    #[test]
    fn rows_without_expectation_pass() {
        let row = ReplayRow {
            frame: 0,
            tick: Tick(1),
            pressed: ActionId(1),
            resolved: ActionId(2),
            expected: None,
        };
        let report = ReplayReport {
            rows: vec![row.clone(), ReplayRow { expected: Some(ActionId(1)), ..row }],
            ..ReplayReport::default()
        };

        assert_eq!(report.mismatches().count(), 1);
        assert!(matches!(
            report.ensure_passed(),
            Err(RuntimeError::Mismatch { frame: 0, .. })
        ));
    }
}
