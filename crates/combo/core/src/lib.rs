//! Real-time action resolution engine.
//!
//! `combo-core` decides, for every button the player presses, which concrete
//! action should execute given the live combat state. It is pure: the host
//! supplies state through the oracle traits in [`env`], calls
//! [`ComboEngine::begin_tick`] once per update-loop iteration and
//! [`ComboEngine::resolve`] once per attempted action.
//!
//! Layers, leaves first:
//! - [`status`]: per-tick [`EffectCache`] of status lookups
//! - [`conditions`]: predicates on [`ComboContext`]
//! - [`selector`]: [`PriorityList`] for mitigation and button consolidation
//! - [`opener`]: scripted sequences at the start of a pull
//! - [`rule`]: [`RuleSet`] and the [`Cascade`] branch table
//! - [`registry`] and [`engine`]: dispatch by trigger action
pub mod conditions;
pub mod config;
pub mod context;
pub mod engine;
pub mod env;
pub mod error;
pub mod ids;
pub mod opener;
pub mod registry;
pub mod rule;
pub mod selector;
pub mod status;
pub mod tier;

pub use conditions::WeaveTiming;
pub use config::{BlockingStatuses, EngineConfig};
pub use context::ComboContext;
pub use engine::{ComboEngine, ResolveError};
pub use env::{
    ActionData, ActionOracle, AttackType, BardGauge, BossAvoidance, ComboEnv, ComboState,
    ConfigOracle, ContentFlags, CooldownState, DarkKnightGauge, Env, GcdTiming, JobGauge,
    OptionKey, OptionValue, OracleError, PartyList, PartyRequirement, ScholarGauge, Song,
    StateOracle, TargetInfo, Toggle, UsedAction,
};
pub use error::{ComboError, ErrorKind};
pub use ids::{ActionId, Job, ObjectId, StatusId, Tick};
pub use opener::{
    AdvancePolicy, Opener, OpenerBank, OpenerEnd, OpenerHandle, OpenerScript, OpenerState,
};
pub use registry::{RegistryBuilder, RegistryError, RuleRegistry};
pub use rule::{Branch, Cascade, RuleSet, RuleStage, Target};
pub use selector::{Candidate, Guard, PriorityEntry, PriorityList};
pub use status::{CacheStats, EffectCache, OwnerFilter, StatusEffect};
pub use tier::{ActionFamily, UpgradeTable};
