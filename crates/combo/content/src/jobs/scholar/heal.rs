use combo_core::{
    ActionId, Cascade, ComboContext, ObjectId, OptionKey, OwnerFilter, PriorityEntry,
    PriorityList, RuleSet, RuleStage, StatusId, Target, Toggle,
};
use tracing::debug;

use super::actions::*;
use super::{buffs, options, toggles};

/// One user-rankable single-target heal.
struct Heal {
    label: &'static str,
    action: ActionId,
    toggle: Toggle,
    priority: OptionKey,
    default_priority: i64,
    hp: OptionKey,
    default_hp: f64,
    /// Job-specific requirement on top of readiness and the HP threshold.
    usable: fn(&ComboContext<'_>, ObjectId) -> bool,
}

fn has_aetherflow(ctx: &ComboContext<'_>) -> bool {
    ctx.scholar_gauge().is_some_and(|g| g.has_aetherflow())
}

fn lacks(ctx: &ComboContext<'_>, target: ObjectId, status: StatusId) -> bool {
    ctx.status_on(status, Some(target), OwnerFilter::Any).is_none()
}

const HEAL_COUNT: usize = 4;

static HEALS: [Heal; HEAL_COUNT] = [
    Heal {
        label: "lustrate",
        action: LUSTRATE,
        toggle: toggles::ST_HEAL_LUSTRATE,
        priority: options::LUSTRATE_PRIORITY,
        default_priority: 1,
        hp: options::LUSTRATE_HP,
        default_hp: 70.0,
        usable: |ctx, _| has_aetherflow(ctx),
    },
    Heal {
        label: "excogitation",
        action: EXCOGITATION,
        toggle: toggles::ST_HEAL_EXCOGITATION,
        priority: options::EXCOGITATION_PRIORITY,
        default_priority: 2,
        hp: options::EXCOGITATION_HP,
        default_hp: 80.0,
        usable: |ctx, target| {
            (has_aetherflow(ctx) || ctx.has_effect(buffs::RECITATION))
                && lacks(ctx, target, buffs::EXCOGITATION)
        },
    },
    Heal {
        label: "protraction",
        action: PROTRACTION,
        toggle: toggles::ST_HEAL_PROTRACTION,
        priority: options::PROTRACTION_PRIORITY,
        default_priority: 3,
        hp: options::PROTRACTION_HP,
        default_hp: 60.0,
        usable: |ctx, target| lacks(ctx, target, buffs::PROTRACTION),
    },
    Heal {
        label: "aetherpact",
        action: AETHERPACT,
        toggle: toggles::ST_HEAL_AETHERPACT,
        priority: options::AETHERPACT_PRIORITY,
        default_priority: 4,
        hp: options::AETHERPACT_HP,
        default_hp: 70.0,
        usable: |ctx, target| {
            let required = ctx.int_option(options::AETHERPACT_FAIRY_GAUGE, 10);
            ctx.scholar_gauge()
                .is_some_and(|g| i64::from(g.fairy_gauge) >= required)
                && lacks(ctx, target, buffs::FEY_UNION)
        },
    },
];

/// Physick becomes the highest-ranked single-target oGCD heal that fits.
///
/// Ranks come from the `*.priority` options, lowest first; ties keep the
/// declared order. The heal target is the selected friendly target, or the
/// player when none is selected.
#[derive(Debug, Default)]
pub struct SingleTargetHeal;

impl SingleTargetHeal {
    pub fn new() -> Self {
        Self
    }

    fn heal_target(ctx: &ComboContext<'_>) -> Option<ObjectId> {
        if ctx.has_friendly_target() {
            ctx.current_target()
        } else {
            ctx.player()
        }
    }

    /// Indices into the heal table, highest priority first.
    fn ranked(ctx: &ComboContext<'_>) -> [usize; HEAL_COUNT] {
        let mut order: [usize; HEAL_COUNT] = core::array::from_fn(|i| i);
        order.sort_unstable_by_key(|&i| {
            let heal = &HEALS[i];
            (ctx.int_option(heal.priority, heal.default_priority), i)
        });
        order
    }
}

impl RuleSet for SingleTargetHeal {
    fn name(&self) -> &'static str {
        "sch.st.heal"
    }

    fn toggle(&self) -> Toggle {
        toggles::ST_HEAL
    }

    fn stage(&self) -> RuleStage {
        RuleStage::Defensive
    }

    fn triggers(&self) -> &[ActionId] {
        &[PHYSICK]
    }

    fn sub_toggles(&self) -> Vec<Toggle> {
        HEALS.iter().map(|heal| heal.toggle).collect()
    }

    fn evaluate(&self, _action: ActionId, ctx: &ComboContext<'_>) -> Option<ActionId> {
        let target = Self::heal_target(ctx)?;
        let hp = ctx.hp_percent_of(target, 100.0);

        let heal = Self::ranked(ctx).into_iter().map(|i| &HEALS[i]).find(|heal| {
            ctx.is_enabled(heal.toggle)
                && ctx.action_ready(heal.action)
                && hp <= ctx.float_option(heal.hp, heal.default_hp) as f32
                && (heal.usable)(ctx, target)
        })?;

        debug!(target: "combo::scholar", heal = heal.label, %target, hp, "single target heal");
        Some(heal.action)
    }
}

fn seraph_out(ctx: &ComboContext<'_>) -> bool {
    ctx.scholar_gauge().is_some_and(|g| g.seraph_timer_ms > 0)
}

/// Party heals in fixed order. Seraph swaps the fairy's two party abilities.
pub fn aoe_heal_priority() -> PriorityList {
    PriorityList::new("sch.aoe.heal")
        .entry(
            PriorityEntry::new("whispering_dawn", WHISPERING_DAWN)
                .toggle(toggles::AOE_HEAL_WHISPERING_DAWN)
                .when(|ctx| !seraph_out(ctx)),
        )
        .entry(
            PriorityEntry::new("angels_whisper", ANGELS_WHISPER)
                .toggle(toggles::AOE_HEAL_WHISPERING_DAWN)
                .when(seraph_out),
        )
        .entry(
            PriorityEntry::new("fey_illumination", FEY_ILLUMINATION)
                .toggle(toggles::AOE_HEAL_FEY_ILLUMINATION)
                .when(|ctx| !seraph_out(ctx)),
        )
        .entry(
            PriorityEntry::new("seraphic_illumination", SERAPHIC_ILLUMINATION)
                .toggle(toggles::AOE_HEAL_FEY_ILLUMINATION)
                .when(seraph_out),
        )
        .entry(PriorityEntry::new("fey_blessing", FEY_BLESSING).toggle(toggles::AOE_HEAL_FEY_BLESSING))
        .entry(
            PriorityEntry::new("consolation", CONSOLATION)
                .toggle(toggles::AOE_HEAL_CONSOLATION)
                .when(seraph_out),
        )
        .entry(PriorityEntry::new("seraphism", SERAPHISM).toggle(toggles::AOE_HEAL_SERAPHISM))
        .entry(
            PriorityEntry::new("indomitability", INDOMITABILITY)
                .toggle(toggles::AOE_HEAL_INDOMITABILITY)
                .when(has_aetherflow),
        )
}

/// Succor becomes the first party heal that is ready.
pub fn aoe_heal() -> Cascade {
    Cascade::new("sch.aoe.heal", toggles::AOE_HEAL)
        .stage(RuleStage::Defensive)
        .triggers(&[SUCCOR])
        .otherwise(Target::Select(aoe_heal_priority()))
}
