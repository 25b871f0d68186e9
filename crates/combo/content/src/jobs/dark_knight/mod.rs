//! Dark Knight.
//!
//! Content is three [`Cascade`](combo_core::Cascade)s and one opener:
//! - `drk.mit.one_button`: the mitigation priority list on Dark Mind
//! - `drk.st.adv` / `drk.aoe.adv`: full rotations on Hard Slash and Unleash
//! - `drk.standard`: the level 100 opener driven from the single-target rotation

mod mitigation;
mod opener;
mod rotation;

pub use mitigation::{mitigation_priority, one_button_mitigation};
pub use opener::standard_opener;
pub use rotation::{aoe_rotation, st_rotation};

use combo_core::{ActionFamily, BossAvoidance, ComboContext, RegistryBuilder};

pub mod actions {
    use combo_core::ActionId;

    pub const HARD_SLASH: ActionId = ActionId(3617);
    pub const UNLEASH: ActionId = ActionId(3621);
    pub const SYPHON_STRIKE: ActionId = ActionId(3623);
    pub const BLOOD_WEAPON: ActionId = ActionId(3625);
    pub const SOULEATER: ActionId = ActionId(3632);
    pub const DARK_MIND: ActionId = ActionId(3634);
    pub const SHADOW_WALL: ActionId = ActionId(3636);
    pub const LIVING_DEAD: ActionId = ActionId(3638);
    pub const SALTED_EARTH: ActionId = ActionId(3639);
    pub const ABYSSAL_DRAIN: ActionId = ActionId(3641);
    pub const CARVE_AND_SPIT: ActionId = ActionId(3643);
    pub const DELIRIUM: ActionId = ActionId(7390);
    pub const QUIETUS: ActionId = ActionId(7391);
    pub const BLOODSPILLER: ActionId = ActionId(7392);
    pub const BLACKEST_NIGHT: ActionId = ActionId(7393);
    pub const FLOOD_OF_DARKNESS: ActionId = ActionId(16466);
    pub const EDGE_OF_DARKNESS: ActionId = ActionId(16467);
    pub const STALWART_SOUL: ActionId = ActionId(16468);
    pub const FLOOD_OF_SHADOW: ActionId = ActionId(16469);
    pub const EDGE_OF_SHADOW: ActionId = ActionId(16470);
    pub const DARK_MISSIONARY: ActionId = ActionId(16471);
    pub const LIVING_SHADOW: ActionId = ActionId(16472);
    pub const OBLATION: ActionId = ActionId(25754);
    pub const SALT_AND_DARKNESS: ActionId = ActionId(25755);
    pub const SHADOWBRINGER: ActionId = ActionId(25757);
    pub const SHADOWED_VIGIL: ActionId = ActionId(36927);
    pub const SCARLET_DELIRIUM: ActionId = ActionId(36928);
    pub const COMEUPPANCE: ActionId = ActionId(36929);
    pub const TORCLEAVER: ActionId = ActionId(36930);
    pub const IMPALEMENT: ActionId = ActionId(36931);
    pub const DISESTEEM: ActionId = ActionId(36932);
}

pub mod buffs {
    use combo_core::StatusId;

    pub const BLOOD_WEAPON: StatusId = StatusId(742);
    pub const SALTED_EARTH: StatusId = StatusId(749);
    pub const BLACKEST_NIGHT_SHIELD: StatusId = StatusId(1178);
    pub const DELIRIUM: StatusId = StatusId(1972);
    pub const OBLATION: StatusId = StatusId(2682);
    pub const ENHANCED_DELIRIUM: StatusId = StatusId(3836);
    pub const SCORN: StatusId = StatusId(3837);
}

pub mod toggles {
    use combo_core::Toggle;

    pub const MIT_ONE_BUTTON: Toggle = Toggle("drk.mit.one_button");
    pub const MIT_LIVING_DEAD_MAX: Toggle = Toggle("drk.mit.living_dead_max");
    pub const MIT_BLACKEST_NIGHT: Toggle = Toggle("drk.mit.blackest_night");
    pub const MIT_OBLATION: Toggle = Toggle("drk.mit.oblation");
    pub const MIT_REPRISAL: Toggle = Toggle("drk.mit.reprisal");
    pub const MIT_DARK_MISSIONARY: Toggle = Toggle("drk.mit.dark_missionary");
    pub const MIT_RAMPART: Toggle = Toggle("drk.mit.rampart");
    pub const MIT_DARK_MIND: Toggle = Toggle("drk.mit.dark_mind");
    pub const MIT_ARMS_LENGTH: Toggle = Toggle("drk.mit.arms_length");
    pub const MIT_SHADOW_WALL: Toggle = Toggle("drk.mit.shadow_wall");
    pub const MIT_LIVING_DEAD: Toggle = Toggle("drk.mit.living_dead");

    pub const ST_ADV: Toggle = Toggle("drk.st.adv");
    pub const ST_OPENER: Toggle = Toggle("drk.st.adv.opener");
    pub const ST_MITIGATION: Toggle = Toggle("drk.st.adv.mit");
    pub const ST_TBN: Toggle = Toggle("drk.st.adv.mit.tbn");
    pub const ST_CDS: Toggle = Toggle("drk.st.adv.cds");
    pub const ST_DELIRIUM: Toggle = Toggle("drk.st.adv.cds.delirium");
    pub const ST_LIVING_SHADOW: Toggle = Toggle("drk.st.adv.cds.living_shadow");
    pub const ST_SALTED_EARTH: Toggle = Toggle("drk.st.adv.cds.salted_earth");
    pub const ST_CARVE: Toggle = Toggle("drk.st.adv.cds.carve");
    pub const ST_SHADOWBRINGER: Toggle = Toggle("drk.st.adv.cds.shadowbringer");
    pub const ST_EDGE: Toggle = Toggle("drk.st.adv.edge");
    pub const ST_DELIRIUM_CHAIN: Toggle = Toggle("drk.st.adv.delirium_chain");
    pub const ST_DISESTEEM: Toggle = Toggle("drk.st.adv.disesteem");
    pub const ST_BLOODSPILLER: Toggle = Toggle("drk.st.adv.bloodspiller");

    pub const AOE_ADV: Toggle = Toggle("drk.aoe.adv");
    pub const AOE_MITIGATION: Toggle = Toggle("drk.aoe.adv.mit");
    pub const AOE_TBN: Toggle = Toggle("drk.aoe.adv.mit.tbn");
    pub const AOE_CDS: Toggle = Toggle("drk.aoe.adv.cds");
    pub const AOE_DELIRIUM: Toggle = Toggle("drk.aoe.adv.cds.delirium");
    pub const AOE_LIVING_SHADOW: Toggle = Toggle("drk.aoe.adv.cds.living_shadow");
    pub const AOE_SALTED_EARTH: Toggle = Toggle("drk.aoe.adv.cds.salted_earth");
    pub const AOE_SHADOWBRINGER: Toggle = Toggle("drk.aoe.adv.cds.shadowbringer");
    pub const AOE_ABYSSAL_DRAIN: Toggle = Toggle("drk.aoe.adv.abyssal_drain");
    pub const AOE_FLOOD: Toggle = Toggle("drk.aoe.adv.flood");
    pub const AOE_DISESTEEM: Toggle = Toggle("drk.aoe.adv.disesteem");
    pub const AOE_QUIETUS: Toggle = Toggle("drk.aoe.adv.quietus");

    pub const VARIANT_CURE: Toggle = Toggle("drk.variant.cure");
    pub const VARIANT_RAMPART: Toggle = Toggle("drk.variant.rampart");
}

pub mod options {
    use combo_core::OptionKey;

    /// Player HP percent under which the top Living Dead entry fires.
    pub const MIT_LIVING_DEAD_HEALTH: OptionKey = OptionKey("drk.mit.living_dead.health");
    /// Content difficulties (raw [`ContentFlags`](combo_core::ContentFlags) bits) for Living Dead.
    pub const MIT_LIVING_DEAD_CONTENT: OptionKey = OptionKey("drk.mit.living_dead.content");
    /// Oblation charges to keep in reserve.
    pub const MIT_OBLATION_CHARGES: OptionKey = OptionKey("drk.mit.oblation.charges");
    /// [`PartyRequirement`](combo_core::PartyRequirement) for Dark Missionary.
    pub const MIT_DARK_MISSIONARY_PARTY: OptionKey = OptionKey("drk.mit.dark_missionary.party");
    pub const MIT_ARMS_LENGTH_ENEMIES: OptionKey = OptionKey("drk.mit.arms_length.enemies");
    /// [`BossAvoidance`]: `On` limits Arm's Length to boss encounters.
    pub const MIT_ARMS_LENGTH_BOSS: OptionKey = OptionKey("drk.mit.arms_length.boss");

    pub const ST_TBN_THRESHOLD: OptionKey = OptionKey("drk.st.tbn.threshold");
    /// [`BossAvoidance`]: `On` keeps TBN off boss targets.
    pub const ST_TBN_BOSS: OptionKey = OptionKey("drk.st.tbn.boss");
    /// MP kept for The Blackest Night before Edge of Shadow is spent.
    pub const ST_MP_RESERVE: OptionKey = OptionKey("drk.st.mp_reserve");
    pub const ST_OPENER_CONTENT: OptionKey = OptionKey("drk.st.opener.content");
    pub const AOE_ABYSSAL_DRAIN_HP: OptionKey = OptionKey("drk.aoe.abyssal_drain_hp");
    pub const VARIANT_CURE_HP: OptionKey = OptionKey("drk.variant.cure_hp");
}

use actions::*;

pub const FAMILIES: [ActionFamily; 4] = [
    ActionFamily::new("shadowed_vigil", SHADOW_WALL, &[(92, SHADOWED_VIGIL)]),
    ActionFamily::new("delirium", BLOOD_WEAPON, &[(68, DELIRIUM)]),
    ActionFamily::new("edge_of_shadow", EDGE_OF_DARKNESS, &[(74, EDGE_OF_SHADOW)]),
    ActionFamily::new("flood_of_shadow", FLOOD_OF_DARKNESS, &[(74, FLOOD_OF_SHADOW)]),
];

/// MP cost of The Blackest Night, Edge and Flood.
pub const MP_COST: u32 = 3000;

/// Registers every Dark Knight rule set, opener and upgrade family.
pub fn register(builder: &mut RegistryBuilder) {
    for family in FAMILIES {
        builder.tier(family);
    }
    let opener = builder.opener(standard_opener());

    builder
        .register(one_button_mitigation())
        .register(st_rotation(opener))
        .register(aoe_rotation());
}

/// The player carries a Blackest Night shield they cast.
pub fn has_own_tbn(ctx: &ComboContext<'_>) -> bool {
    ctx.has_effect(buffs::BLACKEST_NIGHT_SHIELD)
}

/// The player carries a Blackest Night shield from anyone.
pub fn has_any_tbn(ctx: &ComboContext<'_>) -> bool {
    ctx.has_effect_any(buffs::BLACKEST_NIGHT_SHIELD)
}

/// Whether The Blackest Night should go on the player now.
///
/// Requires the rotation's mitigation and TBN toggles, no own shield, a
/// target, and health at or under the threshold (the single-target option,
/// or 90% for AoE). The single-target rotation can also be kept off bosses.
/// A shield from someone else is enough while Living Shadow is far away.
pub fn should_tbn_self(ctx: &ComboContext<'_>, aoe: bool) -> bool {
    let (mitigation, tbn) = if aoe {
        (toggles::AOE_MITIGATION, toggles::AOE_TBN)
    } else {
        (toggles::ST_MITIGATION, toggles::ST_TBN)
    };
    if !ctx.is_enabled(mitigation) || !ctx.is_enabled(tbn) {
        return false;
    }
    if has_own_tbn(ctx) || ctx.player().is_none() || ctx.current_target().is_none() {
        return false;
    }

    let threshold = if aoe {
        90.0
    } else {
        ctx.float_option(options::ST_TBN_THRESHOLD, 90.0) as f32
    };
    if ctx.player_hp_percent() > threshold {
        return false;
    }

    let avoidance = if aoe {
        BossAvoidance::Off
    } else {
        BossAvoidance::from_option(ctx.option(options::ST_TBN_BOSS))
    };
    if avoidance == BossAvoidance::On && ctx.target_is_boss() {
        return false;
    }

    !(ctx.cooldown_remaining(LIVING_SHADOW) > 30.0 && has_any_tbn(ctx))
}
