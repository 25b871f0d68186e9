//! Bard.
//!
//! Single-button features (Straight Shot upgrade, Iron Jaws, oGCD and song
//! buttons) are flat [`Cascade`](combo_core::Cascade) tables in
//! [`features`]. The advanced and simple rotations share one hand-written
//! rule set, [`BardRotation`], parameterised by [`Mode`] and [`Scope`].

mod features;
mod opener;
mod rotation;
mod view;

pub use opener::standard_opener;
pub use rotation::{BardRotation, Mode, Scope};

use combo_core::{ActionFamily, RegistryBuilder};

pub mod actions {
    use combo_core::ActionId;

    pub const HEAVY_SHOT: ActionId = ActionId(97);
    pub const STRAIGHT_SHOT: ActionId = ActionId(98);
    pub const VENOMOUS_BITE: ActionId = ActionId(100);
    pub const RAGING_STRIKES: ActionId = ActionId(101);
    pub const QUICK_NOCK: ActionId = ActionId(106);
    pub const BARRAGE: ActionId = ActionId(107);
    pub const BLOODLETTER: ActionId = ActionId(110);
    pub const WINDBITE: ActionId = ActionId(113);
    pub const MAGES_BALLAD: ActionId = ActionId(114);
    pub const ARMYS_PAEON: ActionId = ActionId(116);
    pub const RAIN_OF_DEATH: ActionId = ActionId(117);
    pub const BATTLE_VOICE: ActionId = ActionId(118);
    pub const EMPYREAL_ARROW: ActionId = ActionId(3558);
    pub const WANDERERS_MINUET: ActionId = ActionId(3559);
    pub const IRON_JAWS: ActionId = ActionId(3560);
    pub const WARDENS_PAEAN: ActionId = ActionId(3561);
    pub const SIDEWINDER: ActionId = ActionId(3562);
    pub const PITCH_PERFECT: ActionId = ActionId(7404);
    pub const CAUSTIC_BITE: ActionId = ActionId(7406);
    pub const STORMBITE: ActionId = ActionId(7407);
    pub const REFULGENT_ARROW: ActionId = ActionId(7409);
    pub const SHADOWBITE: ActionId = ActionId(16494);
    pub const BURST_SHOT: ActionId = ActionId(16495);
    pub const APEX_ARROW: ActionId = ActionId(16496);
    pub const LADONSBITE: ActionId = ActionId(25783);
    pub const BLAST_ARROW: ActionId = ActionId(25784);
    pub const RADIANT_FINALE: ActionId = ActionId(25785);
    pub const WIDE_VOLLEY: ActionId = ActionId(36974);
    pub const HEARTBREAK_SHOT: ActionId = ActionId(36975);
    pub const RESONANT_ARROW: ActionId = ActionId(36976);
    pub const RADIANT_ENCORE: ActionId = ActionId(36977);
}

pub mod buffs {
    use combo_core::StatusId;

    pub const RAGING_STRIKES: StatusId = StatusId(125);
    pub const BARRAGE: StatusId = StatusId(128);
    pub const BATTLE_VOICE: StatusId = StatusId(141);
    pub const BLAST_ARROW_READY: StatusId = StatusId(2692);
    pub const RADIANT_FINALE: StatusId = StatusId(2964);
    pub const HAWKS_EYE: StatusId = StatusId(3861);
    pub const RESONANT_ARROW_READY: StatusId = StatusId(3862);
    pub const RADIANT_ENCORE_READY: StatusId = StatusId(3863);
}

pub mod debuffs {
    use combo_core::StatusId;

    pub const VENOMOUS_BITE: StatusId = StatusId(124);
    pub const WINDBITE: StatusId = StatusId(129);
    pub const CAUSTIC_BITE: StatusId = StatusId(1200);
    pub const STORMBITE: StatusId = StatusId(1201);
}

pub mod toggles {
    use combo_core::Toggle;

    pub const STRAIGHT_SHOT_UPGRADE: Toggle = Toggle("brd.straight_shot_upgrade");
    pub const STRAIGHT_SHOT_DOTS: Toggle = Toggle("brd.straight_shot_upgrade.dots");
    pub const STRAIGHT_SHOT_APEX: Toggle = Toggle("brd.straight_shot_upgrade.apex");
    pub const IRON_JAWS: Toggle = Toggle("brd.iron_jaws");
    pub const IRON_JAWS_APEX: Toggle = Toggle("brd.iron_jaws.apex");
    pub const IRON_JAWS_ALTERNATE: Toggle = Toggle("brd.iron_jaws_alternate");
    pub const ST_OGCD: Toggle = Toggle("brd.st_ogcd");
    pub const ST_OGCD_SONGS: Toggle = Toggle("brd.st_ogcd.songs");
    pub const AOE_OGCD: Toggle = Toggle("brd.aoe_ogcd");
    pub const AOE_OGCD_SONGS: Toggle = Toggle("brd.aoe_ogcd.songs");
    pub const AOE_COMBO: Toggle = Toggle("brd.aoe_combo");
    pub const AOE_COMBO_APEX: Toggle = Toggle("brd.aoe_combo.apex");
    pub const BUFFS: Toggle = Toggle("brd.buffs");
    pub const ONE_BUTTON_SONGS: Toggle = Toggle("brd.one_button_songs");

    pub const ST_ADV: Toggle = Toggle("brd.st.adv");
    pub const ST_ADV_OPENER: Toggle = Toggle("brd.st.adv.opener");
    pub const ST_ADV_SONGS: Toggle = Toggle("brd.st.adv.songs");
    pub const ST_ADV_BUFFS: Toggle = Toggle("brd.st.adv.buffs");
    pub const ST_ADV_RAGING: Toggle = Toggle("brd.st.adv.buffs.raging");
    pub const ST_ADV_BATTLE_VOICE: Toggle = Toggle("brd.st.adv.buffs.battle_voice");
    pub const ST_ADV_BARRAGE: Toggle = Toggle("brd.st.adv.buffs.barrage");
    pub const ST_ADV_RADIANT: Toggle = Toggle("brd.st.adv.buffs.radiant");
    pub const ST_ADV_OGCD: Toggle = Toggle("brd.st.adv.ogcd");
    pub const ST_ADV_POOLING: Toggle = Toggle("brd.st.adv.pooling");
    pub const ST_ADV_INTERRUPT: Toggle = Toggle("brd.st.adv.interrupt");
    pub const ST_ADV_DOTS: Toggle = Toggle("brd.st.adv.dots");
    pub const ST_ADV_RAGING_JAWS: Toggle = Toggle("brd.st.adv.dots.raging_jaws");
    pub const ST_ADV_APEX: Toggle = Toggle("brd.st.adv.apex");
    pub const ST_ADV_APEX_POOLING: Toggle = Toggle("brd.st.adv.apex.pooling");
    pub const ST_ADV_NO_WASTE: Toggle = Toggle("brd.st.adv.no_waste");

    pub const AOE_ADV: Toggle = Toggle("brd.aoe.adv");
    pub const AOE_ADV_SONGS: Toggle = Toggle("brd.aoe.adv.songs");
    pub const AOE_ADV_BUFFS: Toggle = Toggle("brd.aoe.adv.buffs");
    pub const AOE_ADV_RAGING: Toggle = Toggle("brd.aoe.adv.buffs.raging");
    pub const AOE_ADV_BATTLE_VOICE: Toggle = Toggle("brd.aoe.adv.buffs.battle_voice");
    pub const AOE_ADV_BARRAGE: Toggle = Toggle("brd.aoe.adv.buffs.barrage");
    pub const AOE_ADV_RADIANT: Toggle = Toggle("brd.aoe.adv.buffs.radiant");
    pub const AOE_ADV_OGCD: Toggle = Toggle("brd.aoe.adv.ogcd");
    pub const AOE_ADV_POOLING: Toggle = Toggle("brd.aoe.adv.pooling");
    pub const AOE_ADV_INTERRUPT: Toggle = Toggle("brd.aoe.adv.interrupt");
    pub const AOE_ADV_APEX: Toggle = Toggle("brd.aoe.adv.apex");
    pub const AOE_ADV_APEX_POOLING: Toggle = Toggle("brd.aoe.adv.apex.pooling");
    pub const AOE_ADV_NO_WASTE: Toggle = Toggle("brd.aoe.adv.no_waste");

    // Shared by both advanced modes.
    pub const ADV_ENCORE: Toggle = Toggle("brd.adv.encore");
    pub const ADV_RESONANT: Toggle = Toggle("brd.adv.resonant");
    pub const SECOND_WIND: Toggle = Toggle("brd.second_wind");
    pub const WARDENS: Toggle = Toggle("brd.wardens");

    pub const ST_SIMPLE: Toggle = Toggle("brd.st.simple");
    pub const AOE_SIMPLE: Toggle = Toggle("brd.aoe.simple");

    pub const VARIANT_CURE: Toggle = Toggle("brd.variant.cure");
    pub const VARIANT_RAMPART: Toggle = Toggle("brd.variant.rampart");
}

pub mod options {
    use combo_core::OptionKey;

    /// Target HP percent below which buffs, songs and DoTs are skipped.
    pub const ST_NO_WASTE_HP: OptionKey = OptionKey("brd.st.no_waste_hp");
    pub const AOE_NO_WASTE_HP: OptionKey = OptionKey("brd.aoe.no_waste_hp");
    /// Seconds of Raging Strikes left when Iron Jaws snapshots the buffs.
    pub const RAGING_JAWS_RENEW: OptionKey = OptionKey("brd.raging_jaws_renew");
    pub const SECOND_WIND_HP: OptionKey = OptionKey("brd.second_wind_hp");
    pub const VARIANT_CURE_HP: OptionKey = OptionKey("brd.variant.cure_hp");
}

use actions::*;

pub const FAMILIES: [ActionFamily; 7] = [
    ActionFamily::new("burst_shot", HEAVY_SHOT, &[(76, BURST_SHOT)]),
    ActionFamily::new("refulgent_arrow", STRAIGHT_SHOT, &[(70, REFULGENT_ARROW)]),
    ActionFamily::new("caustic_bite", VENOMOUS_BITE, &[(64, CAUSTIC_BITE)]),
    ActionFamily::new("stormbite", WINDBITE, &[(64, STORMBITE)]),
    ActionFamily::new("ladonsbite", QUICK_NOCK, &[(82, LADONSBITE)]),
    ActionFamily::new("shadowbite", WIDE_VOLLEY, &[(72, SHADOWBITE)]),
    ActionFamily::new("heartbreak_shot", BLOODLETTER, &[(92, HEARTBREAK_SHOT)]),
];

/// Registers every Bard rule set, opener and upgrade family.
pub fn register(builder: &mut RegistryBuilder) {
    for family in FAMILIES {
        builder.tier(family);
    }
    let opener = builder.opener(standard_opener());

    builder
        .register(BardRotation::new(Mode::Advanced, Scope::Single).with_opener(opener))
        .register(BardRotation::new(Mode::Advanced, Scope::Aoe))
        .register(BardRotation::new(Mode::Simple, Scope::Single))
        .register(BardRotation::new(Mode::Simple, Scope::Aoe));
    for feature in features::all() {
        builder.register(feature);
    }
}
