//! Scholar healing buttons.

mod heal;

pub use heal::{SingleTargetHeal, aoe_heal, aoe_heal_priority};

use combo_core::RegistryBuilder;

pub mod actions {
    use combo_core::ActionId;

    pub const ADLOQUIUM: ActionId = ActionId(185);
    pub const SUCCOR: ActionId = ActionId(186);
    pub const LUSTRATE: ActionId = ActionId(189);
    pub const PHYSICK: ActionId = ActionId(190);
    pub const INDOMITABILITY: ActionId = ActionId(3583);
    pub const EXCOGITATION: ActionId = ActionId(7434);
    pub const AETHERPACT: ActionId = ActionId(7437);
    pub const DISSOLVE_UNION: ActionId = ActionId(7869);
    pub const WHISPERING_DAWN: ActionId = ActionId(16537);
    pub const FEY_ILLUMINATION: ActionId = ActionId(16538);
    pub const FEY_BLESSING: ActionId = ActionId(16543);
    pub const CONSOLATION: ActionId = ActionId(16546);
    pub const ANGELS_WHISPER: ActionId = ActionId(16550);
    pub const SERAPHIC_ILLUMINATION: ActionId = ActionId(16551);
    pub const PROTRACTION: ActionId = ActionId(25867);
    pub const SERAPHISM: ActionId = ActionId(37014);
}

pub mod buffs {
    use combo_core::StatusId;

    pub const EXCOGITATION: StatusId = StatusId(1220);
    pub const FEY_UNION: StatusId = StatusId(1222);
    pub const RECITATION: StatusId = StatusId(1896);
    pub const PROTRACTION: StatusId = StatusId(2710);
}

pub mod toggles {
    use combo_core::Toggle;

    pub const ST_HEAL: Toggle = Toggle("sch.st.heal");
    pub const ST_HEAL_LUSTRATE: Toggle = Toggle("sch.st.heal.lustrate");
    pub const ST_HEAL_EXCOGITATION: Toggle = Toggle("sch.st.heal.excogitation");
    pub const ST_HEAL_PROTRACTION: Toggle = Toggle("sch.st.heal.protraction");
    pub const ST_HEAL_AETHERPACT: Toggle = Toggle("sch.st.heal.aetherpact");

    pub const AOE_HEAL: Toggle = Toggle("sch.aoe.heal");
    pub const AOE_HEAL_WHISPERING_DAWN: Toggle = Toggle("sch.aoe.heal.whispering_dawn");
    pub const AOE_HEAL_FEY_ILLUMINATION: Toggle = Toggle("sch.aoe.heal.fey_illumination");
    pub const AOE_HEAL_FEY_BLESSING: Toggle = Toggle("sch.aoe.heal.fey_blessing");
    pub const AOE_HEAL_CONSOLATION: Toggle = Toggle("sch.aoe.heal.consolation");
    pub const AOE_HEAL_SERAPHISM: Toggle = Toggle("sch.aoe.heal.seraphism");
    pub const AOE_HEAL_INDOMITABILITY: Toggle = Toggle("sch.aoe.heal.indomitability");
}

pub mod options {
    use combo_core::OptionKey;

    // Lower priority numbers are tried first.
    pub const LUSTRATE_PRIORITY: OptionKey = OptionKey("sch.st.heal.lustrate.priority");
    pub const EXCOGITATION_PRIORITY: OptionKey = OptionKey("sch.st.heal.excogitation.priority");
    pub const PROTRACTION_PRIORITY: OptionKey = OptionKey("sch.st.heal.protraction.priority");
    pub const AETHERPACT_PRIORITY: OptionKey = OptionKey("sch.st.heal.aetherpact.priority");

    // Heal target HP percent at or under which each entry may fire.
    pub const LUSTRATE_HP: OptionKey = OptionKey("sch.st.heal.lustrate.hp");
    pub const EXCOGITATION_HP: OptionKey = OptionKey("sch.st.heal.excogitation.hp");
    pub const PROTRACTION_HP: OptionKey = OptionKey("sch.st.heal.protraction.hp");
    pub const AETHERPACT_HP: OptionKey = OptionKey("sch.st.heal.aetherpact.hp");

    /// Minimum fairy gauge before Aetherpact is offered.
    pub const AETHERPACT_FAIRY_GAUGE: OptionKey = OptionKey("sch.st.heal.aetherpact.gauge");
}

/// Registers both Scholar heal buttons.
pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(SingleTargetHeal::new())
        .register(aoe_heal());
}
