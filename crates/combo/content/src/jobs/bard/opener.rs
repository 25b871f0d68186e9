use combo_core::{ComboContext, Job, OpenerScript};

use super::actions::*;

/// Level 100 standard opener.
///
/// Pitch Perfect and Heartbreak Shot are woven between the scripted GCDs
/// when repertoire and charges allow, so they are interjections rather than
/// steps.
pub fn standard_opener() -> OpenerScript {
    OpenerScript::new(
        "brd.standard",
        Job::Bard,
        &[
            STORMBITE,
            WANDERERS_MINUET,
            EMPYREAL_ARROW,
            CAUSTIC_BITE,
            BATTLE_VOICE,
            BURST_SHOT,
            RADIANT_FINALE,
            RAGING_STRIKES,
            BURST_SHOT,
            RADIANT_ENCORE,
            BARRAGE,
            REFULGENT_ARROW,
            SIDEWINDER,
            RESONANT_ARROW,
            EMPYREAL_ARROW,
            BURST_SHOT,
            BURST_SHOT,
            IRON_JAWS,
            BURST_SHOT,
        ],
    )
    .levels(100, 109)
    .precondition(has_cooldowns)
    .interjections(&[PITCH_PERFECT, HEARTBREAK_SHOT])
}

fn has_cooldowns(ctx: &ComboContext<'_>) -> bool {
    [
        WANDERERS_MINUET,
        BATTLE_VOICE,
        RADIANT_FINALE,
        RAGING_STRIKES,
        BARRAGE,
        EMPYREAL_ARROW,
        SIDEWINDER,
    ]
    .into_iter()
    .all(|action| ctx.action_ready(action))
}
