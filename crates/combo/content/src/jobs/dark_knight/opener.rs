use combo_core::{ComboContext, Job, OpenerScript};

use super::actions::*;
use super::options;

/// Level 100 opener.
///
/// The Blackest Night may be popped on a tank buster at any point without
/// breaking the sequence.
pub fn standard_opener() -> OpenerScript {
    OpenerScript::new(
        "drk.standard",
        Job::DarkKnight,
        &[
            HARD_SLASH,
            EDGE_OF_SHADOW,
            LIVING_SHADOW,
            SYPHON_STRIKE,
            SOULEATER,
            DELIRIUM,
            DISESTEEM,
            SALTED_EARTH,
            SCARLET_DELIRIUM,
            SHADOWBRINGER,
            EDGE_OF_SHADOW,
            COMEUPPANCE,
            CARVE_AND_SPIT,
            EDGE_OF_SHADOW,
            TORCLEAVER,
            SHADOWBRINGER,
            EDGE_OF_SHADOW,
            BLOODSPILLER,
            SALT_AND_DARKNESS,
        ],
    )
    .levels(100, 109)
    .precondition(has_cooldowns)
    .interjections(&[BLACKEST_NIGHT])
}

fn has_cooldowns(ctx: &ComboContext<'_>) -> bool {
    ctx.in_configured_content(options::ST_OPENER_CONTENT)
        && ctx.player_mp() >= 7000
        && ctx.action_ready(LIVING_SHADOW)
        && ctx.action_ready(DELIRIUM)
        && ctx.action_ready(CARVE_AND_SPIT)
        && ctx.action_ready(SALTED_EARTH)
        && ctx.remaining_charges(SHADOWBRINGER) >= 2
}
