//! Role and variant actions shared across jobs.

use combo_core::{ActionId, ComboContext, Toggle, WeaveTiming};

pub const RAMPART: ActionId = ActionId(7531);
pub const REPRISAL: ActionId = ActionId(7535);
pub const SECOND_WIND: ActionId = ActionId(7541);
pub const ARMS_LENGTH: ActionId = ActionId(7548);
pub const HEAD_GRAZE: ActionId = ActionId(7551);

pub const VARIANT_CURE: ActionId = ActionId(29729);
pub const VARIANT_RAMPART: ActionId = ActionId(29733);

pub fn can_second_wind(ctx: &ComboContext<'_>, hp_threshold: f32) -> bool {
    ctx.action_ready(SECOND_WIND) && ctx.player_hp_percent() <= hp_threshold
}

/// Head Graze is only worth pressing on an interruptible cast.
pub fn can_head_graze(ctx: &ComboContext<'_>, toggle: Option<Toggle>) -> bool {
    toggle.is_none_or(|t| ctx.is_enabled(t))
        && ctx.action_ready(HEAD_GRAZE)
        && ctx.target_can_be_interrupted()
}

pub fn can_variant_cure(ctx: &ComboContext<'_>, toggle: Toggle, hp_threshold: f32) -> bool {
    ctx.is_enabled(toggle)
        && ctx.action_ready(VARIANT_CURE)
        && ctx.player_hp_percent() <= hp_threshold
}

pub fn can_variant_rampart(ctx: &ComboContext<'_>, toggle: Toggle, timing: WeaveTiming) -> bool {
    ctx.is_enabled(toggle) && ctx.action_ready(VARIANT_RAMPART) && ctx.can_weave(timing)
}
