pub const BOARD_SIZE: u8 = 28;
pub const HALF_BOARD: u8 = 14;

/// Owner id used by the frame log for this bot.
pub const OWNER_SELF: u8 = 1;

/// Health ratio at or below which walls and turrets are scrapped for rebuild.
pub const REPAIR_THRESHOLD: f64 = 0.3;

/// Structure points above which leftover budget is spent on a wall swap.
pub const SURPLUS_THRESHOLD: f64 = 10.0;

/// Reactive interceptors are only deployed after this turn.
pub const INTERCEPTOR_AFTER_TURN: u32 = 28;

/// Cells between a breach and the reactive turret built for it.
pub const REACTIVE_OFFSET: u8 = 2;

/// Number of highest-importance supports upgraded ahead of walls.
pub const PRIORITY_SUPPORT_UPGRADES: usize = 2;

/// Mobile units requested per offensive spawn. The engine caps this by budget.
pub const OFFENSE_SPAWN_COUNT: u32 = 1000;

/// Path risk below which the cheap fast unit is sent.
pub const OFFENSE_RISK_THRESHOLD: f64 = 20.0;

/// Structure points below which turret reinforcement stops.
pub const REINFORCE_MIN_BUDGET: f64 = 2.0;

/// Opponent mobile points at which the side-steered strategy stages an interceptor.
pub const STEERED_INTERCEPTOR_MIN_MP: f64 = 14.0;

/// Hardest-hitting turrets the side-steered strategy reinforces every turn.
pub const STEERED_REINFORCED_TURRETS: usize = 5;

/// Returns true if the coordinate lies inside the diamond-shaped arena.
pub fn in_arena(x: i16, y: i16) -> bool {
    let half = HALF_BOARD as i16;
    if !(0..BOARD_SIZE as i16).contains(&x) || !(0..BOARD_SIZE as i16).contains(&y) {
        return false;
    }
    let row = if y < half { y } else { BOARD_SIZE as i16 - 1 - y };
    x >= half - 1 - row && x <= half + row
}

/// Returns true if the coordinate lies on this bot's (bottom) half of the arena.
pub fn in_own_half(x: i16, y: i16) -> bool {
    in_arena(x, y) && y < HALF_BOARD as i16
}
