//! UpgradeTier: spends structure points on upgrades, most useful structures
//! first, as measured by last turn's importance tallies.

use crate::engine::Commander;
use crate::location::*;
use crate::tier::*;
use log::*;

pub struct UpgradeTier;

impl UpgradeTier {
    /// Upgrade order: the leading supports, every wall, the rest of the
    /// supports, then every turret. Each group is ranked by importance.
    pub fn upgrade_order(ctx: &TurnContext) -> Vec<Location> {
        let supports = ctx.events.support_shielding.ranked();
        let split = ctx.strategy.priority_support_upgrades.min(supports.len());
        let (leading, rest) = supports.split_at(split);

        leading
            .iter()
            .copied()
            .chain(ctx.events.wall_damage.ranked())
            .chain(rest.iter().copied())
            .chain(ctx.events.turret_damage.ranked())
            .collect()
    }
}

impl BuildTier for UpgradeTier {
    fn name(&self) -> &str {
        "upgrade"
    }

    fn execute(&self, ctx: &TurnContext, commander: &mut Commander) {
        for location in Self::upgrade_order(ctx) {
            if ctx.board.at(location).map_or(false, |s| s.upgraded) {
                trace!("Skipping upgrade at {:?}, already upgraded", location);
                continue;
            }
            commander.upgrade(location);
        }
    }
}
