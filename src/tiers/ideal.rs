//! IdealLayoutTier: fills in the steady-state layout. Cells that are already
//! built reject the placement, so a finished layout costs nothing.
//!
//! Layouts with per-side turret lists build on the side of last turn's
//! hardest-hitting turret, or the left side when no turret fired.

use crate::engine::Commander;
use crate::location::Side;
use crate::tier::*;
use log::*;

pub struct IdealLayoutTier;

impl BuildTier for IdealLayoutTier {
    fn name(&self) -> &str {
        "ideal"
    }

    fn execute(&self, ctx: &TurnContext, commander: &mut Commander) {
        let side = ctx.top_turret().map_or(Side::Left, |turret| turret.side());
        for batch in ctx.strategy.layout.ideal_batches(side) {
            let missing: Vec<_> = batch
                .locations
                .iter()
                .copied()
                .filter(|&location| !commander.engine().is_occupied(location))
                .collect();
            if missing.is_empty() {
                continue;
            }
            let placed = commander.place_all(batch.kind, &missing);
            trace!("Ideal layout placed {}/{} {:?}", placed, missing.len(), batch.kind);
        }
    }
}
