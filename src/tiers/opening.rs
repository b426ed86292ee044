//! OpeningTier: lays down the turn-zero first line of defence.

use crate::engine::Commander;
use crate::tier::*;
use log::*;

/// Places the opening turret slice, then the opening wall slice.
/// Applies to turn zero only.
pub struct OpeningTier;

impl BuildTier for OpeningTier {
    fn name(&self) -> &str {
        "opening"
    }

    fn is_applicable(&self, ctx: &TurnContext) -> bool {
        ctx.is_opening()
    }

    fn execute(&self, ctx: &TurnContext, commander: &mut Commander) {
        for batch in ctx.strategy.layout.opening_batches() {
            let placed = commander.place_all(batch.kind, batch.locations);
            trace!(
                "Opening placed {}/{} {:?}",
                placed,
                batch.locations.len(),
                batch.kind
            );
        }
    }
}
