//! RepairTier: rebuilds what was destroyed last turn and scraps structures
//! too damaged to be worth keeping.

use crate::engine::Commander;
use crate::tier::*;
use crate::unit::*;

pub struct RepairTier;

impl RepairTier {
    /// A wall we scrapped ourselves comes back as a turret.
    fn replacement(kind: StructureKind, self_removed: bool) -> StructureKind {
        match kind {
            StructureKind::Wall if self_removed => StructureKind::Turret,
            other => other,
        }
    }
}

impl BuildTier for RepairTier {
    fn name(&self) -> &str {
        "repair"
    }

    fn execute(&self, ctx: &TurnContext, commander: &mut Commander) {
        for record in &ctx.events.destroyed {
            let kind = Self::replacement(record.kind, record.self_removed);
            commander.place(kind, record.location);
        }

        let threshold = ctx.strategy.repair_threshold;
        for structure in ctx.board.repair_candidates(ctx.config, threshold) {
            commander.remove(structure.location);
        }
    }
}
