//! Public API for the build planner.
//!
//! The `BuildPlannerBuilder` provides a fluent, append-only API for
//! configuring the tier stack. The resulting `BuildPlanner` runs its tiers in
//! order against one turn, sharing a single `Commander` so that each tier
//! spends from what the previous ones left.

use crate::engine::Commander;
use crate::tier::*;
use crate::tiers::default_tiers;
use fnv::FnvHasher;
use log::*;
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// What one tier did during a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TierSummary {
    pub name: String,
    pub actions: usize,
    pub rejected: u32,
}

/// Append-only builder for the tier stack.
pub struct BuildPlannerBuilder {
    tiers: Vec<Box<dyn BuildTier>>,
}

impl BuildPlannerBuilder {
    /// Start with an empty tier stack.
    pub fn new() -> Self {
        BuildPlannerBuilder { tiers: Vec::new() }
    }

    /// Append a tier to the end of the stack.
    pub fn add_tier(mut self, tier: Box<dyn BuildTier>) -> Self {
        self.tiers.push(tier);
        self
    }

    pub fn build(self) -> BuildPlanner {
        BuildPlanner { tiers: self.tiers }
    }
}

impl Default for BuildPlannerBuilder {
    /// Returns a builder pre-loaded with the reference six-tier stack.
    fn default() -> Self {
        default_tiers()
            .into_iter()
            .fold(BuildPlannerBuilder::new(), BuildPlannerBuilder::add_tier)
    }
}

pub struct BuildPlanner {
    tiers: Vec<Box<dyn BuildTier>>,
}

impl Default for BuildPlanner {
    fn default() -> Self {
        BuildPlannerBuilder::default().build()
    }
}

impl BuildPlanner {
    pub fn tier_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tiers.iter().map(|tier| tier.name())
    }

    /// Hash of the tier names in order, for telling stacks apart in logs.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FnvHasher::default();
        for name in self.tier_names() {
            name.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Run every applicable tier in order. Inapplicable tiers are skipped and
    /// left out of the summary.
    pub fn run(&self, ctx: &TurnContext, commander: &mut Commander) -> Vec<TierSummary> {
        let mut summaries = Vec::new();

        for tier in &self.tiers {
            if !tier.is_applicable(ctx) {
                trace!("Tier {} not applicable on turn {}", tier.name(), ctx.turn);
                continue;
            }

            let actions_before = commander.actions().len();
            let rejected_before = commander.rejected();

            tier.execute(ctx, commander);

            let summary = TierSummary {
                name: tier.name().to_string(),
                actions: commander.actions().len() - actions_before,
                rejected: commander.rejected() - rejected_before,
            };
            debug!(
                "Tier {}: {} actions, {} rejected",
                summary.name, summary.actions, summary.rejected
            );
            summaries.push(summary);
        }

        summaries
    }
}
