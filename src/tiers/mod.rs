pub mod opening;
pub mod repair;
pub mod reactive;
pub mod ideal;
pub mod upgrade;
pub mod surplus;

pub use opening::OpeningTier;
pub use repair::RepairTier;
pub use reactive::{reactive_build_location, ReactiveTier};
pub use ideal::IdealLayoutTier;
pub use upgrade::UpgradeTier;
pub use surplus::SurplusTier;

use crate::tier::BuildTier;

/// The reference build order, first tier first.
pub fn default_tiers() -> Vec<Box<dyn BuildTier>> {
    vec![
        Box::new(OpeningTier),
        Box::new(RepairTier),
        Box::new(ReactiveTier),
        Box::new(IdealLayoutTier),
        Box::new(UpgradeTier),
        Box::new(SurplusTier),
    ]
}
