//! Static game configuration and strategy tuning.
//!
//! [`GameConfig`] mirrors the engine's `unitInformation` table: health,
//! costs and damage per unit type. [`StrategyConfig`] holds every threshold
//! and policy the planners read, together with the placement layout. Its
//! `Default` is the reference strategy; JSON overrides may be partial.

use crate::constants::*;
use crate::engine::Resource;
use crate::error::*;
use crate::layout::PlacementPlan;
use crate::location::*;
use crate::unit::*;
use serde::{Deserialize, Serialize};

/// Number of unit types every config must describe (3 structures, 3 mobile).
const UNIT_TYPE_COUNT: usize = 6;

/// Stats granted by upgrading a structure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeInformation {
    pub start_health: Option<f64>,
    pub cost1: Option<f64>,
    pub attack_damage_walker: Option<f64>,
}

/// One entry of the engine's `unitInformation` table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitInformation {
    #[serde(default)]
    pub shorthand: String,
    pub start_health: Option<f64>,
    /// Structure point cost.
    pub cost1: Option<f64>,
    /// Mobile point cost.
    pub cost2: Option<f64>,
    /// Damage dealt per hit to mobile units.
    pub attack_damage_walker: Option<f64>,
    pub attack_range: Option<f64>,
    pub upgrade: Option<UpgradeInformation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGameConfig {
    #[serde(default)]
    unit_information: Vec<UnitInformation>,
}

/// Validated unit table. Always describes all six unit types.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    units: Vec<UnitInformation>,
}

impl GameConfig {
    pub fn new(units: Vec<UnitInformation>) -> Result<Self> {
        if units.len() < UNIT_TYPE_COUNT {
            return Err(Error::MissingUnit(units.len()));
        }
        Ok(GameConfig { units })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawGameConfig = serde_json::from_str(json)?;
        GameConfig::new(raw.unit_information)
    }

    pub fn unit(&self, kind: UnitKind) -> &UnitInformation {
        &self.units[kind.index()]
    }

    pub fn shorthand(&self, kind: UnitKind) -> &str {
        &self.unit(kind).shorthand
    }

    /// Full health of a structure. Upgraded structures use the upgrade's
    /// health when the config provides one.
    pub fn max_health(&self, kind: StructureKind, upgraded: bool) -> f64 {
        let info = self.unit(kind.into());
        let base = info.start_health.unwrap_or(0.0);
        if upgraded {
            info.upgrade
                .as_ref()
                .and_then(|u| u.start_health)
                .unwrap_or(base)
        } else {
            base
        }
    }

    /// Which currency a unit is paid in, and how much of it.
    pub fn cost(&self, kind: UnitKind) -> (Resource, f64) {
        let info = self.unit(kind);
        match kind {
            UnitKind::Structure(_) => (Resource::StructurePoints, info.cost1.unwrap_or(0.0)),
            UnitKind::Mobile(_) => (Resource::MobilePoints, info.cost2.unwrap_or(0.0)),
        }
    }

    pub fn upgrade_cost(&self, kind: StructureKind) -> f64 {
        let info = self.unit(kind.into());
        info.upgrade
            .as_ref()
            .and_then(|u| u.cost1)
            .or(info.cost1)
            .unwrap_or(0.0)
    }

    /// Per-hit damage of a basic turret against mobile units.
    pub fn turret_damage(&self) -> f64 {
        self.unit(StructureKind::Turret.into())
            .attack_damage_walker
            .unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Strategy tuning
// ---------------------------------------------------------------------------

/// When the offense planner launches mobile units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TriggerPolicy {
    /// Fire on turns where `turn % modulus == remainder`.
    Parity { modulus: u32, remainder: u32 },
    /// Fire once `min_cooldown` turns have passed and the opponent is low on
    /// mobile points, or unconditionally once `max_cooldown` turns have passed.
    Hysteresis {
        min_cooldown: u32,
        max_cooldown: u32,
        opponent_mp_below: f64,
    },
}

impl Default for TriggerPolicy {
    fn default() -> Self {
        TriggerPolicy::Parity {
            modulus: 2,
            remainder: 1,
        }
    }
}

/// Which mobile unit to send once a launch location is picked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UnitSelection {
    Fixed { kind: MobileKind },
    /// Cheap fast units when the path risk is below `threshold`, tougher ones otherwise.
    ByRisk {
        threshold: f64,
        low_risk: MobileKind,
        high_risk: MobileKind,
    },
}

impl Default for UnitSelection {
    fn default() -> Self {
        UnitSelection::Fixed {
            kind: MobileKind::Scout,
        }
    }
}

impl UnitSelection {
    pub fn by_risk() -> Self {
        UnitSelection::ByRisk {
            threshold: OFFENSE_RISK_THRESHOLD,
            low_risk: MobileKind::Scout,
            high_risk: MobileKind::Demolisher,
        }
    }

    pub fn choose(&self, risk: f64) -> MobileKind {
        match *self {
            UnitSelection::Fixed { kind } => kind,
            UnitSelection::ByRisk {
                threshold,
                low_risk,
                high_risk,
            } => {
                if risk < threshold {
                    low_risk
                } else {
                    high_risk
                }
            }
        }
    }
}

/// What to do with structure points left over after upgrades.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurplusPolicy {
    /// Scrap the weakest wall so next turn's repair tier rebuilds it as a turret.
    #[default]
    WallSwap,
    /// Build turrets next to the hardest-hitting turrets.
    ReinforceTurrets,
}

/// When the reactive tier stages interceptors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InterceptorPolicy {
    /// One interceptor per recorded breach, staged opposite the breach side.
    #[default]
    AfterTurn,
    /// One interceptor per turn while the opponent holds at least
    /// `min_opponent_mp`, staged on the side of our hardest-hitting turret.
    OpponentMp { min_opponent_mp: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactiveConfig {
    /// Cells inward from the breach edge to build the reactive turret.
    pub offset: u8,
    /// Breach locations that are built on directly, with no offset.
    pub exceptions: Vec<Location>,
    /// Interceptors are only staged after this turn.
    pub interceptor_after_turn: u32,
    pub interceptors: InterceptorPolicy,
    /// Interceptor staging cell for a threat on the left side.
    pub left_staging: Location,
    /// Interceptor staging cell for a threat on the right side.
    pub right_staging: Location,
    /// Upgrade whatever occupies the reactive build cell when placement fails.
    pub upgrade_when_blocked: bool,
    /// Crowd turrets around this many of last turn's hardest-hitting turrets
    /// before answering breaches. The surplus tier skips these.
    pub reinforce_top_turrets: usize,
}

impl Default for ReactiveConfig {
    fn default() -> Self {
        ReactiveConfig {
            offset: REACTIVE_OFFSET,
            exceptions: vec![Location::at(2, 11), Location::at(25, 11)],
            interceptor_after_turn: INTERCEPTOR_AFTER_TURN,
            interceptors: InterceptorPolicy::default(),
            left_staging: Location::at(16, 2),
            right_staging: Location::at(11, 2),
            upgrade_when_blocked: false,
            reinforce_top_turrets: 0,
        }
    }
}

impl ReactiveConfig {
    pub fn staging(&self, breach_side: Side) -> Location {
        match breach_side {
            Side::Left => self.left_staging,
            Side::Right => self.right_staging,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffenseConfig {
    /// Launch locations compared by path risk, in tie-break order.
    pub candidates: Vec<Location>,
    pub trigger: TriggerPolicy,
    pub units: UnitSelection,
    pub spawn_count: u32,
}

impl Default for OffenseConfig {
    fn default() -> Self {
        OffenseConfig {
            candidates: vec![Location::at(13, 0), Location::at(14, 0)],
            trigger: TriggerPolicy::default(),
            units: UnitSelection::default(),
            spawn_count: OFFENSE_SPAWN_COUNT,
        }
    }
}

/// Every tunable the build and offense planners read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub layout: PlacementPlan,
    pub repair_threshold: f64,
    pub surplus_threshold: f64,
    pub surplus: SurplusPolicy,
    pub priority_support_upgrades: usize,
    pub reactive: ReactiveConfig,
    pub offense: OffenseConfig,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig {
            layout: PlacementPlan::default(),
            repair_threshold: REPAIR_THRESHOLD,
            surplus_threshold: SURPLUS_THRESHOLD,
            surplus: SurplusPolicy::default(),
            priority_support_upgrades: PRIORITY_SUPPORT_UPGRADES,
            reactive: ReactiveConfig::default(),
            offense: OffenseConfig::default(),
        }
    }
}

impl StrategyConfig {
    /// The side-steered strategy: per-side turret layout, reactive turret
    /// reinforcement, interceptors when the opponent banks mobile points,
    /// and cooldown-driven launches that escalate to demolishers on risky
    /// paths.
    pub fn side_steered() -> Self {
        StrategyConfig {
            layout: PlacementPlan::side_steered(),
            surplus: SurplusPolicy::ReinforceTurrets,
            reactive: ReactiveConfig {
                offset: 3,
                exceptions: Vec::new(),
                interceptors: InterceptorPolicy::OpponentMp {
                    min_opponent_mp: STEERED_INTERCEPTOR_MIN_MP,
                },
                left_staging: Location::at(7, 6),
                right_staging: Location::at(20, 6),
                upgrade_when_blocked: true,
                reinforce_top_turrets: STEERED_REINFORCED_TURRETS,
                ..ReactiveConfig::default()
            },
            offense: OffenseConfig {
                trigger: TriggerPolicy::Hysteresis {
                    min_cooldown: 3,
                    max_cooldown: 4,
                    opponent_mp_below: 10.0,
                },
                units: UnitSelection::by_risk(),
                ..OffenseConfig::default()
            },
            ..StrategyConfig::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: StrategyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.repair_threshold) {
            return Err(Error::Config(format!(
                "repair threshold {} is not a health ratio",
                self.repair_threshold
            )));
        }
        match self.offense.trigger {
            TriggerPolicy::Parity { modulus: 0, .. } => {
                return Err(Error::Config("parity modulus must be positive".to_string()));
            }
            TriggerPolicy::Hysteresis {
                min_cooldown,
                max_cooldown,
                ..
            } if min_cooldown > max_cooldown => {
                return Err(Error::Config(format!(
                    "min cooldown {min_cooldown} exceeds max cooldown {max_cooldown}"
                )));
            }
            _ => {}
        }
        self.layout.validate()
    }
}
