pub mod board;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod importance;
pub mod layout;
pub mod location;
pub mod offense;
pub mod offline;
pub mod planner;
pub mod strategy;
pub mod tier;
pub mod tiers;
pub mod unit;

#[cfg(test)]
mod fixtures;

pub use error::{Error, Result};
pub use strategy::*;
