//! Per-location importance metrics.

use crate::location::*;
use fnv::FnvHashMap;
use itertools::Itertools;

/// Accumulated metric per location, remembering the order in which
/// locations first appeared so rankings break ties deterministically.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportanceTally {
    entries: Vec<(Location, f64)>,
    index: FnvHashMap<Location, usize>,
}

impl ImportanceTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, location: Location, amount: f64) {
        match self.index.get(&location) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(location, self.entries.len());
                self.entries.push((location, amount));
            }
        }
    }

    pub fn get(&self, location: Location) -> Option<f64> {
        self.index.get(&location).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (Location, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Locations ordered by value descending, then by first appearance.
    pub fn ranked(&self) -> Vec<Location> {
        self.entries
            .iter()
            .enumerate()
            .sorted_by(|(ia, (_, va)), (ib, (_, vb))| vb.total_cmp(va).then(ia.cmp(ib)))
            .map(|(_, (location, _))| *location)
            .collect()
    }
}
