//! The immutable in-memory ride table.

use std::collections::BTreeSet;

use dashboard_core::models::{Ride, Selection};

/// Every ride loaded at startup. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rides: Vec<Ride>,
}

impl Dataset {
    pub fn new(rides: Vec<Ride>) -> Self {
        Self { rides }
    }

    pub fn len(&self) -> usize {
        self.rides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }

    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    /// Sorted unique years present in the data; the year picker's options.
    pub fn years(&self) -> Vec<u16> {
        self.rides
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Rides that pass `selection`, in load order.
    pub fn select<'a>(&'a self, selection: &Selection) -> Vec<&'a Ride> {
        self.rides.iter().filter(|r| selection.matches(r)).collect()
    }

    /// Number of rides that pass `selection`.
    pub fn count(&self, selection: &Selection) -> usize {
        self.rides.iter().filter(|r| selection.matches(r)).count()
    }
}
