//! Per-kind population counts

use serde::{Deserialize, Serialize};

use crate::core::types::Kind;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    counts: [usize; 7],
}

impl Census {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: Kind) -> usize {
        self.counts[kind.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn add(&mut self, kind: Kind) {
        self.counts[kind.index()] += 1;
    }

    pub fn remove(&mut self, kind: Kind) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_sub(1);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Kind, usize)> + '_ {
        Kind::ALL.iter().map(move |kind| (*kind, self.get(*kind)))
    }
}

impl FromIterator<Kind> for Census {
    fn from_iter<I: IntoIterator<Item = Kind>>(iter: I) -> Self {
        let mut census = Self::new();
        for kind in iter {
            census.add(kind);
        }
        census
    }
}
