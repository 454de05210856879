//! Rating lookup boundary.
//!
//! The engine never owns player data; it asks the host for the one rating
//! it needs right before a shot is drawn.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Supplies the current three-point rating for a player, in [0, 100].
///
/// `None` means the player is unknown; the driver surfaces that as a
/// `NotFound` error without touching contest state.
pub trait RatingProvider {
    fn rating(&self, player_id: u64) -> Option<f32>;
}

/// Plain lookup-table provider for hosts and tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableRatingProvider {
    ratings: HashMap<u64, f32>,
}

impl TableRatingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, player_id: u64, rating: f32) {
        self.ratings.insert(player_id, rating);
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl FromIterator<(u64, f32)> for TableRatingProvider {
    fn from_iter<I: IntoIterator<Item = (u64, f32)>>(iter: I) -> Self {
        Self { ratings: iter.into_iter().collect() }
    }
}

impl RatingProvider for TableRatingProvider {
    fn rating(&self, player_id: u64) -> Option<f32> {
        self.ratings.get(&player_id).copied()
    }
}
