//! Rating store: the table of per-player rating records.
//!
//! ## Lifecycle
//!
//! Create one when the server (or session) starts and hand it to the
//! `RatingEngine`. Records are keyed by player name, so a player who drops
//! and reconnects gets their rating back. The table lives as long as the
//! store; `to_bytes`/`from_bytes` let the host keep it somewhere longer.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::elo::DEFAULT_RATING;
use crate::core::Player;
use crate::error::StoreError;

/// Rating history of one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub wins: u32,
    pub losses: u32,
    pub current_rating: i32,
}

impl Default for RatingRecord {
    fn default() -> Self {
        Self {
            wins: 0,
            losses: 0,
            current_rating: DEFAULT_RATING,
        }
    }
}

impl RatingRecord {
    /// Games played so far.
    #[must_use]
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }
}

/// Player name to rating record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingStore {
    records: FxHashMap<String, RatingRecord>,
}

impl RatingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player joining the session.
    ///
    /// Unseen names get a fresh record; known names have their stored
    /// rating copied back onto the player object.
    pub fn register_player(&mut self, player: &mut Player) {
        let record = self.record_mut(player.name());
        player.set_rating(record.current_rating);
        debug!(player = player.name(), rating = player.rating(), "player registered");
    }

    /// Is there a record for this name?
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RatingRecord> {
        self.records.get(name)
    }

    /// Current rating, or the default for an unseen name.
    #[must_use]
    pub fn rating(&self, name: &str) -> i32 {
        self.records
            .get(name)
            .map_or(DEFAULT_RATING, |record| record.current_rating)
    }

    /// Record for a name, created at the default rating if missing.
    pub fn record_mut(&mut self, name: &str) -> &mut RatingRecord {
        self.records.entry(name.to_owned()).or_default()
    }

    /// All ratings, sorted by name.
    #[must_use]
    pub fn ratings(&self) -> Vec<(&str, i32)> {
        let mut ratings: Vec<_> = self
            .records
            .iter()
            .map(|(name, record)| (name.as_str(), record.current_rating))
            .collect();
        ratings.sort_unstable_by(|a, b| a.0.cmp(b.0));
        ratings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Encode the whole table.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        bincode::serialize(self).map_err(StoreError::Encode)
    }

    /// Decode a table produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        bincode::deserialize(bytes).map_err(StoreError::Decode)
    }
}
