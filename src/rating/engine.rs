//! Rating engine: applies a finished game's outcome to player ratings.
//!
//! Players are updated one after another in roster order. Each update reads
//! the opponents' ratings from the store as they stand at that moment, so a
//! player processed later sees the new ratings of those processed before.

use smallvec::SmallVec;
use tracing::{debug, info};

use super::elo::{expected_score, find_k, rating_delta};
use super::event::{RatingChange, RatingListener};
use super::store::RatingStore;
use crate::core::Player;
use crate::victory::VictoryResult;

/// Multiplayer Elo rating engine.
#[derive(Clone, Debug, Default)]
pub struct RatingEngine {
    store: RatingStore,
}

impl RatingEngine {
    /// Create an engine over an existing rating table.
    #[must_use]
    pub fn new(store: RatingStore) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RatingStore {
        &mut self.store
    }

    /// Give the rating table back, e.g. to persist it.
    #[must_use]
    pub fn into_store(self) -> RatingStore {
        self.store
    }

    /// Register a player joining the session.
    pub fn register_player(&mut self, player: &mut Player) {
        self.store.register_player(player);
    }

    /// Apply a game outcome to every active player in `roster`.
    ///
    /// Observers are ignored. Nothing changes when the result is undecided,
    /// when fewer than two players are active, or when no active player won.
    /// Otherwise each active player gets a new rating, written to the store,
    /// then to the player object, then reported to `listener`.
    ///
    /// Returns the applied changes in roster order.
    pub fn apply_outcome<'a, I>(
        &mut self,
        result: &VictoryResult,
        roster: I,
        listener: &mut dyn RatingListener,
    ) -> Vec<RatingChange>
    where
        I: IntoIterator<Item = &'a mut Player>,
    {
        if !result.is_decided() {
            debug!("outcome undecided, ratings unchanged");
            return Vec::new();
        }

        let mut active: Vec<&mut Player> = roster.into_iter().filter(|p| !p.is_observer()).collect();
        let n = active.len();
        if n <= 1 {
            debug!(active = n, "not enough active players to rate");
            return Vec::new();
        }

        let winners: SmallVec<[bool; 8]> = active.iter().map(|p| is_winner(result, p)).collect();
        let winner_count = winners.iter().filter(|&&won| won).count();
        if winner_count == 0 {
            debug!("no winners, ratings unchanged");
            return Vec::new();
        }

        for player in &active {
            self.store.record_mut(player.name());
        }

        let mut changes = Vec::with_capacity(n);
        for i in 0..n {
            let name = active[i].name();
            let old_rating = self.store.rating(name);
            let opponents = active
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, p)| self.store.rating(p.name()));
            let expected = expected_score(old_rating, opponents);
            let actual = if winners[i] { 1.0 / winner_count as f64 } else { 0.0 };
            let k = find_k(old_rating);
            let delta = rating_delta(k, n, actual, expected);
            let new_rating = (old_rating + delta).max(0);

            let record = self.store.record_mut(name);
            record.current_rating = new_rating;
            if actual > 0.0 {
                record.wins += 1;
            } else {
                record.losses += 1;
            }

            let player = &mut *active[i];
            player.set_rating(new_rating);

            let change = RatingChange {
                player: player.id(),
                name: player.name().to_owned(),
                old_rating,
                new_rating,
                won: actual > 0.0,
            };
            debug!(
                player = %change.name,
                rating = new_rating,
                delta = change.delta(),
                expected,
                actual,
                k,
                "rating updated"
            );
            listener.rating_changed(&change);
            changes.push(change);
        }

        info!(players = n, winners = winner_count, "ratings updated");
        changes
    }
}

/// A player wins outright or as a member of a winning team.
fn is_winner(result: &VictoryResult, player: &Player) -> bool {
    result.is_winning_player(player.id())
        || player.team().is_some_and(|team| result.is_winning_team(team))
}
