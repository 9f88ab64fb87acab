//! Rating change notifications.
//!
//! The engine reports every rating it writes. Delivery to clients is the
//! listener's business; the engine fires and forgets.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// One player's rating after a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub player: PlayerId,
    pub name: String,
    pub old_rating: i32,
    pub new_rating: i32,
    pub won: bool,
}

impl RatingChange {
    /// Applied change, after clamping at zero.
    #[must_use]
    pub fn delta(&self) -> i32 {
        self.new_rating - self.old_rating
    }
}

/// Receives rating changes as they are applied.
pub trait RatingListener {
    fn rating_changed(&mut self, change: &RatingChange);
}

/// Discards every notification.
impl RatingListener for () {
    fn rating_changed(&mut self, _change: &RatingChange) {}
}

/// Collects notifications in order.
impl RatingListener for Vec<RatingChange> {
    fn rating_changed(&mut self, change: &RatingChange) {
        self.push(change.clone());
    }
}
