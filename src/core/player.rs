//! Player identification and the live player record.
//!
//! ## PlayerId / TeamId
//!
//! Type-safe identifiers handed out by the hosting session. "No player" and
//! "no team" are expressed with `Option`, never with sentinel values.
//!
//! ## Player
//!
//! The transient per-connection player object. Ratings written here are a
//! mirror of the `RatingStore`, which is the source of truth across
//! reconnects.

use serde::{Deserialize, Serialize};

/// Session-scoped player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Team identifier. Players without a team fight on their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u32);

impl TeamId {
    /// Create a new team ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

/// A player taking part in (or watching) a game session.
///
/// ## Example
///
/// ```
/// use outcome_engine::core::{Player, PlayerId, TeamId};
///
/// let player = Player::new(PlayerId::new(1), "Natasha")
///     .with_team(TeamId::new(2))
///     .admitting_defeat();
///
/// assert_eq!(player.team(), Some(TeamId::new(2)));
/// assert!(player.admits_defeat());
/// assert!(!player.is_observer());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,

    /// Stable, unique name. Used as the rating key.
    name: String,

    team: Option<TeamId>,
    observer: bool,
    admits_defeat: bool,

    /// Mirror of the stored rating, pushed by the rating engine.
    rating: i32,
}

impl Player {
    /// Create an unteamed, active player with a zero rating.
    ///
    /// The rating is filled in once the player is registered with a
    /// `RatingStore`.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            team: None,
            observer: false,
            admits_defeat: false,
            rating: 0,
        }
    }

    /// Assign a team (builder pattern).
    #[must_use]
    pub fn with_team(mut self, team: TeamId) -> Self {
        self.team = Some(team);
        self
    }

    /// Mark as an observer (builder pattern).
    #[must_use]
    pub fn observing(mut self) -> Self {
        self.observer = true;
        self
    }

    /// Mark as conceding (builder pattern).
    #[must_use]
    pub fn admitting_defeat(mut self) -> Self {
        self.admits_defeat = true;
        self
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn team(&self) -> Option<TeamId> {
        self.team
    }

    #[must_use]
    pub fn is_observer(&self) -> bool {
        self.observer
    }

    /// Has this player agreed to concede the game?
    #[must_use]
    pub fn admits_defeat(&self) -> bool {
        self.admits_defeat
    }

    pub fn set_admits_defeat(&mut self, admits: bool) {
        self.admits_defeat = admits;
    }

    #[must_use]
    pub fn rating(&self) -> i32 {
        self.rating
    }

    /// Overwrite the mirrored rating.
    pub fn set_rating(&mut self, rating: i32) {
        self.rating = rating;
    }
}
