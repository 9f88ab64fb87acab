//! Read-only game view consumed by the victory conditions.
//!
//! ## GameView
//!
//! The seam between the outcome engine and the hosting session. The session
//! exposes its roster, the concession request, the timer flag and per-player
//! force statistics; the engine never reaches further into the game.
//!
//! ## GameSnapshot
//!
//! A ready-made `GameView` backed by `im` persistent structures, so a
//! session can keep one up to date and hand out O(1) clones per evaluation.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId, TeamId};

/// Ordered player roster.
pub type Roster = Vector<Player>;

/// Force statistics for a single player, maintained by the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceStats {
    /// Battle value at deployment.
    pub initial_bv: u32,

    /// Battle value still on the board.
    pub current_bv: u32,

    /// Enemy units destroyed by this player.
    pub kills: u32,

    /// Commanders still alive.
    pub live_commanders: u32,

    /// Deployed units still alive.
    pub live_units: u32,
}

impl ForceStats {
    /// Stats for a fresh force where everything is still alive.
    pub fn deployed(bv: u32, units: u32) -> Self {
        Self {
            initial_bv: bv,
            current_bv: bv,
            kills: 0,
            live_commanders: 0,
            live_units: units,
        }
    }

    /// Set commander count (builder pattern).
    #[must_use]
    pub fn with_commanders(mut self, commanders: u32) -> Self {
        self.live_commanders = commanders;
        self
    }

    /// Set kill count (builder pattern).
    #[must_use]
    pub fn with_kills(mut self, kills: u32) -> Self {
        self.kills = kills;
        self
    }

    /// Set remaining battle value (builder pattern).
    #[must_use]
    pub fn with_current_bv(mut self, bv: u32) -> Self {
        self.current_bv = bv;
        self
    }

    /// Set remaining unit count (builder pattern).
    #[must_use]
    pub fn with_live_units(mut self, units: u32) -> Self {
        self.live_units = units;
        self
    }
}

/// Designated victor of a player-agreed concession.
///
/// Either side may be absent; an absent side is simply not checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForcedVictory {
    pub player: Option<PlayerId>,
    pub team: Option<TeamId>,
}

/// Read-only view of a running game.
pub trait GameView {
    /// All players, observers included, in seating order.
    fn roster(&self) -> &Roster;

    /// The requested forced victory, or `None` if nobody asked for one.
    fn forced_victory(&self) -> Option<ForcedVictory>;

    /// Has the configured timer or turn limit run out?
    fn timer_expired(&self) -> bool;

    /// Force statistics for a player. Unknown players have an empty force.
    fn force_stats(&self, player: PlayerId) -> ForceStats;
}

/// Snapshot of a game session.
#[derive(Clone, Debug, Default)]
pub struct GameSnapshot {
    roster: Roster,
    stats: ImHashMap<PlayerId, ForceStats>,
    forced_victory: Option<ForcedVictory>,
    timer_expired: bool,
}

impl GameSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player (builder pattern).
    #[must_use]
    pub fn with_player(mut self, player: Player) -> Self {
        self.add_player(player);
        self
    }

    /// Add a player with force statistics (builder pattern).
    #[must_use]
    pub fn with_force(mut self, player: Player, stats: ForceStats) -> Self {
        self.stats.insert(player.id(), stats);
        self.add_player(player);
        self
    }

    /// Add a player, replacing any earlier entry with the same ID.
    pub fn add_player(&mut self, player: Player) {
        match self.roster.iter().position(|p| p.id() == player.id()) {
            Some(index) => {
                self.roster.set(index, player);
            }
            None => self.roster.push_back(player),
        }
    }

    /// Remove a player and their force statistics.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        self.stats.remove(&id);
        let index = self.roster.iter().position(|p| p.id() == id)?;
        Some(self.roster.remove(index))
    }

    /// Look up a player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.iter().find(|p| p.id() == id)
    }

    /// Mutable lookup by ID.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.roster.iter_mut().find(|p| p.id() == id)
    }

    /// Look up a player by name.
    #[must_use]
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.roster.iter().find(|p| p.name() == name)
    }

    /// Mutable access to the live roster (rating write-back).
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// Replace a player's force statistics.
    pub fn set_force_stats(&mut self, id: PlayerId, stats: ForceStats) {
        self.stats.insert(id, stats);
    }

    /// Request (or withdraw) a forced victory.
    pub fn set_forced_victory(&mut self, forced: Option<ForcedVictory>) {
        self.forced_victory = forced;
    }

    pub fn set_timer_expired(&mut self, expired: bool) {
        self.timer_expired = expired;
    }
}

impl GameView for GameSnapshot {
    fn roster(&self) -> &Roster {
        &self.roster
    }

    fn forced_victory(&self) -> Option<ForcedVictory> {
        self.forced_victory
    }

    fn timer_expired(&self) -> bool {
        self.timer_expired
    }

    fn force_stats(&self, player: PlayerId) -> ForceStats {
        self.stats.get(&player).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_players() {
        let snapshot = GameSnapshot::new()
            .with_player(Player::new(PlayerId::new(1), "A"))
            .with_force(
                Player::new(PlayerId::new(2), "B"),
                ForceStats::deployed(1000, 4).with_kills(2),
            );

        assert_eq!(snapshot.roster().len(), 2);
        assert_eq!(snapshot.player_by_name("B").map(Player::id), Some(PlayerId::new(2)));
        assert_eq!(snapshot.force_stats(PlayerId::new(2)).kills, 2);
        assert_eq!(snapshot.force_stats(PlayerId::new(1)), ForceStats::default());
        assert_eq!(snapshot.force_stats(PlayerId::new(99)), ForceStats::default());
    }

    #[test]
    fn test_add_player_replaces() {
        let mut snapshot = GameSnapshot::new().with_player(Player::new(PlayerId::new(1), "A"));
        snapshot.add_player(Player::new(PlayerId::new(1), "A").admitting_defeat());

        assert_eq!(snapshot.roster().len(), 1);
        assert!(snapshot.player(PlayerId::new(1)).unwrap().admits_defeat());
    }

    #[test]
    fn test_remove_player() {
        let mut snapshot = GameSnapshot::new()
            .with_force(Player::new(PlayerId::new(1), "A"), ForceStats::deployed(500, 2))
            .with_player(Player::new(PlayerId::new(2), "B"));

        let removed = snapshot.remove_player(PlayerId::new(1));
        assert_eq!(removed.map(|p| p.id()), Some(PlayerId::new(1)));
        assert_eq!(snapshot.roster().len(), 1);
        assert_eq!(snapshot.force_stats(PlayerId::new(1)), ForceStats::default());
        assert!(snapshot.remove_player(PlayerId::new(1)).is_none());
    }

    #[test]
    fn test_snapshot_clone_is_independent() {
        let mut live = GameSnapshot::new().with_player(Player::new(PlayerId::new(1), "A"));
        let frozen = live.clone();

        live.player_mut(PlayerId::new(1)).unwrap().set_admits_defeat(true);
        live.set_timer_expired(true);

        assert!(!frozen.player(PlayerId::new(1)).unwrap().admits_defeat());
        assert!(!frozen.timer_expired());
        assert!(live.timer_expired());
    }
}
