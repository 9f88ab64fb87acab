//! Victory conditions.
//!
//! Each condition looks at a `GameView` and reports a fragment: the
//! progress of every side towards that one condition, in `[0, 1]`. Sides
//! are teams, or single players when unteamed. Observers never take part.
//!
//! Force victory and last man standing are different: they decide the game
//! on their own and are consulted by the evaluator outside the optional
//! battery.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::result::{VictoryReport, VictoryResult};
use crate::core::{ForceStats, GameView, Player, PlayerId, TeamId};

/// Condition tag, used in reports and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    ForceVictory,
    LastManStanding,
    BvDestroyed,
    BvRatio,
    KillCount,
    EnemyCommanderDestroyed,
}

impl std::fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConditionKind::ForceVictory => "force victory",
            ConditionKind::LastManStanding => "last man standing",
            ConditionKind::BvDestroyed => "battle value destroyed",
            ConditionKind::BvRatio => "battle value ratio",
            ConditionKind::KillCount => "kill count",
            ConditionKind::EnemyCommanderDestroyed => "enemy commander destroyed",
        };
        f.write_str(name)
    }
}

/// A victory condition and its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryCondition {
    /// Everybody else admits defeat to the designated victor.
    ForceVictory,

    /// Only one side has live units left.
    LastManStanding,

    /// At least `percent` of the enemy's initial battle value is destroyed.
    BvDestroyed { percent: u32 },

    /// Friendly battle value is at least `percent`% of the enemy's.
    BvRatio { percent: u32 },

    /// The side has destroyed `target` enemy units.
    KillCount { target: u32 },

    /// No enemy has a live commander.
    EnemyCommanderDestroyed,
}

impl VictoryCondition {
    #[must_use]
    pub fn kind(&self) -> ConditionKind {
        match self {
            VictoryCondition::ForceVictory => ConditionKind::ForceVictory,
            VictoryCondition::LastManStanding => ConditionKind::LastManStanding,
            VictoryCondition::BvDestroyed { .. } => ConditionKind::BvDestroyed,
            VictoryCondition::BvRatio { .. } => ConditionKind::BvRatio,
            VictoryCondition::KillCount { .. } => ConditionKind::KillCount,
            VictoryCondition::EnemyCommanderDestroyed => ConditionKind::EnemyCommanderDestroyed,
        }
    }

    /// Evaluate the condition against a game.
    ///
    /// Progress conditions mark the fragment decided when some side has
    /// fully met the condition; the evaluator makes the final call.
    pub fn evaluate<G: GameView + ?Sized>(&self, game: &G) -> VictoryResult {
        let result = match *self {
            VictoryCondition::ForceVictory => force_victory(game),
            VictoryCondition::LastManStanding => last_man_standing(game),
            VictoryCondition::BvDestroyed { percent } => {
                progress(game, self.kind(), |_, enemies| {
                    let initial: u64 = enemies.iter().map(|s| u64::from(s.initial_bv)).sum();
                    if initial == 0 {
                        return 0.0;
                    }
                    let current: u64 = enemies.iter().map(|s| u64::from(s.current_bv)).sum();
                    let destroyed = initial.saturating_sub(current) as f64 * 100.0 / initial as f64;
                    destroyed / f64::from(percent)
                })
            }
            VictoryCondition::BvRatio { percent } => {
                progress(game, self.kind(), |friends, enemies| {
                    if enemies.is_empty() {
                        return 0.0;
                    }
                    let enemy_bv: u64 = enemies.iter().map(|s| u64::from(s.current_bv)).sum();
                    if enemy_bv == 0 {
                        return 1.0;
                    }
                    let friendly_bv: u64 = friends.iter().map(|s| u64::from(s.current_bv)).sum();
                    let ratio = friendly_bv as f64 * 100.0 / enemy_bv as f64;
                    ratio / f64::from(percent)
                })
            }
            VictoryCondition::KillCount { target } => {
                progress(game, self.kind(), |friends, _| {
                    let kills: u64 = friends.iter().map(|s| u64::from(s.kills)).sum();
                    kills as f64 / f64::from(target)
                })
            }
            VictoryCondition::EnemyCommanderDestroyed => {
                progress(game, self.kind(), |_, enemies| {
                    if enemies.is_empty() {
                        return 0.0;
                    }
                    let beheaded = enemies.iter().filter(|s| s.live_commanders == 0).count();
                    beheaded as f64 / enemies.len() as f64
                })
            }
        };

        debug!(
            condition = %self.kind(),
            decided = result.is_decided(),
            high_score = result.high_score(),
            "victory condition evaluated"
        );
        result
    }
}

/// A team, or an unteamed player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Player(PlayerId),
    Team(TeamId),
}

impl Side {
    fn of(player: &Player) -> Self {
        match player.team() {
            Some(team) => Side::Team(team),
            None => Side::Player(player.id()),
        }
    }

    fn contains(self, player: &Player) -> bool {
        match self {
            Side::Player(id) => player.id() == id && player.team().is_none(),
            Side::Team(team) => player.team() == Some(team),
        }
    }

    fn record(self, result: &mut VictoryResult, score: f64) {
        match self {
            Side::Player(id) => result.add_player_score(id, score),
            Side::Team(team) => result.add_team_score(team, score),
        }
    }

    fn report(self, condition: ConditionKind) -> VictoryReport {
        match self {
            Side::Player(id) => VictoryReport::for_player(condition, id),
            Side::Team(team) => VictoryReport::for_team(condition, team),
        }
    }
}

fn active_players<G: GameView + ?Sized>(game: &G) -> impl Iterator<Item = &Player> {
    game.roster().iter().filter(|p| !p.is_observer())
}

/// Distinct sides among the active players, in seating order.
fn sides<G: GameView + ?Sized>(game: &G) -> SmallVec<[Side; 8]> {
    let mut sides: SmallVec<[Side; 8]> = SmallVec::new();
    for player in active_players(game) {
        let side = Side::of(player);
        if !sides.contains(&side) {
            sides.push(side);
        }
    }
    sides
}

/// Run a progress metric for every side.
///
/// The metric receives the side's own force stats and those of its
/// enemies; its value is capped at 1.0 and only non-zero values are kept.
fn progress<G, F>(game: &G, condition: ConditionKind, metric: F) -> VictoryResult
where
    G: GameView + ?Sized,
    F: Fn(&[ForceStats], &[ForceStats]) -> f64,
{
    let mut result = VictoryResult::undecided();

    for side in sides(game) {
        let mut friends: SmallVec<[ForceStats; 8]> = SmallVec::new();
        let mut enemies: SmallVec<[ForceStats; 8]> = SmallVec::new();
        for player in active_players(game) {
            let stats = game.force_stats(player.id());
            if side.contains(player) {
                friends.push(stats);
            } else {
                enemies.push(stats);
            }
        }

        let score = metric(friends.as_slice(), enemies.as_slice()).clamp(0.0, 1.0);
        if score > 0.0 {
            side.record(&mut result, score);
        }
        if score >= 1.0 {
            result.set_decided(true);
            result.add_report(side.report(condition));
        }
    }

    result
}

/// Player-agreed concession.
///
/// Fires when every active player other than the designated victor (or
/// outside the designated team) admits defeat.
fn force_victory<G: GameView + ?Sized>(game: &G) -> VictoryResult {
    let Some(forced) = game.forced_victory() else {
        return VictoryResult::undecided();
    };

    let player_won = forced
        .player
        .is_some_and(|victor| all_concede(game, |p| p.id() != victor));
    let team_won = !player_won
        && forced
            .team
            .is_some_and(|team| all_concede(game, |p| p.team() != Some(team)));

    if !(player_won || team_won) {
        return VictoryResult::undecided();
    }

    let mut result = VictoryResult::for_result(true, forced.player, forced.team);
    if let Some(player) = forced.player {
        result.add_report(VictoryReport::for_player(ConditionKind::ForceVictory, player));
    }
    if let Some(team) = forced.team {
        result.add_report(VictoryReport::for_team(ConditionKind::ForceVictory, team));
    }
    result
}

fn all_concede<G, F>(game: &G, opponent: F) -> bool
where
    G: GameView + ?Sized,
    F: Fn(&Player) -> bool,
{
    active_players(game)
        .filter(|&p| opponent(p))
        .all(Player::admits_defeat)
}

/// Only one side has live units.
///
/// Nobody alive is a decided draw. A lone surviving unteamed player or a
/// single surviving team wins.
fn last_man_standing<G: GameView + ?Sized>(game: &G) -> VictoryResult {
    let mut alive = 0usize;
    let mut last: Option<&Player> = None;
    let mut last_team: Option<TeamId> = None;
    let mut one_team = false;
    let mut unteamed_alive = false;

    for player in active_players(game) {
        if game.force_stats(player.id()).live_units == 0 {
            continue;
        }
        alive += 1;
        last = Some(player);

        match (player.team(), last_team) {
            (None, _) => unteamed_alive = true,
            (Some(team), None) => {
                last_team = Some(team);
                one_team = true;
            }
            (Some(team), Some(seen)) if team != seen => one_team = false,
            _ => {}
        }
    }

    if alive == 0 {
        return VictoryResult::decided();
    }

    if let Some(survivor) = last.filter(|p| alive == 1 && p.team().is_none()) {
        let mut result = VictoryResult::for_result(true, Some(survivor.id()), None);
        result.add_report(VictoryReport::for_player(ConditionKind::LastManStanding, survivor.id()));
        return result;
    }

    if let (true, false, Some(team)) = (one_team, unteamed_alive, last_team) {
        let mut result = VictoryResult::for_result(true, None, Some(team));
        result.add_report(VictoryReport::for_team(ConditionKind::LastManStanding, team));
        return result;
    }

    VictoryResult::undecided()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ForcedVictory, GameSnapshot};

    fn player(id: u32, team: Option<u32>) -> Player {
        let p = Player::new(PlayerId::new(id), format!("P{}", id));
        match team {
            Some(t) => p.with_team(TeamId::new(t)),
            None => p,
        }
    }

    fn forced(player: Option<u32>, team: Option<u32>) -> Option<ForcedVictory> {
        Some(ForcedVictory {
            player: player.map(PlayerId::new),
            team: team.map(TeamId::new),
        })
    }

    #[test]
    fn test_force_victory_requires_request() {
        let game = GameSnapshot::new()
            .with_player(player(1, Some(1)))
            .with_player(player(2, Some(2)).admitting_defeat());

        let result = VictoryCondition::ForceVictory.evaluate(&game);
        assert!(!result.is_decided());
    }

    #[test]
    fn test_force_victory_individual() {
        let mut game = GameSnapshot::new()
            .with_player(player(1, None))
            .with_player(player(2, None).admitting_defeat())
            .with_player(player(3, None).admitting_defeat())
            .with_player(player(4, None).observing());
        game.set_forced_victory(forced(Some(1), None));

        let result = VictoryCondition::ForceVictory.evaluate(&game);
        assert!(result.is_decided());
        assert_eq!(result.sole_winning_player(), Some(PlayerId::new(1)));
        assert_eq!(result.reports()[0].condition, ConditionKind::ForceVictory);

        // One hold-out flips it back.
        game.player_mut(PlayerId::new(3)).unwrap().set_admits_defeat(false);
        assert!(!VictoryCondition::ForceVictory.evaluate(&game).is_decided());
    }

    #[test]
    fn test_force_victory_team() {
        let mut game = GameSnapshot::new()
            .with_player(player(1, Some(1)))
            .with_player(player(2, Some(1)))
            .with_player(player(3, Some(2)).admitting_defeat());
        game.set_forced_victory(forced(None, Some(1)));

        let result = VictoryCondition::ForceVictory.evaluate(&game);
        assert!(result.is_decided());
        assert!(result.is_winning_team(TeamId::new(1)));
        assert_eq!(result.sole_winning_player(), None);
    }

    #[test]
    fn test_force_victory_ignores_observers() {
        let mut game = GameSnapshot::new()
            .with_player(player(1, None))
            .with_player(player(2, None).admitting_defeat())
            .with_player(player(3, None).observing());
        game.set_forced_victory(forced(Some(1), None));

        assert!(VictoryCondition::ForceVictory.evaluate(&game).is_decided());
    }

    #[test]
    fn test_kill_count_progress() {
        let game = GameSnapshot::new()
            .with_force(player(1, None), ForceStats::deployed(1000, 5).with_kills(2))
            .with_force(player(2, None), ForceStats::deployed(1000, 5).with_kills(4))
            .with_force(player(3, None), ForceStats::deployed(1000, 5));

        let result = VictoryCondition::KillCount { target: 4 }.evaluate(&game);
        assert!(result.is_decided());
        assert!((result.player_score(PlayerId::new(1)) - 0.5).abs() < 1e-9);
        assert_eq!(result.player_score(PlayerId::new(2)), 1.0);
        assert_eq!(result.players(), vec![PlayerId::new(1), PlayerId::new(2)]);
        assert_eq!(result.reports().len(), 1);
    }

    #[test]
    fn test_kill_count_sums_team() {
        let game = GameSnapshot::new()
            .with_force(player(1, Some(1)), ForceStats::deployed(1000, 5).with_kills(2))
            .with_force(player(2, Some(1)), ForceStats::deployed(1000, 5).with_kills(1))
            .with_force(player(3, Some(2)), ForceStats::deployed(1000, 5));

        let result = VictoryCondition::KillCount { target: 3 }.evaluate(&game);
        assert_eq!(result.team_score(TeamId::new(1)), 1.0);
        assert_eq!(result.team_score(TeamId::new(2)), 0.0);
        assert!(result.players().is_empty());
    }

    #[test]
    fn test_bv_destroyed() {
        let game = GameSnapshot::new()
            .with_force(player(1, None), ForceStats::deployed(1000, 4))
            .with_force(player(2, None), ForceStats::deployed(1000, 4).with_current_bv(400));

        let result = VictoryCondition::BvDestroyed { percent: 50 }.evaluate(&game);
        // Player 2 lost 60% of its battle value.
        assert_eq!(result.player_score(PlayerId::new(1)), 1.0);
        assert_eq!(result.player_score(PlayerId::new(2)), 0.0);
        assert!(result.is_decided());
    }

    #[test]
    fn test_bv_ratio() {
        let game = GameSnapshot::new()
            .with_force(player(1, Some(1)), ForceStats::deployed(3000, 4))
            .with_force(player(2, Some(2)), ForceStats::deployed(2000, 4));

        let result = VictoryCondition::BvRatio { percent: 300 }.evaluate(&game);
        assert!((result.team_score(TeamId::new(1)) - 0.5).abs() < 1e-9);
        assert!(!result.is_decided());

        let wiped = GameSnapshot::new()
            .with_force(player(1, Some(1)), ForceStats::deployed(3000, 4))
            .with_force(player(2, Some(2)), ForceStats::deployed(2000, 0).with_current_bv(0));
        let result = VictoryCondition::BvRatio { percent: 300 }.evaluate(&wiped);
        assert_eq!(result.team_score(TeamId::new(1)), 1.0);
        assert!(result.is_decided());
    }

    #[test]
    fn test_commander_destroyed() {
        let game = GameSnapshot::new()
            .with_force(player(1, None), ForceStats::deployed(1000, 3).with_commanders(1))
            .with_force(player(2, None), ForceStats::deployed(1000, 3))
            .with_force(player(3, None), ForceStats::deployed(1000, 3).with_commanders(1));

        let result = VictoryCondition::EnemyCommanderDestroyed.evaluate(&game);
        assert!((result.player_score(PlayerId::new(1)) - 0.5).abs() < 1e-9);
        assert!((result.player_score(PlayerId::new(3)) - 0.5).abs() < 1e-9);
        assert_eq!(result.player_score(PlayerId::new(2)), 0.0);
    }

    #[test]
    fn test_last_man_standing() {
        let game = GameSnapshot::new()
            .with_force(player(1, None), ForceStats::deployed(1000, 2))
            .with_force(player(2, None), ForceStats::deployed(1000, 0));
        let result = VictoryCondition::LastManStanding.evaluate(&game);
        assert!(result.is_decided());
        assert_eq!(result.sole_winning_player(), Some(PlayerId::new(1)));

        let team = GameSnapshot::new()
            .with_force(player(1, Some(1)), ForceStats::deployed(1000, 2))
            .with_force(player(2, Some(1)), ForceStats::deployed(1000, 1))
            .with_force(player(3, Some(2)), ForceStats::deployed(1000, 0));
        let result = VictoryCondition::LastManStanding.evaluate(&team);
        assert!(result.is_decided());
        assert!(result.is_winning_team(TeamId::new(1)));

        let nobody = GameSnapshot::new()
            .with_force(player(1, None), ForceStats::deployed(1000, 0))
            .with_force(player(2, None), ForceStats::deployed(1000, 0));
        let result = VictoryCondition::LastManStanding.evaluate(&nobody);
        assert!(result.is_decided());
        assert!(result.is_draw());

        let contested = GameSnapshot::new()
            .with_force(player(1, Some(1)), ForceStats::deployed(1000, 2))
            .with_force(player(2, None), ForceStats::deployed(1000, 1));
        assert!(!VictoryCondition::LastManStanding.evaluate(&contested).is_decided());
    }
}
