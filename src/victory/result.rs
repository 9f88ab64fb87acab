//! Victory result: per-player and per-team scores plus a decided flag.
//!
//! Scores are kept for whoever contributed something. Winners are derived
//! from the high score with a small tolerance, so several players or teams
//! can tie for the win.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::conditions::ConditionKind;
use crate::core::{PlayerId, TeamId};

/// Two scores closer than this are equal.
pub const WIN_TOLERANCE: f64 = 0.01;

/// Which condition was met, and by whom.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VictoryReport {
    pub condition: ConditionKind,
    pub player: Option<PlayerId>,
    pub team: Option<TeamId>,
}

impl VictoryReport {
    pub fn for_player(condition: ConditionKind, player: PlayerId) -> Self {
        Self { condition, player: Some(player), team: None }
    }

    pub fn for_team(condition: ConditionKind, team: TeamId) -> Self {
        Self { condition, player: None, team: Some(team) }
    }
}

/// Outcome of a victory evaluation.
///
/// ## Example
///
/// ```
/// use outcome_engine::core::PlayerId;
/// use outcome_engine::victory::VictoryResult;
///
/// let mut result = VictoryResult::undecided();
/// result.add_player_score(PlayerId::new(1), 2.0);
/// result.add_player_score(PlayerId::new(2), 2.0);
/// result.add_player_score(PlayerId::new(3), 1.0);
///
/// assert!(result.is_winning_player(PlayerId::new(1)));
/// assert!(result.is_winning_player(PlayerId::new(2)));
/// assert!(!result.is_winning_player(PlayerId::new(3)));
/// assert_eq!(result.sole_winning_player(), None);
/// ```
#[derive(Clone, Debug)]
pub struct VictoryResult {
    decided: bool,
    player_scores: FxHashMap<PlayerId, f64>,
    team_scores: FxHashMap<TeamId, f64>,
    high_score: f64,
    reports: Vec<VictoryReport>,
}

impl VictoryResult {
    fn new(decided: bool) -> Self {
        Self {
            decided,
            player_scores: FxHashMap::default(),
            team_scores: FxHashMap::default(),
            high_score: f64::NEG_INFINITY,
            reports: Vec::new(),
        }
    }

    /// The game goes on.
    #[must_use]
    pub fn undecided() -> Self {
        Self::new(false)
    }

    /// The game is over. Without scores this is a draw.
    #[must_use]
    pub fn decided() -> Self {
        Self::new(true)
    }

    /// Single-winner shortcut: seeds a score of 1.0 for the named player
    /// and/or team.
    #[must_use]
    pub fn for_result(decided: bool, player: Option<PlayerId>, team: Option<TeamId>) -> Self {
        let mut result = Self::new(decided);
        if let Some(player) = player {
            result.add_player_score(player, 1.0);
        }
        if let Some(team) = team {
            result.add_team_score(team, 1.0);
        }
        result
    }

    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.decided
    }

    pub fn set_decided(&mut self, decided: bool) {
        self.decided = decided;
    }

    /// Store a player's score, replacing any earlier one.
    pub fn add_player_score(&mut self, player: PlayerId, score: f64) {
        self.player_scores.insert(player, score);
        self.update_high_score();
    }

    /// Store a team's score, replacing any earlier one.
    pub fn add_team_score(&mut self, team: TeamId, score: f64) {
        self.team_scores.insert(team, score);
        self.update_high_score();
    }

    /// Score of a player, 0.0 if none was recorded.
    #[must_use]
    pub fn player_score(&self, player: PlayerId) -> f64 {
        self.player_scores.get(&player).copied().unwrap_or(0.0)
    }

    /// Score of a team, 0.0 if none was recorded.
    #[must_use]
    pub fn team_score(&self, team: TeamId) -> f64 {
        self.team_scores.get(&team).copied().unwrap_or(0.0)
    }

    /// Highest score across players and teams.
    ///
    /// `f64::NEG_INFINITY` when nothing has been recorded.
    #[must_use]
    pub fn high_score(&self) -> f64 {
        self.high_score
    }

    fn update_high_score(&mut self) {
        self.high_score = self
            .player_scores
            .values()
            .chain(self.team_scores.values())
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
    }

    fn is_winning_score(&self, score: f64) -> bool {
        // Nobody wins on a zero or empty high score.
        self.high_score > 0.0 && (score - self.high_score).abs() < WIN_TOLERANCE
    }

    /// Is the player's score tied with the high score?
    #[must_use]
    pub fn is_winning_player(&self, player: PlayerId) -> bool {
        self.is_winning_score(self.player_score(player))
    }

    /// Is the team's score tied with the high score?
    #[must_use]
    pub fn is_winning_team(&self, team: TeamId) -> bool {
        self.is_winning_score(self.team_score(team))
    }

    /// All winning players, sorted by ID.
    #[must_use]
    pub fn winning_players(&self) -> SmallVec<[PlayerId; 4]> {
        let mut winners: SmallVec<[PlayerId; 4]> = self
            .player_scores
            .iter()
            .filter(|(_, &score)| self.is_winning_score(score))
            .map(|(&id, _)| id)
            .collect();
        winners.sort_unstable();
        winners
    }

    /// All winning teams, sorted by ID.
    #[must_use]
    pub fn winning_teams(&self) -> SmallVec<[TeamId; 4]> {
        let mut winners: SmallVec<[TeamId; 4]> = self
            .team_scores
            .iter()
            .filter(|(_, &score)| self.is_winning_score(score))
            .map(|(&id, _)| id)
            .collect();
        winners.sort_unstable();
        winners
    }

    /// The only winning player, if exactly one player is winning.
    ///
    /// `None` when no player is winning or several are tied with the high
    /// score.
    #[must_use]
    pub fn sole_winning_player(&self) -> Option<PlayerId> {
        let winners = self.winning_players();
        (winners.len() == 1).then(|| winners[0])
    }

    /// The only winning team, if exactly one team is winning.
    #[must_use]
    pub fn sole_winning_team(&self) -> Option<TeamId> {
        let winners = self.winning_teams();
        (winners.len() == 1).then(|| winners[0])
    }

    /// No player and no team is winning.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winning_players().is_empty() && self.winning_teams().is_empty()
    }

    /// Players with a recorded score, sorted by ID.
    #[must_use]
    pub fn players(&self) -> Vec<PlayerId> {
        let mut ids: Vec<_> = self.player_scores.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Teams with a recorded score, sorted by ID.
    #[must_use]
    pub fn teams(&self) -> Vec<TeamId> {
        let mut ids: Vec<_> = self.team_scores.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn add_report(&mut self, report: VictoryReport) {
        self.reports.push(report);
    }

    #[must_use]
    pub fn reports(&self) -> &[VictoryReport] {
        &self.reports
    }

    pub(crate) fn extend_reports(&mut self, reports: &[VictoryReport]) {
        self.reports.extend_from_slice(reports);
    }
}
