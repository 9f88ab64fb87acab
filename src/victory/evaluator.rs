//! Victory evaluator: combines the configured conditions into one result.
//!
//! ## Order of evaluation
//!
//! 1. Force victory. A player-agreed concession overrides everything.
//! 2. With optional checking disabled, the (undecided) concession result is
//!    final.
//! 3. Every enabled optional condition is evaluated; scores are summed per
//!    player and per team, then divided by the number of enabled conditions.
//! 4. A normalized high score at or above the achievement threshold decides
//!    the game.
//! 5. An expired timer ends the game as a draw.
//! 6. Last man standing.
//! 7. Otherwise the game goes on; the combined progress is returned.

use tracing::{debug, info};

use super::conditions::VictoryCondition;
use super::result::VictoryResult;
use crate::core::{GameView, VictoryConfig};
use crate::error::ConfigError;

/// Evaluates the victory conditions of a game.
#[derive(Clone, Debug)]
pub struct VictoryEvaluator {
    config: VictoryConfig,
    conditions: Vec<VictoryCondition>,
}

impl VictoryEvaluator {
    /// Build an evaluator, rejecting configurations it could not honor.
    pub fn new(config: VictoryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let conditions = if config.check_victory {
            config.enabled_conditions()
        } else {
            Vec::new()
        };
        Ok(Self { config, conditions })
    }

    #[must_use]
    pub fn config(&self) -> &VictoryConfig {
        &self.config
    }

    /// Optional conditions in evaluation order.
    #[must_use]
    pub fn conditions(&self) -> &[VictoryCondition] {
        &self.conditions
    }

    /// Decide whether, and who, has won.
    pub fn evaluate<G: GameView + ?Sized>(&self, game: &G) -> VictoryResult {
        let forced = VictoryCondition::ForceVictory.evaluate(game);
        if forced.is_decided() {
            info!(
                player = ?forced.sole_winning_player(),
                team = ?forced.sole_winning_team(),
                "game decided by concession"
            );
            return forced;
        }

        if !self.config.check_victory {
            return forced;
        }

        let combined = self.combine(game);
        if combined.high_score() >= self.config.achievement_threshold {
            let mut result = combined;
            result.set_decided(true);
            info!(
                high_score = result.high_score(),
                players = ?result.winning_players(),
                teams = ?result.winning_teams(),
                "game decided by victory conditions"
            );
            return result;
        }

        if game.timer_expired() {
            info!("game timer expired, declaring a draw");
            return VictoryResult::decided();
        }

        let last_man = VictoryCondition::LastManStanding.evaluate(game);
        if last_man.is_decided() {
            info!(draw = last_man.is_draw(), "game decided by last man standing");
            return last_man;
        }

        debug!(high_score = combined.high_score(), "game undecided");
        combined
    }

    /// Sum every condition's fragment, then normalize by the number of
    /// enabled conditions.
    fn combine<G: GameView + ?Sized>(&self, game: &G) -> VictoryResult {
        let mut combined = VictoryResult::undecided();

        for condition in &self.conditions {
            let fragment = condition.evaluate(game);
            combined.extend_reports(fragment.reports());
            for player in fragment.players() {
                let total = combined.player_score(player) + fragment.player_score(player);
                combined.add_player_score(player, total);
            }
            for team in fragment.teams() {
                let total = combined.team_score(team) + fragment.team_score(team);
                combined.add_team_score(team, total);
            }
        }

        let count = self.conditions.len() as f64;
        for player in combined.players() {
            let normalized = combined.player_score(player) / count;
            combined.add_player_score(player, normalized);
        }
        for team in combined.teams() {
            let normalized = combined.team_score(team) / count;
            combined.add_team_score(team, normalized);
        }

        combined
    }
}
