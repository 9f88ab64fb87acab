//! Session glue: the two-call contract in one place.
//!
//! The hosting server owns one `OutcomeSession` per game. It forwards
//! "player added" and "turn ended / game ended" events; the session
//! evaluates victory and, the first time the game is decided, applies the
//! rating update to the live roster.

use tracing::{debug, info};

use crate::core::{GameSnapshot, Player, VictoryConfig};
use crate::error::ConfigError;
use crate::rating::{RatingChange, RatingEngine, RatingListener, RatingStore};
use crate::victory::{VictoryEvaluator, VictoryResult};

/// What an evaluation trigger produced.
#[derive(Clone, Debug)]
pub enum SessionOutcome {
    /// Nobody has won yet. Carries the current progress.
    Ongoing(VictoryResult),

    /// The game just ended; ratings were applied.
    Decided {
        result: VictoryResult,
        changes: Vec<RatingChange>,
    },

    /// The game had already ended earlier; nothing was applied.
    AlreadyDecided,
}

/// Victory evaluation plus rating update for one game.
#[derive(Debug)]
pub struct OutcomeSession {
    evaluator: VictoryEvaluator,
    ratings: RatingEngine,
    decided: bool,
}

impl OutcomeSession {
    /// Create a session over a rating table that outlives it.
    pub fn new(config: VictoryConfig, store: RatingStore) -> Result<Self, ConfigError> {
        Ok(Self {
            evaluator: VictoryEvaluator::new(config)?,
            ratings: RatingEngine::new(store),
            decided: false,
        })
    }

    #[must_use]
    pub fn evaluator(&self) -> &VictoryEvaluator {
        &self.evaluator
    }

    #[must_use]
    pub fn ratings(&self) -> &RatingEngine {
        &self.ratings
    }

    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.decided
    }

    /// A player joined (or rejoined) the game.
    pub fn on_player_added(&mut self, player: &mut Player) {
        info!(player = player.name(), "player added to rated game");
        self.ratings.register_player(player);
    }

    /// Evaluate the game and, once decided, rate it.
    pub fn on_game_event(
        &mut self,
        game: &mut GameSnapshot,
        listener: &mut dyn RatingListener,
    ) -> SessionOutcome {
        if self.decided {
            debug!("game already decided, ignoring trigger");
            return SessionOutcome::AlreadyDecided;
        }

        let result = self.evaluator.evaluate(&*game);
        if !result.is_decided() {
            return SessionOutcome::Ongoing(result);
        }

        self.decided = true;
        info!("victory reached, updating ratings");
        let changes = self
            .ratings
            .apply_outcome(&result, game.roster_mut().iter_mut(), listener);
        SessionOutcome::Decided { result, changes }
    }

    /// End the session, returning the rating table.
    #[must_use]
    pub fn into_store(self) -> RatingStore {
        self.ratings.into_store()
    }
}
