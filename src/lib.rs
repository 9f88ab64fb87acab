//! # outcome-engine
//!
//! End-of-game outcome engine for a multiplayer session server.
//!
//! ## Design Principles
//!
//! 1. **Two calls, no callbacks**: The session calls
//!    `VictoryEvaluator::evaluate` on every trigger and, once the result is
//!    decided, `RatingEngine::apply_outcome`. Nothing registers itself
//!    anywhere.
//!
//! 2. **N-Player First**: Ties between any number of players or teams are
//!    first-class. Winners are derived from a high score with a tolerance.
//!
//! 3. **Never abort a live game**: Unknown players, draws and one-player
//!    sessions are no-ops, not errors. Bad configuration is rejected before
//!    the game starts.
//!
//! ## Architecture
//!
//! - **Victory conditions** are a tagged enum evaluated against a read-only
//!   `GameView`. Optional conditions report progress in `[0, 1]`; the
//!   evaluator sums and normalizes them.
//!
//! - **Ratings** live in an explicit `RatingStore` keyed by player name, so
//!   they survive reconnects. Updates use a multiplayer Elo formula with
//!   tiered K-factors and a floor at zero.
//!
//! ## Modules
//!
//! - `core`: Player identity, the game view, configuration
//! - `victory`: Victory results, conditions and the evaluator
//! - `rating`: Elo arithmetic, the rating store and engine
//! - `session`: Per-game glue running the two-call contract
//! - `error`: Configuration and store errors

pub mod core;
pub mod error;
pub mod victory;
pub mod rating;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Player, PlayerId, TeamId,
    ForceStats, ForcedVictory, GameSnapshot, GameView, Roster,
    VictoryConfig,
};

pub use crate::error::{ConfigError, StoreError};

pub use crate::victory::{
    ConditionKind, VictoryCondition, VictoryEvaluator, VictoryReport, VictoryResult,
};

pub use crate::rating::{
    RatingChange, RatingEngine, RatingListener, RatingRecord, RatingStore,
};

pub use crate::session::{OutcomeSession, SessionOutcome};
