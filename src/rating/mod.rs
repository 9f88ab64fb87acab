//! Player ratings.
//!
//! - `elo`: the multiplayer Elo arithmetic and K-factor tiers
//! - `store`: per-player rating records, keyed by name
//! - `engine`: applies a decided `VictoryResult` to a roster
//! - `event`: rating change notifications

pub mod elo;
pub mod store;
pub mod engine;
pub mod event;

pub use elo::{find_k, DEFAULT_RATING};
pub use store::{RatingRecord, RatingStore};
pub use engine::RatingEngine;
pub use event::{RatingChange, RatingListener};
