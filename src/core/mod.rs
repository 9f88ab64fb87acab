//! Core types: player identity, the read-only game view, configuration.
//!
//! Everything the outcome engine needs to know about a running game goes
//! through these types. The simulation itself stays outside.

pub mod player;
pub mod state;
pub mod config;

pub use player::{Player, PlayerId, TeamId};
pub use state::{ForceStats, ForcedVictory, GameSnapshot, GameView, Roster};
pub use config::VictoryConfig;
