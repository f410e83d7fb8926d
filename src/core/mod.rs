//! Core engine types: card ids, players, state, actions, RNG, configuration.
//!
//! Everything here is plain data plus the primitive card moves. Turn
//! sequencing sits on top of it in `rules`.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::{CardId, IdAllocator};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{MatchConfig, SeatConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use action::{Action, ActionRecord};
pub use state::{Acquisition, MatchState};
