//! Rules and turn flow.
//!
//! - `RulesEngine`: Legal actions, action resolution, terminal check
//! - `BiomaRules`: The Bioma implementation of it
//! - `TurnController`: The turn state machine that owns the match
//!
//! The controller calls into `RulesEngine` for the one primary action of a
//! turn and handles the obligations at turn start and the cleanup at turn
//! end itself.

pub mod controller;
pub mod engine;

pub use controller::{Progress, TurnController, TurnEndReport, TurnPhase};
pub use engine::{ActionOutcome, BiomaRules, GameResult, Gain, Resolution, RulesEngine};
