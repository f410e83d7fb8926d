//! Special-card effects.
//!
//! - `EffectResolver`: Applies Azar cards (on acquisition) and Sorte cards
//!   (played by choice) to match state
//! - `PlusTwoChoice` / `StealPick`: The decisions a +2 needs
//! - `EffectReport` / `EffectEvent`: What happened, for code and for people
//!
//! ## Azar
//!
//! Devolve returns an own-biome animal to the deck (or latches until one
//! shows up), Pulo skips the next turn, Piedade hands one matching card to
//! each opponent.
//!
//! ## Sorte
//!
//! Piedade collects matching cards from opponents, Devolve makes every
//! opponent return an own-biome animal, Pulo+1 takes a card from a target
//! and skips their turn (possibly deferred), +2 draws and/or steals twice.

mod effect;
mod resolver;

pub use effect::{EffectEvent, EffectReport, PlusTwoChoice, StealPick};
pub use resolver::EffectResolver;
