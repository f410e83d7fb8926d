//! Deferred obligations.
//!
//! Some effects cannot always resolve when they are played: Azar Devolve
//! needs an own-biome animal in hand, Pulo+1 needs the target to hold a card
//! of the attacker's biome, and Pulo takes effect on the next turn. Each of
//! these leaves a latch on the affected seat.
//!
//! ## Key Components
//!
//! - [`Obligations`]: Per-seat latch set (`skip_turn`, `pulo_mais_um`,
//!   `devolve_pending`)
//! - [`on_hand_gain`]: Checked after every draw and steal
//! - [`on_turn_start`]: Checked before a seat acts
//!
//! Latches are only ever evaluated at those two points.
//!
//! ## Example Usage
//!
//! ```
//! use bioma::cards::Catalog;
//! use bioma::core::{MatchConfig, MatchState, PlayerId};
//! use bioma::triggers::{on_turn_start, SkipReason, TurnStartOutcome};
//!
//! let mut state = MatchState::new(&MatchConfig::new(2), &Catalog::standard()).unwrap();
//! let p0 = PlayerId::new(0);
//! state.players[p0].effects.latch_skip();
//!
//! let report = on_turn_start(&mut state, p0).unwrap();
//! assert_eq!(report.outcome, TurnStartOutcome::Skipped(SkipReason::Pulo));
//! assert!(!state.players[p0].effects.skip_turn);
//! ```

mod checks;
mod obligation;

pub use checks::{on_hand_gain, on_turn_start, SkipReason, TurnStartOutcome, TurnStartReport};
pub use obligation::{Obligations, PuloMaisUm};
