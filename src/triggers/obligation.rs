//! Per-seat obligation latches.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// A pending Pulo+1: hand a card of `from`'s biome to `from` and lose a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuloMaisUm {
    pub from: PlayerId,
}

/// Deferred effects owed by one seat.
///
/// Each latch holds at most one obligation. Latching while one is already
/// pending is refused (the `latch_*` methods return `false`) rather than
/// overwriting it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Obligations {
    /// Lose the next turn.
    pub skip_turn: bool,
    pub pulo_mais_um: Option<PuloMaisUm>,
    /// Return the next own-biome animal card that enters the hand.
    pub devolve_pending: bool,
}

impl Obligations {
    /// No latch is set.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        !self.skip_turn && self.pulo_mais_um.is_none() && !self.devolve_pending
    }

    /// Set the skip latch. Returns `false` if it was already set.
    pub fn latch_skip(&mut self) -> bool {
        !std::mem::replace(&mut self.skip_turn, true)
    }

    /// Set the Devolve latch. Returns `false` if it was already set.
    pub fn latch_devolve(&mut self) -> bool {
        !std::mem::replace(&mut self.devolve_pending, true)
    }

    /// Set the Pulo+1 latch. Returns `false` (leaving the existing origin
    /// untouched) if one is already pending.
    pub fn latch_pulo_mais_um(&mut self, from: PlayerId) -> bool {
        if self.pulo_mais_um.is_some() {
            return false;
        }
        self.pulo_mais_um = Some(PuloMaisUm { from });
        true
    }

    /// Clear the skip latch, returning whether it was set.
    pub fn take_skip(&mut self) -> bool {
        std::mem::take(&mut self.skip_turn)
    }
}
