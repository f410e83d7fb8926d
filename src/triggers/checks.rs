//! The two points where pending obligations are evaluated.
//!
//! - [`on_hand_gain`] runs right after a draw or steal puts a card into a
//!   hand. Only the Devolve latch reacts to it.
//! - [`on_turn_start`] runs before a seat may act, checking Pulo, then
//!   Pulo+1, then Devolve.

use crate::cards::{Card, SorteCard};
use crate::core::{CardId, MatchState, PlayerId};
use crate::error::Result;

/// Why a turn was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// An Azar Pulo was pending.
    Pulo,
    /// A pending Pulo+1 resolved: `card` went to `to`.
    PuloMaisUm { card: Card, to: PlayerId },
}

/// What happened at turn start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnStartOutcome {
    /// The seat may act. `devolved` is the card a pending Devolve returned.
    Proceed { devolved: Option<Card> },
    /// The seat loses this turn.
    Skipped(SkipReason),
}

/// Turn-start report for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnStartReport {
    pub player: PlayerId,
    pub outcome: TurnStartOutcome,
    pub lines: Vec<String>,
}

impl TurnStartReport {
    #[must_use]
    pub fn skipped(&self) -> bool {
        matches!(self.outcome, TurnStartOutcome::Skipped(_))
    }
}

/// Resolve a pending Devolve against a card that just entered `player`'s hand.
///
/// If the latch is set and the card is an animal of the seat's own biome,
/// the card goes back into the deck (reshuffled) and the latch clears.
/// Returns the returned card.
pub fn on_hand_gain(state: &mut MatchState, player: PlayerId, card: CardId) -> Option<Card> {
    let seat = state.players.get(player)?;
    if !seat.effects.devolve_pending {
        return None;
    }
    if !seat.hand.find(card)?.is_animal_of(seat.biome) {
        return None;
    }

    let returned = state.return_card_to_deck(player, card).ok()?;
    state.players[player].effects.devolve_pending = false;
    Some(returned)
}

/// Evaluate `player`'s latches before the turn's action.
pub fn on_turn_start(state: &mut MatchState, player: PlayerId) -> Result<TurnStartReport> {
    let name = state.player(player)?.name.clone();

    if state.players[player].effects.take_skip() {
        return Ok(TurnStartReport {
            player,
            outcome: TurnStartOutcome::Skipped(SkipReason::Pulo),
            lines: vec![format!("{name} skips the turn (Pulo)")],
        });
    }

    if let Some(pulo) = state.players[player].effects.pulo_mais_um {
        match state.players.get(pulo.from).map(|origin| (origin.biome, origin.name.clone())) {
            None => {
                state.players[player].effects.pulo_mais_um = None;
                discard_held_pulo(state, player);
            }
            Some((origin_biome, origin_name)) => {
                if let Some(card) = state.players[player].first_animal_of(origin_biome) {
                    if let Some(given) = state.give_card(player, pulo.from, card) {
                        let effects = &mut state.players[player].effects;
                        effects.pulo_mais_um = None;
                        effects.skip_turn = false;
                        discard_held_pulo(state, player);

                        return Ok(TurnStartReport {
                            player,
                            lines: vec![
                                format!("{name} handed {given} to {origin_name}"),
                                format!("{name} loses the turn"),
                            ],
                            outcome: TurnStartOutcome::Skipped(SkipReason::PuloMaisUm {
                                card: given,
                                to: pulo.from,
                            }),
                        });
                    }
                }
            }
        }
    }

    let mut lines = Vec::new();
    let mut devolved = None;
    let seat = &state.players[player];
    if seat.effects.devolve_pending {
        if let Some(card) = seat.first_own_animal() {
            if let Ok(returned) = state.return_card_to_deck(player, card) {
                state.players[player].effects.devolve_pending = false;
                lines.push(format!("{name} returned {returned} to the deck"));
                devolved = Some(returned);
            }
        }
    }

    Ok(TurnStartReport {
        player,
        outcome: TurnStartOutcome::Proceed { devolved },
        lines,
    })
}

/// Discard the Pulo+1 card a target was holding.
fn discard_held_pulo(state: &mut MatchState, player: PlayerId) {
    let seat = &mut state.players[player];
    if seat
        .active_card
        .as_ref()
        .and_then(Card::sorte_effect)
        .is_some_and(|s| s == SorteCard::PuloMaisUm)
    {
        if let Some(card) = seat.active_card.take() {
            state.discard(card);
        }
    }
}
