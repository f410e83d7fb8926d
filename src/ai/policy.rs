//! Action policies for AI seats.

use crate::cards::{Card, CardType, SorteCard};
use crate::core::{Action, GameRng, MatchState, PlayerId};
use crate::effects::PlusTwoChoice;
use crate::rules::{BiomaRules, RulesEngine};

/// Picks the primary action for a seat.
///
/// The controller only asks during `ActionPending` for the current seat,
/// and it refuses illegal answers with an error.
pub trait Policy {
    fn choose(&mut self, state: &MatchState, player: PlayerId) -> Action;
}

/// The fixed priority procedure used by the computer opponents.
///
/// 1. Play the first own-biome animal or fauna card in hand.
/// 2. Play the first usable Sorte card. Pulo+1 goes after the opponent
///    with the largest biome zone, +2 always draws twice.
/// 3. Draw.
/// 4. Steal from the seat holding the most cards.
/// 5. Pass.
///
/// Ties go to the lowest seat.
#[derive(Clone, Copy, Debug, Default)]
pub struct PriorityPolicy;

impl PriorityPolicy {
    fn sorte_action(state: &MatchState, player: PlayerId, card: &Card) -> Option<Action> {
        let seat = &state.players[player];
        let sorte = card.sorte_effect()?;
        if sorte.held_until_turn_end() && seat.active_card.is_some() {
            return None;
        }

        match sorte {
            SorteCard::PuloMaisUm => {
                Self::leader(state, player).map(|target| Action::sorte_targeting(card.id, target))
            }
            SorteCard::MaisDois => Some(Action::plus_two(card.id, PlusTwoChoice::DrawTwo)),
            SorteCard::Piedade | SorteCard::Devolve => Some(Action::sorte(card.id)),
        }
    }

    /// Opponent with the largest biome zone that can take a Pulo+1.
    fn leader(state: &MatchState, player: PlayerId) -> Option<PlayerId> {
        state
            .players
            .iter()
            .filter(|(id, other)| {
                *id != player && other.effects.pulo_mais_um.is_none() && other.active_card.is_none()
            })
            .fold(None, |best: Option<(PlayerId, usize)>, (id, other)| {
                let size = other.biome_zone.len();
                match best {
                    Some((_, top)) if top >= size => best,
                    _ => Some((id, size)),
                }
            })
            .map(|(id, _)| id)
    }

    /// Valid steal target holding the most cards.
    fn richest_target(state: &MatchState, player: PlayerId) -> Option<PlayerId> {
        state
            .valid_steal_targets(player)
            .into_iter()
            .fold(None, |best: Option<(PlayerId, usize)>, id| {
                let size = state.players[id].hand.len();
                match best {
                    Some((_, top)) if top >= size => best,
                    _ => Some((id, size)),
                }
            })
            .map(|(id, _)| id)
    }
}

impl Policy for PriorityPolicy {
    fn choose(&mut self, state: &MatchState, player: PlayerId) -> Action {
        let Some(seat) = state.players.get(player) else {
            return Action::Pass;
        };

        if let Some(card) = seat.hand.iter().find(|card| card.fits_zone(seat.biome)) {
            return Action::PlayCard { card: card.id };
        }

        let sorte = seat
            .hand
            .iter()
            .filter(|card| card.card_type == CardType::Sorte)
            .find_map(|card| Self::sorte_action(state, player, card));
        if let Some(action) = sorte {
            return action;
        }

        if !state.deck.is_empty() {
            return Action::Draw;
        }

        match Self::richest_target(state, player) {
            Some(from) => Action::Steal { from, index: None },
            None => Action::Pass,
        }
    }
}

/// Uniform choice among the legal actions.
///
/// Useful for exploring odd corners of the rules in simulations.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rules: BiomaRules,
    rng: GameRng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rules: BiomaRules::default(),
            rng: GameRng::new(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose(&mut self, state: &MatchState, player: PlayerId) -> Action {
        let actions = self.rules.legal_actions(state, player);
        self.rng.choose(&actions).cloned().unwrap_or(Action::Pass)
    }
}
