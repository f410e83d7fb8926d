//! Effect resolution: applying Azar and Sorte cards to a match.
//!
//! Both entry points validate everything they can before the first
//! mutation. Once a card starts resolving, the individual steps that find
//! nothing to do (no matching card, source too small, empty deck) become
//! report lines instead of errors.

use crate::cards::{AzarCard, Card, SorteCard};
use crate::core::{Acquisition, CardId, MatchState, PlayerId};
use crate::error::{Result, RuleError};

use super::{EffectEvent, EffectReport, PlusTwoChoice, StealPick};

/// One draw or steal inside a +2.
#[derive(Clone, Copy, Debug)]
enum Step {
    Draw,
    Steal(StealPick),
}

/// Resolves special cards on match state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve an Azar card sitting in `player`'s hand.
    ///
    /// The card is discarded first, then its effect applies to `player`.
    pub fn apply_azar(
        state: &mut MatchState,
        player: PlayerId,
        card: CardId,
    ) -> Result<EffectReport> {
        let seat = state.player(player)?;
        let azar = seat
            .hand
            .find(card)
            .ok_or(RuleError::CardNotInHand { card, player })?
            .azar_effect()
            .ok_or(RuleError::NotPlayable(card))?;

        let removed = state
            .player_mut(player)?
            .hand
            .remove(card)
            .ok_or(RuleError::CardNotInHand { card, player })?;
        let mut report = EffectReport::new(removed.clone());
        state.discard(removed);
        report.event(EffectEvent::Discarded { card });

        match azar {
            AzarCard::Devolve => Self::azar_devolve(state, player, &mut report),
            AzarCard::Pulo => Self::azar_pulo(state, player, &mut report),
            AzarCard::Piedade => Self::azar_piedade(state, player, &mut report),
        }

        Ok(report)
    }

    fn azar_devolve(state: &mut MatchState, player: PlayerId, report: &mut EffectReport) {
        let name = state.players[player].name.clone();
        let own = state.players[player].first_own_animal();

        match own.and_then(|card| state.return_card_to_deck(player, card).ok()) {
            Some(returned) => {
                state.players[player].effects.devolve_pending = false;
                report.event(EffectEvent::ReturnedToDeck {
                    card: returned.id,
                    player,
                });
                report.line(format!("{name} returned {returned} to the deck (resolved immediately)"));
            }
            None => {
                state.players[player].effects.latch_devolve();
                report.event(EffectEvent::DevolveLatched { player });
                report.line(format!(
                    "{name} must return a {} card as soon as they get one",
                    state.players[player].biome
                ));
            }
        }
    }

    fn azar_pulo(state: &mut MatchState, player: PlayerId, report: &mut EffectReport) {
        let seat = &mut state.players[player];
        seat.effects.latch_skip();
        report.event(EffectEvent::SkipLatched { player });
        report.line(format!("{} will skip the next turn", seat.name));
    }

    fn azar_piedade(state: &mut MatchState, player: PlayerId, report: &mut EffectReport) {
        let others: Vec<PlayerId> = state.players.player_ids().filter(|&p| p != player).collect();

        for other in others {
            let biome = state.players[other].biome;
            let Some(card) = state.players[player].first_animal_of(biome) else {
                continue;
            };
            if let Some(given) = state.give_card(player, other, card) {
                report.event(EffectEvent::Transferred {
                    card: given.id,
                    from: player,
                    to: other,
                });
                report.line(format!("gave {given} to {}", state.players[other].name));
            }
        }

        if report.lines.is_empty() {
            report.line("no cards to give");
        }
    }

    /// Play a Sorte card from `player`'s hand.
    ///
    /// Pulo+1 needs `target`; +2 needs `choice`. Piedade, Devolve and +2
    /// occupy the player's active slot until turn end, so they are refused
    /// while the slot is taken.
    pub fn play_sorte(
        state: &mut MatchState,
        player: PlayerId,
        card: CardId,
        target: Option<PlayerId>,
        choice: Option<&PlusTwoChoice>,
    ) -> Result<EffectReport> {
        let sorte = Self::check_sorte(state, player, card, target, choice)?;

        let played = state
            .player_mut(player)?
            .hand
            .remove(card)
            .ok_or(RuleError::CardNotInHand { card, player })?;
        let mut report = EffectReport::new(played.clone());

        match (sorte, target, choice) {
            (SorteCard::Piedade, _, _) => {
                state.players[player].active_card = Some(played);
                Self::sorte_piedade(state, player, &mut report);
            }
            (SorteCard::Devolve, _, _) => {
                state.players[player].active_card = Some(played);
                Self::sorte_devolve(state, player, &mut report);
            }
            (SorteCard::PuloMaisUm, Some(target), _) => {
                Self::sorte_pulo_mais_um(state, player, target, played, &mut report);
            }
            (SorteCard::MaisDois, _, Some(choice)) => {
                state.players[player].active_card = Some(played);
                Self::sorte_mais_dois(state, player, choice, &mut report)?;
            }
            // Ruled out by check_sorte; put the card back untouched.
            _ => {
                state.players[player].hand.push_top(played);
                return Err(RuleError::MissingTarget);
            }
        }

        Ok(report)
    }

    fn check_sorte(
        state: &MatchState,
        player: PlayerId,
        card: CardId,
        target: Option<PlayerId>,
        choice: Option<&PlusTwoChoice>,
    ) -> Result<SorteCard> {
        let seat = state.player(player)?;
        let sorte = seat
            .hand
            .find(card)
            .ok_or(RuleError::CardNotInHand { card, player })?
            .sorte_effect()
            .ok_or(RuleError::NotSorte(card))?;

        if sorte.held_until_turn_end() && seat.active_card.is_some() {
            return Err(RuleError::ActiveCardInPlay(player));
        }

        match sorte {
            SorteCard::PuloMaisUm => {
                let target = target.ok_or(RuleError::MissingTarget)?;
                if target == player {
                    return Err(RuleError::SelfTarget);
                }
                let victim = state.player(target)?;
                if victim.effects.pulo_mais_um.is_some() {
                    return Err(RuleError::ObligationPending(target));
                }
                if victim.active_card.is_some() {
                    return Err(RuleError::ActiveCardInPlay(target));
                }
            }
            SorteCard::MaisDois => {
                let choice = choice.ok_or(RuleError::MissingPlusTwoChoice)?;
                for pick in choice.picks() {
                    if pick.from == player {
                        return Err(RuleError::SelfTarget);
                    }
                    state.player(pick.from)?;
                }
            }
            SorteCard::Piedade | SorteCard::Devolve => {}
        }

        Ok(sorte)
    }

    fn sorte_piedade(state: &mut MatchState, player: PlayerId, report: &mut EffectReport) {
        let biome = state.players[player].biome;
        let others: Vec<PlayerId> = state.players.player_ids().filter(|&p| p != player).collect();

        for other in others {
            let Some(card) = state.players[other].first_animal_of(biome) else {
                continue;
            };
            if let Some(received) = state.give_card(other, player, card) {
                report.event(EffectEvent::Transferred {
                    card: received.id,
                    from: other,
                    to: player,
                });
                report.line(format!(
                    "received {received} from {}",
                    state.players[other].name
                ));
            }
        }

        if report.lines.is_empty() {
            report.line("nobody had a matching card");
        }
    }

    fn sorte_devolve(state: &mut MatchState, player: PlayerId, report: &mut EffectReport) {
        let others: Vec<PlayerId> = state.players.player_ids().filter(|&p| p != player).collect();

        for other in others {
            let Some(card) = state.players[other].first_own_animal() else {
                continue;
            };
            if let Ok(returned) = state.return_card_to_deck(other, card) {
                report.event(EffectEvent::ReturnedToDeck {
                    card: returned.id,
                    player: other,
                });
                report.line(format!(
                    "{} returned {returned}",
                    state.players[other].name
                ));
            }
        }

        if report.lines.is_empty() {
            report.line("nobody had cards to return");
        }
    }

    fn sorte_pulo_mais_um(
        state: &mut MatchState,
        player: PlayerId,
        target: PlayerId,
        played: Card,
        report: &mut EffectReport,
    ) {
        let biome = state.players[player].biome;
        let target_name = state.players[target].name.clone();

        let given = state.players[target]
            .first_animal_of(biome)
            .and_then(|card| state.give_card(target, player, card));

        match given {
            Some(given) => {
                state.players[target].effects.latch_skip();
                report.event(EffectEvent::Transferred {
                    card: given.id,
                    from: target,
                    to: player,
                });
                report.event(EffectEvent::SkipLatched { player: target });
                report.event(EffectEvent::Discarded { card: played.id });
                report.line(format!("{target_name} handed over {given} and loses the next turn"));
                state.discard(played);
            }
            None => {
                let seat = &mut state.players[target];
                seat.effects.latch_pulo_mais_um(player);
                seat.active_card = Some(played);
                report.event(EffectEvent::PuloMaisUmLatched {
                    target,
                    from: player,
                });
                report.line(format!(
                    "{target_name} will hand over a card and lose a turn once they have one"
                ));
            }
        }
    }

    fn sorte_mais_dois(
        state: &mut MatchState,
        player: PlayerId,
        choice: &PlusTwoChoice,
        report: &mut EffectReport,
    ) -> Result<()> {
        let steps: Vec<Step> = match *choice {
            PlusTwoChoice::DrawTwo => vec![Step::Draw, Step::Draw],
            PlusTwoChoice::StealTwo { first, second } => std::iter::once(Step::Steal(first))
                .chain(second.map(Step::Steal))
                .collect(),
            PlusTwoChoice::DrawOneStealOne { steal } => vec![Step::Draw, Step::Steal(steal)],
        };

        for step in steps {
            let acquired = match step {
                Step::Draw => {
                    if state.deck.is_empty() {
                        report.line("the deck is empty");
                        continue;
                    }
                    let acquired = state.draw_card(player)?;
                    report.event(EffectEvent::Drew {
                        card: acquired.card.id,
                        player,
                    });
                    report.line("drew 1 card");
                    acquired
                }
                Step::Steal(pick) => match Self::steal_step(state, player, pick) {
                    Some(acquired) => {
                        report.event(EffectEvent::Stole {
                            card: acquired.card.id,
                            from: pick.from,
                            to: player,
                        });
                        report.line(format!("stole 1 card from {}", state.players[pick.from].name));
                        acquired
                    }
                    None => {
                        report.line(format!(
                            "could not steal from {}",
                            state.players[pick.from].name
                        ));
                        continue;
                    }
                },
            };

            Self::after_gain(state, player, &acquired, report)?;
        }

        Ok(())
    }

    /// A +2 steal. Sources that no longer hold two cards, or no longer have
    /// the picked position, are skipped.
    fn steal_step(state: &mut MatchState, player: PlayerId, pick: StealPick) -> Option<Acquisition> {
        match pick.index {
            Some(index) => state.steal_specific_card(pick.from, player, index).ok(),
            None => state.steal_card(pick.from, player).ok(),
        }
    }

    /// Report a pending Devolve that consumed the card, or resolve an Azar.
    fn after_gain(
        state: &mut MatchState,
        player: PlayerId,
        acquired: &Acquisition,
        report: &mut EffectReport,
    ) -> Result<()> {
        if acquired.devolved {
            report.event(EffectEvent::ReturnedToDeck {
                card: acquired.card.id,
                player,
            });
            report.line(format!(
                "pending Devolve returned {} to the deck",
                acquired.card
            ));
        } else if acquired.is_azar() {
            let nested = Self::apply_azar(state, player, acquired.card.id)?;
            report.nested.push(nested);
        }
        Ok(())
    }
}
