//! Rules engine: action legality and resolution.
//!
//! `RulesEngine` separates the rules from the state they act on:
//! - What actions are legal
//! - How actions modify state
//! - When the match is over
//!
//! `BiomaRules` is the implementation the `TurnController` drives.

use crate::cards::{Card, CardType, SorteCard};
use crate::core::{Acquisition, Action, MatchState, PlayerId};
use crate::effects::{EffectReport, EffectResolver, PlusTwoChoice, StealPick};
use crate::error::{Result, RuleError};

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// First seat to complete its biome zone.
    Winner(PlayerId),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
        }
    }
}

/// A draw or steal, with whatever it set off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gain {
    pub acquisition: Acquisition,
    /// Resolution of the card if it was an Azar.
    pub azar: Option<EffectReport>,
    /// The card went straight into the biome zone.
    pub auto_placed: bool,
}

/// What a primary action did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Played { card: Card },
    Sorte(EffectReport),
    Drew(Gain),
    Stole(Gain),
    Passed,
}

/// Structured result of one primary action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub player: PlayerId,
    pub action: Action,
    pub outcome: ActionOutcome,
    /// Narrative for the presentation layer.
    pub lines: Vec<String>,
    /// Set when this action won the match.
    pub winner: Option<PlayerId>,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Empty if the player can't act right now
/// - `apply_action`: Must leave the state untouched on `Err`
/// - `is_terminal`: `None` while the match continues
pub trait RulesEngine {
    /// Every legal primary action for `player`.
    fn legal_actions(&self, state: &MatchState, player: PlayerId) -> Vec<Action>;

    /// Apply one primary action, consuming the turn's action.
    fn apply_action(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        action: &Action,
    ) -> Result<Resolution>;

    /// Check if the match is over.
    fn is_terminal(&self, state: &MatchState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Whether `action` is among the legal actions.
    ///
    /// Steals and +2 picks at specific hand positions are legal even though
    /// `legal_actions` lists only their random-pick form, as long as the
    /// position exists in the source's hand right now.
    fn is_legal(&self, state: &MatchState, player: PlayerId, action: &Action) -> bool {
        random_pick_form(state, action)
            .is_some_and(|action| self.legal_actions(state, player).contains(&action))
    }
}

/// `action` with every positional steal pick replaced by a random one.
///
/// `None` when a position is outside the source's current hand.
fn random_pick_form(state: &MatchState, action: &Action) -> Option<Action> {
    let unpick = |pick: StealPick| -> Option<StealPick> {
        let size = state.players.get(pick.from)?.hand.len();
        match pick.index {
            Some(index) if index >= size => None,
            _ => Some(StealPick::random(pick.from)),
        }
    };

    match action {
        Action::Steal { from, index } => {
            let pick = unpick(StealPick {
                from: *from,
                index: *index,
            })?;
            Some(Action::Steal {
                from: pick.from,
                index: None,
            })
        }
        Action::PlaySorte {
            card,
            target,
            choice: Some(choice),
        } => {
            let choice = match *choice {
                PlusTwoChoice::DrawTwo => PlusTwoChoice::DrawTwo,
                PlusTwoChoice::StealTwo { first, second } => PlusTwoChoice::StealTwo {
                    first: unpick(first)?,
                    second: match second {
                        Some(pick) => Some(unpick(pick)?),
                        None => None,
                    },
                },
                PlusTwoChoice::DrawOneStealOne { steal } => PlusTwoChoice::DrawOneStealOne {
                    steal: unpick(steal)?,
                },
            };
            Some(Action::PlaySorte {
                card: *card,
                target: *target,
                choice: Some(choice),
            })
        }
        _ => Some(action.clone()),
    }
}

/// The Bioma rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BiomaRules {
    /// Auto-place a completing card for human seats.
    pub auto_place: bool,
}

impl BiomaRules {
    #[must_use]
    pub fn new(auto_place: bool) -> Self {
        Self { auto_place }
    }

    fn check_turn(state: &MatchState, player: PlayerId) -> Result<()> {
        if state.is_over() {
            return Err(RuleError::MatchOver);
        }
        state.player(player)?;
        if player != state.current_player {
            return Err(RuleError::NotYourTurn(player));
        }
        if state.action_taken {
            return Err(RuleError::ActionAlreadyTaken);
        }
        Ok(())
    }

    /// Actions other than `Pass`, in the order the AI would consider them.
    fn primary_actions(state: &MatchState, player: PlayerId) -> Vec<Action> {
        let seat = &state.players[player];
        let targets = state.valid_steal_targets(player);
        let mut actions = Vec::new();

        for card in seat.hand.iter() {
            match card.card_type {
                CardType::Animal | CardType::Fauna if state.can_play_card(card, player) => {
                    actions.push(Action::PlayCard { card: card.id });
                }
                CardType::Sorte => {
                    let Some(sorte) = card.sorte_effect() else {
                        continue;
                    };
                    if sorte.held_until_turn_end() && seat.active_card.is_some() {
                        continue;
                    }
                    match sorte {
                        SorteCard::Piedade | SorteCard::Devolve => {
                            actions.push(Action::sorte(card.id));
                        }
                        SorteCard::PuloMaisUm => {
                            for (id, other) in state.players.iter() {
                                if id != player
                                    && other.effects.pulo_mais_um.is_none()
                                    && other.active_card.is_none()
                                {
                                    actions.push(Action::sorte_targeting(card.id, id));
                                }
                            }
                        }
                        SorteCard::MaisDois => {
                            actions.push(Action::plus_two(card.id, PlusTwoChoice::DrawTwo));
                            for &first in &targets {
                                actions.push(Action::plus_two(
                                    card.id,
                                    PlusTwoChoice::DrawOneStealOne {
                                        steal: StealPick::random(first),
                                    },
                                ));
                                for &second in &targets {
                                    actions.push(Action::plus_two(
                                        card.id,
                                        PlusTwoChoice::StealTwo {
                                            first: StealPick::random(first),
                                            second: Some(StealPick::random(second)),
                                        },
                                    ));
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        if !state.deck.is_empty() {
            actions.push(Action::Draw);
        }
        for from in targets {
            actions.push(Action::Steal { from, index: None });
        }

        actions
    }

    /// Resolve what a draw or steal set off: Azar effects and auto-place.
    fn settle_gain(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        acquisition: Acquisition,
        lines: &mut Vec<String>,
    ) -> Result<Gain> {
        let name = state.players[player].name.clone();
        let card = acquisition.card.clone();

        if acquisition.devolved {
            lines.push(format!("{name} triggered Azar Devolve"));
            lines.push(format!("returned {card} to the deck"));
            return Ok(Gain {
                acquisition,
                azar: None,
                auto_placed: false,
            });
        }

        if acquisition.is_azar() {
            let report = EffectResolver::apply_azar(state, player, card.id)?;
            lines.push(format!("it was Azar: {card}"));
            lines.extend(report.all_lines());
            return Ok(Gain {
                acquisition,
                azar: Some(report),
                auto_placed: false,
            });
        }

        let auto_placed = self.auto_place && self.can_auto_place(state, player, &acquisition);
        if auto_placed {
            state.play_animal_card(player, card.id)?;
            lines.push(format!("{card} completed the biome automatically"));
        }

        Ok(Gain {
            acquisition,
            azar: None,
            auto_placed,
        })
    }

    /// A human seat one card short of the goal places a fitting card at once.
    fn can_auto_place(&self, state: &MatchState, player: PlayerId, acquisition: &Acquisition) -> bool {
        let seat = &state.players[player];
        seat.is_human
            && seat.biome_zone.len() + 1 == state.zone_goal
            && acquisition.card.fits_zone(seat.biome)
            && seat.hand.contains(acquisition.card.id)
    }
}

impl Default for BiomaRules {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RulesEngine for BiomaRules {
    fn legal_actions(&self, state: &MatchState, player: PlayerId) -> Vec<Action> {
        if Self::check_turn(state, player).is_err() {
            return Vec::new();
        }
        let actions = Self::primary_actions(state, player);
        if actions.is_empty() {
            vec![Action::Pass]
        } else {
            actions
        }
    }

    fn apply_action(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        action: &Action,
    ) -> Result<Resolution> {
        Self::check_turn(state, player)?;
        let name = state.players[player].name.clone();
        let mut lines = Vec::new();

        let outcome = match action {
            Action::PlayCard { card } => {
                let played = state.play_animal_card(player, *card)?;
                lines.push(format!("{name} played {played}"));
                ActionOutcome::Played { card: played }
            }
            Action::PlaySorte {
                card,
                target,
                choice,
            } => {
                let report =
                    EffectResolver::play_sorte(state, player, *card, *target, choice.as_ref())?;
                lines.push(format!("{name} used {}", report.card));
                lines.extend(report.all_lines());
                ActionOutcome::Sorte(report)
            }
            Action::Draw => {
                let acquisition = state.draw_card(player)?;
                lines.push(format!("{name} drew 1 card"));
                ActionOutcome::Drew(self.settle_gain(state, player, acquisition, &mut lines)?)
            }
            Action::Steal { from, index } => {
                let acquisition = match index {
                    Some(index) => state.steal_specific_card(*from, player, *index)?,
                    None => state.steal_card(*from, player)?,
                };
                lines.push(format!(
                    "{name} stole {} from {}",
                    acquisition.card, state.players[*from].name
                ));
                ActionOutcome::Stole(self.settle_gain(state, player, acquisition, &mut lines)?)
            }
            Action::Pass => {
                if !Self::primary_actions(state, player).is_empty() {
                    return Err(RuleError::CannotPass);
                }
                lines.push(format!("{name} has no move and passes"));
                ActionOutcome::Passed
            }
        };

        state.action_taken = true;
        state.selected_card = None;
        state.record(player, action.clone());

        let winner = state.check_win(player).then_some(player);
        if let Some(winner) = winner {
            state.winner = Some(winner);
            lines.push(format!("{name} completed the biome and wins"));
        }

        debug_assert!(
            state.integrity_check().is_ok(),
            "card integrity violated: {:?}",
            state.integrity_check()
        );

        Ok(Resolution {
            player,
            action: action.clone(),
            outcome,
            lines,
            winner,
        })
    }

    fn is_terminal(&self, state: &MatchState) -> Option<GameResult> {
        state.winner.map(GameResult::Winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{AzarCard, Biome, Card};
    use crate::core::{CardId, GameRng, Player, PlayerMap};
    use crate::zones::Pile;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn table(deck: Vec<Card>) -> MatchState {
        let players = PlayerMap::from_vec(vec![
            Player::new(P0, "Ana", Biome::Cerrado, true),
            Player::new(P1, "Beto", Biome::Pampa, false),
        ]);
        MatchState::from_parts(
            players,
            Pile::from_cards(deck),
            Pile::new(),
            vec![Biome::Cerrado, Biome::Pampa],
            8,
            GameRng::new(2),
        )
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(P1);
        assert!(!result.is_winner(P0));
        assert!(result.is_winner(P1));
    }

    #[test]
    fn test_only_current_player_acts() {
        let rules = BiomaRules::default();
        let mut state = table(vec![Card::fauna(CardId(1))]);

        assert!(rules.legal_actions(&state, P1).is_empty());
        assert_eq!(
            rules.apply_action(&mut state, P1, &Action::Draw),
            Err(RuleError::NotYourTurn(P1))
        );
    }

    #[test]
    fn test_one_action_per_turn() {
        let rules = BiomaRules::default();
        let mut state = table(vec![Card::fauna(CardId(1)), Card::fauna(CardId(2))]);

        rules.apply_action(&mut state, P0, &Action::Draw).unwrap();
        assert!(state.action_taken);
        assert_eq!(
            rules.apply_action(&mut state, P0, &Action::Draw),
            Err(RuleError::ActionAlreadyTaken)
        );
        assert_eq!(state.deck.len(), 1);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_positional_steal_is_legal() {
        let rules = BiomaRules::default();
        let mut state = table(vec![Card::fauna(CardId(1))]);
        state.players[P1].hand.push_top(Card::fauna(CardId(10)));
        state.players[P1].hand.push_top(Card::fauna(CardId(11)));

        let at_first = Action::Steal {
            from: P1,
            index: Some(0),
        };
        let out_of_range = Action::Steal {
            from: P1,
            index: Some(2),
        };
        assert!(rules.is_legal(&state, P0, &at_first));
        assert!(!rules.is_legal(&state, P0, &out_of_range));
        assert!(!rules.is_legal(&state, P1, &at_first));

        rules.apply_action(&mut state, P0, &at_first).unwrap();
        assert!(state.players[P0].hand.contains(CardId(10)));
    }

    #[test]
    fn test_positional_plus_two_picks_are_legal() {
        let rules = BiomaRules::default();
        let mut state = table(vec![Card::fauna(CardId(1))]);
        state.players[P0]
            .hand
            .push_top(Card::sorte(CardId(5), SorteCard::MaisDois));
        state.players[P1].hand.push_top(Card::fauna(CardId(10)));
        state.players[P1].hand.push_top(Card::fauna(CardId(11)));

        let one_each = Action::plus_two(
            CardId(5),
            PlusTwoChoice::DrawOneStealOne {
                steal: StealPick::at(P1, 1),
            },
        );
        let steal_two = Action::plus_two(
            CardId(5),
            PlusTwoChoice::StealTwo {
                first: StealPick::at(P1, 0),
                second: Some(StealPick::at(P1, 1)),
            },
        );
        let beyond_hand = Action::plus_two(
            CardId(5),
            PlusTwoChoice::DrawOneStealOne {
                steal: StealPick::at(P1, 5),
            },
        );

        assert!(rules.is_legal(&state, P0, &one_each));
        assert!(rules.is_legal(&state, P0, &steal_two));
        assert!(!rules.is_legal(&state, P0, &beyond_hand));
    }

    #[test]
    fn test_pass_only_without_alternatives() {
        let rules = BiomaRules::default();
        let mut state = table(vec![Card::fauna(CardId(1))]);

        assert_eq!(
            rules.apply_action(&mut state, P0, &Action::Pass),
            Err(RuleError::CannotPass)
        );

        let mut empty = table(vec![]);
        assert_eq!(rules.legal_actions(&empty, P0), vec![Action::Pass]);
        let resolution = rules.apply_action(&mut empty, P0, &Action::Pass).unwrap();
        assert_eq!(resolution.outcome, ActionOutcome::Passed);
    }

    #[test]
    fn test_drawn_azar_resolves() {
        let rules = BiomaRules::default();
        let mut state = table(vec![Card::azar(CardId(1), AzarCard::Pulo)]);

        let resolution = rules.apply_action(&mut state, P0, &Action::Draw).unwrap();

        let ActionOutcome::Drew(gain) = resolution.outcome else {
            panic!("expected a draw");
        };
        assert!(gain.azar.is_some());
        assert!(state.players[P0].effects.skip_turn);
        assert_eq!(state.discard_pile.ids(), vec![CardId(1)]);
        assert!(state.players[P0].hand.is_empty());
    }

    #[test]
    fn test_auto_place_at_seven() {
        let rules = BiomaRules::default();
        let mut state = table(vec![Card::fauna(CardId(99))]);
        for i in 0..7 {
            state.players[P0]
                .biome_zone
                .push_top(Card::animal(CardId(i), "Ema", Biome::Cerrado));
        }

        let resolution = rules.apply_action(&mut state, P0, &Action::Draw).unwrap();

        assert_eq!(resolution.winner, Some(P0));
        assert_eq!(state.winner, Some(P0));
        assert_eq!(state.players[P0].biome_zone.len(), 8);
        assert_eq!(rules.is_terminal(&state), Some(GameResult::Winner(P0)));
    }

    #[test]
    fn test_no_auto_place_when_disabled() {
        let mut state = table(vec![Card::fauna(CardId(99))]);
        for i in 0..7 {
            state.players[P0]
                .biome_zone
                .push_top(Card::animal(CardId(i), "Ema", Biome::Cerrado));
        }

        let rules = BiomaRules::new(false);
        let resolution = rules.apply_action(&mut state, P0, &Action::Draw).unwrap();

        assert_eq!(resolution.winner, None);
        assert_eq!(state.players[P0].biome_zone.len(), 7);
        assert!(state.players[P0].hand.contains(CardId(99)));
    }

    #[test]
    fn test_legal_actions_listing() {
        let rules = BiomaRules::default();
        let mut state = table(vec![Card::fauna(CardId(50))]);
        state.players[P0].hand.push_top(Card::animal(CardId(1), "Ema", Biome::Cerrado));
        state.players[P0].hand.push_top(Card::animal(CardId(2), "Perdiz", Biome::Pampa));
        state.players[P0].hand.push_top(Card::azar(CardId(3), AzarCard::Pulo));
        state.players[P1].hand.push_top(Card::fauna(CardId(4)));
        state.players[P1].hand.push_top(Card::fauna(CardId(5)));

        let actions = rules.legal_actions(&state, P0);

        assert_eq!(
            actions,
            vec![
                Action::PlayCard { card: CardId(1) },
                Action::Draw,
                Action::Steal { from: P1, index: None },
            ]
        );
        assert!(rules.is_legal(&state, P0, &Action::Draw));
        assert!(!rules.is_legal(&state, P0, &Action::Pass));
    }
}
