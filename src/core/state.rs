//! Match state and its primitive operations.
//!
//! ## MatchState
//!
//! Everything one match owns:
//! - Seats (hands, biome zones, held Sorte cards, obligation latches)
//! - Shared deck and discard pile
//! - Turn bookkeeping (current seat, action gate, winner, selection)
//! - Action history
//! - RNG
//!
//! ## Primitives
//!
//! `play_animal_card`, `draw_card`, `steal_card`, `steal_specific_card` and
//! `return_card_to_deck` check every precondition before touching anything,
//! so an `Err` leaves the match exactly as it was. Draws and steals run the
//! hand-gain obligation check before returning.
//!
//! Turn gating (whose turn, one action per turn) lives in the
//! `TurnController`; these primitives only enforce card-level rules.

use im::Vector;
use rustc_hash::FxHashSet;

use super::action::{Action, ActionRecord};
use super::config::MatchConfig;
use super::entity::{CardId, IdAllocator};
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{build_deck, Biome, Card, CardType, Catalog};
use crate::error::{IntegrityError, Result, RuleError, SetupError};
use crate::triggers;
use crate::zones::{Pile, ZonePosition};

/// A card that entered a hand through a draw or steal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Acquisition {
    pub card: Card,
    /// Seat the card was stolen from; `None` for draws.
    pub from: Option<PlayerId>,
    /// A pending Devolve consumed the card: it went back to the deck.
    pub devolved: bool,
}

impl Acquisition {
    /// The caller must resolve this card's Azar effect.
    #[must_use]
    pub fn is_azar(&self) -> bool {
        !self.devolved && self.card.card_type == CardType::Azar
    }
}

/// Complete state of one match.
#[derive(Clone, Debug)]
pub struct MatchState {
    /// Seats in turn order.
    pub players: PlayerMap<Player>,

    /// Draw pile; the top is the next card drawn.
    pub deck: Pile,

    /// Resolved special cards; the top is the most recent.
    pub discard_pile: Pile,

    /// Seat whose turn it is.
    pub current_player: PlayerId,

    /// The current seat has used its one primary action.
    pub action_taken: bool,

    pub winner: Option<PlayerId>,

    /// Hand card highlighted by the current seat. Cleared at turn end.
    pub selected_card: Option<CardId>,

    /// Turn number (starts at 1, counts skipped turns).
    pub turn_number: u32,

    /// Action sequence within turn.
    pub action_sequence: u32,

    /// Every resolved primary action, oldest first.
    pub history: Vector<ActionRecord>,

    /// Biomes whose rosters built the deck.
    pub selected_biomes: Vec<Biome>,

    /// Biome zone size that wins.
    pub zone_goal: usize,

    /// Deterministic RNG.
    pub rng: GameRng,
}

impl MatchState {
    /// Build the deck, seat the players and deal starting hands.
    ///
    /// Dealt cards go straight into hands; Azar cards dealt this way are
    /// inert until they change hands through a steal.
    pub fn new(config: &MatchConfig, catalog: &Catalog) -> std::result::Result<Self, SetupError> {
        config.validate()?;

        let mut rng = GameRng::new(config.seed);
        let mut ids = IdAllocator::new();
        let deck = build_deck(
            catalog,
            &config.biomes,
            config.player_count,
            &mut ids,
            &mut rng,
        )?;

        let players = PlayerMap::new(config.player_count, |id| {
            let seat = &config.seats[id.index()];
            Player::new(id, seat.name.clone(), config.biomes[id.index()], seat.is_human)
        });

        let mut state = Self::from_parts(
            players,
            Pile::from_cards(deck),
            Pile::new(),
            config.biomes.clone(),
            config.zone_goal,
            rng,
        );

        for id in PlayerId::all(config.player_count) {
            for _ in 0..config.starting_hand_size {
                let Some(card) = state.deck.pop_top() else {
                    break;
                };
                state.players[id].hand.push_top(card);
            }
        }

        Ok(state)
    }

    /// Assemble a state from already-placed cards, at turn 1 with seat 0 to
    /// act.
    #[must_use]
    pub fn from_parts(
        players: PlayerMap<Player>,
        deck: Pile,
        discard_pile: Pile,
        selected_biomes: Vec<Biome>,
        zone_goal: usize,
        rng: GameRng,
    ) -> Self {
        Self {
            players,
            deck,
            discard_pile,
            current_player: PlayerId::new(0),
            action_taken: false,
            winner: None,
            selected_card: None,
            turn_number: 1,
            action_sequence: 0,
            history: Vector::new(),
            selected_biomes,
            zone_goal,
            rng,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Look up a seat.
    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(id).ok_or(RuleError::UnknownPlayer(id))
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players.get_mut(id).ok_or(RuleError::UnknownPlayer(id))
    }

    /// The seat whose turn it is.
    #[must_use]
    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    // === Card-level rules ===

    /// Whether `player` may put `card` into play by choice.
    ///
    /// Animal cards need the seat's biome, fauna and Sorte cards always
    /// qualify, and Azar cards never do.
    #[must_use]
    pub fn can_play_card(&self, card: &Card, player: PlayerId) -> bool {
        let Some(seat) = self.players.get(player) else {
            return false;
        };
        match card.card_type {
            CardType::Animal => card.biome == Some(seat.biome),
            CardType::Fauna | CardType::Sorte => true,
            CardType::Azar => false,
        }
    }

    /// Move an animal or fauna card from hand to biome zone.
    pub fn play_animal_card(&mut self, player: PlayerId, card: CardId) -> Result<Card> {
        let seat = self.player(player)?;
        let candidate = seat
            .hand
            .find(card)
            .ok_or(RuleError::CardNotInHand { card, player })?;

        match candidate.card_type {
            CardType::Animal | CardType::Fauna => {}
            _ => return Err(RuleError::NotPlayable(card)),
        }
        if !self.can_play_card(candidate, player) {
            return Err(RuleError::OffBiome { card, player });
        }

        let goal = self.zone_goal;
        let seat = self.player_mut(player)?;
        if seat.biome_zone.len() >= goal {
            return Err(RuleError::ZoneComplete(player));
        }
        let played = seat
            .hand
            .remove(card)
            .ok_or(RuleError::CardNotInHand { card, player })?;
        seat.biome_zone.push_top(played.clone());
        Ok(played)
    }

    /// Pop the deck's top card into `player`'s hand.
    ///
    /// The returned acquisition says whether the card is an Azar the caller
    /// must now resolve, or whether a pending Devolve sent it back.
    pub fn draw_card(&mut self, player: PlayerId) -> Result<Acquisition> {
        self.player(player)?;
        let card = self.deck.pop_top().ok_or(RuleError::EmptyDeck)?;
        Ok(self.gain(player, card, None))
    }

    /// Steal a uniformly random card.
    pub fn steal_card(&mut self, from: PlayerId, to: PlayerId) -> Result<Acquisition> {
        let size = self.check_steal(from, to)?;
        let index = self.rng.gen_range_usize(0..size);
        self.take_from(from, to, index)
    }

    /// Steal the card at `index` in `from`'s hand.
    pub fn steal_specific_card(
        &mut self,
        from: PlayerId,
        to: PlayerId,
        index: usize,
    ) -> Result<Acquisition> {
        let size = self.check_steal(from, to)?;
        if index >= size {
            return Err(RuleError::InvalidStealIndex {
                player: from,
                index,
            });
        }
        self.take_from(from, to, index)
    }

    fn check_steal(&self, from: PlayerId, to: PlayerId) -> Result<usize> {
        if from == to {
            return Err(RuleError::SelfTarget);
        }
        self.player(to)?;
        let size = self.player(from)?.hand.len();
        if size < 2 {
            return Err(RuleError::StealSourceTooSmall(from));
        }
        Ok(size)
    }

    fn take_from(&mut self, from: PlayerId, to: PlayerId, index: usize) -> Result<Acquisition> {
        let card = self
            .player_mut(from)?
            .hand
            .remove_at(index)
            .ok_or(RuleError::InvalidStealIndex { player: from, index })?;
        Ok(self.gain(to, card, Some(from)))
    }

    /// Add `card` to `player`'s hand and run the hand-gain check.
    fn gain(&mut self, player: PlayerId, card: Card, from: Option<PlayerId>) -> Acquisition {
        let id = card.id;
        self.players[player].hand.push_top(card.clone());
        let devolved = triggers::on_hand_gain(self, player, id).is_some();
        Acquisition {
            card,
            from,
            devolved,
        }
    }

    /// Move a hand card back into the deck and reshuffle the whole deck.
    pub fn return_card_to_deck(&mut self, player: PlayerId, card: CardId) -> Result<Card> {
        let returned = self
            .player_mut(player)?
            .hand
            .remove(card)
            .ok_or(RuleError::CardNotInHand { card, player })?;
        self.deck.push_top(returned.clone());
        self.deck.shuffle(&mut self.rng);
        Ok(returned)
    }

    /// Whether `player`'s biome zone has reached the goal.
    #[must_use]
    pub fn check_win(&self, player: PlayerId) -> bool {
        self.players
            .get(player)
            .is_some_and(|p| p.biome_zone.len() >= self.zone_goal)
    }

    /// Opponents of `player` holding at least two cards, in seat order.
    #[must_use]
    pub fn valid_steal_targets(&self, player: PlayerId) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(id, p)| *id != player && p.hand.len() >= 2)
            .map(|(id, _)| id)
            .collect()
    }

    // === Hand housekeeping ===

    /// Move a card within its owner's hand.
    pub fn reorder_hand(
        &mut self,
        player: PlayerId,
        card: CardId,
        position: ZonePosition,
    ) -> Result<()> {
        let seat = self.player_mut(player)?;
        if seat.hand.move_within(card, position) {
            Ok(())
        } else {
            Err(RuleError::CardNotInHand { card, player })
        }
    }

    /// Toggle the current seat's selected card and return the new selection.
    ///
    /// Selecting the already-selected card clears the selection.
    pub fn toggle_selection(&mut self, card: CardId) -> Result<Option<CardId>> {
        if self.action_taken {
            return Err(RuleError::ActionAlreadyTaken);
        }
        let player = self.current_player;
        if !self.current().hand.contains(card) {
            return Err(RuleError::CardNotInHand { card, player });
        }
        self.selected_card = match self.selected_card {
            Some(selected) if selected == card => None,
            _ => Some(card),
        };
        Ok(self.selected_card)
    }

    // === Internal moves used by effects and the controller ===

    /// Hand-to-hand transfer. Not a hand-gain event.
    pub(crate) fn give_card(&mut self, from: PlayerId, to: PlayerId, card: CardId) -> Option<Card> {
        if from == to || !self.players.contains(to) {
            return None;
        }
        let moved = self.players.get_mut(from)?.hand.remove(card)?;
        self.players[to].hand.push_top(moved.clone());
        Some(moved)
    }

    pub(crate) fn discard(&mut self, card: Card) {
        self.discard_pile.push_top(card);
    }

    /// Record a resolved primary action in the history.
    pub(crate) fn record(&mut self, player: PlayerId, action: Action) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history
            .push_back(ActionRecord::new(player, action, self.turn_number, sequence));
    }

    /// Pass the turn to the next seat.
    pub(crate) fn advance_turn(&mut self) {
        self.action_taken = false;
        self.selected_card = None;
        self.current_player = self.current_player.next(self.player_count());
        self.turn_number += 1;
        self.action_sequence = 0;
    }

    // === Integrity ===

    /// Every card id currently in the match, in no particular order.
    #[must_use]
    pub fn all_card_ids(&self) -> Vec<CardId> {
        self.deck
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.players.values().flat_map(Player::cards))
            .map(|c| c.id)
            .collect()
    }

    /// Total number of cards in the match.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.discard_pile.len()
            + self.players.values().map(|p| p.cards().count()).sum::<usize>()
    }

    /// Check the card-location invariants.
    pub fn integrity_check(&self) -> std::result::Result<(), IntegrityError> {
        let mut seen = FxHashSet::default();
        for id in self.all_card_ids() {
            if !seen.insert(id) {
                return Err(IntegrityError::DuplicateCard(id));
            }
        }
        for (id, player) in self.players.iter() {
            if player.biome_zone.len() > self.zone_goal {
                return Err(IntegrityError::ZoneOverflow {
                    player: id,
                    size: player.biome_zone.len(),
                    goal: self.zone_goal,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{AzarCard, SorteCard};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    /// Two seats (Cerrado, Pampa) with empty hands and a known deck.
    fn bare_state(deck: Vec<Card>) -> MatchState {
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
            GameRng::new(1),
        )
    }

    fn ema(id: u32) -> Card {
        Card::animal(CardId(id), "Ema", Biome::Cerrado)
    }

    fn perdiz(id: u32) -> Card {
        Card::animal(CardId(id), "Perdiz", Biome::Pampa)
    }

    #[test]
    fn test_setup_deals_hands() {
        let config = MatchConfig::new(3).with_seed(5);
        let state = MatchState::new(&config, &Catalog::standard()).unwrap();

        for player in state.players.values() {
            assert_eq!(player.hand.len(), 3);
            assert!(player.biome_zone.is_empty());
            assert!(player.effects.is_clear());
        }
        assert_eq!(state.card_count(), 24 + 4 + 14);
        assert_eq!(state.deck.len(), 42 - 9);
        assert_eq!(state.current_player, P0);
        assert!(state.integrity_check().is_ok());
    }

    #[test]
    fn test_setup_rejects_bad_config() {
        let err = MatchState::new(&MatchConfig::new(9), &Catalog::standard()).unwrap_err();
        assert_eq!(err, SetupError::PlayerCount(9));
    }

    #[test]
    fn test_can_play_card() {
        let state = bare_state(vec![]);

        assert!(state.can_play_card(&ema(1), P0));
        assert!(!state.can_play_card(&ema(1), P1));
        assert!(state.can_play_card(&Card::fauna(CardId(2)), P1));
        assert!(state.can_play_card(&Card::sorte(CardId(3), SorteCard::Piedade), P1));
        assert!(!state.can_play_card(&Card::azar(CardId(4), AzarCard::Pulo), P0));
    }

    #[test]
    fn test_play_animal_card() {
        let mut state = bare_state(vec![]);
        state.players[P0].hand.push_top(ema(1));
        state.players[P0].hand.push_top(perdiz(2));

        assert_eq!(
            state.play_animal_card(P0, CardId(2)),
            Err(RuleError::OffBiome { card: CardId(2), player: P0 })
        );
        assert_eq!(
            state.play_animal_card(P0, CardId(9)),
            Err(RuleError::CardNotInHand { card: CardId(9), player: P0 })
        );
        assert_eq!(state.players[P0].hand.len(), 2);

        let played = state.play_animal_card(P0, CardId(1)).unwrap();
        assert_eq!(played.id, CardId(1));
        assert_eq!(state.players[P0].biome_zone.ids(), vec![CardId(1)]);
        assert_eq!(state.players[P0].hand.ids(), vec![CardId(2)]);
    }

    #[test]
    fn test_play_into_complete_zone() {
        let mut state = bare_state(vec![]);
        for i in 0..8 {
            state.players[P0].biome_zone.push_top(ema(i));
        }
        state.players[P0].hand.push_top(ema(20));

        assert_eq!(
            state.play_animal_card(P0, CardId(20)),
            Err(RuleError::ZoneComplete(P0))
        );
        assert!(state.players[P0].hand.contains(CardId(20)));
    }

    #[test]
    fn test_play_animal_card_rejects_specials() {
        let mut state = bare_state(vec![]);
        state.players[P0].hand.push_top(Card::sorte(CardId(1), SorteCard::Devolve));

        assert_eq!(
            state.play_animal_card(P0, CardId(1)),
            Err(RuleError::NotPlayable(CardId(1)))
        );
    }

    #[test]
    fn test_draw_card() {
        let mut state = bare_state(vec![ema(1), Card::azar(CardId(2), AzarCard::Pulo)]);

        let first = state.draw_card(P0).unwrap();
        assert_eq!(first.card.id, CardId(2));
        assert!(first.is_azar());
        assert_eq!(first.from, None);

        let second = state.draw_card(P0).unwrap();
        assert!(!second.is_azar());
        assert_eq!(state.draw_card(P0), Err(RuleError::EmptyDeck));
        assert_eq!(state.players[P0].hand.len(), 2);
    }

    #[test]
    fn test_steal_requires_two_cards() {
        let mut state = bare_state(vec![]);
        state.players[P1].hand.push_top(perdiz(1));

        assert_eq!(
            state.steal_card(P1, P0),
            Err(RuleError::StealSourceTooSmall(P1))
        );
        assert_eq!(
            state.steal_specific_card(P1, P0, 0),
            Err(RuleError::StealSourceTooSmall(P1))
        );
        assert_eq!(state.players[P1].hand.len(), 1);
        assert!(state.players[P0].hand.is_empty());
    }

    #[test]
    fn test_steal_specific_card() {
        let mut state = bare_state(vec![]);
        state.players[P1].hand.push_top(perdiz(1));
        state.players[P1].hand.push_top(ema(2));

        assert_eq!(
            state.steal_specific_card(P1, P0, 2),
            Err(RuleError::InvalidStealIndex { player: P1, index: 2 })
        );

        let stolen = state.steal_specific_card(P1, P0, 1).unwrap();
        assert_eq!(stolen.card.id, CardId(2));
        assert_eq!(stolen.from, Some(P1));
        assert_eq!(state.players[P0].hand.ids(), vec![CardId(2)]);
        assert_eq!(state.players[P1].hand.ids(), vec![CardId(1)]);
    }

    #[test]
    fn test_steal_from_self_rejected() {
        let mut state = bare_state(vec![]);
        state.players[P0].hand.push_top(ema(1));
        state.players[P0].hand.push_top(ema(2));

        assert_eq!(state.steal_card(P0, P0), Err(RuleError::SelfTarget));
    }

    #[test]
    fn test_random_steal_moves_one_card() {
        let mut state = bare_state(vec![]);
        for i in 0..4 {
            state.players[P1].hand.push_top(perdiz(i));
        }

        let stolen = state.steal_card(P1, P0).unwrap();
        assert_eq!(state.players[P0].hand.ids(), vec![stolen.card.id]);
        assert!(!state.players[P1].hand.contains(stolen.card.id));
        assert_eq!(state.players[P1].hand.len(), 3);
    }

    #[test]
    fn test_return_card_to_deck() {
        let mut state = bare_state((10..20).map(|i| Card::fauna(CardId(i))).collect());
        state.players[P0].hand.push_top(ema(1));

        let returned = state.return_card_to_deck(P0, CardId(1)).unwrap();
        assert_eq!(returned.id, CardId(1));
        assert!(state.players[P0].hand.is_empty());
        assert_eq!(state.deck.len(), 11);
        assert!(state.deck.contains(CardId(1)));
    }

    #[test]
    fn test_check_win_threshold() {
        let mut state = bare_state(vec![]);
        for i in 0..7 {
            state.players[P0].biome_zone.push_top(ema(i));
        }
        assert!(!state.check_win(P0));

        state.players[P0].biome_zone.push_top(Card::fauna(CardId(7)));
        assert!(state.check_win(P0));
    }

    #[test]
    fn test_valid_steal_targets() {
        let mut state = bare_state(vec![]);
        state.players[P0].hand.push_top(ema(1));
        state.players[P0].hand.push_top(ema(2));
        state.players[P1].hand.push_top(perdiz(3));

        assert_eq!(state.valid_steal_targets(P1), vec![P0]);
        assert!(state.valid_steal_targets(P0).is_empty());
    }

    #[test]
    fn test_reorder_hand() {
        let mut state = bare_state(vec![]);
        for i in 0..3 {
            state.players[P0].hand.push_top(ema(i));
        }

        state
            .reorder_hand(P0, CardId(2), ZonePosition::Bottom)
            .unwrap();
        assert_eq!(state.players[P0].hand.ids(), vec![CardId(2), CardId(0), CardId(1)]);

        assert_eq!(
            state.reorder_hand(P1, CardId(0), ZonePosition::Top),
            Err(RuleError::CardNotInHand { card: CardId(0), player: P1 })
        );
    }

    #[test]
    fn test_toggle_selection() {
        let mut state = bare_state(vec![]);
        state.players[P0].hand.push_top(ema(1));
        state.players[P0].hand.push_top(ema(2));

        assert_eq!(state.toggle_selection(CardId(1)), Ok(Some(CardId(1))));
        assert_eq!(state.toggle_selection(CardId(2)), Ok(Some(CardId(2))));
        assert_eq!(state.toggle_selection(CardId(2)), Ok(None));

        state.action_taken = true;
        assert_eq!(state.toggle_selection(CardId(1)), Err(RuleError::ActionAlreadyTaken));
    }

    #[test]
    fn test_integrity_detects_duplicates() {
        let mut state = bare_state(vec![ema(1)]);
        assert!(state.integrity_check().is_ok());

        state.players[P1].hand.push_top(ema(1));
        assert_eq!(
            state.integrity_check(),
            Err(IntegrityError::DuplicateCard(CardId(1)))
        );
    }

    #[test]
    fn test_advance_turn_resets_gate() {
        let mut state = bare_state(vec![]);
        state.action_taken = true;
        state.selected_card = Some(CardId(3));
        state.record(P0, Action::Draw);

        state.advance_turn();

        assert_eq!(state.current_player, P1);
        assert!(!state.action_taken);
        assert_eq!(state.selected_card, None);
        assert_eq!(state.turn_number, 2);
        assert_eq!(state.history.len(), 1);
    }
}
