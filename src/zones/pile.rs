//! Ordered card piles.
//!
//! Every card location in a match (deck, discard pile, hands, biome zones)
//! is a `Pile`. Index 0 is the bottom and the last index is the top, so the
//! deck draws with [`Pile::pop_top`] and the discard pile's most recent card
//! is [`Pile::top`].

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{CardId, GameRng};

/// Position for inserting a card into a pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of pile (end of the sequence).
    Top,
    /// Add to bottom of pile.
    Bottom,
    /// Insert at specific index (0 = bottom). Clamped to the pile length.
    Index(usize),
}

/// An ordered sequence of cards.
///
/// ```
/// use bioma::cards::Card;
/// use bioma::core::CardId;
/// use bioma::zones::{Pile, ZonePosition};
///
/// let mut pile = Pile::new();
/// pile.push_top(Card::fauna(CardId(1)));
/// pile.insert(Card::fauna(CardId(2)), ZonePosition::Bottom);
///
/// assert_eq!(pile.ids(), vec![CardId(2), CardId(1)]);
/// assert_eq!(pile.pop_top().map(|c| c.id), Some(CardId(1)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap cards in bottom-to-top order.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// The most recently added card.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn push_top(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn insert(&mut self, card: Card, position: ZonePosition) {
        match position {
            ZonePosition::Top => self.cards.push(card),
            ZonePosition::Bottom => self.cards.insert(0, card),
            ZonePosition::Index(i) => {
                let idx = i.min(self.cards.len());
                self.cards.insert(idx, card);
            }
        }
    }

    pub fn pop_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Remove a card by id, keeping the order of the rest.
    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        let idx = self.position(id)?;
        Some(self.cards.remove(idx))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    #[must_use]
    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn find(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Shuffle the whole pile.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Move a card to a new position within this pile.
    ///
    /// Returns `false` if the card is not here.
    pub fn move_within(&mut self, id: CardId, position: ZonePosition) -> bool {
        match self.remove(id) {
            Some(card) => {
                self.insert(card, position);
                true
            }
            None => false,
        }
    }

    /// Card ids, bottom to top.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Card> {
        self.cards
    }
}

impl<'a> IntoIterator for &'a Pile {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

impl From<Vec<Card>> for Pile {
    fn from(cards: Vec<Card>) -> Self {
        Self::from_cards(cards)
    }
}
