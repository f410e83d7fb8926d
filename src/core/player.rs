//! Players and per-seat data storage.
//!
//! ## PlayerId
//!
//! Seat index in turn order. Stable for the whole match.
//!
//! ## PlayerMap
//!
//! Fixed-size per-seat storage backed by `Vec` for O(1) access,
//! indexable by `PlayerId`.
//!
//! ## Player
//!
//! A seat's hand, biome zone, held Sorte card and pending obligations.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::{Biome, Card, CardType};
use crate::core::CardId;
use crate::triggers::Obligations;
use crate::zones::Pile;

/// Seat identifier. Seat 0 takes the first turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a match with `player_count` seats.
    ///
    /// ```
    /// use bioma::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The seat after this one, wrapping around.
    #[must_use]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use bioma::core::{PlayerId, PlayerMap};
///
/// let mut cards: PlayerMap<u32> = PlayerMap::new(3, |_| 3);
/// cards[PlayerId::new(1)] = 5;
///
/// assert_eq!(cards[PlayerId::new(0)], 3);
/// assert_eq!(cards[PlayerId::new(1)], 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Wrap an existing vector; entry `i` belongs to `PlayerId(i)`.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Check whether a seat exists.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a seat's data, or `None` for an unknown seat.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a seat's data mutably, or `None` for an unknown seat.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Home biome, fixed for the match.
    pub biome: Biome,
    /// Hand in player-visible order.
    pub hand: Pile,
    /// Collected cards; reaching the goal wins.
    pub biome_zone: Pile,
    pub is_human: bool,
    /// Sorte card currently in effect for this seat.
    pub active_card: Option<Card>,
    pub effects: Obligations,
}

impl Player {
    /// Create a seat with an empty hand and zone.
    pub fn new(id: PlayerId, name: impl Into<String>, biome: Biome, is_human: bool) -> Self {
        Self {
            id,
            name: name.into(),
            biome,
            hand: Pile::new(),
            biome_zone: Pile::new(),
            is_human,
            active_card: None,
            effects: Obligations::default(),
        }
    }

    /// First animal card in hand belonging to `biome`, by hand order.
    #[must_use]
    pub fn first_animal_of(&self, biome: Biome) -> Option<CardId> {
        self.hand
            .iter()
            .find(|c| c.card_type == CardType::Animal && c.biome == Some(biome))
            .map(|c| c.id)
    }

    /// First animal card in hand matching this seat's own biome.
    #[must_use]
    pub fn first_own_animal(&self) -> Option<CardId> {
        self.first_animal_of(self.biome)
    }

    /// Every card this seat currently holds, in any location.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.hand
            .iter()
            .chain(self.biome_zone.iter())
            .chain(self.active_card.iter())
    }
}
