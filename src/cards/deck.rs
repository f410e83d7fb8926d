//! Deck construction.
//!
//! A deck holds every animal of each selected biome, [`FAUNA_CARDS`] fauna
//! wildcards and each Sorte/Azar name [`special_copies`] times, shuffled.
//! The deck is drawn from the end of the returned vector.

use crate::core::{GameRng, IdAllocator};
use crate::error::SetupError;

use super::catalog::Catalog;
use super::definition::{Biome, Card};

/// Number of fauna wildcards in every deck.
pub const FAUNA_CARDS: usize = 4;

/// Copies of each Sorte/Azar name for a given table size.
#[must_use]
pub const fn special_copies(player_count: usize) -> usize {
    if player_count >= 3 {
        2
    } else {
        1
    }
}

/// Number of Sorte + Azar cards a deck will contain.
#[must_use]
pub fn special_card_count(catalog: &Catalog, player_count: usize) -> usize {
    (catalog.sorte().len() + catalog.azar().len()) * special_copies(player_count)
}

/// Build a shuffled draw pile.
///
/// Card ids come from `ids`, so they stay unique for the whole match.
/// Fails without consuming ids or randomness if a biome has no roster.
pub fn build_deck(
    catalog: &Catalog,
    biomes: &[Biome],
    player_count: usize,
    ids: &mut IdAllocator,
    rng: &mut GameRng,
) -> Result<Vec<Card>, SetupError> {
    let rosters = biomes
        .iter()
        .map(|&biome| {
            catalog
                .roster(biome)
                .map(|names| (biome, names))
                .ok_or(SetupError::MissingRoster(biome))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut deck = Vec::new();

    for (biome, names) in rosters {
        for name in names {
            deck.push(Card::animal(ids.next_id(), name.clone(), biome));
        }
    }

    for _ in 0..FAUNA_CARDS {
        deck.push(Card::fauna(ids.next_id()));
    }

    let copies = special_copies(player_count);
    for &sorte in catalog.sorte() {
        for _ in 0..copies {
            deck.push(Card::sorte(ids.next_id(), sorte));
        }
    }
    for &azar in catalog.azar() {
        for _ in 0..copies {
            deck.push(Card::azar(ids.next_id(), azar));
        }
    }

    rng.shuffle(&mut deck);
    Ok(deck)
}
