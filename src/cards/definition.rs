//! Card values.
//!
//! A `Card` is an immutable value: type, name, optional biome, unique id.
//! The shape matches the room store's card records, so cards serialize as
//! `{"id": 7, "type": "animal", "name": "Tucano", "biome": "Amazônia"}`.
//!
//! Sorte and Azar cards are identified by name. `SorteCard` and `AzarCard`
//! give those names a type.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::CardId;

/// The six Brazilian biomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Biome {
    #[serde(rename = "Amazônia")]
    Amazonia,
    #[serde(rename = "Mata Atlântica")]
    MataAtlantica,
    #[serde(rename = "Cerrado")]
    Cerrado,
    #[serde(rename = "Caatinga")]
    Caatinga,
    #[serde(rename = "Pantanal")]
    Pantanal,
    #[serde(rename = "Pampa")]
    Pampa,
}

impl Biome {
    /// All biomes, in catalog order.
    pub const ALL: [Biome; 6] = [
        Biome::Amazonia,
        Biome::MataAtlantica,
        Biome::Cerrado,
        Biome::Caatinga,
        Biome::Pantanal,
        Biome::Pampa,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Biome::Amazonia => "Amazônia",
            Biome::MataAtlantica => "Mata Atlântica",
            Biome::Cerrado => "Cerrado",
            Biome::Caatinga => "Caatinga",
            Biome::Pantanal => "Pantanal",
            Biome::Pampa => "Pampa",
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Biome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Biome::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| format!("unknown biome: {s}"))
    }
}

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// Belongs to one biome.
    Animal,
    /// Wildcard for any biome zone.
    Fauna,
    /// Luck card, played by choice.
    Sorte,
    /// Misfortune card, resolved when acquired.
    Azar,
}

/// Sorte ("luck") card names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SorteCard {
    Piedade,
    Devolve,
    #[serde(rename = "Pulo+1")]
    PuloMaisUm,
    #[serde(rename = "+2")]
    MaisDois,
}

impl SorteCard {
    pub const ALL: [SorteCard; 4] = [
        SorteCard::Piedade,
        SorteCard::Devolve,
        SorteCard::PuloMaisUm,
        SorteCard::MaisDois,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SorteCard::Piedade => "Piedade",
            SorteCard::Devolve => "Devolve",
            SorteCard::PuloMaisUm => "Pulo+1",
            SorteCard::MaisDois => "+2",
        }
    }

    /// Whether the card sits in the player's active slot until `TurnEnd`.
    ///
    /// Pulo+1 lives in the target's slot instead.
    #[must_use]
    pub const fn held_until_turn_end(self) -> bool {
        !matches!(self, SorteCard::PuloMaisUm)
    }
}

impl FromStr for SorteCard {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SorteCard::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown Sorte card: {s}"))
    }
}

/// Azar ("misfortune") card names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AzarCard {
    Devolve,
    Pulo,
    Piedade,
}

impl AzarCard {
    pub const ALL: [AzarCard; 3] = [AzarCard::Devolve, AzarCard::Pulo, AzarCard::Piedade];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AzarCard::Devolve => "Devolve",
            AzarCard::Pulo => "Pulo",
            AzarCard::Piedade => "Piedade",
        }
    }
}

impl FromStr for AzarCard {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AzarCard::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown Azar card: {s}"))
    }
}

/// A physical card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub name: String,
    /// Only animal cards have a biome.
    #[serde(default)]
    pub biome: Option<Biome>,
}

impl Card {
    /// An animal card of the given biome.
    pub fn animal(id: CardId, name: impl Into<String>, biome: Biome) -> Self {
        Self {
            id,
            card_type: CardType::Animal,
            name: name.into(),
            biome: Some(biome),
        }
    }

    /// A fauna wildcard.
    #[must_use]
    pub fn fauna(id: CardId) -> Self {
        Self {
            id,
            card_type: CardType::Fauna,
            name: "Fauna".to_string(),
            biome: None,
        }
    }

    #[must_use]
    pub fn sorte(id: CardId, card: SorteCard) -> Self {
        Self {
            id,
            card_type: CardType::Sorte,
            name: card.name().to_string(),
            biome: None,
        }
    }

    #[must_use]
    pub fn azar(id: CardId, card: AzarCard) -> Self {
        Self {
            id,
            card_type: CardType::Azar,
            name: card.name().to_string(),
            biome: None,
        }
    }

    /// Whether this is an animal card of `biome`.
    #[must_use]
    pub fn is_animal_of(&self, biome: Biome) -> bool {
        self.card_type == CardType::Animal && self.biome == Some(biome)
    }

    /// Whether this card can go into a biome zone of `biome`.
    #[must_use]
    pub fn fits_zone(&self, biome: Biome) -> bool {
        self.card_type == CardType::Fauna || self.is_animal_of(biome)
    }

    /// The Sorte effect, if this is a Sorte card.
    #[must_use]
    pub fn sorte_effect(&self) -> Option<SorteCard> {
        match self.card_type {
            CardType::Sorte => self.name.parse().ok(),
            _ => None,
        }
    }

    /// The Azar effect, if this is an Azar card.
    #[must_use]
    pub fn azar_effect(&self) -> Option<AzarCard> {
        match self.card_type {
            CardType::Azar => self.name.parse().ok(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
