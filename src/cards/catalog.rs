//! Static card catalogs.
//!
//! A `Catalog` maps each biome to its animal roster and lists the Sorte
//! and Azar card names that go into a deck. It is configuration data,
//! supplied once when a match is set up.
//!
//! ```
//! use bioma::cards::{Biome, Catalog};
//!
//! let catalog = Catalog::standard();
//! let roster = catalog.roster(Biome::Pantanal).unwrap();
//! assert_eq!(roster.len(), 8);
//! assert!(roster.iter().any(|name| name == "Tuiuiú"));
//! ```

use rustc_hash::FxHashMap;

use super::definition::{AzarCard, Biome, SorteCard};

/// Animal rosters plus special-card catalogs.
#[derive(Clone, Debug)]
pub struct Catalog {
    rosters: FxHashMap<Biome, Vec<String>>,
    sorte: Vec<SorteCard>,
    azar: Vec<AzarCard>,
}

impl Catalog {
    /// An empty catalog with the standard special-card lists.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rosters: FxHashMap::default(),
            sorte: SorteCard::ALL.to_vec(),
            azar: AzarCard::ALL.to_vec(),
        }
    }

    /// The six standard biome rosters.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with_roster(
                Biome::Amazonia,
                [
                    "Onça-pintada",
                    "Arara-azul",
                    "Boto-cor-de-rosa",
                    "Preguiça",
                    "Tucano",
                    "Jacaré",
                    "Macaco-aranha",
                    "Anaconda",
                ],
            )
            .with_roster(
                Biome::MataAtlantica,
                [
                    "Mico-leão-dourado",
                    "Papagaio",
                    "Jaguatirica",
                    "Sagui",
                    "Tatu",
                    "Anta",
                    "Tamanduá",
                    "Bugio",
                ],
            )
            .with_roster(
                Biome::Cerrado,
                [
                    "Lobo-guará",
                    "Tamanduá-bandeira",
                    "Seriema",
                    "Tatu-canastra",
                    "Ema",
                    "Veado-campeiro",
                    "Cachorro-do-mato",
                    "Capivara",
                ],
            )
            .with_roster(
                Biome::Caatinga,
                [
                    "Tatu-bola",
                    "Asa-branca",
                    "Preá",
                    "Cachorro-do-mato",
                    "Jiboia",
                    "Sagui-de-tufos",
                    "Veado-catingueiro",
                    "Mocó",
                ],
            )
            .with_roster(
                Biome::Pantanal,
                [
                    "Tuiuiú",
                    "Jacaré-do-pantanal",
                    "Onça-pintada",
                    "Ariranha",
                    "Capivara",
                    "Sucuri",
                    "Garça",
                    "Piranha",
                ],
            )
            .with_roster(
                Biome::Pampa,
                [
                    "Graxaim",
                    "Tamanduá",
                    "Veado-campeiro",
                    "Gato-do-pampa",
                    "Capivara",
                    "Quero-quero",
                    "Perdiz",
                    "Ratão-do-banhado",
                ],
            )
    }

    /// Set (or replace) a biome's roster.
    #[must_use]
    pub fn with_roster<I, S>(mut self, biome: Biome, animals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rosters
            .insert(biome, animals.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the Sorte catalog.
    #[must_use]
    pub fn with_sorte(mut self, cards: impl Into<Vec<SorteCard>>) -> Self {
        self.sorte = cards.into();
        self
    }

    /// Replace the Azar catalog.
    #[must_use]
    pub fn with_azar(mut self, cards: impl Into<Vec<AzarCard>>) -> Self {
        self.azar = cards.into();
        self
    }

    /// Animal names for a biome.
    #[must_use]
    pub fn roster(&self, biome: Biome) -> Option<&[String]> {
        self.rosters.get(&biome).map(Vec::as_slice)
    }

    #[must_use]
    pub fn sorte(&self) -> &[SorteCard] {
        &self.sorte
    }

    #[must_use]
    pub fn azar(&self) -> &[AzarCard] {
        &self.azar
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
