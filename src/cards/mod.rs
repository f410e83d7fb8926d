//! Card system: values, catalogs, and deck construction.
//!
//! ## Key Types
//!
//! - `Card`: Immutable card value (id, type, name, optional biome)
//! - `Biome`: The six home biomes
//! - `SorteCard` / `AzarCard`: Typed special-card names
//! - `Catalog`: Biome rosters and special-card catalogs
//! - `build_deck`: Shuffled draw pile for a match
//!
//! ## Fauna
//!
//! Fauna cards carry no biome; they fit into any biome zone.

pub mod catalog;
pub mod deck;
pub mod definition;

pub use catalog::Catalog;
pub use deck::{build_deck, special_card_count, special_copies, FAUNA_CARDS};
pub use definition::{AzarCard, Biome, Card, CardType, SorteCard};
