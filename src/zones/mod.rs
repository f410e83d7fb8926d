//! Card locations.
//!
//! Bioma has a small, fixed set of locations: the shared deck and discard
//! pile, plus each seat's hand and biome zone. All of them are ordered, so
//! one type covers every location.
//!
//! ## Key Types
//!
//! - `Pile`: Ordered card sequence, top = end
//! - `ZonePosition`: Position specifier for insertion and reordering

pub mod pile;

pub use pile::{Pile, ZonePosition};
