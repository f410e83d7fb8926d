//! Computer opponents.
//!
//! - `Policy`: Picks the primary action for a seat
//! - `PriorityPolicy`: The fixed priority procedure the AI seats follow
//! - `RandomPolicy`: Uniform over legal actions, for simulations
//! - `ThinkDelay` / `Pacer`: Cosmetic pause before AI actions
//!   (`Pacer` needs the `pacing` feature)

pub mod pacing;
pub mod policy;

#[cfg(feature = "pacing")]
pub use pacing::Pacer;
pub use pacing::ThinkDelay;
pub use policy::{Policy, PriorityPolicy, RandomPolicy};
