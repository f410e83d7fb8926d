//! # bioma
//!
//! Rules engine and turn state machine for Bioma, a biome-collection card
//! game for 2 to 6 seats.
//!
//! Each seat collects animal cards of its own biome (or Fauna wildcards)
//! into a biome zone; the first zone to reach eight cards wins. Sorte
//! cards are played by choice, Azar cards fire when they are drawn or
//! stolen.
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: One `MatchState` per match, owned by a
//!    `TurnController` and passed by reference to everything else.
//!
//! 2. **Validate, Then Mutate**: Illegal actions come back as `RuleError`
//!    and leave the state untouched.
//!
//! 3. **Deterministic**: A seed and a sequence of actions replay a match
//!    exactly.
//!
//! ## Modules
//!
//! - `core`: Ids, seats, actions, RNG, configuration, match state
//! - `zones`: Ordered card piles
//! - `cards`: Card definitions, catalogs, deck building
//! - `triggers`: Deferred obligations and where they are checked
//! - `effects`: Azar and Sorte resolution
//! - `rules`: `RulesEngine` and the turn state machine
//! - `ai`: Computer opponents and their think delay
//! - `sync`: Room and seat records for networked play
//!
//! ## Example
//!
//! ```
//! use bioma::{Catalog, MatchConfig, PriorityPolicy, TurnController};
//!
//! let config = MatchConfig::new(3).all_ai().with_seed(7);
//! let mut controller = TurnController::new(&config, Catalog::standard()).unwrap();
//! let result = controller.run_ai_match(&mut PriorityPolicy, 500).unwrap();
//! assert_eq!(controller.state().card_count(), 8 * 3 + 4 + 14);
//! # let _ = result;
//! ```

pub mod ai;
pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod rules;
pub mod sync;
pub mod triggers;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, CardId, GameRng, GameRngState, MatchConfig, MatchState, Player,
    PlayerId, PlayerMap, SeatConfig,
};

pub use crate::zones::{Pile, ZonePosition};

pub use crate::cards::{AzarCard, Biome, Card, CardType, Catalog, SorteCard};

pub use crate::rules::{
    ActionOutcome, BiomaRules, GameResult, Progress, Resolution, RulesEngine, TurnController,
    TurnPhase,
};

pub use crate::effects::{EffectEvent, EffectReport, EffectResolver, PlusTwoChoice, StealPick};

pub use crate::triggers::{Obligations, TurnStartOutcome, TurnStartReport};

pub use crate::ai::{Policy, PriorityPolicy, RandomPolicy, ThinkDelay};

pub use crate::error::{IntegrityError, LobbyError, RuleError, SetupError, SnapshotError};
