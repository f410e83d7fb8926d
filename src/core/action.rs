//! Primary actions and the action log.
//!
//! A seat takes exactly one primary action per turn:
//! - `PlayCard`: move an animal or fauna card from hand to biome zone
//! - `PlaySorte`: play a Sorte card (with a target for Pulo+1, a choice for +2)
//! - `Draw`: take the deck's top card
//! - `Steal`: take a card from an opponent holding at least two
//! - `Pass`: only legal when none of the above is
//!
//! Actions are plain data. The same values arrive from local input, from
//! the AI policy, and from remote seats.

use serde::{Deserialize, Serialize};

use super::entity::CardId;
use super::player::PlayerId;
use crate::effects::PlusTwoChoice;

/// One primary action.
///
/// ## Example
///
/// ```
/// use bioma::core::{Action, CardId, PlayerId};
///
/// let play = Action::PlayCard { card: CardId(4) };
/// let steal = Action::Steal { from: PlayerId::new(1), index: Some(0) };
///
/// assert_eq!(play.kind(), "play");
/// assert_eq!(steal.kind(), "steal");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    PlayCard {
        card: CardId,
    },
    PlaySorte {
        card: CardId,
        /// Required for Pulo+1, ignored otherwise.
        target: Option<PlayerId>,
        /// Required for +2, ignored otherwise.
        choice: Option<PlusTwoChoice>,
    },
    Draw,
    Steal {
        from: PlayerId,
        /// Position in the source's hand; `None` picks uniformly at random.
        index: Option<usize>,
    },
    Pass,
}

impl Action {
    /// An untargeted Sorte play (Piedade, Devolve).
    #[must_use]
    pub fn sorte(card: CardId) -> Self {
        Action::PlaySorte {
            card,
            target: None,
            choice: None,
        }
    }

    /// A Pulo+1 play against `target`.
    #[must_use]
    pub fn sorte_targeting(card: CardId, target: PlayerId) -> Self {
        Action::PlaySorte {
            card,
            target: Some(target),
            choice: None,
        }
    }

    /// A +2 play with its choice.
    #[must_use]
    pub fn plus_two(card: CardId, choice: PlusTwoChoice) -> Self {
        Action::PlaySorte {
            card,
            target: None,
            choice: Some(choice),
        }
    }

    /// Short name of the action kind, for reports.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Action::PlayCard { .. } => "play",
            Action::PlaySorte { .. } => "sorte",
            Action::Draw => "draw",
            Action::Steal { .. } => "steal",
            Action::Pass => "pass",
        }
    }

    /// The hand card this action plays, if any.
    #[must_use]
    pub fn card(&self) -> Option<CardId> {
        match self {
            Action::PlayCard { card } | Action::PlaySorte { card, .. } => Some(*card),
            _ => None,
        }
    }
}

/// A resolved action with metadata for history tracking.
///
/// Used for:
/// - Replay/debugging
/// - Narrating a match after the fact
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
