//! Effect vocabulary: choices going in, events and reports coming out.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::{CardId, PlayerId};

/// One steal inside a +2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StealPick {
    pub from: PlayerId,
    /// Face-down position picked by the acting side; `None` picks at random.
    pub index: Option<usize>,
}

impl StealPick {
    #[must_use]
    pub const fn random(from: PlayerId) -> Self {
        Self { from, index: None }
    }

    #[must_use]
    pub const fn at(from: PlayerId, index: usize) -> Self {
        Self {
            from,
            index: Some(index),
        }
    }
}

/// The three ways to spend a +2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlusTwoChoice {
    DrawTwo,
    /// Up to two steals; the second may target another seat.
    StealTwo {
        first: StealPick,
        second: Option<StealPick>,
    },
    DrawOneStealOne {
        steal: StealPick,
    },
}

impl PlusTwoChoice {
    /// Steal picks named by this choice, in order.
    pub fn picks(&self) -> impl Iterator<Item = &StealPick> {
        let (a, b) = match self {
            PlusTwoChoice::DrawTwo => (None, None),
            PlusTwoChoice::StealTwo { first, second } => (Some(first), second.as_ref()),
            PlusTwoChoice::DrawOneStealOne { steal } => (Some(steal), None),
        };
        a.into_iter().chain(b)
    }
}

/// Machine-checkable record of one card movement or latch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectEvent {
    /// Hand-to-hand move.
    Transferred {
        card: CardId,
        from: PlayerId,
        to: PlayerId,
    },
    /// A hand card went back into the deck, which was reshuffled.
    ReturnedToDeck { card: CardId, player: PlayerId },
    SkipLatched { player: PlayerId },
    DevolveLatched { player: PlayerId },
    PuloMaisUmLatched { target: PlayerId, from: PlayerId },
    Drew { card: CardId, player: PlayerId },
    Stole {
        card: CardId,
        from: PlayerId,
        to: PlayerId,
    },
    Discarded { card: CardId },
}

/// What resolving one special card did.
///
/// `events` are for code, `lines` for people. Azar cards picked up while a
/// +2 resolves report under `nested`, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectReport {
    pub card: Card,
    pub events: SmallVec<[EffectEvent; 4]>,
    pub lines: Vec<String>,
    pub nested: Vec<EffectReport>,
}

impl EffectReport {
    #[must_use]
    pub fn new(card: Card) -> Self {
        Self {
            card,
            events: SmallVec::new(),
            lines: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub(crate) fn event(&mut self, event: EffectEvent) {
        self.events.push(event);
    }

    pub(crate) fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Events of this report and every nested one, depth first.
    #[must_use]
    pub fn all_events(&self) -> Vec<&EffectEvent> {
        let mut out: Vec<&EffectEvent> = self.events.iter().collect();
        for nested in &self.nested {
            out.extend(nested.all_events());
        }
        out
    }

    /// Narrative lines including nested reports.
    #[must_use]
    pub fn all_lines(&self) -> Vec<String> {
        let mut out = self.lines.clone();
        for nested in &self.nested {
            out.extend(
                nested
                    .all_lines()
                    .into_iter()
                    .map(|line| format!("{} (Azar): {line}", nested.card)),
            );
        }
        out
    }
}
