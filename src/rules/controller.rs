//! Turn controller: the per-turn state machine.
//!
//! ```text
//! TurnStart ──skip──────────────────────────────┐
//!     │                                         v
//!     └──> ActionPending ──> ActionResolved ──> TurnEnd ──> next TurnStart
//!                                 │
//!                                 └──win──> Finished
//! ```
//!
//! The controller owns the `MatchState`. Human seats act through
//! [`TurnController::perform`]; AI seats through a [`Policy`].

use crate::ai::Policy;
use crate::cards::{Card, Catalog};
use crate::core::{Action, CardId, MatchConfig, MatchState, PlayerId};
use crate::error::{Result, RuleError, SetupError};
use crate::triggers::{on_turn_start, TurnStartReport};
use crate::zones::ZonePosition;

use super::engine::{BiomaRules, GameResult, Resolution, RulesEngine};

/// Where the controller is within the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Obligations not yet evaluated.
    TurnStart,
    /// Waiting for the seat's one primary action.
    ActionPending,
    /// Action done, turn not yet ended.
    ActionResolved,
    /// The turn was skipped or is ready to pass on.
    TurnEnd,
    /// Someone won. Nothing advances any more.
    Finished,
}

impl TurnPhase {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TurnPhase::TurnStart => "turn start",
            TurnPhase::ActionPending => "action pending",
            TurnPhase::ActionResolved => "action resolved",
            TurnPhase::TurnEnd => "turn end",
            TurnPhase::Finished => "finished",
        }
    }
}

/// What ending a turn did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnEndReport {
    pub player: PlayerId,
    /// Sorte card that sat in the active slot until now.
    pub discarded: Option<Card>,
    /// Seat whose turn starts next.
    pub next: PlayerId,
}

/// One transition of [`TurnController::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    TurnStarted(TurnStartReport),
    Acted(Resolution),
    TurnEnded(TurnEndReport),
    /// A human seat has to act through [`TurnController::perform`].
    AwaitingInput(PlayerId),
    Finished(GameResult),
}

/// Drives one match from setup to a winner.
#[derive(Clone, Debug)]
pub struct TurnController {
    state: MatchState,
    rules: BiomaRules,
    phase: TurnPhase,
    catalog: Catalog,
}

impl TurnController {
    /// Set up a new match.
    pub fn new(config: &MatchConfig, catalog: Catalog) -> std::result::Result<Self, SetupError> {
        let state = MatchState::new(config, &catalog)?;
        Ok(Self {
            state,
            rules: BiomaRules::new(config.auto_place),
            phase: TurnPhase::TurnStart,
            catalog,
        })
    }

    /// Take over an existing state, e.g. one restored from a snapshot.
    ///
    /// A state whose action is already spent resumes at `ActionResolved`;
    /// otherwise the current seat's turn starts over.
    #[must_use]
    pub fn resume(state: MatchState, rules: BiomaRules) -> Self {
        let phase = if state.is_over() {
            TurnPhase::Finished
        } else if state.action_taken {
            TurnPhase::ActionResolved
        } else {
            TurnPhase::TurnStart
        };
        Self {
            state,
            rules,
            phase,
            catalog: Catalog::standard(),
        }
    }

    /// Use `catalog` for future resets.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> MatchState {
        self.state
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn rules(&self) -> &BiomaRules {
        &self.rules
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.is_terminal(&self.state)
    }

    /// Legal actions for the current seat; empty outside `ActionPending`.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.phase != TurnPhase::ActionPending {
            return Vec::new();
        }
        self.rules.legal_actions(&self.state, self.state.current_player)
    }

    /// Toggle the highlighted card of the current seat.
    pub fn toggle_selection(&mut self, card: CardId) -> Result<Option<CardId>> {
        self.state.toggle_selection(card)
    }

    /// Move a card within `player`'s hand.
    pub fn reorder_hand(
        &mut self,
        player: PlayerId,
        card: CardId,
        position: ZonePosition,
    ) -> Result<()> {
        self.state.reorder_hand(player, card, position)
    }

    fn expect_phase(&self, action: &'static str, allowed: &[TurnPhase]) -> Result<()> {
        if self.phase == TurnPhase::Finished {
            return Err(RuleError::MatchOver);
        }
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(RuleError::WrongPhase {
                action,
                phase: self.phase.name(),
            })
        }
    }

    /// Evaluate the current seat's obligations.
    ///
    /// A skipped turn goes straight to `TurnEnd`.
    pub fn begin_turn(&mut self) -> Result<TurnStartReport> {
        self.expect_phase("begin turn", &[TurnPhase::TurnStart])?;

        let player = self.state.current_player;
        let report = on_turn_start(&mut self.state, player)?;
        self.phase = if report.skipped() {
            TurnPhase::TurnEnd
        } else {
            TurnPhase::ActionPending
        };
        Ok(report)
    }

    /// Perform the current seat's primary action.
    pub fn perform(&mut self, player: PlayerId, action: &Action) -> Result<Resolution> {
        self.expect_phase(action.kind(), &[TurnPhase::ActionPending])?;

        let resolution = self.rules.apply_action(&mut self.state, player, action)?;
        self.phase = if resolution.winner.is_some() {
            TurnPhase::Finished
        } else {
            TurnPhase::ActionResolved
        };
        Ok(resolution)
    }

    /// Let `policy` act for the current seat, which must be an AI seat.
    pub fn take_ai_turn<P: Policy + ?Sized>(&mut self, policy: &mut P) -> Result<Resolution> {
        self.expect_phase("ai turn", &[TurnPhase::ActionPending])?;

        let player = self.state.current_player;
        if self.state.current().is_human {
            return Err(RuleError::NotAnAiSeat(player));
        }
        let action = policy.choose(&self.state, player);
        self.perform(player, &action)
    }

    /// Close the turn: discard a held Sorte card and pass to the next seat.
    pub fn end_turn(&mut self) -> Result<TurnEndReport> {
        self.expect_phase("end turn", &[TurnPhase::ActionResolved, TurnPhase::TurnEnd])?;

        let player = self.state.current_player;
        let held = self.state.players[player]
            .active_card
            .as_ref()
            .and_then(Card::sorte_effect)
            .is_some_and(|sorte| sorte.held_until_turn_end());
        let discarded = if held {
            self.state.players[player].active_card.take()
        } else {
            None
        };
        if let Some(card) = &discarded {
            self.state.discard(card.clone());
        }

        self.state.advance_turn();
        self.phase = TurnPhase::TurnStart;

        Ok(TurnEndReport {
            player,
            discarded,
            next: self.state.current_player,
        })
    }

    /// Advance by one transition. AI seats act through `policy`.
    pub fn step<P: Policy + ?Sized>(&mut self, policy: &mut P) -> Result<Progress> {
        match self.phase {
            TurnPhase::Finished => self
                .result()
                .map(Progress::Finished)
                .ok_or(RuleError::MatchOver),
            TurnPhase::TurnStart => self.begin_turn().map(Progress::TurnStarted),
            TurnPhase::ActionPending => {
                if self.state.current().is_human {
                    Ok(Progress::AwaitingInput(self.state.current_player))
                } else {
                    self.take_ai_turn(policy).map(Progress::Acted)
                }
            }
            TurnPhase::ActionResolved | TurnPhase::TurnEnd => {
                self.end_turn().map(Progress::TurnEnded)
            }
        }
    }

    /// Play an AI-only match until someone wins or `max_turns` have passed.
    ///
    /// Returns `Ok(None)` when the turn limit is hit first. A human seat
    /// coming up to act is an error.
    pub fn run_ai_match<P: Policy + ?Sized>(
        &mut self,
        policy: &mut P,
        max_turns: u32,
    ) -> Result<Option<GameResult>> {
        loop {
            if self.state.turn_number > max_turns && self.phase == TurnPhase::TurnStart {
                return Ok(None);
            }
            match self.step(policy)? {
                Progress::Finished(result) => return Ok(Some(result)),
                Progress::AwaitingInput(player) => return Err(RuleError::NotAnAiSeat(player)),
                Progress::TurnStarted(_) | Progress::Acted(_) | Progress::TurnEnded(_) => {}
            }
        }
    }

    /// Abandon the current match and set up a new one.
    pub fn reset(&mut self, config: &MatchConfig) -> std::result::Result<(), SetupError> {
        self.state = MatchState::new(config, &self.catalog)?;
        self.rules = BiomaRules::new(config.auto_place);
        self.phase = TurnPhase::TurnStart;
        Ok(())
    }
}
