//! Cosmetic think time before AI actions.
//!
//! The delay never touches match state or the match RNG, so a paced match
//! and an unpaced one with the same seed play out identically.

use std::time::Duration;

use crate::core::GameRng;

/// Bounds of the random pause before an AI action, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThinkDelay {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl ThinkDelay {
    #[must_use]
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// No pause at all, for tests and simulations.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(0, 0)
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.max_ms == 0
    }

    /// Draw a pause in `[min_ms, max_ms]`.
    pub fn sample(&self, rng: &mut GameRng) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.max_ms);
        }
        Duration::from_millis(rng.gen_range_u64(self.min_ms..self.max_ms + 1))
    }
}

impl Default for ThinkDelay {
    fn default() -> Self {
        Self::new(600, 900)
    }
}

#[cfg(feature = "pacing")]
pub use paced::Pacer;

#[cfg(feature = "pacing")]
mod paced {
    use super::ThinkDelay;
    use crate::ai::Policy;
    use crate::core::GameRng;
    use crate::error::{Result, RuleError};
    use crate::rules::{GameResult, Progress, Resolution, TurnController, TurnPhase};

    /// Awaits a think delay before each AI action.
    #[derive(Clone, Debug)]
    pub struct Pacer {
        delay: ThinkDelay,
        rng: GameRng,
    }

    impl Pacer {
        #[must_use]
        pub fn new(delay: ThinkDelay, seed: u64) -> Self {
            Self {
                delay,
                rng: GameRng::new(seed).for_context("pacing"),
            }
        }

        #[must_use]
        pub fn delay(&self) -> ThinkDelay {
            self.delay
        }

        /// Sleep for one sampled think delay.
        pub async fn pause(&mut self) {
            if self.delay.is_disabled() {
                return;
            }
            tokio::time::sleep(self.delay.sample(&mut self.rng)).await;
        }

        /// Think, then let `policy` act for the current AI seat.
        pub async fn take_ai_turn<P: Policy + ?Sized>(
            &mut self,
            controller: &mut TurnController,
            policy: &mut P,
        ) -> Result<Resolution> {
            self.pause().await;
            controller.take_ai_turn(policy)
        }

        /// Like [`TurnController::run_ai_match`], pausing before each action.
        pub async fn run_ai_match<P: Policy + ?Sized>(
            &mut self,
            controller: &mut TurnController,
            policy: &mut P,
            max_turns: u32,
        ) -> Result<Option<GameResult>> {
            loop {
                if controller.state().turn_number > max_turns
                    && controller.phase() == TurnPhase::TurnStart
                {
                    return Ok(None);
                }
                if controller.phase() == TurnPhase::ActionPending
                    && !controller.state().current().is_human
                {
                    self.pause().await;
                }
                match controller.step(policy)? {
                    Progress::Finished(result) => return Ok(Some(result)),
                    Progress::AwaitingInput(player) => return Err(RuleError::NotAnAiSeat(player)),
                    Progress::TurnStarted(_) | Progress::Acted(_) | Progress::TurnEnded(_) => {}
                }
            }
        }
    }
}
