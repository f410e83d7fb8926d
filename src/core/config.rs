//! Match configuration.
//!
//! A `MatchConfig` describes one table: how many seats, which biomes are in
//! play, who sits where, and the handful of tunable numbers. Seat *i*
//! receives biome *i*; any extra selected biomes only add cards to the deck.
//!
//! ```
//! use bioma::cards::Biome;
//! use bioma::core::MatchConfig;
//!
//! let config = MatchConfig::new(3)
//!     .with_biomes(vec![Biome::Cerrado, Biome::Pampa, Biome::Pantanal])
//!     .with_seed(7);
//!
//! assert!(config.validate().is_ok());
//! assert!(config.seats[0].is_human);
//! assert_eq!(config.seats[2].name, "IA Beta");
//! ```

use crate::cards::Biome;
use crate::error::SetupError;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;
/// Largest supported table (one seat per biome).
pub const MAX_PLAYERS: usize = 6;

const AI_NAMES: [&str; 5] = ["IA Alpha", "IA Beta", "IA Gamma", "IA Delta", "IA Epsilon"];

/// Who sits in a seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatConfig {
    pub name: String,
    /// Human seats act through external input; the rest are driven by the AI.
    pub is_human: bool,
}

impl SeatConfig {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: true,
        }
    }

    pub fn ai(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: false,
        }
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    pub player_count: usize,

    /// Biomes whose rosters go into the deck. Seat *i* gets `biomes[i]`.
    pub biomes: Vec<Biome>,

    /// One entry per seat, in turn order.
    pub seats: Vec<SeatConfig>,

    /// Cards dealt to each seat at setup.
    pub starting_hand_size: usize,

    /// Biome zone size that wins the match.
    pub zone_goal: usize,

    /// RNG seed for shuffles and random steals.
    pub seed: u64,

    /// Human seats place a drawn or stolen card straight into a biome zone
    /// holding `zone_goal - 1` cards when it fits.
    pub auto_place: bool,
}

impl MatchConfig {
    /// Default table: seat 0 human ("Você"), the rest AI, biomes in catalog
    /// order.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        let seats = (0..player_count)
            .map(|i| match i {
                0 => SeatConfig::human("Você"),
                _ => SeatConfig::ai(
                    AI_NAMES
                        .get(i - 1)
                        .map_or_else(|| format!("IA {i}"), |name| (*name).to_string()),
                ),
            })
            .collect();

        Self {
            player_count,
            biomes: Biome::ALL.iter().copied().take(player_count).collect(),
            seats,
            starting_hand_size: 3,
            zone_goal: 8,
            seed: 0,
            auto_place: true,
        }
    }

    #[must_use]
    pub fn with_biomes(mut self, biomes: Vec<Biome>) -> Self {
        self.biomes = biomes;
        self
    }

    #[must_use]
    pub fn with_seats(mut self, seats: Vec<SeatConfig>) -> Self {
        self.seats = seats;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_zone_goal(mut self, goal: usize) -> Self {
        self.zone_goal = goal;
        self
    }

    #[must_use]
    pub fn with_auto_place(mut self, enabled: bool) -> Self {
        self.auto_place = enabled;
        self
    }

    /// Make every seat an AI seat (simulations, benchmarks).
    #[must_use]
    pub fn all_ai(mut self) -> Self {
        for seat in &mut self.seats {
            seat.is_human = false;
        }
        self
    }

    /// Check the table can be set up.
    pub fn validate(&self) -> Result<(), SetupError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(SetupError::PlayerCount(self.player_count));
        }
        if self.biomes.len() < self.player_count {
            return Err(SetupError::NotEnoughBiomes {
                players: self.player_count,
                biomes: self.biomes.len(),
            });
        }
        for (i, biome) in self.biomes.iter().enumerate() {
            if self.biomes[..i].contains(biome) {
                return Err(SetupError::DuplicateBiome(*biome));
            }
        }
        if self.zone_goal == 0 {
            return Err(SetupError::ZoneGoal(self.zone_goal));
        }
        if self.seats.len() != self.player_count {
            return Err(SetupError::SeatCount {
                seats: self.seats.len(),
                players: self.player_count,
            });
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seats() {
        let config = MatchConfig::new(4);

        let names: Vec<_> = config.seats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Você", "IA Alpha", "IA Beta", "IA Gamma"]);
        assert!(config.seats[0].is_human);
        assert!(config.seats[1..].iter().all(|s| !s.is_human));
        assert_eq!(config.biomes, Biome::ALL[..4].to_vec());
    }

    #[test]
    fn test_builder() {
        let config = MatchConfig::new(2)
            .with_seed(99)
            .with_zone_goal(5)
            .with_starting_hand_size(4)
            .with_auto_place(false)
            .all_ai();

        assert_eq!(config.seed, 99);
        assert_eq!(config.zone_goal, 5);
        assert_eq!(config.starting_hand_size, 4);
        assert!(!config.auto_place);
        assert!(config.seats.iter().all(|s| !s.is_human));
    }

    #[test]
    fn test_validate_player_count() {
        assert_eq!(MatchConfig::new(1).validate(), Err(SetupError::PlayerCount(1)));
        assert_eq!(MatchConfig::new(7).validate(), Err(SetupError::PlayerCount(7)));
        assert!(MatchConfig::new(6).validate().is_ok());
    }

    #[test]
    fn test_validate_biomes() {
        let short = MatchConfig::new(3).with_biomes(vec![Biome::Pampa, Biome::Cerrado]);
        assert_eq!(
            short.validate(),
            Err(SetupError::NotEnoughBiomes { players: 3, biomes: 2 })
        );

        let dup = MatchConfig::new(2).with_biomes(vec![Biome::Pampa, Biome::Pampa]);
        assert_eq!(dup.validate(), Err(SetupError::DuplicateBiome(Biome::Pampa)));

        let extra = MatchConfig::new(2).with_biomes(Biome::ALL.to_vec());
        assert!(extra.validate().is_ok());
    }

    #[test]
    fn test_validate_zone_goal() {
        let zero = MatchConfig::new(2).with_zone_goal(0);
        assert_eq!(zero.validate(), Err(SetupError::ZoneGoal(0)));
        assert!(MatchConfig::new(2).with_zone_goal(1).validate().is_ok());
    }

    #[test]
    fn test_validate_seat_count() {
        let config = MatchConfig::new(3).with_seats(vec![SeatConfig::human("Ana")]);
        assert_eq!(
            config.validate(),
            Err(SetupError::SeatCount { seats: 1, players: 3 })
        );
    }
}
