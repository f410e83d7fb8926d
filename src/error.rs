//! Error types for the Bioma engine.
//!
//! Every state-changing operation checks all of its preconditions before
//! the first mutation, so receiving an error means the match is unchanged.

use thiserror::Error;

use crate::cards::Biome;
use crate::core::{CardId, PlayerId};

/// An action the rules do not allow right now.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("the match is already over")]
    MatchOver,

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("the turn's action has already been taken")]
    ActionAlreadyTaken,

    #[error("cannot {action} during {phase}")]
    WrongPhase {
        action: &'static str,
        phase: &'static str,
    },

    #[error("unknown seat {0}")]
    UnknownPlayer(PlayerId),

    #[error("{card} is not in {player}'s hand")]
    CardNotInHand { card: CardId, player: PlayerId },

    #[error("{card} does not belong to {player}'s biome")]
    OffBiome { card: CardId, player: PlayerId },

    #[error("{0}'s biome zone is already complete")]
    ZoneComplete(PlayerId),

    #[error("{0} cannot be played by choice")]
    NotPlayable(CardId),

    #[error("{0} is not a Sorte card")]
    NotSorte(CardId),

    #[error("the deck is empty")]
    EmptyDeck,

    #[error("{0} has fewer than 2 cards and cannot be stolen from")]
    StealSourceTooSmall(PlayerId),

    #[error("no card at position {index} in {player}'s hand")]
    InvalidStealIndex { player: PlayerId, index: usize },

    #[error("a player cannot target themselves")]
    SelfTarget,

    #[error("Pulo+1 needs a target")]
    MissingTarget,

    #[error("{0} already has a pending Pulo+1")]
    ObligationPending(PlayerId),

    #[error("{0} already has a Sorte card in effect")]
    ActiveCardInPlay(PlayerId),

    #[error("+2 needs a choice of draws and steals")]
    MissingPlusTwoChoice,

    #[error("passing is only allowed with no other legal action")]
    CannotPass,

    #[error("{0} is controlled by a human, not the AI")]
    NotAnAiSeat(PlayerId),
}

/// A match configuration that cannot be set up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("need between 2 and 6 players, got {0}")]
    PlayerCount(usize),

    #[error("{players} players need at least {players} biomes, got {biomes}")]
    NotEnoughBiomes { players: usize, biomes: usize },

    #[error("biome {0} was selected twice")]
    DuplicateBiome(Biome),

    #[error("biome {0} has no roster in the catalog")]
    MissingRoster(Biome),

    #[error("a biome zone goal of {0} cards cannot be played")]
    ZoneGoal(usize),

    #[error("{seats} seats configured for {players} players")]
    SeatCount { seats: usize, players: usize },
}

/// A broken engine invariant. Never expected at runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("{0} appears in more than one place")]
    DuplicateCard(CardId),

    #[error("{player}'s biome zone holds {size} cards, above the goal of {goal}")]
    ZoneOverflow {
        player: PlayerId,
        size: usize,
        goal: usize,
    },
}

/// A lobby request the room rules reject.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LobbyError {
    #[error("room has already started")]
    AlreadyStarted,

    #[error("room is full")]
    RoomFull,

    #[error("no seat with id {0}")]
    UnknownSeat(String),

    #[error("a seat with id {0} already exists")]
    DuplicateSeat(String),

    #[error("only the host can start the match")]
    NotHost,

    #[error("at least 2 players are needed, got {0}")]
    NotEnoughPlayers(usize),

    #[error("every player must be ready")]
    NotAllReady,

    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// A snapshot that cannot be encoded, decoded or restored.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("room has no seats")]
    NoSeats,

    #[error("seat order {0} is missing or repeated")]
    SeatOrder(usize),

    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}

pub type Result<T> = std::result::Result<T, RuleError>;
