//! Wire shapes shared with the remote synchronization layer.
//!
//! One `RoomRecord` per match plus one `PlayerRecord` per seat. A
//! `MatchSnapshot` bundles both and converts to and from `MatchState`.

use serde::{Deserialize, Serialize};

use crate::cards::{Biome, Card};
use crate::core::{
    Action, GameRng, GameRngState, MatchState, Player, PlayerId, PlayerMap, MAX_PLAYERS,
};
use crate::error::{Result, SnapshotError};
use crate::rules::{Resolution, TurnController};
use crate::triggers::Obligations;
use crate::zones::Pile;

/// Lifecycle of a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Playing,
}

/// Room-level state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    /// Six characters from `0-9A-Z`.
    pub code: String,
    pub host_id: String,
    pub selected_biomes: Vec<Biome>,
    pub special_cards_count: usize,
    pub status: RoomStatus,
    pub deck: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub current_player_index: u8,
    pub action_taken: bool,
    pub winner: Option<u8>,
    pub turn_number: u32,
    pub zone_goal: usize,
    /// Match RNG position, once the match has started.
    pub rng: Option<GameRngState>,
}

impl RoomRecord {
    /// A fresh room in `Waiting` with no cards yet.
    #[must_use]
    pub fn waiting(
        code: impl Into<String>,
        host_id: impl Into<String>,
        selected_biomes: Vec<Biome>,
        special_cards_count: usize,
    ) -> Self {
        Self {
            code: code.into(),
            host_id: host_id.into(),
            selected_biomes,
            special_cards_count,
            status: RoomStatus::Waiting,
            deck: Vec::new(),
            discard_pile: Vec::new(),
            current_player_index: 0,
            action_taken: false,
            winner: None,
            turn_number: 1,
            zone_goal: 8,
            rng: None,
        }
    }
}

/// Seat-level state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Code of the room this seat belongs to.
    pub room_id: String,
    pub player_id: String,
    pub name: String,
    /// Seat index; also the seat's `PlayerId`.
    pub player_order: u8,
    pub biome: Biome,
    pub hand: Vec<Card>,
    pub biome_zone: Vec<Card>,
    pub effects: Obligations,
    pub active_card: Option<Card>,
    pub is_human: bool,
    pub ready: bool,
    pub connected: bool,
}

impl PlayerRecord {
    /// A connected, not-ready seat with no cards.
    #[must_use]
    pub fn joining(
        room_id: impl Into<String>,
        player_id: impl Into<String>,
        name: impl Into<String>,
        player_order: u8,
        biome: Biome,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            player_id: player_id.into(),
            name: name.into(),
            player_order,
            biome,
            hand: Vec::new(),
            biome_zone: Vec::new(),
            effects: Obligations::default(),
            active_card: None,
            is_human: true,
            ready: false,
            connected: true,
        }
    }

    /// Copy the card-bearing fields from `seat`.
    pub fn fill_from(&mut self, seat: &Player) {
        self.name.clone_from(&seat.name);
        self.biome = seat.biome;
        self.hand = seat.hand.as_slice().to_vec();
        self.biome_zone = seat.biome_zone.as_slice().to_vec();
        self.effects = seat.effects;
        self.active_card.clone_from(&seat.active_card);
        self.is_human = seat.is_human;
    }

    fn to_player(&self) -> Player {
        let mut seat = Player::new(
            PlayerId::new(self.player_order),
            self.name.clone(),
            self.biome,
            self.is_human,
        );
        seat.hand = Pile::from_cards(self.hand.clone());
        seat.biome_zone = Pile::from_cards(self.biome_zone.clone());
        seat.effects = self.effects;
        seat.active_card.clone_from(&self.active_card);
        seat
    }
}

/// A room and its seats at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub room: RoomRecord,
    /// Sorted by `player_order`.
    pub players: Vec<PlayerRecord>,
}

impl MatchSnapshot {
    /// Capture `state` into copies of the given room and seat records.
    ///
    /// Seats of `state` without a record get one with a generated id.
    #[must_use]
    pub fn capture(room: &RoomRecord, seats: &[PlayerRecord], state: &MatchState) -> Self {
        let mut room = room.clone();
        room.deck = state.deck.as_slice().to_vec();
        room.discard_pile = state.discard_pile.as_slice().to_vec();
        room.current_player_index = state.current_player.0;
        room.action_taken = state.action_taken;
        room.winner = state.winner.map(|w| w.0);
        room.turn_number = state.turn_number;
        room.zone_goal = state.zone_goal;
        room.selected_biomes.clone_from(&state.selected_biomes);
        room.rng = Some(state.rng.state());

        let players = state
            .players
            .iter()
            .map(|(id, seat)| {
                let mut record = seats
                    .iter()
                    .find(|r| r.player_order == id.0)
                    .cloned()
                    .unwrap_or_else(|| {
                        PlayerRecord::joining(
                            room.code.clone(),
                            format!("seat-{}", id.index()),
                            seat.name.clone(),
                            id.0,
                            seat.biome,
                        )
                    });
                record.fill_from(seat);
                record
            })
            .collect();

        Self { room, players }
    }

    /// Rebuild the match state. The action history is not part of the
    /// records and starts empty.
    pub fn into_state(self) -> std::result::Result<MatchState, SnapshotError> {
        if self.players.is_empty() {
            return Err(SnapshotError::NoSeats);
        }

        if self.players.len() > MAX_PLAYERS {
            return Err(SnapshotError::SeatOrder(MAX_PLAYERS));
        }

        let mut seats = self.players;
        seats.sort_by_key(|r| r.player_order);
        for (expected, record) in seats.iter().enumerate() {
            if usize::from(record.player_order) != expected {
                return Err(SnapshotError::SeatOrder(expected));
            }
        }
        let count = seats.len();
        let current = usize::from(self.room.current_player_index);
        if current >= count {
            return Err(SnapshotError::SeatOrder(current));
        }
        if let Some(winner) = self.room.winner.map(usize::from).filter(|&w| w >= count) {
            return Err(SnapshotError::SeatOrder(winner));
        }

        let players = PlayerMap::from_vec(seats.iter().map(PlayerRecord::to_player).collect());
        let rng = self
            .room
            .rng
            .as_ref()
            .map_or_else(|| GameRng::new(0), GameRng::from_state);

        let mut state = MatchState::from_parts(
            players,
            Pile::from_cards(self.room.deck),
            Pile::from_cards(self.room.discard_pile),
            self.room.selected_biomes,
            self.room.zone_goal,
            rng,
        );
        state.current_player = PlayerId::new(self.room.current_player_index);
        state.action_taken = self.room.action_taken;
        state.winner = self.room.winner.map(PlayerId::new);
        state.turn_number = self.room.turn_number;

        state.integrity_check()?;
        Ok(state)
    }

    pub fn encode(&self) -> std::result::Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> std::result::Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// A primary action made on another client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAction {
    pub player_order: u8,
    pub action: Action,
}

impl RemoteAction {
    #[must_use]
    pub fn new(player: PlayerId, action: Action) -> Self {
        Self {
            player_order: player.0,
            action,
        }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        PlayerId::new(self.player_order)
    }

    /// Apply through the same path as a local action.
    pub fn apply(&self, controller: &mut TurnController) -> Result<Resolution> {
        controller.perform(self.player(), &self.action)
    }

    pub fn encode(&self) -> std::result::Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> std::result::Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
