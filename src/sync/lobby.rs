//! Room rules before a networked match starts.

use crate::cards::{Biome, Catalog};
use crate::core::{GameRng, MatchConfig, MatchState, SeatConfig, MAX_PLAYERS};
use crate::error::{LobbyError, SetupError};
use crate::rules::TurnController;

use super::record::{MatchSnapshot, PlayerRecord, RoomRecord, RoomStatus};

const ROOM_CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const ROOM_CODE_LEN: usize = 6;

/// A fresh room code.
pub fn generate_room_code(rng: &mut GameRng) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| char::from(ROOM_CODE_ALPHABET[rng.gen_range_usize(0..ROOM_CODE_ALPHABET.len())]))
        .collect()
}

#[must_use]
pub fn is_valid_room_code(code: &str) -> bool {
    code.len() == ROOM_CODE_LEN && code.bytes().all(|b| ROOM_CODE_ALPHABET.contains(&b))
}

/// A room and its seats, as the host sees them.
///
/// Every seat in a lobby is human; the match runs with no AI seats.
#[derive(Clone, Debug)]
pub struct Lobby {
    pub room: RoomRecord,
    /// In seat order.
    pub players: Vec<PlayerRecord>,
    catalog: Catalog,
}

impl Lobby {
    /// Open a room with the host in seat 0 on the first selected biome.
    pub fn create(
        host_id: impl Into<String>,
        host_name: impl Into<String>,
        selected_biomes: Vec<Biome>,
        special_cards_count: usize,
        rng: &mut GameRng,
    ) -> Result<Self, LobbyError> {
        let Some(&first) = selected_biomes.first() else {
            return Err(SetupError::NotEnoughBiomes {
                players: 1,
                biomes: 0,
            }
            .into());
        };
        for (i, biome) in selected_biomes.iter().enumerate() {
            if selected_biomes[..i].contains(biome) {
                return Err(SetupError::DuplicateBiome(*biome).into());
            }
        }

        let host_id = host_id.into();
        let code = generate_room_code(rng);
        let host = PlayerRecord::joining(code.clone(), host_id.clone(), host_name, 0, first);
        Ok(Self {
            room: RoomRecord::waiting(code, host_id, selected_biomes, special_cards_count),
            players: vec![host],
            catalog: Catalog::standard(),
        })
    }

    /// Reassemble a lobby from stored records.
    #[must_use]
    pub fn from_records(room: RoomRecord, mut players: Vec<PlayerRecord>) -> Self {
        players.sort_by_key(|p| p.player_order);
        Self {
            room,
            players,
            catalog: Catalog::standard(),
        }
    }

    /// Build decks from `catalog` instead of the standard one.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.room.code
    }

    #[must_use]
    pub fn is_host(&self, player_id: &str) -> bool {
        self.room.host_id == player_id
    }

    #[must_use]
    pub fn seat(&self, player_id: &str) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    fn seat_mut(&mut self, player_id: &str) -> Result<&mut PlayerRecord, LobbyError> {
        self.players
            .iter_mut()
            .find(|p| p.player_id == player_id)
            .ok_or_else(|| LobbyError::UnknownSeat(player_id.to_string()))
    }

    /// Selected biomes nobody has taken yet, in selection order.
    #[must_use]
    pub fn available_biomes(&self) -> Vec<Biome> {
        self.room
            .selected_biomes
            .iter()
            .copied()
            .filter(|biome| !self.players.iter().any(|p| p.biome == *biome))
            .collect()
    }

    /// Seat a new player on the first free biome.
    ///
    /// Player ids are unique within a room.
    pub fn join(
        &mut self,
        player_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<&PlayerRecord, LobbyError> {
        if self.room.status != RoomStatus::Waiting {
            return Err(LobbyError::AlreadyStarted);
        }
        let player_id = player_id.into();
        if self.seat(&player_id).is_some() {
            return Err(LobbyError::DuplicateSeat(player_id));
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(LobbyError::RoomFull);
        }
        let biome = *self
            .available_biomes()
            .first()
            .ok_or(LobbyError::RoomFull)?;

        let order = u8::try_from(self.players.len()).map_err(|_| LobbyError::RoomFull)?;
        self.players.push(PlayerRecord::joining(
            self.room.code.clone(),
            player_id,
            name,
            order,
            biome,
        ));
        Ok(&self.players[self.players.len() - 1])
    }

    pub fn set_ready(&mut self, player_id: &str, ready: bool) -> Result<(), LobbyError> {
        self.seat_mut(player_id)?.ready = ready;
        Ok(())
    }

    pub fn disconnect(&mut self, player_id: &str) -> Result<(), LobbyError> {
        self.seat_mut(player_id)?.connected = false;
        Ok(())
    }

    /// Start the match. Only the host may start, with at least two seats,
    /// all of them ready.
    pub fn start(&mut self, requester: &str, seed: u64) -> Result<TurnController, LobbyError> {
        if self.room.status != RoomStatus::Waiting {
            return Err(LobbyError::AlreadyStarted);
        }
        if !self.is_host(requester) {
            return Err(LobbyError::NotHost);
        }
        if self.players.len() < 2 {
            return Err(LobbyError::NotEnoughPlayers(self.players.len()));
        }
        if !self.players.iter().all(|p| p.ready) {
            return Err(LobbyError::NotAllReady);
        }

        // Seat i must get biome i; unclaimed selections still go into the deck.
        let mut biomes: Vec<Biome> = self.players.iter().map(|p| p.biome).collect();
        biomes.extend(self.available_biomes());
        let seats = self
            .players
            .iter()
            .map(|p| SeatConfig::human(p.name.clone()))
            .collect();
        let config = MatchConfig::new(self.players.len())
            .with_biomes(biomes)
            .with_seats(seats)
            .with_seed(seed);

        let controller = TurnController::new(&config, self.catalog.clone())?
            .with_catalog(self.catalog.clone());
        self.room.status = RoomStatus::Playing;
        self.sync(controller.state());
        Ok(controller)
    }

    /// Write `state` into the room and seat records.
    pub fn sync(&mut self, state: &MatchState) {
        let snapshot = self.snapshot(state);
        self.room = snapshot.room;
        self.players = snapshot.players;
    }

    #[must_use]
    pub fn snapshot(&self, state: &MatchState) -> MatchSnapshot {
        MatchSnapshot::capture(&self.room, &self.players, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lobby() -> Lobby {
        let mut rng = GameRng::new(77);
        Lobby::create(
            "host",
            "Ana",
            vec![Biome::Pantanal, Biome::Pampa, Biome::Caatinga],
            8,
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn test_room_code() {
        let mut rng = GameRng::new(3);
        let code = generate_room_code(&mut rng);

        assert_eq!(code.len(), 6);
        assert!(is_valid_room_code(&code));
        assert!(!is_valid_room_code("abc123"));
        assert!(!is_valid_room_code("ABC12"));
    }

    #[test]
    fn test_create() {
        let lobby = lobby();

        assert!(is_valid_room_code(lobby.code()));
        assert_eq!(lobby.room.status, RoomStatus::Waiting);
        assert_eq!(lobby.players.len(), 1);
        assert_eq!(lobby.players[0].biome, Biome::Pantanal);
        assert!(lobby.is_host("host"));

        let mut rng = GameRng::new(1);
        assert!(matches!(
            Lobby::create("h", "H", vec![], 8, &mut rng),
            Err(LobbyError::Setup(SetupError::NotEnoughBiomes { .. }))
        ));
        assert!(matches!(
            Lobby::create("h", "H", vec![Biome::Pampa, Biome::Pampa], 8, &mut rng),
            Err(LobbyError::Setup(SetupError::DuplicateBiome(Biome::Pampa)))
        ));
    }

    #[test]
    fn test_join_takes_first_free_biome() {
        let mut lobby = lobby();

        let seat = lobby.join("p1", "Beto").unwrap();
        assert_eq!(seat.biome, Biome::Pampa);
        assert_eq!(seat.player_order, 1);

        lobby.join("p2", "Caio").unwrap();
        assert!(lobby.available_biomes().is_empty());
        assert!(matches!(lobby.join("p3", "Duda"), Err(LobbyError::RoomFull)));
    }

    #[test]
    fn test_join_rejects_taken_id() {
        let mut lobby = lobby();
        lobby.join("p1", "Beto").unwrap();

        assert_eq!(
            lobby.join("host", "Impostor").err(),
            Some(LobbyError::DuplicateSeat("host".to_string()))
        );
        assert_eq!(
            lobby.join("p1", "Beto again").err(),
            Some(LobbyError::DuplicateSeat("p1".to_string()))
        );
        assert_eq!(lobby.players.len(), 2);
        assert_eq!(lobby.available_biomes(), vec![Biome::Caatinga]);
    }

    #[test]
    fn test_start_rules() {
        let mut lobby = lobby();
        assert!(matches!(
            lobby.start("host", 1),
            Err(LobbyError::NotEnoughPlayers(1))
        ));

        lobby.join("p1", "Beto").unwrap();
        assert!(matches!(lobby.start("p1", 1), Err(LobbyError::NotHost)));
        assert!(matches!(lobby.start("host", 1), Err(LobbyError::NotAllReady)));

        lobby.set_ready("host", true).unwrap();
        lobby.set_ready("p1", true).unwrap();
        assert!(matches!(
            lobby.set_ready("ghost", true),
            Err(LobbyError::UnknownSeat(_))
        ));

        let controller = lobby.start("host", 1).unwrap();
        assert_eq!(lobby.room.status, RoomStatus::Playing);
        assert_eq!(controller.state().player_count(), 2);
        assert!(controller.state().players.values().all(|p| p.is_human));
        assert_eq!(controller.state().players.values().next().map(|p| p.biome), Some(Biome::Pantanal));
        assert_eq!(lobby.players[1].hand.len(), 3);
        assert!(!lobby.room.deck.is_empty());

        assert!(matches!(lobby.join("p2", "Caio"), Err(LobbyError::AlreadyStarted)));
        assert!(matches!(lobby.start("host", 1), Err(LobbyError::AlreadyStarted)));
    }

    #[test]
    fn test_unclaimed_biomes_stay_in_deck() {
        let mut lobby = lobby();
        lobby.join("p1", "Beto").unwrap();
        lobby.set_ready("host", true).unwrap();
        lobby.set_ready("p1", true).unwrap();

        let controller = lobby.start("host", 5).unwrap();

        assert_eq!(controller.state().selected_biomes.len(), 3);
        assert!(controller.state().selected_biomes.contains(&Biome::Caatinga));
    }

    #[test]
    fn test_disconnect() {
        let mut lobby = lobby();
        lobby.disconnect("host").unwrap();
        assert!(!lobby.seat("host").map_or(true, |s| s.connected));
        assert!(lobby.disconnect("nobody").is_err());
    }
}
