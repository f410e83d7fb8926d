//! Contract with a remote synchronization layer.
//!
//! Transport, persistence and fan-out live outside this crate. What lives
//! here is the shape of the stored records, conversion between them and
//! `MatchState`, and the lobby rules that run before a match starts.
//!
//! ```
//! use bioma::cards::Biome;
//! use bioma::core::GameRng;
//! use bioma::sync::{Lobby, MatchSnapshot};
//!
//! let mut rng = GameRng::new(1);
//! let biomes = vec![Biome::Pampa, Biome::Cerrado];
//! let mut lobby = Lobby::create("host", "Ana", biomes, 8, &mut rng).unwrap();
//! lobby.join("guest", "Beto").unwrap();
//! lobby.set_ready("host", true).unwrap();
//! lobby.set_ready("guest", true).unwrap();
//!
//! let controller = lobby.start("host", 42).unwrap();
//! let bytes = lobby.snapshot(controller.state()).encode().unwrap();
//! let restored = MatchSnapshot::decode(&bytes).unwrap().into_state().unwrap();
//! assert_eq!(restored.card_count(), controller.state().card_count());
//! ```

mod lobby;
mod record;

pub use lobby::{generate_room_code, is_valid_room_code, Lobby, ROOM_CODE_LEN};
pub use record::{MatchSnapshot, PlayerRecord, RemoteAction, RoomRecord, RoomStatus};
