//! Multiplayer support: wire protocol, coordinator, lobby and session runtime.
//!
//! The crate never opens sockets. A transport hands inbound lines to the
//! [`runtime`] over a channel and writes the outbound lines it receives back;
//! everything that touches game state runs on the session task.

pub mod config;
pub mod coordinator;
pub mod lobby;
pub mod protocol;
pub mod runtime;

pub use tetrecs_core as core;
pub use tetrecs_types as types;

pub use config::GameConfig;
pub use coordinator::{ChatLine, MultiplayerCoordinator};
pub use lobby::{Lobby, LobbyEvent};
pub use protocol::{
    parse_message, ClientMessage, LeaderboardEntry, PlayerLives, ProtocolError, ServerMessage,
};
pub use runtime::{run_session, SessionGame, SessionIo};
