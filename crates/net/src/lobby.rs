//! Lobby state machine
//!
//! Tracks what the channel browser shows before a game starts: the channel
//! list, the joined channel, whether we host it, who is in it and the chat.
//! Reacting to server messages may queue replies (e.g. a `NICK` change
//! re-requests `USERS`).

use crate::protocol::{parse_message, ClientMessage, ServerMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyEvent {
    ChannelsUpdated,
    Joined,
    BecameHost,
    Parted,
    UsersUpdated,
    ChatReceived,
    /// The host started the game; switch to the multiplayer coordinator
    GameStarting,
    Error,
}

#[derive(Debug, Default)]
pub struct Lobby {
    channels: Vec<String>,
    channel: Option<String>,
    host: bool,
    users: Vec<String>,
    chat: Vec<(String, String)>,
    last_error: Option<String>,
    outbox: Vec<ClientMessage>,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    pub fn is_host(&self) -> bool {
        self.host
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Chat history as (sender, text)
    pub fn chat(&self) -> &[(String, String)] {
        &self.chat
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn take_outbound(&mut self) -> Vec<ClientMessage> {
        std::mem::take(&mut self.outbox)
    }

    pub fn refresh(&mut self) {
        self.outbox.push(ClientMessage::List);
    }

    pub fn create(&mut self, name: &str) {
        self.outbox.push(ClientMessage::Create(name.trim().to_string()));
    }

    pub fn join(&mut self, name: &str) {
        self.outbox.push(ClientMessage::Join(name.trim().to_string()));
    }

    pub fn leave(&mut self) {
        self.outbox.push(ClientMessage::Part);
    }

    /// Ask the server to start the game (host only)
    pub fn start_game(&mut self) -> bool {
        if !self.host {
            return false;
        }
        self.outbox.push(ClientMessage::Start);
        true
    }

    /// Send chat text; `/nick <name>` changes the nickname instead
    pub fn say(&mut self, text: &str) {
        match text.strip_prefix("/nick ") {
            Some(nick) => self.outbox.push(ClientMessage::Nick(nick.trim().to_string())),
            None => self.outbox.push(ClientMessage::Msg(text.to_string())),
        }
    }

    pub fn handle_line(&mut self, line: &str) -> Option<LobbyEvent> {
        match parse_message(line) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::debug!(error = %e, line, "ignoring server message");
                None
            }
        }
    }

    pub fn handle_message(&mut self, message: ServerMessage) -> Option<LobbyEvent> {
        let event = match message {
            ServerMessage::Channels(channels) => {
                self.channels = channels;
                LobbyEvent::ChannelsUpdated
            }
            ServerMessage::Join(channel) => {
                tracing::info!(%channel, "joined channel");
                self.channel = Some(channel);
                self.host = false;
                self.users.clear();
                self.chat.clear();
                self.outbox.push(ClientMessage::Users);
                LobbyEvent::Joined
            }
            ServerMessage::Host => {
                self.host = true;
                LobbyEvent::BecameHost
            }
            ServerMessage::Parted => {
                self.channel = None;
                self.host = false;
                self.users.clear();
                LobbyEvent::Parted
            }
            ServerMessage::Nick(_) => {
                self.outbox.push(ClientMessage::Users);
                return None;
            }
            ServerMessage::Users(users) => {
                self.users = users;
                LobbyEvent::UsersUpdated
            }
            ServerMessage::Msg { sender, text } => {
                self.chat.push((sender, text));
                LobbyEvent::ChatReceived
            }
            ServerMessage::Start => LobbyEvent::GameStarting,
            ServerMessage::Error(text) => {
                tracing::warn!(%text, "server error");
                self.last_error = Some(text);
                LobbyEvent::Error
            }
            other => {
                tracing::debug!(msg = ?other, "message not used in lobby");
                return None;
            }
        };
        Some(event)
    }
}
