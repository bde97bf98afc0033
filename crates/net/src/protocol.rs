//! Protocol module - line-based text messages for the multiplayer server
//!
//! Every message starts with an upper-case keyword. The payload follows after
//! a single space; list payloads (channels, scores) continue on further lines
//! of the same message.
//!
//! Outbound messages are built as [`ClientMessage`] and rendered with
//! `Display`. Inbound text is parsed into [`ServerMessage`]; anything that does
//! not parse yields a [`ProtocolError`] which callers log and drop.

use std::fmt;

use crate::core::{HighScore, Piece};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty message")]
    Empty,
    #[error("unknown keyword: {0}")]
    UnknownKeyword(String),
    #[error("{0} requires a payload")]
    MissingPayload(&'static str),
    #[error("invalid number in {keyword}: {value:?}")]
    InvalidNumber { keyword: &'static str, value: String },
    #[error("invalid piece id: {0}")]
    InvalidPiece(usize),
    #[error("malformed {keyword} entry: {entry:?}")]
    MalformedEntry { keyword: &'static str, entry: String },
}

// ============== Client -> Server Messages ==============

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// Request the channel list
    List,
    Create(String),
    Join(String),
    Part,
    Nick(String),
    Users,
    Start,
    /// Request the next piece in the shared sequence
    Piece,
    /// Full board, row-major
    Board(Vec<u8>),
    /// Request the leaderboard
    Scores,
    Score(u32),
    Lives(i32),
    Die,
    HiScores,
    HiScore(HighScore),
    Msg(String),
}

impl ClientMessage {
    pub fn keyword(&self) -> &'static str {
        match self {
            ClientMessage::List => "LIST",
            ClientMessage::Create(_) => "CREATE",
            ClientMessage::Join(_) => "JOIN",
            ClientMessage::Part => "PART",
            ClientMessage::Nick(_) => "NICK",
            ClientMessage::Users => "USERS",
            ClientMessage::Start => "START",
            ClientMessage::Piece => "PIECE",
            ClientMessage::Board(_) => "BOARD",
            ClientMessage::Scores => "SCORES",
            ClientMessage::Score(_) => "SCORE",
            ClientMessage::Lives(_) => "LIVES",
            ClientMessage::Die => "DIE",
            ClientMessage::HiScores => "HISCORES",
            ClientMessage::HiScore(_) => "HISCORE",
            ClientMessage::Msg(_) => "MSG",
        }
    }
}

impl fmt::Display for ClientMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())?;
        match self {
            ClientMessage::Create(s)
            | ClientMessage::Join(s)
            | ClientMessage::Nick(s)
            | ClientMessage::Msg(s) => write!(f, " {}", s),
            ClientMessage::Score(n) => write!(f, " {}", n),
            ClientMessage::Lives(n) => write!(f, " {}", n),
            ClientMessage::HiScore(entry) => write!(f, " {}", entry),
            ClientMessage::Board(values) => {
                // Each value is followed by a space, including the last one.
                f.write_str(" ")?;
                for v in values {
                    write!(f, "{} ", v)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

// ============== Server -> Client Messages ==============

/// Lives column of a leaderboard line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerLives {
    Alive(u32),
    Dead,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub lives: PlayerLives,
}

impl LeaderboardEntry {
    pub fn is_dead(&self) -> bool {
        self.lives == PlayerLives::Dead
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    Channels(Vec<String>),
    Join(String),
    Host,
    Parted,
    Nick(String),
    Users(Vec<String>),
    Start,
    Piece(Piece),
    /// Another player's board; not interpreted
    Board(String),
    /// Leaderboard, highest score first
    Scores(Vec<LeaderboardEntry>),
    HiScores(Vec<HighScore>),
    Msg { sender: String, text: String },
    Error(String),
}

/// Parse one inbound message
pub fn parse_message(raw: &str) -> Result<ServerMessage, ProtocolError> {
    let raw = raw.trim_end_matches(['\r', '\n']);
    if raw.trim().is_empty() {
        return Err(ProtocolError::Empty);
    }

    let (keyword, payload) = match raw.find([' ', '\n']) {
        Some(i) => (&raw[..i], &raw[i + 1..]),
        None => (raw, ""),
    };

    match keyword {
        "CHANNELS" => Ok(ServerMessage::Channels(non_empty_lines(payload))),
        "JOIN" => Ok(ServerMessage::Join(required("JOIN", payload)?.to_string())),
        "HOST" => Ok(ServerMessage::Host),
        "PARTED" => Ok(ServerMessage::Parted),
        "NICK" => Ok(ServerMessage::Nick(required("NICK", payload)?.to_string())),
        "USERS" => Ok(ServerMessage::Users(
            payload
                .split([':', '\n'])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        "START" => Ok(ServerMessage::Start),
        "PIECE" => {
            let value = required("PIECE", payload)?;
            let id: usize = value.parse().map_err(|_| ProtocolError::InvalidNumber {
                keyword: "PIECE",
                value: value.to_string(),
            })?;
            Piece::from_index(id)
                .map(ServerMessage::Piece)
                .ok_or(ProtocolError::InvalidPiece(id))
        }
        "BOARD" => Ok(ServerMessage::Board(payload.to_string())),
        "SCORES" => parse_leaderboard(payload).map(ServerMessage::Scores),
        "HISCORES" => parse_hiscores(payload).map(ServerMessage::HiScores),
        "MSG" => {
            let body = required("MSG", payload)?;
            let (sender, text) = body.split_once(':').ok_or_else(|| ProtocolError::MalformedEntry {
                keyword: "MSG",
                entry: body.to_string(),
            })?;
            Ok(ServerMessage::Msg {
                sender: sender.to_string(),
                text: text.to_string(),
            })
        }
        "ERROR" => Ok(ServerMessage::Error(payload.trim().to_string())),
        other => Err(ProtocolError::UnknownKeyword(other.to_string())),
    }
}

fn required<'a>(keyword: &'static str, payload: &'a str) -> Result<&'a str, ProtocolError> {
    let payload = payload.trim();
    if payload.is_empty() {
        Err(ProtocolError::MissingPayload(keyword))
    } else {
        Ok(payload)
    }
}

fn non_empty_lines(payload: &str) -> Vec<String> {
    payload
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `name:score:lives|DEAD` lines, highest score first
pub fn parse_leaderboard(payload: &str) -> Result<Vec<LeaderboardEntry>, ProtocolError> {
    let mut entries = Vec::new();
    for line in non_empty_lines(payload) {
        let malformed = || ProtocolError::MalformedEntry {
            keyword: "SCORES",
            entry: line.clone(),
        };
        let mut parts = line.split(':');
        let (Some(name), Some(score), Some(lives), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        let score = score.trim().parse().map_err(|_| malformed())?;
        let lives = match lives.trim() {
            "DEAD" => PlayerLives::Dead,
            n => PlayerLives::Alive(n.parse().map_err(|_| malformed())?),
        };
        entries.push(LeaderboardEntry {
            name: name.to_string(),
            score,
            lives,
        });
    }
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(entries)
}

/// Parse `name:score` lines
pub fn parse_hiscores(payload: &str) -> Result<Vec<HighScore>, ProtocolError> {
    non_empty_lines(payload)
        .into_iter()
        .map(|line| {
            HighScore::parse(&line).ok_or(ProtocolError::MalformedEntry {
                keyword: "HISCORES",
                entry: line,
            })
        })
        .collect()
}
