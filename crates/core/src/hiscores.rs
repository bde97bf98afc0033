//! High-score table and its persistence
//!
//! Scores are stored as plain text, one `name:score` pair per line. The table
//! keeps entries sorted by score (highest first) and never holds more than
//! [`HIGH_SCORE_LIMIT`] of them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::types::HIGH_SCORE_LIMIT;

#[derive(thiserror::Error, Debug)]
pub enum ScoreStoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed score on line {line}: {content:?}")]
    Malformed { line: usize, content: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HighScore {
    pub name: String,
    pub score: u32,
}

impl HighScore {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Parse a `name:score` pair
    pub fn parse(line: &str) -> Option<Self> {
        let (name, score) = line.trim().rsplit_once(':')?;
        let score = score.trim().parse().ok()?;
        Some(Self::new(name, score))
    }
}

impl std::fmt::Display for HighScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.score)
    }
}

/// Parse a whole scores file; blank lines are skipped
pub fn parse_scores(text: &str) -> Result<Vec<HighScore>, ScoreStoreError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| {
            HighScore::parse(l).ok_or_else(|| ScoreStoreError::Malformed {
                line: i + 1,
                content: l.to_string(),
            })
        })
        .collect()
}

pub fn format_scores(scores: &[HighScore]) -> String {
    let mut out = String::new();
    for s in scores {
        out.push_str(&s.to_string());
        out.push('\n');
    }
    out
}

/// Scores written when no file exists yet
pub fn default_scores() -> Vec<HighScore> {
    (1..=10).map(|i| HighScore::new("test", i * 1000)).collect()
}

/// Top scores, highest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighScoreTable {
    entries: Vec<HighScore>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = HighScore>) -> Self {
        let mut table = Self {
            entries: entries.into_iter().collect(),
        };
        table.normalize();
        table
    }

    fn normalize(&mut self) {
        // Stable: among equal scores the earlier entry stays ahead.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(HIGH_SCORE_LIMIT);
    }

    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowest score still on the table
    pub fn lowest(&self) -> Option<u32> {
        self.entries.last().map(|e| e.score)
    }

    /// Whether `score` would earn a place
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < HIGH_SCORE_LIMIT || self.lowest().is_some_and(|low| score > low)
    }

    /// Insert a score; returns its 0-based rank if it made the table
    pub fn insert(&mut self, entry: HighScore) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(rank, entry);
        self.entries.truncate(HIGH_SCORE_LIMIT);
        Some(rank)
    }
}

/// Load/save seam for the local high-score list
pub trait ScoreStore {
    fn load(&self) -> Result<Vec<HighScore>, ScoreStoreError>;
    fn save(&self, scores: &[HighScore]) -> Result<(), ScoreStoreError>;

    /// Load the table, treating any failure as "no scores yet"
    fn load_or_default(&self) -> HighScoreTable {
        match self.load() {
            Ok(scores) => HighScoreTable::from_entries(scores),
            Err(e) => {
                tracing::warn!(error = %e, "could not load high scores");
                HighScoreTable::new()
            }
        }
    }

    /// Save the table, logging failures
    fn save_or_log(&self, table: &HighScoreTable) {
        if let Err(e) = self.save(table.entries()) {
            tracing::warn!(error = %e, "could not save high scores");
        }
    }
}

/// Scores kept in a text file
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<Vec<HighScore>, ScoreStoreError> {
        if !self.path.is_file() {
            tracing::info!(path = %self.path.display(), "writing default high scores");
            self.save(&default_scores())?;
        }
        let text = fs::read_to_string(&self.path)?;
        parse_scores(&text)
    }

    fn save(&self, scores: &[HighScore]) -> Result<(), ScoreStoreError> {
        let limit = scores.len().min(HIGH_SCORE_LIMIT);
        fs::write(&self.path, format_scores(&scores[..limit]))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(HighScore::parse("alice:1200"), Some(HighScore::new("alice", 1200)));
        assert_eq!(HighScore::parse("no score"), None);
        assert_eq!(HighScore::parse("bob:lots"), None);
    }

    #[test]
    fn test_parse_scores_reports_line() {
        let err = parse_scores("a:1\n\nbroken\n").unwrap_err();
        match err {
            ScoreStoreError::Malformed { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_table_sorted_and_capped() {
        let table = HighScoreTable::from_entries(default_scores().into_iter().chain([
            HighScore::new("x", 500),
            HighScore::new("y", 20_000),
        ]));
        assert_eq!(table.len(), HIGH_SCORE_LIMIT);
        assert_eq!(table.entries()[0], HighScore::new("y", 20_000));
        assert_eq!(table.lowest(), Some(2000));
    }

    #[test]
    fn test_qualifies_and_insert() {
        let mut table = HighScoreTable::from_entries(default_scores());
        assert!(!table.qualifies(1000));
        assert!(table.qualifies(1001));
        assert_eq!(table.insert(HighScore::new("me", 5500)), Some(5));
        assert_eq!(table.len(), HIGH_SCORE_LIMIT);
        assert_eq!(table.insert(HighScore::new("low", 10)), None);

        let mut empty = HighScoreTable::new();
        assert!(empty.qualifies(0));
        assert_eq!(empty.insert(HighScore::new("first", 0)), Some(0));
    }

    #[test]
    fn test_format_roundtrip() {
        let scores = vec![HighScore::new("a", 3), HighScore::new("b", 2)];
        assert_eq!(format_scores(&scores), "a:3\nb:2\n");
        assert_eq!(parse_scores(&format_scores(&scores)).unwrap(), scores);
    }
}
