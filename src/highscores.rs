//! High score leaderboard system
//!
//! Persisted as a JSON array of `{ "score": n }`, tracks top 10 scores.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
}

/// High score leaderboard (sorted descending)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from arbitrary records, restoring order and the size cap
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Append a score, re-sort descending and truncate to the top 10.
    /// Returns the rank achieved (1-indexed) or None if it fell off the table.
    pub fn add_score(&mut self, score: u64) -> Option<usize> {
        // Ties keep earlier entries ahead
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, HighScoreEntry { score });
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn scores(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|e| e.score)
    }
}

/// Where high scores live between sessions.
///
/// Loading never fails: an unreadable store is an empty leaderboard.
/// Saving failures are logged by the implementation and swallowed.
pub trait HighScoreStore {
    fn load(&mut self) -> HighScores;
    fn save(&mut self, scores: &HighScores);
}

/// Store backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub const FILE_NAME: &'static str = "highscores.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional file name inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> HighScores {
        match persistence::read_json::<Vec<HighScoreEntry>>(&self.path) {
            Ok(Some(entries)) => {
                let scores = HighScores::from_entries(entries);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                HighScores::new()
            }
            Err(e) => {
                log::warn!(
                    "High score file {} unreadable ({}), starting fresh",
                    self.path.display(),
                    e
                );
                HighScores::new()
            }
        }
    }

    fn save(&mut self, scores: &HighScores) {
        match persistence::write_json(&self.path, scores) {
            Ok(()) => log::info!("High scores saved ({} entries)", scores.entries.len()),
            Err(e) => log::warn!(
                "Failed to save high scores to {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

/// In-memory store, for tests and for running without a data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub saved: HighScores,
    pub save_count: usize,
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> HighScores {
        self.saved.clone()
    }

    fn save(&mut self, scores: &HighScores) {
        self.saved = scores.clone();
        self.save_count += 1;
    }
}
