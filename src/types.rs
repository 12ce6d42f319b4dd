use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Identifies one verse in the corpus: (language, book, chapter, verse).
/// Chapter and verse numbers are kept as strings because they are lookup
/// keys, not quantities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub lang: String,
    pub book: String,
    pub chapter: String,
    pub verse: String,
}

impl Position {
    pub fn new(
        lang: impl Into<String>,
        book: impl Into<String>,
        chapter: impl Into<String>,
        verse: impl Into<String>,
    ) -> Self {
        Position {
            lang: lang.into(),
            book: book.into(),
            chapter: chapter.into(),
            verse: verse.into(),
        }
    }

    /// The composite key used for persisted entries, e.g. "en_Genesis_1_3".
    /// Book names must not contain underscores for the key to parse back.
    pub fn storage_key(&self) -> String {
        format!("{}_{}_{}_{}", self.lang, self.book, self.chapter, self.verse)
    }

    /// Parse a composite storage key back into a Position. Requires exactly
    /// four non-empty underscore-separated fields.
    pub fn from_storage_key(key: &str) -> Result<Self, ParsePositionError> {
        let parts: Vec<&str> = key.split('_').collect();
        if parts.len() != 4 || parts.iter().any(|p| p.is_empty()) {
            return Err(ParsePositionError(key.to_string()));
        }
        Ok(Position::new(parts[0], parts[1], parts[2], parts[3]))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}:{} ({})", self.book, self.chapter, self.verse, self.lang)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid storage key: {0}")]
pub struct ParsePositionError(pub String);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Position not found in corpus: {0}")]
pub struct PositionNotFoundError(pub Position);

/// Overall correctness state of the current input against the verse text.
/// Recomputed from scratch on every keystroke, so 'Incorrect' can return
/// to 'Typing' when the user deletes back to a valid prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriptionStatus {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "typing")]
    Typing,
    #[serde(rename = "correct")]
    Correct,
    #[serde(rename = "incorrect")]
    Incorrect,
}

impl TranscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptionStatus::Idle => "idle",
            TranscriptionStatus::Typing => "typing",
            TranscriptionStatus::Correct => "correct",
            TranscriptionStatus::Incorrect => "incorrect",
        }
    }
}

// Custom error for parsing TranscriptionStatus from string
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid TranscriptionStatus value: {0}")]
pub struct ParseStatusError(String);

impl FromStr for TranscriptionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "idle" => Ok(TranscriptionStatus::Idle),
            "typing" => Ok(TranscriptionStatus::Typing),
            "correct" => Ok(TranscriptionStatus::Correct),
            "incorrect" => Ok(TranscriptionStatus::Incorrect),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Result of classifying one keystroke snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: TranscriptionStatus,
    /// False only for Idle. Idle is evaluated locally, without a store write.
    pub should_persist: bool,
    pub completed: bool,
}

/// Rendering class for one character slot of the verse text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Not yet typed, render the canonical character dimmed.
    Pending,
    Match,
    Mismatch,
}

/// One verse's persisted transcription attempt. Overwritten on every
/// keystroke; `completed_at` is re-stamped on every save with
/// `completed == true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub completed: bool,
    #[serde(rename = "userInput")]
    pub user_input: String,
    #[serde(rename = "completedAt", skip_serializing_if = "Option::is_none", default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Aggregate view over the whole store, recomputed by a full scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub completed_count: usize,
    pub total_count: usize,
    /// Rounded percentage, 0 when nothing has been attempted.
    pub completion_percent: u8,
    pub most_recent: Option<Position>,
}

/// A completed verse with its completion time, for recent-activity lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedVerse {
    pub position: Position,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_round_trip() {
        let pos = Position::new("en", "Genesis", "1", "3");
        assert_eq!(pos.storage_key(), "en_Genesis_1_3");
        assert_eq!(Position::from_storage_key("en_Genesis_1_3"), Ok(pos));
    }

    #[test]
    fn test_storage_key_with_spaces_in_book_name() {
        let pos = Position::new("en", "Song of Solomon", "2", "1");
        let key = pos.storage_key();
        assert_eq!(Position::from_storage_key(&key), Ok(pos));
    }

    #[test]
    fn test_storage_key_invalid() {
        assert!(Position::from_storage_key("").is_err());
        assert!(Position::from_storage_key("en_Genesis_1").is_err());
        assert!(Position::from_storage_key("en_Genesis_1_2_3").is_err());
        assert!(Position::from_storage_key("en__1_2").is_err());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("typing".parse::<TranscriptionStatus>(), Ok(TranscriptionStatus::Typing));
        assert!("unknown".parse::<TranscriptionStatus>().is_err());
    }
}
