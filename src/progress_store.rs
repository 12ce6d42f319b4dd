use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use tempfile::NamedTempFile;

use crate::SUPPORTED_LANGUAGES;
use crate::get_create_pilsa_progress_path;
use crate::logger::{error, warn};
use crate::types::{CompletedVerse, Position, ProgressEntry, ProgressSummary};

/// Key-value store of per-verse transcription progress.
///
/// One JSON file per attempted verse, named by the composite storage key,
/// e.g. "en_Genesis_1_3.json". The store is an explicit handle passed to
/// whoever needs it, not ambient state. There is no delete operation:
/// entries are only ever overwritten.
///
/// Aggregate queries re-scan the whole directory on every call. With one
/// entry per attempted verse of a single user that stays small; nothing is
/// cached or incrementally maintained.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    dir: PathBuf,
}

impl ProgressStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create progress dir {}", dir.display()))?;
        Ok(ProgressStore { dir })
    }

    /// Store under the per-user app root.
    pub fn open_default() -> Result<Self> {
        Self::open(get_create_pilsa_progress_path())
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn entry_path(&self, pos: &Position) -> PathBuf {
        self.dir.join(format!("{}.json", pos.storage_key()))
    }

    /// Write or overwrite the entry for a position. Called on every
    /// keystroke, so the write must be atomic: a crash mid-write must not
    /// leave a truncated entry behind. `completed_at` is stamped with the
    /// current time on every call with `completed == true`, matching the
    /// reading of "most recent" as most recently re-typed to completion.
    pub fn save(&self, pos: &Position, input: &str, completed: bool) -> Result<()> {
        let entry = ProgressEntry {
            completed,
            user_input: input.to_string(),
            completed_at: if completed { Some(Utc::now()) } else { None },
        };

        let json = serde_json::to_string(&entry)
            .with_context(|| format!("Failed to serialize progress entry for {}", pos))?;

        let mut temp_file = NamedTempFile::new_in(&self.dir)
            .context("Failed to create temp file in progress dir")?;
        temp_file.write_all(json.as_bytes())
            .context("Failed to write progress entry")?;
        temp_file.persist(self.entry_path(pos))
            .with_context(|| format!("Failed to persist progress entry for {}", pos))?;

        Ok(())
    }

    /// The saved entry for a position, or None. A malformed entry reads as
    /// absent rather than an error.
    pub fn get(&self, pos: &Position) -> Option<ProgressEntry> {
        let path = self.entry_path(pos);
        let contents = fs::read_to_string(&path).ok()?;

        match serde_json::from_str(&contents) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn(&format!("Skipping malformed progress entry {}: {}", path.display(), e));
                None
            }
        }
    }

    /// Every readable entry whose key carries a supported language prefix.
    /// Files with unparseable names or contents are skipped silently.
    /// Order is directory iteration order, which is unspecified.
    pub fn scan_all(&self) -> Vec<(Position, ProgressEntry)> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(e) => {
                error(&format!("Failed to read progress dir {}: {}", self.dir.display(), e));
                return Vec::new();
            }
        };

        let mut entries = Vec::new();

        for dir_entry in read_dir.filter_map(|e| e.ok()) {
            let path = dir_entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let key = match path.file_stem().and_then(|s| s.to_str()) {
                Some(k) => k,
                None => continue,
            };
            if !SUPPORTED_LANGUAGES.iter().any(|lang| key.starts_with(&format!("{}_", lang))) {
                continue;
            }
            let pos = match Position::from_storage_key(key) {
                Ok(p) => p,
                Err(_) => continue,
            };
            let contents = match fs::read_to_string(&path) {
                Ok(c) => c,
                Err(_) => continue,
            };
            // Skip invalid entries
            if let Ok(entry) = serde_json::from_str::<ProgressEntry>(&contents) {
                entries.push((pos, entry));
            }
        }

        entries
    }

    pub fn completed_count(&self) -> usize {
        self.scan_all().iter().filter(|(_, e)| e.completed).count()
    }

    pub fn total_count(&self) -> usize {
        self.scan_all().len()
    }

    /// Completed verses, newest first. Ties keep scan order.
    fn completed_descending(&self) -> Vec<CompletedVerse> {
        let mut completed: Vec<CompletedVerse> = self
            .scan_all()
            .into_iter()
            .filter_map(|(position, entry)| {
                entry.completed_at.map(|completed_at| CompletedVerse { position, completed_at })
            })
            .collect();

        completed.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        completed
    }

    /// The position of the verse completed most recently, across all
    /// languages and books.
    pub fn most_recent_completed(&self) -> Option<Position> {
        self.completed_descending().into_iter().next().map(|c| c.position)
    }

    /// The verse number completed most recently within one chapter.
    pub fn most_recent_completed_in_chapter(
        &self,
        lang: &str,
        book: &str,
        chapter: &str,
    ) -> Option<String> {
        self.completed_descending()
            .into_iter()
            .find(|c| {
                c.position.lang == lang && c.position.book == book && c.position.chapter == chapter
            })
            .map(|c| c.position.verse)
    }

    /// The most recently completed verses, newest first, at most `limit`.
    pub fn recent_completed(&self, limit: usize) -> Vec<CompletedVerse> {
        let mut completed = self.completed_descending();
        completed.truncate(limit);
        completed
    }

    /// Aggregate counts and the most recent completed position, derived
    /// from a single scan.
    pub fn summary(&self) -> ProgressSummary {
        let entries = self.scan_all();

        let total_count = entries.len();
        let completed_count = entries.iter().filter(|(_, e)| e.completed).count();
        let completion_percent = if total_count > 0 {
            ((completed_count as f64 / total_count as f64) * 100.0).round() as u8
        } else {
            0
        };

        let most_recent = entries
            .into_iter()
            .filter_map(|(position, entry)| {
                entry.completed_at.map(|completed_at| CompletedVerse { position, completed_at })
            })
            .max_by_key(|c| c.completed_at)
            .map(|c| c.position);

        ProgressSummary { completed_count, total_count, completion_percent, most_recent }
    }
}
