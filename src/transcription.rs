use anyhow::Result;

use crate::app_settings::AppSettings;
use crate::corpus::ScriptureCorpus;
use crate::logger::warn;
use crate::matcher::classify;
use crate::navigation::{first_position, next_position};
use crate::progress_store::ProgressStore;
use crate::types::{Classification, Position, TranscriptionStatus};

/// One user's transcription session: the corpus being typed against and
/// the store the attempts are written to. The store is injected here and
/// owned for the session's lifetime; nothing else writes to it.
pub struct TranscriptionSession<'a> {
    corpus: &'a ScriptureCorpus,
    store: ProgressStore,
}

impl<'a> TranscriptionSession<'a> {
    pub fn new(corpus: &'a ScriptureCorpus, store: ProgressStore) -> Self {
        TranscriptionSession { corpus, store }
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    /// Process one keystroke snapshot for a verse: classify the input and
    /// persist it. Every non-idle state is written through to the store
    /// immediately, in keystroke order; idle (empty input) is evaluated
    /// locally without a write.
    pub fn handle_input(&self, pos: &Position, input: &str) -> Result<Classification> {
        let original = self.corpus.verse_text(&pos.lang, &pos.book, &pos.chapter, &pos.verse);
        let classification = classify(original, input);

        if classification.should_persist {
            self.store.save(pos, input, classification.completed)?;
        }

        Ok(classification)
    }

    /// Per-character rendering classes for a verse against the given input.
    pub fn render_classes(&self, pos: &Position, input: &str) -> Vec<crate::types::CharClass> {
        let original = self.corpus.verse_text(&pos.lang, &pos.book, &pos.chapter, &pos.verse);
        crate::matcher::char_classes(original, input)
    }

    /// The state to show when a verse is opened: a completed verse reloads
    /// as correct with its saved input, an unfinished attempt reloads its
    /// input at idle, an untouched verse is empty and idle.
    pub fn initial_state(&self, pos: &Position) -> (String, TranscriptionStatus) {
        match self.store.get(pos) {
            Some(entry) if entry.completed => (entry.user_input, TranscriptionStatus::Correct),
            Some(entry) => (entry.user_input, TranscriptionStatus::Idle),
            None => (String::new(), TranscriptionStatus::Idle),
        }
    }

    /// Where to place the cursor when a chapter is opened: the verse after
    /// the most recently completed verse of that chapter. Wraps to the
    /// first verse when the chapter's last verse is done, and falls back to
    /// the first verse when nothing is completed yet or the recorded verse
    /// is no longer in the corpus. None for an empty or unknown chapter.
    pub fn resume_verse(&self, lang: &str, book: &str, chapter: &str) -> Option<String> {
        let verses = self.corpus.chapter_verses(lang, book, chapter);
        let first = verses.first()?.to_string();

        match self.store.most_recent_completed_in_chapter(lang, book, chapter) {
            Some(last_verse) => match verses.iter().position(|v| *v == last_verse) {
                Some(i) if i + 1 < verses.len() => Some(verses[i + 1].to_string()),
                Some(_) => Some(first),
                None => Some(first),
            },
            None => Some(first),
        }
    }

    /// Where to continue across the whole corpus: the position after the
    /// most recently completed verse. At the corpus end the last completed
    /// position itself is returned, so the caller lands on its chapter.
    /// None when nothing has been completed, or when the stored position no
    /// longer resolves against the corpus.
    pub fn resume_position(&self) -> Option<Position> {
        let last = self.store.most_recent_completed()?;

        match next_position(self.corpus, &last) {
            Ok(Some(next)) => Some(next),
            Ok(None) => Some(last),
            Err(e) => {
                warn(&format!("Stale progress entry, not resuming: {}", e));
                None
            }
        }
    }

    /// The starting position for a profile with no progress: the first
    /// verse of the configured default language.
    pub fn start_position(&self, settings: &AppSettings) -> Option<Position> {
        first_position(self.corpus, &settings.default_language)
    }
}
