use indexmap::IndexMap;
use lazy_static::lazy_static;
use anyhow::{Context, Result};

use crate::logger::error;
use crate::types::Position;

/// Verse number -> verse text.
pub type VerseMap = IndexMap<String, String>;
/// Chapter number -> verses.
pub type ChapterMap = IndexMap<String, VerseMap>;
/// Book name -> chapters.
pub type BookMap = IndexMap<String, ChapterMap>;
/// Language code -> books.
pub type LanguageMap = IndexMap<String, BookMap>;

pub static BUNDLED_CORPUS_JSON: &str = include_str!("../assets/bible.json");

lazy_static! {
    static ref BUNDLED_CORPUS: ScriptureCorpus = match ScriptureCorpus::from_json(BUNDLED_CORPUS_JSON) {
        Ok(corpus) => corpus,
        Err(e) => {
            error(&format!("Failed to parse bundled bible.json: {}", e));
            ScriptureCorpus::empty()
        }
    };
}

/// The full set of translated scripture text, organized as
/// language -> book -> chapter -> verse -> text.
///
/// All maps iterate in insertion order, which is document order: book
/// sequence, chapter sequence, verse sequence. Chapter "10" follows "9".
/// Lexicographic sorting of the numeric string keys would break that, so
/// the maps are IndexMap, never BTreeMap.
#[derive(Debug, Clone, Default)]
pub struct ScriptureCorpus {
    data: LanguageMap,
}

impl ScriptureCorpus {
    /// The corpus compiled into the binary.
    pub fn bundled() -> &'static ScriptureCorpus {
        &BUNDLED_CORPUS
    }

    pub fn empty() -> Self {
        ScriptureCorpus { data: LanguageMap::new() }
    }

    /// Parse a corpus from its nested JSON form. Key order in the JSON is
    /// preserved, so the document must list books, chapters and verses in
    /// reading order.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: LanguageMap = serde_json::from_str(json)
            .context("Failed to parse corpus JSON")?;
        Ok(ScriptureCorpus { data })
    }

    pub fn languages(&self) -> Vec<&str> {
        self.data.keys().map(|k| k.as_str()).collect()
    }

    /// Book names for a language, in document order. Empty for an unknown
    /// language.
    pub fn book_names(&self, lang: &str) -> Vec<&str> {
        self.data
            .get(lang)
            .map(|books| books.keys().map(|k| k.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn book_chapters(&self, lang: &str, book: &str) -> Vec<&str> {
        self.data
            .get(lang)
            .and_then(|books| books.get(book))
            .map(|chapters| chapters.keys().map(|k| k.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn chapter_verses(&self, lang: &str, book: &str, chapter: &str) -> Vec<&str> {
        self.data
            .get(lang)
            .and_then(|books| books.get(book))
            .and_then(|chapters| chapters.get(chapter))
            .map(|verses| verses.keys().map(|k| k.as_str()).collect())
            .unwrap_or_default()
    }

    /// The canonical text of one verse. An unknown position resolves to an
    /// empty string, which callers treat as nothing to render.
    pub fn verse_text(&self, lang: &str, book: &str, chapter: &str, verse: &str) -> &str {
        self.data
            .get(lang)
            .and_then(|books| books.get(book))
            .and_then(|chapters| chapters.get(chapter))
            .and_then(|verses| verses.get(verse))
            .map(|text| text.as_str())
            .unwrap_or("")
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.data
            .get(&pos.lang)
            .and_then(|books| books.get(&pos.book))
            .and_then(|chapters| chapters.get(&pos.chapter))
            .map(|verses| verses.contains_key(&pos.verse))
            .unwrap_or(false)
    }
}
