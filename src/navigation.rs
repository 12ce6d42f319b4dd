use crate::corpus::ScriptureCorpus;
use crate::logger::warn;
use crate::types::{Position, PositionNotFoundError};

/// Computes the position after `pos` in document order, crossing chapter
/// and book boundaries:
///
/// 1. the next verse in the same chapter,
/// 2. else verse one of the next chapter,
/// 3. else chapter one, verse one of the next book,
/// 4. else None: the end of the corpus for that language.
///
/// A position whose verse, chapter or book is not present in the corpus is
/// an error, not a silent reset. Callers that want lenient behavior reset
/// to the chapter's first verse themselves.
pub fn next_position(
    corpus: &ScriptureCorpus,
    pos: &Position,
) -> Result<Option<Position>, PositionNotFoundError> {
    let verses = corpus.chapter_verses(&pos.lang, &pos.book, &pos.chapter);
    let verse_idx = verses
        .iter()
        .position(|v| *v == pos.verse)
        .ok_or_else(|| PositionNotFoundError(pos.clone()))?;

    if verse_idx + 1 < verses.len() {
        return Ok(Some(Position::new(
            &pos.lang,
            &pos.book,
            &pos.chapter,
            verses[verse_idx + 1],
        )));
    }

    let chapters = corpus.book_chapters(&pos.lang, &pos.book);
    let chapter_idx = chapters
        .iter()
        .position(|c| *c == pos.chapter)
        .ok_or_else(|| PositionNotFoundError(pos.clone()))?;

    if chapter_idx + 1 < chapters.len() {
        let next_chapter = chapters[chapter_idx + 1];
        return Ok(first_verse_of(corpus, &pos.lang, &pos.book, next_chapter));
    }

    let books = corpus.book_names(&pos.lang);
    let book_idx = books
        .iter()
        .position(|b| *b == pos.book)
        .ok_or_else(|| PositionNotFoundError(pos.clone()))?;

    if book_idx + 1 < books.len() {
        let next_book = books[book_idx + 1];
        let next_chapters = corpus.book_chapters(&pos.lang, next_book);
        if let Some(first_chapter) = next_chapters.first() {
            return Ok(first_verse_of(corpus, &pos.lang, next_book, first_chapter));
        }
        warn(&format!("Book without chapters in corpus: {} ({})", next_book, pos.lang));
        return Ok(None);
    }

    Ok(None)
}

/// First verse of a language's first book, the starting point for a fresh
/// profile. None when the language has no content.
pub fn first_position(corpus: &ScriptureCorpus, lang: &str) -> Option<Position> {
    let book = corpus.book_names(lang).first()?.to_string();
    let chapter = corpus.book_chapters(lang, &book).first()?.to_string();
    first_verse_of(corpus, lang, &book, &chapter)
}

fn first_verse_of(
    corpus: &ScriptureCorpus,
    lang: &str,
    book: &str,
    chapter: &str,
) -> Option<Position> {
    match corpus.chapter_verses(lang, book, chapter).first() {
        Some(verse) => Some(Position::new(lang, book, chapter, *verse)),
        None => {
            warn(&format!("Chapter without verses in corpus: {} {} ({})", book, chapter, lang));
            None
        }
    }
}
