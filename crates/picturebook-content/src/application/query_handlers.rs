//! Read-only views over a compiled book.

use serde::Serialize;

use crate::domain::aggregates::Book;

/// Pages per chapter in the transcript.
pub const CHAPTER_SIZE: usize = 7;

/// Summary of a compiled book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummaryView {
    /// Book title.
    pub title: String,
    /// Volume label.
    pub volume: Option<String>,
    /// Subtitle.
    pub subtitle: Option<String>,
    /// Author credit.
    pub author: Option<String>,
    /// Number of pages, cover included.
    pub page_count: usize,
    /// Content version hash.
    pub version_hash: String,
}

/// One page of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    /// Position of the page in the book.
    pub ordinal: usize,
    /// Page id.
    pub page_id: String,
    /// Body text.
    pub text: String,
}

/// A run of consecutive transcript entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    /// One-based chapter number.
    pub number: usize,
    /// Entries in reading order.
    pub entries: Vec<TranscriptEntry>,
}

/// Summarises a book.
#[must_use]
pub fn summarize(book: &Book) -> BookSummaryView {
    let meta = book.meta();
    BookSummaryView {
        title: meta.title.clone(),
        volume: meta.volume.clone(),
        subtitle: meta.subtitle.clone(),
        author: meta.author.clone(),
        page_count: book.page_count(),
        version_hash: book.version_hash().to_owned(),
    }
}

/// The text of every non-cover page, in reading order.
#[must_use]
pub fn transcript(book: &Book) -> Vec<TranscriptEntry> {
    book.pages()
        .iter()
        .filter(|page| !page.is_cover())
        .map(|page| TranscriptEntry {
            ordinal: page.ordinal,
            page_id: page.id.clone(),
            text: page.text.clone(),
        })
        .collect()
}

/// The transcript split into chapters of [`CHAPTER_SIZE`] pages.
#[must_use]
pub fn chapters(book: &Book) -> Vec<Chapter> {
    transcript(book)
        .chunks(CHAPTER_SIZE)
        .enumerate()
        .map(|(i, entries)| Chapter {
            number: i + 1,
            entries: entries.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;

    use super::*;
    use crate::application::command_handlers::load_book_from_yaml;

    fn book_with_story_pages(count: usize) -> Book {
        let mut yaml = String::from(
            "meta: { title: Winter, author: Anonymous }\npages:\n  - { id: cover, type: cover, text: Winter, background: /c.png }\n",
        );
        for i in 1..=count {
            writeln!(
                yaml,
                "  - {{ id: p{i}, type: story, text: Line {i}, background: /{i}.png }}"
            )
            .unwrap();
        }
        load_book_from_yaml(&yaml).unwrap()
    }

    #[test]
    fn test_transcript_skips_cover() {
        // Arrange
        let book = book_with_story_pages(3);

        // Act
        let entries = transcript(&book);

        // Assert
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].ordinal, 1);
        assert_eq!(entries[0].text, "Line 1");
    }

    #[test]
    fn test_chapters_group_seven_pages() {
        // Arrange
        let book = book_with_story_pages(16);

        // Act
        let chapters = chapters(&book);

        // Assert
        let sizes: Vec<usize> = chapters.iter().map(|c| c.entries.len()).collect();
        assert_eq!(sizes, vec![7, 7, 2]);
        assert_eq!(chapters[2].number, 3);
        assert_eq!(chapters[1].entries[0].page_id, "p8");
    }

    #[test]
    fn test_summarize_reports_meta_and_hash() {
        // Arrange
        let book = book_with_story_pages(2);

        // Act
        let summary = summarize(&book);

        // Assert
        assert_eq!(summary.title, "Winter");
        assert_eq!(summary.author.as_deref(), Some("Anonymous"));
        assert_eq!(summary.page_count, 3);
        assert_eq!(summary.version_hash, book.version_hash());
    }
}
