//! Domain error types.

use thiserror::Error;

/// A defect in authored book content, detected at load time.
///
/// A book carrying any defect is refused outright; the reader never starts
/// on invalid content.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContentDefect {
    /// The book contains no pages.
    #[error("book has no pages")]
    EmptyBook,

    /// A page was authored without an identifier.
    #[error("page at position {ordinal} has an empty id")]
    EmptyPageId {
        /// Position of the page in the book.
        ordinal: usize,
    },

    /// Two pages share the same identifier.
    #[error("duplicate page id '{0}'")]
    DuplicatePageId(String),

    /// A multi-frame page has no frames.
    #[error("multi-frame page '{page_id}' has no frames")]
    EmptyFrames {
        /// The offending page.
        page_id: String,
    },

    /// An interaction identifier is not recognised.
    #[error("page '{page_id}' uses unknown interaction '{name}'")]
    UnknownInteraction {
        /// The offending page.
        page_id: String,
        /// The unrecognised identifier.
        name: String,
    },

    /// A known interaction is used where it cannot run.
    #[error("interaction '{name}' is not allowed on {context} of page '{page_id}'")]
    InteractionNotAllowed {
        /// The offending page.
        page_id: String,
        /// The interaction identifier.
        name: String,
        /// Where the interaction was placed (e.g. "frame 1", "the page").
        context: String,
    },

    /// An interaction that reveals the following frame sits on the last frame.
    #[error("interaction '{name}' on frame {frame} of page '{page_id}' has no frame to reveal")]
    RevealWithoutNextFrame {
        /// The offending page.
        page_id: String,
        /// The interaction identifier.
        name: String,
        /// The frame index.
        frame: usize,
    },

    /// A transition page or timed interaction has a zero duration.
    #[error("page '{page_id}' has a zero duration")]
    ZeroDuration {
        /// The offending page.
        page_id: String,
    },

    /// A wipe threshold lies outside `(0, 1]`.
    #[error("page '{page_id}' has wipe threshold {threshold} outside (0, 1]")]
    InvalidThreshold {
        /// The offending page.
        page_id: String,
        /// The authored threshold.
        threshold: f64,
    },

    /// A book-level tuning value is unusable.
    #[error("tuning value '{field}' is out of range")]
    InvalidTuning {
        /// Name of the tuning field.
        field: &'static str,
    },

    /// An index authored in content points past the end of the book.
    #[error("index {index} is out of range for a book of {page_count} pages")]
    IndexOutOfRange {
        /// The authored index.
        index: usize,
        /// Number of pages in the book.
        page_count: usize,
    },
}

/// Errors raised while loading a book.
#[derive(Debug, Error)]
pub enum BookError {
    /// The content parsed but is malformed.
    #[error("content defect: {0}")]
    Content(#[from] ContentDefect),

    /// The content could not be parsed.
    #[error("could not parse {format} content: {message}")]
    Parse {
        /// The source format ("yaml" or "json").
        format: &'static str,
        /// The parser's message.
        message: String,
    },

    /// The content file has an extension no parser handles.
    #[error("unsupported content format '{0}'")]
    UnsupportedFormat(String),

    /// The content file could not be read.
    #[error("could not read content: {0}")]
    Io(#[from] std::io::Error),
}
