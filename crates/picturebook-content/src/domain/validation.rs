//! Load-time validation of authored content.
//!
//! Every authoring defect is reported, not just the first, so an author can
//! fix a book in one pass. A book with any defect never compiles.

use std::collections::HashSet;

use picturebook_core::error::ContentDefect;

use crate::domain::interactions::{InteractionContext, InteractionKind};
use crate::domain::raw::{RawBook, RawInteraction, RawPage};

/// Checks an authored book and returns every defect found.
#[must_use]
pub fn validate(book: &RawBook) -> Vec<ContentDefect> {
    let mut defects = Vec::new();

    if book.pages.is_empty() {
        defects.push(ContentDefect::EmptyBook);
        return defects;
    }

    for field in book.tuning.invalid_fields() {
        defects.push(ContentDefect::InvalidTuning { field });
    }

    let mut seen = HashSet::new();
    for (ordinal, page) in book.pages.iter().enumerate() {
        let id = page.id();
        if id.trim().is_empty() {
            defects.push(ContentDefect::EmptyPageId { ordinal });
        } else if !seen.insert(id) {
            defects.push(ContentDefect::DuplicatePageId(id.to_owned()));
        }
        validate_page(page, &mut defects);
    }

    if book.start_page >= book.pages.len() {
        defects.push(ContentDefect::IndexOutOfRange {
            index: book.start_page,
            page_count: book.pages.len(),
        });
    }

    defects
}

fn validate_page(page: &RawPage, defects: &mut Vec<ContentDefect>) {
    match page {
        RawPage::Cover { .. } => {}
        RawPage::Story {
            id, interaction, ..
        } => {
            if let Some(interaction) = interaction {
                validate_interaction(id, interaction, InteractionContext::Page, None, defects);
            }
        }
        RawPage::MultiFrame { id, frames, .. } => {
            if frames.is_empty() {
                defects.push(ContentDefect::EmptyFrames {
                    page_id: id.clone(),
                });
            }
            for (index, frame) in frames.iter().enumerate() {
                if let Some(interaction) = &frame.interaction {
                    let context = InteractionContext::Frame {
                        has_next: index + 1 < frames.len(),
                    };
                    validate_interaction(id, interaction, context, Some(index), defects);
                }
            }
            // A fireplace stays attached across the frame it reveals, so that
            // frame cannot carry an interaction of its own.
            for (index, pair) in frames.windows(2).enumerate() {
                let reveals = pair[0]
                    .interaction
                    .as_ref()
                    .is_some_and(|i| i.kind() == InteractionKind::Fireplace.as_str());
                if let (true, Some(next)) = (reveals, &pair[1].interaction) {
                    defects.push(ContentDefect::InteractionNotAllowed {
                        page_id: id.clone(),
                        name: next.kind().to_owned(),
                        context: format!("frame {}, which a fireplace reveals", index + 1),
                    });
                }
            }
        }
        RawPage::Transition {
            id, total_duration, ..
        } => {
            if *total_duration == Some(0) {
                defects.push(ContentDefect::ZeroDuration {
                    page_id: id.clone(),
                });
            }
        }
    }
}

fn validate_interaction(
    page_id: &str,
    interaction: &RawInteraction,
    context: InteractionContext,
    frame: Option<usize>,
    defects: &mut Vec<ContentDefect>,
) {
    let name = interaction.kind();
    let Ok(kind) = name.parse::<InteractionKind>() else {
        defects.push(ContentDefect::UnknownInteraction {
            page_id: page_id.to_owned(),
            name: name.to_owned(),
        });
        return;
    };

    if !kind.allowed_in(context) {
        defects.push(ContentDefect::InteractionNotAllowed {
            page_id: page_id.to_owned(),
            name: name.to_owned(),
            context: frame.map_or_else(|| "the page".to_owned(), |i| format!("frame {i}")),
        });
        return;
    }

    if let (InteractionKind::Fireplace, InteractionContext::Frame { has_next: false }, Some(i)) =
        (kind, context, frame)
    {
        defects.push(ContentDefect::RevealWithoutNextFrame {
            page_id: page_id.to_owned(),
            name: name.to_owned(),
            frame: i,
        });
    }

    if let RawInteraction::Detailed {
        threshold,
        duration_ms,
        ..
    } = interaction
    {
        if let Some(threshold) = threshold.filter(|t| !(*t > 0.0 && *t <= 1.0)) {
            defects.push(ContentDefect::InvalidThreshold {
                page_id: page_id.to_owned(),
                threshold,
            });
        }
        if *duration_ms == Some(0) {
            defects.push(ContentDefect::ZeroDuration {
                page_id: page_id.to_owned(),
            });
        }
    }
}
