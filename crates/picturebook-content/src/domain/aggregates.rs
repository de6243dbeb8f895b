//! Aggregate root for picture book content.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use picturebook_core::error::{BookError, ContentDefect};
use sha2::{Digest, Sha256};

use crate::domain::interactions::{InteractionKind, InteractionSpec};
use crate::domain::pages::{AmbientEffect, AssetRef, Frame, Page, PageKind};
use crate::domain::raw::{RawAmbient, RawBook, RawFrame, RawInteraction, RawPage, StoryMeta};
use crate::domain::tuning::InteractionTuning;
use crate::domain::validation;

/// A compiled, validated, immutable book.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    meta: StoryMeta,
    tuning: InteractionTuning,
    start_page: usize,
    pages: Vec<Page>,
    version_hash: String,
}

impl Book {
    /// Validates and compiles an authored book.
    ///
    /// # Errors
    ///
    /// Returns `BookError::Content` carrying the first defect found if the
    /// book is malformed. Every defect is logged.
    pub fn compile(raw: RawBook) -> Result<Self, BookError> {
        let defects = validation::validate(&raw);
        for defect in &defects {
            tracing::warn!(%defect, "content defect");
        }
        if let Some(first) = defects.into_iter().next() {
            return Err(first.into());
        }

        let version_hash = version_hash(&raw);
        let default_transition_ms = raw.tuning.default_transition_ms;
        let pages = raw
            .pages
            .into_iter()
            .enumerate()
            .map(|(ordinal, page)| compile_page(ordinal, page, default_transition_ms))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            pages = pages.len(),
            version_hash = %version_hash,
            "book compiled"
        );

        Ok(Self {
            meta: raw.meta,
            tuning: raw.tuning,
            start_page: raw.start_page,
            pages,
            version_hash,
        })
    }

    /// Descriptive metadata.
    #[must_use]
    pub fn meta(&self) -> &StoryMeta {
        &self.meta
    }

    /// Book-wide tuning.
    #[must_use]
    pub fn tuning(&self) -> &InteractionTuning {
        &self.tuning
    }

    /// Page the reader opens on.
    #[must_use]
    pub fn start_page(&self) -> usize {
        self.start_page
    }

    /// Pages in reading order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The page at `index`, if any.
    #[must_use]
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Number of pages. Never zero.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Position of the page with the given id.
    #[must_use]
    pub fn index_of(&self, page_id: &str) -> Option<usize> {
        self.pages.iter().position(|page| page.id == page_id)
    }

    /// SHA-256 of the canonical JSON form of the authored book.
    #[must_use]
    pub fn version_hash(&self) -> &str {
        &self.version_hash
    }
}

/// Hashes the canonical JSON rendering of an authored book.
///
/// The same book authored in YAML or JSON hashes identically.
#[must_use]
pub fn version_hash(raw: &RawBook) -> String {
    let canonical = serde_json::to_string(raw).unwrap_or_default();
    let digest = Sha256::digest(canonical.as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut hex, byte| {
        let _ = write!(hex, "{byte:02x}");
        hex
    })
}

fn compile_page(
    ordinal: usize,
    page: RawPage,
    default_transition_ms: u64,
) -> Result<Page, ContentDefect> {
    let (id, text, kind) = match page {
        RawPage::Cover {
            id,
            text,
            sub_text,
            background,
            video,
        } => (
            id,
            text,
            PageKind::Cover {
                subtitle: sub_text,
                background: AssetRef::new(background),
                video: video.map(AssetRef::new),
            },
        ),
        RawPage::Story {
            id,
            text,
            sub_text,
            background,
            video,
            text_position,
            ambient_effects,
            interaction,
        } => {
            let interaction = interaction
                .map(|raw| compile_interaction(&id, raw))
                .transpose()?;
            let kind = PageKind::Story {
                subtext: sub_text,
                background: AssetRef::new(background),
                video: video.map(AssetRef::new),
                anchor: text_position,
                ambient: compile_ambient(ambient_effects),
                interaction,
            };
            (id, text, kind)
        }
        RawPage::MultiFrame {
            id,
            text,
            text_position,
            ambient_effects,
            frames,
        } => {
            let frames = frames
                .into_iter()
                .map(|frame| compile_frame(&id, frame))
                .collect::<Result<Vec<_>, _>>()?;
            let kind = PageKind::MultiFrame {
                anchor: text_position,
                ambient: compile_ambient(ambient_effects),
                frames,
            };
            (id, text, kind)
        }
        RawPage::Transition {
            id,
            text,
            total_duration,
            panels,
        } => (
            id,
            text,
            PageKind::Transition {
                total_duration_ms: total_duration.unwrap_or(default_transition_ms),
                panels: panels.into_iter().map(AssetRef::new).collect(),
            },
        ),
    };

    Ok(Page {
        id,
        ordinal,
        text,
        kind,
    })
}

fn compile_frame(page_id: &str, frame: RawFrame) -> Result<Frame, ContentDefect> {
    Ok(Frame {
        image: AssetRef::new(frame.image),
        interaction: frame
            .interaction
            .map(|raw| compile_interaction(page_id, raw))
            .transpose()?,
    })
}

fn compile_interaction(
    page_id: &str,
    raw: RawInteraction,
) -> Result<InteractionSpec, ContentDefect> {
    let unknown = |name: &str| ContentDefect::UnknownInteraction {
        page_id: page_id.to_owned(),
        name: name.to_owned(),
    };
    match raw {
        RawInteraction::Id(name) => name
            .parse::<InteractionKind>()
            .map(InteractionSpec::new)
            .map_err(|_| unknown(&name)),
        RawInteraction::Detailed {
            kind,
            threshold,
            delay_ms,
            duration_ms,
        } => {
            let kind = kind.parse::<InteractionKind>().map_err(|_| unknown(&kind))?;
            Ok(InteractionSpec {
                kind,
                threshold,
                delay_ms,
                duration_ms,
            })
        }
    }
}

fn compile_ambient(effects: Vec<RawAmbient>) -> Vec<AmbientEffect> {
    effects
        .into_iter()
        .map(|effect| match effect {
            RawAmbient::Shorthand(kind) => AmbientEffect {
                kind,
                params: BTreeMap::new(),
            },
            RawAmbient::Detailed { kind, params } => AmbientEffect { kind, params },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pages::TextAnchor;

    const BOOK: &str = r"
meta:
  title: The Lantern
  volume: Volume I
pages:
  - { id: cover, type: cover, text: The Lantern, subText: Volume I, background: /c.png }
  - id: p1
    type: story
    text: Snow fell.
    background: /1.png
    ambientEffects: [snow]
    interaction: { kind: glow-pulse, duration_ms: 1200 }
  - id: p2
    type: multi-frame
    text: Fog.
    textPosition: center
    frames:
      - { image: /2a.png, interaction: fog-wipe }
      - { image: /2b.png }
  - { id: reel, type: transition }
";

    #[test]
    fn test_compile_builds_typed_pages() {
        // Arrange
        let raw: RawBook = serde_yaml::from_str(BOOK).unwrap();

        // Act
        let book = Book::compile(raw).unwrap();

        // Assert
        assert_eq!(book.page_count(), 4);
        assert_eq!(book.meta().title, "The Lantern");
        assert!(book.pages()[0].is_cover());
        assert_eq!(book.pages()[0].subtext(), Some("Volume I"));

        let story = &book.pages()[1];
        assert_eq!(story.ordinal, 1);
        let interaction = story.interaction().unwrap();
        assert_eq!(interaction.kind, InteractionKind::GlowPulse);
        assert_eq!(interaction.duration_ms, Some(1200));

        let multi = &book.pages()[2];
        assert!(multi.is_multi_frame());
        assert_eq!(multi.frames().len(), 2);
        assert_eq!(
            multi.frames()[0].interaction,
            Some(InteractionSpec::new(InteractionKind::FogWipe))
        );
        match &multi.kind {
            PageKind::MultiFrame { anchor, .. } => assert_eq!(*anchor, TextAnchor::Center),
            other => panic!("expected multi-frame page, got {other:?}"),
        }

        match &book.pages()[3].kind {
            PageKind::Transition {
                total_duration_ms, ..
            } => assert_eq!(*total_duration_ms, 10_000),
            other => panic!("expected transition page, got {other:?}"),
        }
        assert_eq!(book.index_of("reel"), Some(3));
    }

    #[test]
    fn test_compile_refuses_defective_book() {
        // Arrange
        let raw: RawBook =
            serde_yaml::from_str("pages:\n  - { id: p, type: multi-frame, frames: [] }\n").unwrap();

        // Act
        let result = Book::compile(raw);

        // Assert
        match result {
            Err(BookError::Content(ContentDefect::EmptyFrames { page_id })) => {
                assert_eq!(page_id, "p");
            }
            other => panic!("expected EmptyFrames defect, got {other:?}"),
        }
    }

    #[test]
    fn test_version_hash_is_stable_and_content_sensitive() {
        // Arrange
        let raw: RawBook = serde_yaml::from_str(BOOK).unwrap();
        let mut edited = raw.clone();
        edited.meta.title = "The Other Lantern".to_owned();

        // Act
        let first = version_hash(&raw);
        let second = version_hash(&raw);
        let changed = version_hash(&edited);

        // Assert
        assert_eq!(first.len(), 64);
        assert_eq!(first, second);
        assert_ne!(first, changed);
    }
}
