//! Compiled pages and frames.
//!
//! These types are immutable once a book is compiled. Asset references are
//! opaque: resolving and loading them belongs to the renderer.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::interactions::InteractionSpec;

/// Opaque reference to an image or video asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    /// Wraps an authored asset path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The authored path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the body text sits on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    /// Top of the page.
    Top,
    /// Vertically centred.
    Center,
    /// Bottom of the page.
    #[default]
    Bottom,
}

/// A cosmetic effect layered over a page. The engine never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmbientEffect {
    /// Effect identifier, e.g. `snow` or `glowing-eyes`.
    pub kind: String,
    /// Effect parameters as authored.
    pub params: BTreeMap<String, serde_json::Value>,
}

/// One sub-step of a multi-frame page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Artwork shown while this frame is current.
    pub image: AssetRef,
    /// Interaction that must resolve before the frame is done.
    pub interaction: Option<InteractionSpec>,
}

/// Variant-specific page content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PageKind {
    /// The title page.
    Cover {
        /// Subtitle below the title.
        subtitle: Option<String>,
        /// Background artwork.
        background: AssetRef,
        /// Optional looping video overlay.
        video: Option<AssetRef>,
    },
    /// A single illustrated page.
    Story {
        /// Secondary text.
        subtext: Option<String>,
        /// Background artwork.
        background: AssetRef,
        /// Optional looping video overlay.
        video: Option<AssetRef>,
        /// Text placement.
        anchor: TextAnchor,
        /// Cosmetic effects.
        ambient: Vec<AmbientEffect>,
        /// At most one interaction.
        interaction: Option<InteractionSpec>,
    },
    /// A page that steps through frames in order.
    MultiFrame {
        /// Text placement.
        anchor: TextAnchor,
        /// Cosmetic effects.
        ambient: Vec<AmbientEffect>,
        /// Never empty.
        frames: Vec<Frame>,
    },
    /// An animated film-reel interlude.
    Transition {
        /// How long the reel runs before finishing on its own.
        total_duration_ms: u64,
        /// Panel artwork.
        panels: Vec<AssetRef>,
    },
}

/// One unit of the reading sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Unique identifier within the book.
    pub id: String,
    /// Zero-based position in the book.
    pub ordinal: usize,
    /// Body text (the title, on a cover).
    pub text: String,
    /// Variant-specific content.
    #[serde(flatten)]
    pub kind: PageKind,
}

impl Page {
    /// Whether forward navigation past this page waits on its frames.
    #[must_use]
    pub fn is_multi_frame(&self) -> bool {
        matches!(self.kind, PageKind::MultiFrame { .. })
    }

    /// Whether this is the cover page.
    #[must_use]
    pub fn is_cover(&self) -> bool {
        matches!(self.kind, PageKind::Cover { .. })
    }

    /// The frames of a multi-frame page; empty for every other variant.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        match &self.kind {
            PageKind::MultiFrame { frames, .. } => frames,
            _ => &[],
        }
    }

    /// The page-level interaction of a story page.
    #[must_use]
    pub fn interaction(&self) -> Option<&InteractionSpec> {
        match &self.kind {
            PageKind::Story { interaction, .. } => interaction.as_ref(),
            _ => None,
        }
    }

    /// Short variant name for logs and views.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            PageKind::Cover { .. } => "cover",
            PageKind::Story { .. } => "story",
            PageKind::MultiFrame { .. } => "multi-frame",
            PageKind::Transition { .. } => "transition",
        }
    }

    /// Secondary text, where the variant has any.
    #[must_use]
    pub fn subtext(&self) -> Option<&str> {
        match &self.kind {
            PageKind::Cover { subtitle, .. } => subtitle.as_deref(),
            PageKind::Story { subtext, .. } => subtext.as_deref(),
            _ => None,
        }
    }
}
