//! Authored content as it appears in a YAML or JSON book file.
//!
//! Field names follow the authoring format (`subText`, `textPosition`,
//! `ambientEffects`, `totalDuration`). Nothing here is validated yet.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::pages::TextAnchor;
use crate::domain::tuning::InteractionTuning;

/// Descriptive metadata for the whole book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryMeta {
    /// Book title.
    pub title: String,
    /// Volume label, e.g. "Volume I".
    pub volume: Option<String>,
    /// Subtitle.
    pub subtitle: Option<String>,
    /// Author credit.
    pub author: Option<String>,
}

/// A whole authored book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBook {
    /// Descriptive metadata.
    #[serde(default)]
    pub meta: StoryMeta,
    /// Book-wide tuning overrides.
    #[serde(default)]
    pub tuning: InteractionTuning,
    /// Page the reader opens on.
    #[serde(default)]
    pub start_page: usize,
    /// Pages in reading order.
    pub pages: Vec<RawPage>,
}

/// An authored page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RawPage {
    /// `type: cover`
    Cover {
        id: String,
        #[serde(default)]
        text: String,
        #[serde(default)]
        sub_text: Option<String>,
        background: String,
        #[serde(default)]
        video: Option<String>,
    },
    /// `type: story`
    Story {
        id: String,
        #[serde(default)]
        text: String,
        #[serde(default)]
        sub_text: Option<String>,
        background: String,
        #[serde(default)]
        video: Option<String>,
        #[serde(default)]
        text_position: TextAnchor,
        #[serde(default)]
        ambient_effects: Vec<RawAmbient>,
        #[serde(default)]
        interaction: Option<RawInteraction>,
    },
    /// `type: multi-frame`
    MultiFrame {
        id: String,
        #[serde(default)]
        text: String,
        #[serde(default)]
        text_position: TextAnchor,
        #[serde(default)]
        ambient_effects: Vec<RawAmbient>,
        #[serde(default)]
        frames: Vec<RawFrame>,
    },
    /// `type: transition`
    Transition {
        id: String,
        #[serde(default)]
        text: String,
        #[serde(default)]
        total_duration: Option<u64>,
        #[serde(default)]
        panels: Vec<String>,
    },
}

impl RawPage {
    /// The authored page id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Cover { id, .. }
            | Self::Story { id, .. }
            | Self::MultiFrame { id, .. }
            | Self::Transition { id, .. } => id,
        }
    }
}

/// An authored frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    /// Frame artwork.
    pub image: String,
    /// Interaction id or detailed form; `null` for none.
    #[serde(default)]
    pub interaction: Option<RawInteraction>,
}

/// An interaction written either as a bare id or with overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInteraction {
    /// `interaction: fog-wipe`
    Id(String),
    /// `interaction: { kind: fog-wipe, threshold: 0.6 }`
    Detailed {
        kind: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        threshold: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay_ms: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
    },
}

impl RawInteraction {
    /// The authored interaction id.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Id(kind) | Self::Detailed { kind, .. } => kind,
        }
    }
}

/// An ambient effect written either as a bare id or as an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmbient {
    /// `- snow`
    Shorthand(String),
    /// `- { type: glowing-eyes, position: { x: 72, y: 22 }, size: small }`
    Detailed {
        #[serde(rename = "type")]
        kind: String,
        #[serde(flatten)]
        params: BTreeMap<String, serde_json::Value>,
    },
}
