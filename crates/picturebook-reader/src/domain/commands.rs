//! Commands accepted by the reader.

use std::fmt;
use std::str::FromStr;

use picturebook_core::command::Command;
use picturebook_interaction::domain::input::InteractionInput;
use serde::{Deserialize, Serialize};

use crate::domain::navigation::Direction;

/// Keys the reader responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Previous page.
    ArrowLeft,
    /// Next page.
    ArrowRight,
}

impl Key {
    /// The advance a key press requests.
    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            Self::ArrowLeft => Direction::Backward,
            Self::ArrowRight => Direction::Forward,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ArrowLeft => "left",
            Self::ArrowRight => "right",
        })
    }
}

/// Error for a key name the reader does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key '{0}'")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "ArrowLeft" | "arrow_left" => Ok(Self::ArrowLeft),
            "right" | "ArrowRight" | "arrow_right" => Ok(Self::ArrowRight),
            other => Err(UnknownKey(other.to_owned())),
        }
    }
}

/// Command to turn one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancePage {
    /// Which way.
    pub direction: Direction,
}

impl Command for AdvancePage {
    fn command_type(&self) -> &'static str {
        "reader.advance_page"
    }
}

/// Command to turn directly to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpToPage {
    /// Target page index.
    pub index: usize,
}

impl Command for JumpToPage {
    fn command_type(&self) -> &'static str {
        "reader.jump_to_page"
    }
}

/// Command to return to the cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoToCover;

impl Command for GoToCover {
    fn command_type(&self) -> &'static str {
        "reader.go_to_cover"
    }
}

/// Command carrying a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressKey {
    /// The key.
    pub key: Key,
}

impl Command for PressKey {
    fn command_type(&self) -> &'static str {
        "reader.press_key"
    }
}

/// Command carrying input for the current page's interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SendInput {
    /// The input event.
    pub input: InteractionInput,
}

impl Command for SendInput {
    fn command_type(&self) -> &'static str {
        "reader.send_input"
    }
}

/// A renderer reports that an interaction resolved by itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportInteractionResolved {
    /// The page the interaction belongs to.
    pub page: usize,
    /// The frame, for multi-frame pages.
    pub frame: Option<usize>,
}

impl Command for ReportInteractionResolved {
    fn command_type(&self) -> &'static str {
        "reader.report_interaction_resolved"
    }
}

/// A renderer-driven interaction asks for a different frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFrameChange {
    /// The page.
    pub page: usize,
    /// Frame to show.
    pub frame: usize,
}

impl Command for RequestFrameChange {
    fn command_type(&self) -> &'static str {
        "reader.request_frame_change"
    }
}

/// Pointer drag on the page, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPhase {
    /// Pointer down.
    Start {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// Pointer moved.
    Move {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// Pointer released.
    End,
}

/// Command carrying one phase of a drag-to-flip gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Drag {
    /// The phase.
    pub phase: DragPhase,
}

impl Command for Drag {
    fn command_type(&self) -> &'static str {
        "reader.drag"
    }
}

/// Any reader command, for transports that carry them over one channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ReaderCommand {
    /// Turn one page.
    Advance(AdvancePage),
    /// Turn to a page.
    Jump(JumpToPage),
    /// Back to the cover.
    Cover(GoToCover),
    /// A key press.
    Key(PressKey),
    /// Interaction input.
    Input(SendInput),
    /// External resolution report.
    Resolved(ReportInteractionResolved),
    /// External frame change request.
    FrameChange(RequestFrameChange),
    /// Drag gesture.
    Drag(Drag),
}

impl Command for ReaderCommand {
    fn command_type(&self) -> &'static str {
        match self {
            Self::Advance(c) => c.command_type(),
            Self::Jump(c) => c.command_type(),
            Self::Cover(c) => c.command_type(),
            Self::Key(c) => c.command_type(),
            Self::Input(c) => c.command_type(),
            Self::Resolved(c) => c.command_type(),
            Self::FrameChange(c) => c.command_type(),
            Self::Drag(c) => c.command_type(),
        }
    }
}
