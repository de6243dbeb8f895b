//! Command handlers for the reader.
//!
//! Each handler applies one command to a [`Reader`] and reports what
//! happened as a [`CommandOutcome`]. Refusals are outcomes, not errors.

use picturebook_core::command::Command;
use serde_json::json;

use crate::application::reader::{Reader, StaleReport};
use crate::domain::commands::{
    AdvancePage, Drag, DragPhase, GoToCover, JumpToPage, PressKey, ReaderCommand,
    ReportInteractionResolved, RequestFrameChange, SendInput,
};
use crate::domain::navigation::{PendingTransition, Rejection};

/// What a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// A page turn started.
    Started(PendingTransition),
    /// The navigation request was refused.
    Rejected(Rejection),
    /// The report did not match the page on screen.
    Stale(StaleReport),
    /// The command was applied.
    Applied,
}

impl CommandOutcome {
    /// Whether the command changed anything or started a page turn.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Started(_) | Self::Applied)
    }

    /// JSON rendering for line-oriented transports.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Started(pending) => json!({ "outcome": "started", "transition": pending }),
            Self::Rejected(reason) => json!({ "outcome": "rejected", "reason": reason.to_string() }),
            Self::Stale(reason) => json!({ "outcome": "stale", "reason": reason.to_string() }),
            Self::Applied => json!({ "outcome": "applied" }),
        }
    }
}

impl From<Result<PendingTransition, Rejection>> for CommandOutcome {
    fn from(result: Result<PendingTransition, Rejection>) -> Self {
        match result {
            Ok(pending) => Self::Started(pending),
            Err(reason) => Self::Rejected(reason),
        }
    }
}

impl From<Result<(), StaleReport>> for CommandOutcome {
    fn from(result: Result<(), StaleReport>) -> Self {
        match result {
            Ok(()) => Self::Applied,
            Err(reason) => Self::Stale(reason),
        }
    }
}

/// Handles the `AdvancePage` command.
pub fn handle_advance_page(command: &AdvancePage, reader: &mut Reader) -> CommandOutcome {
    reader.request_advance(command.direction).into()
}

/// Handles the `JumpToPage` command.
pub fn handle_jump_to_page(command: &JumpToPage, reader: &mut Reader) -> CommandOutcome {
    reader.request_jump(command.index).into()
}

/// Handles the `GoToCover` command.
pub fn handle_go_to_cover(_command: &GoToCover, reader: &mut Reader) -> CommandOutcome {
    reader.go_to_cover().into()
}

/// Handles the `PressKey` command.
pub fn handle_press_key(command: &PressKey, reader: &mut Reader) -> CommandOutcome {
    reader.press_key(command.key).into()
}

/// Handles the `SendInput` command.
pub fn handle_send_input(command: &SendInput, reader: &mut Reader) -> CommandOutcome {
    reader.send_input(&command.input);
    CommandOutcome::Applied
}

/// Handles the `ReportInteractionResolved` command.
pub fn handle_report_interaction_resolved(
    command: &ReportInteractionResolved,
    reader: &mut Reader,
) -> CommandOutcome {
    reader
        .on_interaction_resolved(command.page, command.frame)
        .into()
}

/// Handles the `RequestFrameChange` command.
pub fn handle_request_frame_change(
    command: &RequestFrameChange,
    reader: &mut Reader,
) -> CommandOutcome {
    reader
        .on_frame_change_requested(command.page, command.frame)
        .into()
}

/// Handles the `Drag` command. Only a release can start a page turn.
pub fn handle_drag(command: &Drag, reader: &mut Reader) -> CommandOutcome {
    match command.phase {
        DragPhase::Start { x, y } => reader.drag_start(x, y),
        DragPhase::Move { x, y } => reader.drag_move(x, y),
        DragPhase::End => {
            if let Some(result) = reader.drag_end() {
                return result.into();
            }
        }
    }
    CommandOutcome::Applied
}

/// Dispatches any reader command to its handler.
pub fn handle(command: &ReaderCommand, reader: &mut Reader) -> CommandOutcome {
    tracing::debug!(command_type = command.command_type(), "handling command");
    match command {
        ReaderCommand::Advance(c) => handle_advance_page(c, reader),
        ReaderCommand::Jump(c) => handle_jump_to_page(c, reader),
        ReaderCommand::Cover(c) => handle_go_to_cover(c, reader),
        ReaderCommand::Key(c) => handle_press_key(c, reader),
        ReaderCommand::Input(c) => handle_send_input(c, reader),
        ReaderCommand::Resolved(c) => handle_report_interaction_resolved(c, reader),
        ReaderCommand::FrameChange(c) => handle_request_frame_change(c, reader),
        ReaderCommand::Drag(c) => handle_drag(c, reader),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use picturebook_core::clock::Clock;
    use picturebook_test_support::{ManualClock, fixture_time, minimal_book};

    use super::*;
    use crate::domain::commands::Key;
    use crate::domain::navigation::Direction;

    fn reader() -> (Reader, ManualClock) {
        let clock = ManualClock::new(fixture_time());
        let shared: Arc<dyn Clock> = Arc::new(clock.clone());
        (Reader::new(Arc::new(minimal_book()), shared), clock)
    }

    #[test]
    fn test_key_press_starts_a_turn() {
        // Arrange
        let (mut reader, _clock) = reader();
        let command = ReaderCommand::Key(PressKey {
            key: Key::ArrowRight,
        });

        // Act
        let outcome = handle(&command, &mut reader);

        // Assert
        match outcome {
            CommandOutcome::Started(pending) => {
                assert_eq!(pending.to, 1);
                assert_eq!(pending.direction, Direction::Forward);
            }
            other => panic!("expected Started, got {other:?}"),
        }
    }

    #[test]
    fn test_rejection_is_an_outcome() {
        // Arrange
        let (mut reader, _clock) = reader();

        // Act
        let outcome = handle(&ReaderCommand::Cover(GoToCover), &mut reader);

        // Assert
        assert_eq!(outcome, CommandOutcome::Rejected(Rejection::SamePage(0)));
        assert!(!outcome.is_accepted());
        assert_eq!(outcome.to_json()["outcome"], "rejected");
    }

    #[test]
    fn test_stale_report_for_other_page() {
        // Arrange
        let (mut reader, _clock) = reader();
        let command = ReaderCommand::Resolved(ReportInteractionResolved {
            page: 2,
            frame: None,
        });

        // Act
        let outcome = handle(&command, &mut reader);

        // Assert
        assert_eq!(
            outcome,
            CommandOutcome::Stale(StaleReport::WrongPage {
                page: 2,
                current: 0,
            })
        );
    }

    #[test]
    fn test_drag_release_past_threshold_turns_forward() {
        // Arrange
        let (mut reader, _clock) = reader();
        let phases = [
            DragPhase::Start { x: 700.0, y: 200.0 },
            DragPhase::Move { x: 300.0, y: 210.0 },
        ];
        for phase in phases {
            handle_drag(&Drag { phase }, &mut reader);
        }

        // Act
        let outcome = handle_drag(
            &Drag {
                phase: DragPhase::End,
            },
            &mut reader,
        );

        // Assert
        assert!(matches!(outcome, CommandOutcome::Started(p) if p.to == 1));
    }
}
