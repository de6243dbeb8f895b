//! End-to-end reading scenarios against the winter-cabin fixture.

mod common;

use common::{FIREPLACE_PAGE, FOG_PAGE, REEL_PAGE, Session};
use picturebook_interaction::domain::input::{
    BUCKET_REGION, FIREPLACE_REGION, InteractionInput, Point,
};
use picturebook_reader::domain::events::{
    FRAME_CHANGED_EVENT_TYPE, INTERACTION_RESOLVED_EVENT_TYPE, PAGE_CHANGED_EVENT_TYPE,
    PAGE_COMPLETED_EVENT_TYPE, TRANSITION_STARTED_EVENT_TYPE,
};
use picturebook_reader::domain::navigation::Rejection;

#[test]
fn test_fog_wipe_reveals_then_completes_page() {
    // Arrange
    let mut session = Session::open();
    session.turn_to(FOG_PAGE);

    // Act
    session
        .reader
        .send_input(&InteractionInput::CoverageReport(0.51));
    session.advance(799);
    let frame_before_reveal = session.reader.current_frame();
    session.advance(1);
    let frame_after_reveal = session.reader.current_frame();
    let complete_after_reveal = session.reader.is_page_complete(FOG_PAGE);
    session.advance(800);

    // Assert
    assert_eq!(frame_before_reveal, Some(0));
    assert_eq!(frame_after_reveal, Some(1));
    assert!(!complete_after_reveal);
    assert!(session.reader.is_page_complete(FOG_PAGE));
    assert!(session.reader.can_go_next());
    assert!(session.reader.next().is_ok());
    session.finish_turn();
    assert_eq!(session.reader.current_index(), FOG_PAGE + 1);
}

#[test]
fn test_fog_wipe_by_strokes() {
    // Arrange
    let mut session = Session::open();
    session.turn_to(FOG_PAGE);

    // Act
    for row in 0..12 {
        let y = f64::from(row) / 11.0;
        session
            .reader
            .send_input(&InteractionInput::WipeStart(Point::new(0.0, y)));
        session
            .reader
            .send_input(&InteractionInput::WipeMove(Point::new(1.0, y)));
        session.reader.send_input(&InteractionInput::WipeEnd);
    }
    session.advance(1600);

    // Assert
    assert!(session.reader.is_page_complete(FOG_PAGE));
}

#[test]
fn test_fireplace_needs_both_taps() {
    // Arrange
    let mut session = Session::open();
    session.turn_to(FIREPLACE_PAGE);

    // Act
    session
        .reader
        .send_input(&InteractionInput::region_tap(FIREPLACE_REGION));
    let frame_after_wrong_tap = session.reader.current_frame();
    session
        .reader
        .send_input(&InteractionInput::region_tap(BUCKET_REGION));
    let frame_after_bucket = session.reader.current_frame();
    session.advance(5000);
    let complete_while_waiting = session.reader.is_page_complete(FIREPLACE_PAGE);
    let next_while_waiting = session.reader.next();
    session
        .reader
        .send_input(&InteractionInput::region_tap(FIREPLACE_REGION));
    session.advance(499);
    let complete_before_delay = session.reader.is_page_complete(FIREPLACE_PAGE);
    session.advance(1);

    // Assert
    assert_eq!(frame_after_wrong_tap, Some(0));
    assert_eq!(frame_after_bucket, Some(1));
    assert!(!complete_while_waiting);
    assert_eq!(
        next_while_waiting,
        Err(Rejection::Incomplete {
            page: FIREPLACE_PAGE
        })
    );
    assert!(!complete_before_delay);
    assert!(session.reader.is_page_complete(FIREPLACE_PAGE));
    assert_eq!(
        session.event_types(),
        vec![
            FRAME_CHANGED_EVENT_TYPE,
            INTERACTION_RESOLVED_EVENT_TYPE,
            PAGE_COMPLETED_EVENT_TYPE,
        ]
    );
}

#[test]
fn test_advance_from_incomplete_multi_frame_page_is_a_no_op() {
    // Arrange
    let mut session = Session::open();
    session.turn_to(FOG_PAGE);

    // Act
    let result = session.reader.next();

    // Assert
    assert_eq!(result, Err(Rejection::Incomplete { page: FOG_PAGE }));
    assert_eq!(session.reader.current_index(), FOG_PAGE);
    assert!(!session.reader.is_transitioning());
    assert!(session.event_types().is_empty());
}

#[test]
fn test_transition_page_resolves_after_full_duration() {
    // Arrange
    let mut session = Session::open();
    session.turn_to(REEL_PAGE);

    // Act
    session.advance(10_000);
    let complete_at_end_of_reel = session.reader.is_page_complete(REEL_PAGE);
    session.advance(1_500);

    // Assert
    assert!(!complete_at_end_of_reel);
    assert!(session.reader.is_page_complete(REEL_PAGE));
}

#[test]
fn test_transition_page_skip_resolves_after_short_delay() {
    // Arrange
    let mut session = Session::open();
    session.turn_to(REEL_PAGE);
    session.advance(3_000);

    // Act
    session.reader.send_input(&InteractionInput::surface_tap());
    session.advance(499);
    let complete_before_delay = session.reader.is_page_complete(REEL_PAGE);
    session.advance(1);

    // Assert
    assert!(!complete_before_delay);
    assert!(session.reader.is_page_complete(REEL_PAGE));
    assert_eq!(session.reader.pending_timers(), 0);
}

#[test]
fn test_turn_emits_started_then_changed() {
    // Arrange
    let mut session = Session::open();

    // Act
    session.reader.next().unwrap();
    let during_turn = session.reader.current_index();
    session.finish_turn();

    // Assert
    assert_eq!(during_turn, 0);
    assert_eq!(session.reader.current_index(), 1);
    assert_eq!(session.reader.last_direction(), 1);
    assert_eq!(
        session.event_types(),
        vec![TRANSITION_STARTED_EVENT_TYPE, PAGE_CHANGED_EVENT_TYPE]
    );
}
