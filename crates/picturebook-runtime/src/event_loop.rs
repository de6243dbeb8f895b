//! The event loop.
//!
//! Owns the reader for as long as it runs. Input arrives on an mpsc
//! channel; a tokio interval ticks the reader so timers and page turns come
//! due in real time. Everything the reader reports is written to an output
//! channel as JSON values, one per output line.

use std::time::Duration;

use picturebook_content::application::query_handlers::{chapters, summarize};
use picturebook_core::event::DomainEvent;
use picturebook_reader::application::command_handlers;
use picturebook_reader::application::query_handlers::reader_view;
use picturebook_reader::application::reader::Reader;
use picturebook_reader::domain::events::ReaderEvent;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::script::Instruction;

/// JSON rendering of a reader event.
#[must_use]
pub fn event_json(event: &ReaderEvent) -> Value {
    json!({
        "type": "event",
        "event_type": event.event_type(),
        "metadata": event.metadata(),
        "payload": event.to_payload(),
    })
}

/// Runs `reader` until the input channel closes or a quit instruction
/// arrives, then keeps ticking until no timer or page turn is pending.
/// Returns the reader.
pub async fn run(
    mut reader: Reader,
    mut input: mpsc::Receiver<Instruction>,
    output: mpsc::UnboundedSender<Value>,
    tick: Duration,
) -> Reader {
    let events = output.clone();
    let subscription = reader.subscribe(move |event: &ReaderEvent| {
        // A closed output only means nobody is listening any more.
        let _ = events.send(event_json(event));
    });

    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(
        page = reader.current_index(),
        tick_ms = u64::try_from(tick.as_millis()).unwrap_or(u64::MAX),
        "event loop started"
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                reader.tick();
            }
            received = input.recv() => match received {
                Some(Instruction::Command(command)) => {
                    let outcome = command_handlers::handle(&command, &mut reader);
                    let mut line = outcome.to_json();
                    line["type"] = json!("outcome");
                    let _ = output.send(line);
                }
                Some(Instruction::View) => {
                    let view = serde_json::to_value(reader_view(&reader)).unwrap_or_default();
                    let _ = output.send(json!({ "type": "view", "view": view }));
                }
                Some(Instruction::Summary) => {
                    let book = serde_json::to_value(summarize(reader.book())).unwrap_or_default();
                    let _ = output.send(json!({ "type": "book", "book": book }));
                }
                Some(Instruction::Transcript) => {
                    let chapters =
                        serde_json::to_value(chapters(reader.book())).unwrap_or_default();
                    let _ = output.send(json!({ "type": "transcript", "chapters": chapters }));
                }
                Some(Instruction::Quit) | None => break,
            },
        }
    }

    while let Some(deadline) = reader.next_deadline() {
        let wait = (deadline - reader.now()).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;
        reader.tick();
    }

    reader.unsubscribe(subscription);
    tracing::info!(
        page = reader.current_index(),
        completed = reader.completed_pages().len(),
        "event loop stopped"
    );
    reader
}
