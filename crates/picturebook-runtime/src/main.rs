//! Headless picture-book reader.
//!
//! Reads line commands from stdin and prints reader events and command
//! outcomes to stdout as JSON lines.

use std::error::Error;
use std::io::BufRead;
use std::sync::Arc;

use picturebook_content::application::command_handlers::load_book_from_path;
use picturebook_reader::application::reader::Reader;
use picturebook_runtime::clock::TokioClock;
use picturebook_runtime::config::RuntimeConfig;
use picturebook_runtime::script::parse_line;
use picturebook_runtime::{event_loop, telemetry};
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    telemetry::init();

    tracing::info!("Starting picturebook reader");

    let config = RuntimeConfig::from_env()?;
    let book = load_book_from_path(&config.content_path)?;
    let reader = Reader::new(Arc::new(book), Arc::new(TokioClock::new()));

    let (input_tx, input_rx) = mpsc::channel(64);
    let (output_tx, mut output_rx) = mpsc::unbounded_channel();

    // Stdin is read on a plain thread so a pending read never holds up exit.
    let (line_tx, mut line_rx) = mpsc::channel::<String>(64);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
    });

    let errors = output_tx.clone();
    let parse_task = tokio::spawn(async move {
        while let Some(line) = line_rx.recv().await {
            match parse_line(&line) {
                Ok(Some(instruction)) => {
                    if input_tx.send(instruction).await.is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(line = %line, error = %e, "unparseable line");
                    let _ = errors.send(json!({ "type": "error", "line": line, "error": e.to_string() }));
                }
            }
        }
    });

    // Stdout: one JSON value per line.
    let stdout_task = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(value) = output_rx.recv().await {
            let mut line = value.to_string();
            line.push('\n');
            if stdout.write_all(line.as_bytes()).await.is_err() {
                break;
            }
        }
        let _ = stdout.flush().await;
    });

    let reader = event_loop::run(reader, input_rx, output_tx, config.tick).await;
    parse_task.abort();
    let _ = parse_task.await;
    stdout_task.await?;

    tracing::info!(
        page = reader.current_index(),
        completed = ?reader.completed_pages(),
        "Reader stopped"
    );
    Ok(())
}
