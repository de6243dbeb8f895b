//! Line commands accepted by the headless binary.
//!
//! One instruction per line, words separated by whitespace. Blank lines and
//! lines starting with `#` are skipped.
//!
//! | line | effect |
//! |---|---|
//! | `next`, `prev` | turn one page |
//! | `jump N` | turn to page `N` |
//! | `cover` | turn to the cover |
//! | `key left\|right` | arrow key |
//! | `tap [region]` | tap the artwork or a named region |
//! | `wipe X Y` | start a wipe stroke at normalised `(X, Y)` |
//! | `wipe-to X Y` | continue the stroke |
//! | `wipe-end` | lift the pointer |
//! | `coverage F` | report a measured cleared fraction |
//! | `resolved PAGE [FRAME]` | renderer resolved an interaction |
//! | `frame PAGE N` | renderer asks for frame `N` |
//! | `drag X Y`, `drag-to X Y`, `drag-end` | drag-to-flip, in pixels |
//! | `view` | print the reader view |
//! | `book` | print the book summary |
//! | `transcript` | print the story text by chapter |
//! | `quit` | stop reading input |

use std::str::FromStr;

use picturebook_interaction::domain::input::{InteractionInput, Point};
use picturebook_reader::domain::commands::{
    AdvancePage, Drag, DragPhase, GoToCover, JumpToPage, Key, PressKey, ReaderCommand,
    ReportInteractionResolved, RequestFrameChange, SendInput,
};
use picturebook_reader::domain::navigation::Direction;
use thiserror::Error;

/// One parsed line.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Apply a command to the reader.
    Command(ReaderCommand),
    /// Print the reader view.
    View,
    /// Print title, author, page count and version hash.
    Summary,
    /// Print the story text grouped into chapters.
    Transcript,
    /// Stop reading input.
    Quit,
}

/// Errors raised while parsing a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The first word is not an instruction.
    #[error("unknown instruction '{0}'")]
    UnknownInstruction(String),

    /// An argument is missing.
    #[error("'{instruction}' expects {expected}")]
    MissingArgument {
        /// The instruction.
        instruction: &'static str,
        /// What it expects.
        expected: &'static str,
    },

    /// An argument did not parse.
    #[error("'{instruction}' could not parse '{value}'")]
    InvalidArgument {
        /// The instruction.
        instruction: &'static str,
        /// The offending word.
        value: String,
    },
}

/// Parses one line. Returns `None` for blank lines and comments.
///
/// # Errors
///
/// Returns `ScriptError` if the line is not a valid instruction.
pub fn parse_line(line: &str) -> Result<Option<Instruction>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let mut args = Args {
        instruction: "",
        words,
    };

    let command = match head {
        "view" => return Ok(Some(Instruction::View)),
        "book" => return Ok(Some(Instruction::Summary)),
        "transcript" => return Ok(Some(Instruction::Transcript)),
        "quit" | "exit" => return Ok(Some(Instruction::Quit)),
        "next" => ReaderCommand::Advance(AdvancePage {
            direction: Direction::Forward,
        }),
        "prev" => ReaderCommand::Advance(AdvancePage {
            direction: Direction::Backward,
        }),
        "cover" => ReaderCommand::Cover(GoToCover),
        "jump" => {
            args.instruction = "jump";
            ReaderCommand::Jump(JumpToPage {
                index: args.required("a page index")?,
            })
        }
        "key" => {
            args.instruction = "key";
            ReaderCommand::Key(PressKey {
                key: args.required::<Key>("left or right")?,
            })
        }
        "tap" => {
            let input = match args.words.next() {
                Some(region) => InteractionInput::region_tap(region),
                None => InteractionInput::surface_tap(),
            };
            ReaderCommand::Input(SendInput { input })
        }
        "wipe" => {
            args.instruction = "wipe";
            let point = args.point()?;
            ReaderCommand::Input(SendInput {
                input: InteractionInput::WipeStart(point),
            })
        }
        "wipe-to" => {
            args.instruction = "wipe-to";
            let point = args.point()?;
            ReaderCommand::Input(SendInput {
                input: InteractionInput::WipeMove(point),
            })
        }
        "wipe-end" => ReaderCommand::Input(SendInput {
            input: InteractionInput::WipeEnd,
        }),
        "coverage" => {
            args.instruction = "coverage";
            ReaderCommand::Input(SendInput {
                input: InteractionInput::CoverageReport(args.required("a fraction")?),
            })
        }
        "resolved" => {
            args.instruction = "resolved";
            let page = args.required("a page index")?;
            let frame = args.optional()?;
            ReaderCommand::Resolved(ReportInteractionResolved { page, frame })
        }
        "frame" => {
            args.instruction = "frame";
            let page = args.required("a page index and a frame index")?;
            let frame = args.required("a page index and a frame index")?;
            ReaderCommand::FrameChange(RequestFrameChange { page, frame })
        }
        "drag" => {
            args.instruction = "drag";
            let (x, y) = args.pixels()?;
            ReaderCommand::Drag(Drag {
                phase: DragPhase::Start { x, y },
            })
        }
        "drag-to" => {
            args.instruction = "drag-to";
            let (x, y) = args.pixels()?;
            ReaderCommand::Drag(Drag {
                phase: DragPhase::Move { x, y },
            })
        }
        "drag-end" => ReaderCommand::Drag(Drag {
            phase: DragPhase::End,
        }),
        other => return Err(ScriptError::UnknownInstruction(other.to_owned())),
    };
    Ok(Some(Instruction::Command(command)))
}

struct Args<'a> {
    instruction: &'static str,
    words: std::str::SplitWhitespace<'a>,
}

impl Args<'_> {
    fn required<T: FromStr>(&mut self, expected: &'static str) -> Result<T, ScriptError> {
        let word = self.words.next().ok_or(ScriptError::MissingArgument {
            instruction: self.instruction,
            expected,
        })?;
        self.parse(word)
    }

    fn optional<T: FromStr>(&mut self) -> Result<Option<T>, ScriptError> {
        self.words.next().map(|word| self.parse(word)).transpose()
    }

    fn parse<T: FromStr>(&self, word: &str) -> Result<T, ScriptError> {
        word.parse().map_err(|_| ScriptError::InvalidArgument {
            instruction: self.instruction,
            value: word.to_owned(),
        })
    }

    fn pixels(&mut self) -> Result<(f64, f64), ScriptError> {
        let x = self.required("X and Y")?;
        let y = self.required("X and Y")?;
        Ok((x, y))
    }

    fn point(&mut self) -> Result<Point, ScriptError> {
        let (x, y) = self.pixels()?;
        Ok(Point::new(x, y))
    }
}
