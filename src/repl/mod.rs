//! Interactive REPL
//!
//! Reads lines with rustyline, accumulates them until the parentheses
//! balance, then runs the input through a `Metta` runner. History is kept
//! under the platform data directory.

pub mod state_machine;

use std::fs;
use std::path::PathBuf;

use itertools::Itertools;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::backend::models::Atom;
use crate::backend::runner::Metta;
use crate::error::MettaError;

pub use state_machine::{CompletenessStatus, ReplEvent, ReplState, ReplStateMachine, StateTransition};

const PROMPT: &str = "metta> ";

/// Render one query's result set as `[a, b]`.
pub fn format_results(results: &[Atom]) -> String {
    format!("[{}]", results.iter().join(", "))
}

/// `<data dir>/mettaspace/history`, when the platform has a data directory.
pub fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("mettaspace").join("history"))
}

/// Run the REPL until end of input.
pub fn run_repl(metta: &Metta) -> Result<(), MettaError> {
    println!("mettaspace REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Enter MeTTa forms; `!` evaluates. Ctrl-D exits.\n");

    let mut rl = DefaultEditor::new().map_err(readline_error)?;
    let history = history_path();
    if let Some(path) = &history {
        // a missing history file is normal on first use
        let _ = rl.load_history(path);
    }

    let mut machine = ReplStateMachine::new();
    let mut prompt = PROMPT.to_string();

    loop {
        match rl.readline(&prompt) {
            Ok(line) => match machine.process_event(ReplEvent::LineSubmitted(line)) {
                StateTransition::TransitionWithPrompt { prompt: next, .. } => prompt = next,
                StateTransition::Transition(ReplState::Evaluating { input }) => {
                    history_ok(rl.add_history_entry(input.as_str()), "add entry");
                    evaluate(metta, &input);
                    machine.process_event(ReplEvent::EvaluationDone);
                    prompt = PROMPT.to_string();
                }
                StateTransition::Transition(ReplState::Error { message }) => {
                    eprintln!("Error: {}", message);
                    prompt = PROMPT.to_string();
                }
                _ => {}
            },
            Err(ReadlineError::Interrupted) => {
                machine.process_event(ReplEvent::Interrupted);
                prompt = PROMPT.to_string();
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(readline_error(err)),
        }
    }

    if let Some(path) = &history {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        history_ok(rl.save_history(path), "save");
    }
    Ok(())
}

fn evaluate(metta: &Metta, input: &str) {
    for outcome in metta.run_forms(input) {
        match outcome {
            Ok(results) => println!("{}", format_results(&results)),
            Err(err) => eprintln!("Error: {}", err),
        }
    }
}

/// Log a failed history operation. History problems never end the session.
fn history_ok<T>(result: rustyline::Result<T>, action: &str) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            debug!(target: "mettaspace::repl", %err, action, "history operation failed");
            false
        }
    }
}

fn readline_error(err: ReadlineError) -> MettaError {
    MettaError::Io(err.to_string())
}
