//! State machine for multi-line REPL input
//!
//! Lines accumulate until their parentheses balance; the complete input is
//! then handed off for evaluation.

/// REPL states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplState {
    /// Ready to accept new input
    Ready,
    /// Waiting for more input to complete expression
    Continuation { buffer: String },
    /// A complete input is ready to run
    Evaluating { input: String },
    /// Input with unbalanced closing delimiters
    Error { message: String },
}

/// REPL events
#[derive(Debug, Clone)]
pub enum ReplEvent {
    /// User submitted a line
    LineSubmitted(String),
    /// User interrupted (Ctrl-C)
    Interrupted,
    /// The evaluated input has been reported
    EvaluationDone,
}

/// State transition results
#[derive(Debug)]
pub enum StateTransition {
    /// No state change
    NoChange,
    /// Transition to new state
    Transition(ReplState),
    /// Transition with prompt change
    TransitionWithPrompt { new_state: ReplState, prompt: String },
}

/// Completeness status for expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletenessStatus {
    /// Expression is complete and can be evaluated
    Complete,
    /// Expression is incomplete, needs more input
    Incomplete {
        missing_close_parens: usize,
        unclosed_string: bool,
    },
    /// Expression has mismatched delimiters
    Invalid { reason: String },
}

/// State machine for REPL
pub struct ReplStateMachine {
    state: ReplState,
    continuation_prompt: String,
}

impl ReplStateMachine {
    pub fn new() -> Self {
        Self {
            state: ReplState::Ready,
            continuation_prompt: "...> ".to_string(),
        }
    }

    pub fn state(&self) -> &ReplState {
        &self.state
    }

    pub fn continuation_prompt(&self) -> &str {
        &self.continuation_prompt
    }

    /// Process an event and return the transition
    pub fn process_event(&mut self, event: ReplEvent) -> StateTransition {
        match (&self.state, event) {
            (ReplState::Ready, ReplEvent::LineSubmitted(line)) => self.handle_input(line),

            (ReplState::Continuation { buffer }, ReplEvent::LineSubmitted(line)) => {
                let mut combined = buffer.clone();
                combined.push('\n');
                combined.push_str(&line);
                self.handle_input(combined)
            }

            (_, ReplEvent::Interrupted) => self.reset(),

            (ReplState::Evaluating { .. }, ReplEvent::EvaluationDone) => self.reset(),

            // an error is reported once, then the next line starts afresh
            (ReplState::Error { .. }, ReplEvent::LineSubmitted(line)) => self.handle_input(line),
            (ReplState::Error { .. }, _) => self.reset(),

            _ => StateTransition::NoChange,
        }
    }

    fn reset(&mut self) -> StateTransition {
        self.state = ReplState::Ready;
        StateTransition::Transition(ReplState::Ready)
    }

    fn handle_input(&mut self, input: String) -> StateTransition {
        if input.trim().is_empty() {
            self.state = ReplState::Ready;
            return StateTransition::NoChange;
        }

        match Self::check_completeness(&input) {
            CompletenessStatus::Complete => {
                self.state = ReplState::Evaluating {
                    input: input.clone(),
                };
                StateTransition::Transition(ReplState::Evaluating { input })
            }
            CompletenessStatus::Incomplete { .. } => {
                self.state = ReplState::Continuation {
                    buffer: input.clone(),
                };
                StateTransition::TransitionWithPrompt {
                    new_state: ReplState::Continuation { buffer: input },
                    prompt: self.continuation_prompt.clone(),
                }
            }
            CompletenessStatus::Invalid { reason } => {
                self.state = ReplState::Error {
                    message: reason.clone(),
                };
                StateTransition::Transition(ReplState::Error { message: reason })
            }
        }
    }

    /// Check if input is complete by counting delimiters
    pub fn check_completeness(input: &str) -> CompletenessStatus {
        let mut paren_depth: i64 = 0;
        let mut in_string = false;
        let mut in_comment = false;
        let mut escape_next = false;

        for ch in input.chars() {
            if escape_next {
                escape_next = false;
                continue;
            }

            if in_comment {
                if ch == '\n' {
                    in_comment = false;
                }
                continue;
            }

            if in_string {
                if ch == '\\' {
                    escape_next = true;
                } else if ch == '"' {
                    in_string = false;
                }
                continue;
            }

            match ch {
                ';' => in_comment = true,
                '"' => in_string = true,
                '(' => paren_depth += 1,
                ')' => paren_depth -= 1,
                _ => {}
            }

            if paren_depth < 0 {
                return CompletenessStatus::Invalid {
                    reason: "Unexpected closing parenthesis ')'".to_string(),
                };
            }
        }

        if in_string || paren_depth > 0 {
            return CompletenessStatus::Incomplete {
                missing_close_parens: paren_depth as usize,
                unclosed_string: in_string,
            };
        }

        CompletenessStatus::Complete
    }
}

impl Default for ReplStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
