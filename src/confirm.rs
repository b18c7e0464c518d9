//! Interactive confirmation
//!
//! Each decision point is one prompt and exactly one blocking line read:
//! `AwaitConfirm` moves to `Accepted`, `Declined` or `Aborted` and never back.

use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    AwaitConfirm,
    Accepted,
    Declined,
    Aborted,
}

/// Which answers a prompt accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// `y/n`, asked once before any file is touched
    Proceed,
    /// `y/n/q`, asked once per file
    PerFile,
}

impl PromptKind {
    fn choices(self) -> &'static str {
        match self {
            PromptKind::Proceed => "(y/n)",
            PromptKind::PerFile => "(y/n/q)",
        }
    }
}

impl ConfirmState {
    /// Resolve a waiting prompt from one line of user input.
    ///
    /// `None` means the input stream ended.
    pub fn resolve(self, kind: PromptKind, line: Option<&str>) -> ConfirmState {
        if self != ConfirmState::AwaitConfirm {
            return self;
        }

        let Some(line) = line else {
            return match kind {
                PromptKind::Proceed => ConfirmState::Aborted,
                PromptKind::PerFile => ConfirmState::Declined,
            };
        };

        match (kind, line.trim().to_lowercase().as_str()) {
            (_, "y" | "yes") => ConfirmState::Accepted,
            (PromptKind::PerFile, "q" | "quit") => ConfirmState::Aborted,
            (PromptKind::Proceed, _) => ConfirmState::Aborted,
            (PromptKind::PerFile, _) => ConfirmState::Declined,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != ConfirmState::AwaitConfirm
    }
}

/// Print `question` and block for one answer.
pub fn ask(
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    question: &str,
    kind: PromptKind,
) -> io::Result<ConfirmState> {
    write!(output, "{} {}: ", question, kind.choices())?;
    output.flush()?;

    let mut line = String::new();
    let answer = match input.read_line(&mut line)? {
        0 => None,
        _ => Some(line.as_str()),
    };

    let state = ConfirmState::AwaitConfirm.resolve(kind, answer);
    tracing::debug!("Prompt '{}' resolved to {:?}", question, state);
    Ok(state)
}
