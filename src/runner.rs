//! The find-and-replace workflow, top to bottom
//!
//! Validate the pattern, select files, optionally confirm once, process each
//! file, print a summary. All terminal traffic goes through a [`Console`] so
//! the workflow runs the same against stdin/stdout and against test buffers.

use crate::cli::Args;
use crate::confirm::{self, ConfirmState, PromptKind};
use crate::error::{ReplaceError, Result};
use crate::file_processor::{Console, FileOutcome, FileProcessor};
use crate::file_selector;
use crate::match_formatter::MatchFormatter;
use crate::pattern::{self, PatternOptions, Replacement};

/// Files modified (or that would be) versus files considered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub modified: usize,
    pub total: usize,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed(RunSummary),
    NoFiles,
    /// Declined at the global prompt; nothing was touched
    Cancelled,
    /// Quit at a per-file prompt; files before it may have been modified
    Aborted(RunSummary),
}

pub struct Runner {
    args: Args,
    formatter: MatchFormatter,
}

impl Runner {
    pub fn new(args: Args, formatter: MatchFormatter) -> Self {
        Self { args, formatter }
    }

    /// Run the workflow. Only fatal errors are returned; per-file failures are
    /// printed and counted as not modified.
    pub fn run(&self, console: &mut Console<'_>) -> Result<RunStatus> {
        let args = &self.args;
        let options = PatternOptions {
            ignore_case: args.ignore_case,
            multiline: args.multiline,
        };

        // Nothing on disk is touched until both of these succeed
        let regex = pattern::compile_pattern(&args.text_to_find, options)?;
        let replacement = Replacement::new(&args.text_to_replace, &regex)?;

        let directory = file_selector::expand_directory(&args.directory);
        say(console, format_args!(
            "Searching for files matching '{}' in '{}'...",
            args.file_name,
            directory.display()
        ))?;
        if args.recursive {
            say(console, format_args!("(Searching recursively)"))?;
        }

        let files = file_selector::find_files(&args.file_name, &directory, args.recursive, console.err);
        if files.is_empty() {
            say(console, format_args!("No matching files found."))?;
            return Ok(RunStatus::NoFiles);
        }

        say(console, format_args!("Found {} file(s) to process:", files.len()))?;
        for file in &files {
            say(console, format_args!("  {}", file.display()))?;
        }

        if !args.no_confirm && !args.dry_run {
            let question = format!("\nProceed with processing {} file(s)?", files.len());
            let state = confirm::ask(console.input, console.out, &question, PromptKind::Proceed)
                .map_err(ReplaceError::Console)?;
            if state != ConfirmState::Accepted {
                say(console, format_args!("Operation cancelled."))?;
                return Ok(RunStatus::Cancelled);
            }
        }

        let processor = FileProcessor::new(&regex, &replacement, &self.formatter);
        let mut summary = RunSummary {
            modified: 0,
            total: files.len(),
            dry_run: args.dry_run,
        };

        for file in &files {
            if args.dry_run {
                match processor.dry_run_file(file, console) {
                    Ok(0) => {}
                    Ok(_) => summary.modified += 1,
                    Err(err) if err.is_fatal() => return Err(err),
                    Err(err) => {
                        tracing::warn!("{}", err);
                        say(console, format_args!(
                            "[DRY RUN] Error reading file '{}': {}",
                            file.display(),
                            err
                        ))?;
                    }
                }
                continue;
            }

            match processor.process_file(file, args.no_confirm, console) {
                Ok(FileOutcome::Modified(_)) => summary.modified += 1,
                Ok(FileOutcome::Aborted) => {
                    tracing::info!("Run aborted by user after {} modified file(s)", summary.modified);
                    return Ok(RunStatus::Aborted(summary));
                }
                Ok(FileOutcome::NoMatches | FileOutcome::Declined) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    tracing::warn!("{}", err);
                    writeln!(console.err, "Error: {}", err).map_err(ReplaceError::Console)?;
                }
            }
        }

        write!(
            console.out,
            "{}",
            self.formatter.summary(summary.modified, summary.total, summary.dry_run)
        )
        .map_err(ReplaceError::Console)?;

        Ok(RunStatus::Completed(summary))
    }
}

fn say(console: &mut Console<'_>, line: std::fmt::Arguments<'_>) -> Result<()> {
    writeln!(console.out, "{}", line).map_err(ReplaceError::Console)
}

/// Run and map the result to a process exit code: 0 for every completed,
/// empty, cancelled or aborted run, 1 for a fatal error.
pub fn run_to_exit_code(runner: &Runner, console: &mut Console<'_>) -> i32 {
    match runner.run(console) {
        Ok(status) => {
            tracing::debug!("Run finished: {:?}", status);
            0
        }
        Err(err) => {
            tracing::error!("{}", err);
            let _ = writeln!(console.err, "Error: {}", err);
            if let ReplaceError::InvalidPattern {
                suggestion: Some(suggestion),
                ..
            } = &err
            {
                let _ = writeln!(console.err, "  Suggestion: {}", suggestion);
            }
            1
        }
    }
}
