use crate::confirm::{self, ConfirmState, PromptKind};
use crate::error::{ReplaceError, Result};
use crate::match_formatter::MatchFormatter;
use crate::pattern::Replacement;
use regex::Regex;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// One match of the find-pattern inside a file
#[derive(Debug, Clone, PartialEq)]
pub struct MatchInfo {
    /// 1-based position among the file's matches
    pub index: usize,
    /// 1-based line of the match start
    pub line_number: usize,
    /// Byte offsets into the file content
    pub start: usize,
    pub end: usize,
    /// Byte offset of the match start within its line
    pub column: usize,
    pub text: String,
    /// The full line the match starts on, without its terminator
    pub context_line: String,
    /// What this match becomes after expansion of the template
    pub replacement: String,
}

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Rewritten with this many replacements
    Modified(usize),
    NoMatches,
    /// The user answered no at the per-file prompt
    Declined,
    /// The user asked to quit; nothing after this file may be touched
    Aborted,
}

impl FileOutcome {
    pub fn is_modified(self) -> bool {
        matches!(self, FileOutcome::Modified(_))
    }
}

/// The interactive streams a run talks to
pub struct Console<'a> {
    pub input: &'a mut dyn BufRead,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

/// File content plus every match found in it
#[derive(Debug)]
pub struct ScanResult {
    pub content: String,
    pub matches: Vec<MatchInfo>,
}

pub struct FileProcessor<'a> {
    regex: &'a Regex,
    replacement: &'a Replacement,
    formatter: &'a MatchFormatter,
}

impl<'a> FileProcessor<'a> {
    pub fn new(regex: &'a Regex, replacement: &'a Replacement, formatter: &'a MatchFormatter) -> Self {
        Self {
            regex,
            replacement,
            formatter,
        }
    }

    /// All non-overlapping matches in `content`, with line information
    pub fn find_matches(&self, content: &str) -> Vec<MatchInfo> {
        let mut matches = Vec::new();
        let mut line_number = 1;
        let mut line_start = 0;
        let mut line_end = 0;
        let mut counted_to = 0;

        for (i, caps) in self.regex.captures_iter(content).enumerate() {
            // group 0 always participates
            let Some(m) = caps.get(0) else { continue };

            // only the text since the previous match is scanned for newlines
            let skipped = &content[counted_to..m.start()];
            line_number += skipped.matches('\n').count();
            if let Some(p) = skipped.rfind('\n') {
                line_start = counted_to + p + 1;
            }
            counted_to = m.start();

            if m.start() >= line_end {
                line_end = content[m.start()..]
                    .find('\n')
                    .map_or(content.len(), |p| m.start() + p);
            }
            let context_line = content[line_start..line_end].trim_end_matches('\r');

            matches.push(MatchInfo {
                index: i + 1,
                line_number,
                start: m.start(),
                end: m.end(),
                column: m.start() - line_start,
                text: m.as_str().to_string(),
                context_line: context_line.to_string(),
                replacement: self.replacement.expand(&caps),
            });
        }

        matches
    }

    /// Read `path` and find its matches
    pub fn scan(&self, path: &Path) -> Result<ScanResult> {
        let content = read_content(path)?;
        let matches = self.find_matches(&content);
        tracing::debug!("{}: {} match(es)", path.display(), matches.len());
        Ok(ScanResult { content, matches })
    }

    /// Substitute every match in `content` and overwrite `path`
    pub fn apply(&self, path: &Path, content: &str) -> Result<()> {
        let new_content = self.replacement.apply(self.regex, content);
        write_content(path, &new_content)
    }

    /// Process one file: show matches, ask, substitute, write back.
    ///
    /// With `no_confirm` every file with matches is rewritten without asking.
    pub fn process_file(&self, path: &Path, no_confirm: bool, console: &mut Console<'_>) -> Result<FileOutcome> {
        let ScanResult { content, matches } = self.scan(path)?;
        let shown = path.display().to_string();

        if matches.is_empty() {
            writeln!(console.out, "No matches found in: {}", shown).map_err(ReplaceError::Console)?;
            return Ok(FileOutcome::NoMatches);
        }

        write!(console.out, "{}", self.formatter.file_header(&shown, matches.len()))
            .map_err(ReplaceError::Console)?;

        if !no_confirm {
            for m in &matches {
                write!(console.out, "{}", self.formatter.format_match(m)).map_err(ReplaceError::Console)?;
            }

            let question = format!("\nReplace all {} match(es) in this file?", matches.len());
            let state = confirm::ask(console.input, console.out, &question, PromptKind::PerFile)
                .map_err(ReplaceError::Console)?;

            match state {
                ConfirmState::Accepted => {}
                ConfirmState::Aborted => {
                    writeln!(console.out, "Operation cancelled by user.").map_err(ReplaceError::Console)?;
                    return Ok(FileOutcome::Aborted);
                }
                ConfirmState::Declined | ConfirmState::AwaitConfirm => {
                    writeln!(console.out, "Skipping file.").map_err(ReplaceError::Console)?;
                    return Ok(FileOutcome::Declined);
                }
            }
        }

        self.apply(path, &content)?;
        tracing::info!("Replaced {} match(es) in {}", matches.len(), path.display());
        writeln!(console.out, "{}", self.formatter.success(&shown, matches.len()))
            .map_err(ReplaceError::Console)?;

        Ok(FileOutcome::Modified(matches.len()))
    }

    /// Dry-run counterpart of [`process_file`](Self::process_file): report, never write.
    ///
    /// Returns the number of matches found.
    pub fn dry_run_file(&self, path: &Path, console: &mut Console<'_>) -> Result<usize> {
        let scan = self.scan(path)?;
        if !scan.matches.is_empty() {
            writeln!(console.out, "\n[DRY RUN] Would process: {}", path.display()).map_err(ReplaceError::Console)?;
            writeln!(console.out, "[DRY RUN] Found {} match(es)", scan.matches.len()).map_err(ReplaceError::Console)?;
        }
        Ok(scan.matches.len())
    }
}

/// Read the whole file as UTF-8; the handle is closed before returning.
pub fn read_content(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| ReplaceError::from_io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| ReplaceError::from_io(path, e))?;
    Ok(content)
}

/// Overwrite an existing file in place; the handle is flushed, synced and
/// closed before returning.
pub fn write_content(path: &Path, content: &str) -> Result<()> {
    let write = || -> std::io::Result<()> {
        let file = OpenOptions::new().write(true).truncate(true).open(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        writer.into_inner()?.sync_all()
    };
    write().map_err(|e| ReplaceError::from_io(path, e))
}
