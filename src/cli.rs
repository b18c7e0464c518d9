use clap::Parser;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

License: MIT
Rust Edition: 2024"
);

#[derive(Parser, Debug)]
#[command(name = "find-and-replace")]
#[command(about = "Find and replace text in files using regular expressions")]
#[command(long_about = "Find and replace text in files using regular expressions.

Files are selected by a glob on their name inside DIRECTORY (recursively with -r).
Every file with matches is shown match by match and you confirm per file:
  y  replace all matches in this file
  n  skip this file
  q  stop immediately, leaving remaining files untouched

REPLACEMENT SYNTAX:
  \\1 .. \\99        numbered capture group
  \\g<name>          named capture group, \\g<0> or \\0 for the whole match
  \\\\                literal backslash
  \\n \\t \\r          newline, tab, carriage return
  $                 always literal

EXAMPLES:
  find-and-replace \"*.py\" /path/to/project \"old_function\" \"new_function\"
  find-and-replace \"*.txt\" . \"hello.*world\" \"hi universe\" -r -n
  find-and-replace \"*.md\" ~/notes \"(\\w+)@(\\w+)\" \"\\2 at \\1\" --dry-run
  find-and-replace \"config.json\" ~/projects '\"version\":\\s*\"[^\"]*\"' '\"version\": \"2.0.0\"' -r")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
pub struct Cli {
    /// File name pattern (glob, e.g. *.py, config.*)
    #[arg(value_name = "FILE_NAME")]
    pub file_name: String,

    /// Directory to search in (~ is expanded)
    #[arg(value_name = "DIRECTORY")]
    pub directory: String,

    /// Regular expression pattern to find
    #[arg(value_name = "TEXT_TO_FIND")]
    pub text_to_find: String,

    /// Text to replace matches with (can include groups like \1, \2)
    #[arg(value_name = "TEXT_TO_REPLACE")]
    pub text_to_replace: String,

    /// Recursively search subdirectories
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Do not ask for confirmation before making changes
    #[arg(short = 'n', long = "no-confirm")]
    pub no_confirm: bool,

    /// Show what would be changed without making actual changes
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Match case-insensitively
    #[arg(short = 'i', long = "ignore-case")]
    pub ignore_case: bool,

    /// Let ^ and $ match at the start and end of every line
    #[arg(short = 'm', long)]
    pub multiline: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Write a debug log for this run
    #[arg(long)]
    pub debug: bool,
}

/// Everything a run needs, independent of how it was parsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pub file_name: String,
    pub directory: String,
    pub text_to_find: String,
    pub text_to_replace: String,
    pub recursive: bool,
    pub no_confirm: bool,
    pub dry_run: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub no_color: bool,
    pub debug: bool,
}

impl From<Cli> for Args {
    fn from(cli: Cli) -> Self {
        Args {
            file_name: cli.file_name,
            directory: cli.directory,
            text_to_find: cli.text_to_find,
            text_to_replace: cli.text_to_replace,
            recursive: cli.recursive,
            no_confirm: cli.no_confirm,
            dry_run: cli.dry_run,
            ignore_case: cli.ignore_case,
            multiline: cli.multiline,
            no_color: cli.no_color,
            debug: cli.debug,
        }
    }
}

pub fn parse_args() -> Args {
    Cli::parse().into()
}
