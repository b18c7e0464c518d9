//! find-and-replace: regex find-and-replace across files selected by a glob
//!
//! The binaries are thin wrappers: `src/main.rs` drives [`runner::Runner`],
//! `src/bin/generate_readme.rs` drives [`readme_builder`].

pub mod cli;
pub mod config;
pub mod confirm;
pub mod error;
pub mod file_processor;
pub mod file_selector;
pub mod logger;
pub mod match_formatter;
pub mod pattern;
pub mod readme_builder;
pub mod regex_error;
pub mod runner;

pub use cli::Args;
pub use error::ReplaceError;
pub use file_processor::{Console, FileOutcome, FileProcessor, MatchInfo};
pub use file_selector::{find_files, select_files};
pub use match_formatter::{ColorMode, MatchFormatter};
pub use pattern::{compile_pattern, PatternOptions, Replacement};
pub use runner::{RunStatus, RunSummary, Runner};

/// Package version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
