use anyhow::Result;
use clap::Parser;
use find_and_replace::logger;
use find_and_replace::readme_builder::{self, Manifest};
use std::path::PathBuf;
use std::process;

/// Assemble README.md from documentation fragments
#[derive(Parser)]
#[command(name = "generate-readme")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Assemble README.md from documentation fragments.

Without a manifest, concatenates badges.md, home.md and guides.md from
./docs/source/ into README.md.

MANIFEST FORMAT (TOML):
  docs_dir = \"./docs/source/\"
  output = \"README.md\"

  [[elements]]
  name = \"home\"
  start_marker = \"<!-- start -->\"   # optional
  end_marker = \"<!-- end -->\"       # optional")]
struct Cli {
    /// TOML manifest listing the fragments
    #[arg(short, long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Write to this file instead of the manifest's output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write a debug log for this run
    #[arg(long)]
    debug: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logger::init_debug_logging(cli.debug)?;

    let mut manifest = match &cli.manifest {
        Some(path) => Manifest::load(path)?,
        None => Manifest::default(),
    };
    if let Some(output) = cli.output {
        manifest.output = output;
    }

    let written = readme_builder::generate_readme(&manifest)?;
    println!("Wrote {}", written.display());
    Ok(())
}
