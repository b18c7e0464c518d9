use anyhow::Result;
use find_and_replace::cli::parse_args;
use find_and_replace::match_formatter::{ColorMode, MatchFormatter};
use find_and_replace::runner::{self, Runner};
use find_and_replace::{config, logger, Console};
use std::io;
use std::process;

fn main() {
    let code = match try_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    process::exit(code);
}

fn try_main() -> Result<i32> {
    let args = parse_args();
    let config = config::load_config()?;

    if let Some(log_path) = logger::init_debug_logging(args.debug || config.logging.debug)? {
        tracing::info!("find-and-replace {} logging to {}", find_and_replace::VERSION, log_path.display());
    }

    let color_mode = if args.no_color {
        ColorMode::Never
    } else {
        config.color_mode()
    };
    let formatter = MatchFormatter::new(color_mode.apply(), config.display.show_context);

    let runner = Runner::new(args, formatter);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let mut err = io::stderr();
    let mut console = Console {
        input: &mut input,
        out: &mut out,
        err: &mut err,
    };

    Ok(runner::run_to_exit_code(&runner, &mut console))
}
