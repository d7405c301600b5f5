use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

use zcalc::Config;
use zcalc::ui::{CalculatorView, DisplayOptions, looks_like_keys, parse_keys, render_display};

#[derive(Parser, Debug)]
#[command(name = "zcalc", version, about = "A keypad calculator for the terminal")]
struct Args {
    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Press these keys, print the display and exit (e.g. "12+3=")
    #[arg(long)]
    keys: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

const HELP: &str = "keys: 0-9 . + - * / =   n sign   < delete   c clear   a all clear   y copy   q quit";

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let level = if args.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    zcalc::logging::init(level);
    debug!(?config, "loaded config");

    let mut view = CalculatorView::new().with_copy_on_evaluate(config.copy_on_evaluate);
    let options = config.display_options();

    match args.keys {
        Some(keys) => run_once(&mut view, &keys, options),
        None => run_interactive(&mut view, options),
    }
}

fn run_once(view: &mut CalculatorView, keys: &str, options: DisplayOptions) -> Result<()> {
    press_keys(view, keys)?;
    println!("{}", render_display(view, options));
    Ok(())
}

fn run_interactive(view: &mut CalculatorView, options: DisplayOptions) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{HELP}");
    println!("{}", render_display(view, options));

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("q") {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }
        if !looks_like_keys(trimmed) {
            println!("{HELP}");
            continue;
        }

        if let Err(e) = press_keys(view, trimmed) {
            warn!("{e:#}");
            eprintln!("{e:#}");
        }

        println!("{}", render_display(view, options));
        stdout.flush().context("Failed to flush stdout")?;
    }

    Ok(())
}

fn press_keys(view: &mut CalculatorView, keys: &str) -> Result<()> {
    for e in view.dispatch_all(parse_keys(keys)?) {
        eprintln!("{e}");
    }
    Ok(())
}
