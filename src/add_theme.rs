/*
cargo run --bin add_theme

cargo run --bin add_theme -- \
    -i data/quiz_nice_15.json \
    --default-theme Nice \
    --count-theme francais_familier \
    --themes
*/

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::{info, LevelFilter};
use quiz_theme::{AnnotatorConfig, ThemeAnnotator, COUNT_THEME, DEFAULT_INPUT, DEFAULT_THEME};
use simplelog::{Config, WriteLogger};

/// Add a default theme to every quiz item that lacks one.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Input JSON file (top-level array of objects)
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output file (default: <input basename>_updated.json in the current dir)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Theme given to items without one
    #[arg(long, default_value = DEFAULT_THEME)]
    default_theme: String,

    /// Theme counted in the final summary line
    #[arg(long, default_value = COUNT_THEME)]
    count_theme: String,

    /// Directory for the run log
    #[arg(long, value_name = "DIR", default_value = "logs")]
    log_dir: PathBuf,

    /// Also log how many items carry each theme
    #[arg(long)]
    themes: bool,

    /// Log every filled item, not just the totals
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // a missing log file never stops the run
    if let Err(e) = init_logging(&cli.log_dir, log_level(cli.verbose)) {
        eprintln!("Logging disabled: {e:#}");
    }
    info!("Started - input: {:?}, output: {:?}", cli.input, cli.output);

    let config = AnnotatorConfig {
        input: cli.input,
        output: cli.output,
        default_theme: cli.default_theme,
        count_theme: cli.count_theme,
    };
    let report = ThemeAnnotator::new(config)
        .run()
        .context("annotating quiz themes")?;

    if cli.themes {
        for (theme, count) in &report.themes {
            info!("{theme}: {count}");
        }
    }
    info!("Report: {}", serde_json::to_string(&report)?);

    println!("{report}");
    info!("Finished");
    Ok(())
}

fn init_logging(dir: &Path, level: LevelFilter) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let log_path = dir.join(format!("add_theme_{timestamp}.log"));
    let file = fs::File::create(&log_path)
        .with_context(|| format!("creating {}", log_path.display()))?;

    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}

fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
