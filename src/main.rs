use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lightburn_uccnc::discover::DEFAULT_PATTERN;
use lightburn_uccnc::{FileOutcome, PowerConfig, ProcessOptions, process_all, walk_match};
use tracing::error;

/// Rewrite LightBurn LinuxCNC G-code for UCCNC controllers
#[derive(Parser, Debug)]
#[command(name = "lightburn-uccnc", version)]
struct Cli {
    /// Source programs; when omitted, search --root for --pattern
    files: Vec<PathBuf>,

    /// Directory searched when no files are given
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// File name pattern used when searching
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Target power for the weakest non-zero source power
    #[arg(long, default_value_t = 51.0)]
    min_power: f64,

    /// Target power for full source power
    #[arg(long, default_value_t = 255.0)]
    max_power: f64,

    /// Target power used when the source sets power to zero
    #[arg(long, default_value_t = 51.0)]
    park_power: f64,

    /// Convert even if the existing output is up to date
    #[arg(long)]
    force: bool,

    /// Print converted programs instead of writing them
    #[arg(long)]
    dry_run: bool,

    /// Stop at the first file that fails
    #[arg(long)]
    fail_fast: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match PowerConfig::new(cli.min_power, cli.max_power, cli.park_power) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    let files = if cli.files.is_empty() {
        match walk_match(&cli.root, &cli.pattern) {
            Ok(files) => files,
            Err(e) => {
                error!("{}", e);
                return ExitCode::from(2);
            }
        }
    } else {
        cli.files
    };

    let options = ProcessOptions {
        force: cli.force,
        dry_run: cli.dry_run,
    };

    let (mut converted, mut skipped, mut failed) = (0, 0, 0);
    for result in process_all(files.as_slice(), &config, &options, cli.fail_fast) {
        match result {
            Ok(report) => {
                match &report.outcome {
                    FileOutcome::Converted { program, .. } => {
                        converted += 1;
                        if cli.dry_run {
                            print!("{}", program);
                        }
                    }
                    FileOutcome::Skipped(_) => skipped += 1,
                }
                if cli.dry_run {
                    eprintln!("{}", report);
                } else {
                    println!("{}", report);
                }
            }
            Err(e) => {
                failed += 1;
                error!("{}", e);
            }
        }
    }

    eprintln!(
        "{} converted, {} skipped, {} failed",
        converted, skipped, failed
    );
    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
