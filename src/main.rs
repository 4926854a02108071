//! Kaze
//!
//! Puts the terminal in raw mode and prints the code of every key pressed
//! until Ctrl-Q.

use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use kaze::config::LogConfig;
use kaze::{CliArgs, Config, Editor, Exit, KeyReader, RawMode};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let loaded = match Config::load_with_args(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let config = loaded.config;

    if let Err(e) = init_logging(&config.log, args.verbose) {
        eprintln!("Failed to open log file: {}", e);
        return ExitCode::FAILURE;
    }

    debug!("Starting Kaze");
    if let Some(e) = &loaded.file_error {
        warn!("{}", e);
    }

    match run(&config) {
        Ok(exit) => {
            info!(?exit, "Kaze exited");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Fatal error: {}", e);
            if !config.log.logs_to_stderr() {
                eprintln!("kaze: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr unless a file is configured; RUST_LOG wins over both
/// the config level and `-v`
fn init_logging(log: &LogConfig, verbose: u8) -> io::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log.filter(verbose)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &log.file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn run(config: &Config) -> kaze::Result<Exit> {
    let policy = config.input.read_policy();
    let session = RawMode::enter(io::stdin(), policy)?;

    let reader = KeyReader::from_fd(io::stdin())?;
    let mut editor = Editor::new(reader, io::stdout().lock())
        .with_quit_letter(config.input.quit_letter())
        .with_policy(policy);

    if config.input.clear_screen {
        editor.refresh()?;
    }
    editor.viewport(&session)?;

    let outcome = editor.run();
    if outcome.is_err() {
        // Leave a clean screen behind before the error is reported
        let _ = editor.refresh();
    }
    let _ = editor.output_mut().flush();

    let restored = session.exit();
    let exit = outcome?;
    restored?;
    Ok(exit)
}
