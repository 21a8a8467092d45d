//! Entry point of the `js-i18n-sync` command.

mod cli;
mod ui;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use js_i18n_sync::config::{
    ConfigError,
    ConfigManager,
};
use js_i18n_sync::ir::MissingMessage;
use js_i18n_sync::translate::{
    OpenAiTranslator,
    TranslateError,
};
use js_i18n_sync::{
    SessionError,
    SyncSession,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::ui::Console;

/// Exit status for configuration, catalog and setup errors.
const EXIT_FATAL: u8 = 2;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let console = Console::stdout();

    let _guard = match init_tracing(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            report_fatal(&console, &format!("Failed to open log file: {err}"));
            return ExitCode::from(EXIT_FATAL);
        }
    };

    match run(&cli, &console).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "Run failed");
            report_fatal(&console, &err.to_string());
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn report_fatal(console: &Console, message: &str) {
    if let Err(err) = console.error(message) {
        tracing::error!(error = %err, text = message, "Failed to write to the terminal");
    }
}

/// Log to stderr, or to `log_file` when given. `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing(log_file: Option<&Path>) -> io::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(writer)
            .init();
        Ok(Some(guard))
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
        Ok(None)
    }
}

/// Settings file values resolve against the file's directory, command-line
/// paths against the working directory.
fn load_config(cli: &Cli) -> Result<ConfigManager, ConfigError> {
    let working_dir = std::env::current_dir().ok();
    let mut manager = ConfigManager::new();
    match &cli.config {
        Some(path) => manager.load_settings_from(path)?,
        None => manager.load_settings(working_dir.clone())?,
    }
    manager.apply_overrides(cli.overrides(working_dir.as_deref()))?;
    Ok(manager)
}

async fn run(cli: &Cli, console: &Console) -> Result<ExitCode, AppError> {
    let config = load_config(cli)?;
    let mut session = SyncSession::open(&config)?;

    console.catalogs(&session.store().names(), session.reference_locale())?;
    let audit = session.audit()?;
    console.audit(&audit)?;

    if audit.is_clean() {
        return Ok(ExitCode::SUCCESS);
    }
    if cli.check {
        return Ok(ExitCode::FAILURE);
    }
    if !console.confirm("Translate missing messages with chatGPT?", cli.yes)? {
        return Ok(ExitCode::SUCCESS);
    }

    let api_key = session.api_key(cli.open_ai_key.clone()).unwrap_or_default();
    let translator = OpenAiTranslator::new(api_key, &session.settings().translator)?;
    let missing: Vec<MissingMessage> = audit.missing_messages().cloned().collect();

    let spinner = console.spinner(missing.len());
    let run = session
        .translate(&translator, &missing, shutdown_signal(), |done, total| {
            spinner.set_message(format!("Translating {done}/{total} messages..."));
        })
        .await;
    spinner.finish_and_clear();
    console.translations(&run, session.resolver())?;

    if run.results.is_empty() {
        return Ok(if run.failures.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }
    if !console.confirm("Patch language files?", cli.yes)? {
        return Ok(ExitCode::SUCCESS);
    }

    console.line("Patching language files...")?;
    let patch = session.apply(&run.results);
    let persist = session.persist(&patch);
    console.patched(&patch, &persist)?;

    Ok(if persist.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Completes on Ctrl-C. Never completes if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
