use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

mod commands;
mod presenter;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_settings, resume::check_resume, CareerApi, HttpApi, Presenter, ResumeFile,
    SessionController, UiAction,
};
use tracing_subscriber::EnvFilter;

use crate::{
    commands::{Command, HELP},
    presenter::TerminalPresenter,
};

#[derive(Parser, Debug)]
#[command(about = "Career personality assessment and advisor chat in the terminal")]
struct Args {
    /// TOML settings file; defaults to ./career_client.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides every other source for the API base URL.
    #[arg(long)]
    api_base_url: Option<String>,
}

fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// The declared type and size are checked from metadata so an oversized file
/// is never buffered.
async fn read_resume(path: &Path) -> Result<ResumeFile> {
    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("could not read {}", path.display()))?;
    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream");
    let size_bytes = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    check_resume(mime_type, size_bytes)?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("could not read {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("resume")
        .to_string();
    Ok(ResumeFile::new(filename, mime_type, bytes))
}

async fn run_action<A: CareerApi, P: Presenter>(
    controller: &mut SessionController<A, P>,
    action: UiAction,
) {
    let name = action.name();
    if let Err(err) = controller.dispatch(action).await {
        tracing::debug!(action = name, error = %err, "action ended with an error");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(api_base_url) = args.api_base_url {
        settings.api_base_url = api_base_url;
    }
    tracing::info!(api = %settings.api_base_url, "starting terminal client");

    let api = HttpApi::new(&settings)?;
    let mut controller = SessionController::new(api, TerminalPresenter::new(), settings);
    controller.initialize().await;
    println!("Type `start` to begin the assessment or `help` for every command.");

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = tokio::task::spawn_blocking(read_line).await?? else {
            break;
        };

        match commands::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => println!("{HELP}"),
            Ok(Some(Command::Upload(path))) => match read_resume(&path).await {
                Ok(file) => run_action(&mut controller, UiAction::UploadResume(file)).await,
                Err(err) => println!("! {err:#}"),
            },
            Ok(Some(Command::Action(action))) => run_action(&mut controller, action).await,
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}
