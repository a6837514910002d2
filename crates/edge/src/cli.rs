// crates/edge/src/cli.rs

use crate::{app_router, bootstrap, state::AppState};
use anyhow::{Context, Result};
use axum::{extract::Request, ServiceExt};
use chrono::Utc;
use clap::{builder::ValueHint, Parser, Subcommand};
use domain::setting::Settings;
use std::{net::SocketAddr, path::PathBuf, process::ExitCode};
use tracing::{error, info, warn};

/// Command line entry point: parse arguments, load settings, serve.
#[tokio::main(flavor = "multi_thread")]
#[tracing::instrument(skip_all)]
pub async fn start() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Start(start) => do_start(start).await,
    };

    result.map_or_else(
        |e| {
            error!("Failed to run supportdesk: {:#}", e);
            ExitCode::FAILURE
        },
        |_| {
            info!("supportdesk stopped");
            ExitCode::SUCCESS
        },
    )
}

#[tracing::instrument(skip_all)]
async fn do_start(start: StartCmd) -> Result<()> {
    let then = Utc::now();
    let process = StartProcess::<CommandIssued>::parse_settings_file(start)?;
    info!(
        "Settings parsed in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    let then = Utc::now();
    let process = process.compose()?;
    info!(
        "Components composed in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    process.serve().await
}

#[derive(Parser, Debug)]
#[command(name = "supportdesk", version, about = "Support contact panel, notices and contact form")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the site in the specified directory
    Start(StartCmd),
}

#[derive(Parser, Debug)]
pub struct StartCmd {
    /// Site directory containing settings.toml (or set SUPPORTDESK_DIR)
    #[arg(
        value_name = "DIR",
        env = "SUPPORTDESK_DIR",
        required = true,
        value_hint = ValueHint::DirPath,
        value_parser = dir_must_exist
    )]
    pub dir: PathBuf,
}

fn dir_must_exist(s: &str) -> std::result::Result<PathBuf, String> {
    let p = PathBuf::from(s);
    if !p.exists() {
        return Err(format!("Not found: {}", p.display()));
    }
    if !p.is_dir() {
        return Err(format!("Not a directory: {}", p.display()));
    }
    Ok(p)
}

// ─────────────────────────────────────────────────────────────────────────────
// Start process state machine
// ─────────────────────────────────────────────────────────────────────────────

trait ProcessState {}

struct CommandIssued;

struct SettingsLoaded {
    command: StartCmd,
    settings: Settings,
}

struct Composed {
    settings: Settings,
    state: AppState,
}

impl ProcessState for CommandIssued {}
impl ProcessState for SettingsLoaded {}
impl ProcessState for Composed {}

struct StartProcess<S: ProcessState> {
    state: S,
}

/// Parse `settings.toml` text; every section is optional.
pub fn parse_settings(text: &str) -> Result<Settings> {
    Ok(toml::from_str(text)?)
}

impl StartProcess<CommandIssued> {
    /// Load settings from `<dir>/settings.toml`.
    #[tracing::instrument(skip_all)]
    fn parse_settings_file(command: StartCmd) -> Result<StartProcess<SettingsLoaded>> {
        let path = command.dir.join("settings.toml");
        if !path.exists() {
            anyhow::bail!("settings.toml not found at {}", path.display());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed reading {}", path.display()))?;
        let settings = parse_settings(&text)
            .with_context(|| format!("Invalid settings.toml at {}", path.display()))?;

        Ok(StartProcess {
            state: SettingsLoaded { command, settings },
        })
    }
}

impl StartProcess<SettingsLoaded> {
    #[tracing::instrument(skip_all)]
    fn compose(self) -> Result<StartProcess<Composed>> {
        let dir = &self.state.command.dir;
        let settings = self.state.settings;

        let pages = dir.join(&settings.pages.dir);
        if !pages.is_dir() {
            warn!("pages directory {} does not exist; public pages will 404", pages.display());
        }

        let state = bootstrap::compose(&settings, dir)?;
        Ok(StartProcess {
            state: Composed { settings, state },
        })
    }
}

impl StartProcess<Composed> {
    #[tracing::instrument(skip_all)]
    async fn serve(self) -> Result<()> {
        let server = &self.state.settings.server;
        let addr = SocketAddr::new(server.ip, server.port);

        let app = app_router(self.state.state);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("bind {addr}"))?;
        info!("listening on http://{addr}");

        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::setting::ConfigSource;

    #[test]
    fn parses_partial_settings() {
        let s = parse_settings("[contact]\nsource = \"environment\"\n").unwrap();
        assert_eq!(s.contact.source, ConfigSource::Environment);
        assert_eq!(s.server.port, 8080);
    }

    #[test]
    fn rejects_bad_settings() {
        assert!(parse_settings("[server]\nport = \"eighty\"").is_err());
    }

    #[test]
    fn dir_validation() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(dir_must_exist(tmp.path().to_str().unwrap()).is_ok());
        assert!(dir_must_exist("/definitely/not/here").is_err());

        let file = tmp.path().join("f");
        std::fs::write(&file, "").unwrap();
        assert!(dir_must_exist(file.to_str().unwrap()).is_err());
    }
}
