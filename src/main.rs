use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use formalize::{build_router, AppState, Commands, Container, ContainerConfig, Question, Settings};

#[derive(Parser)]
#[command(name = "formalize")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Load environment variables from this file instead of `./.env`
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Answer from an in-process mock instead of calling the LLM provider
    #[arg(long, global = true)]
    mock_llm: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_loaded = match cli.env_file.as_deref() {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
            true
        }
        None => dotenvy::dotenv().is_ok(),
    };

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if !env_loaded {
        info!("No .env file found, using process environment only");
    }

    let settings = Settings::from_env().context("invalid configuration")?;
    let container = Container::new(
        settings,
        ContainerConfig {
            mock_llm: cli.mock_llm,
        },
    )?;

    match cli.command {
        Commands::Serve { bind } => {
            let mut settings = container.settings().clone();
            if let Some(addr) = bind {
                settings = settings.with_bind_address(addr);
            }

            let app = build_router(AppState::from_container(&container), &settings);
            let listener = tokio::net::TcpListener::bind(settings.bind_address)
                .await
                .with_context(|| format!("failed to bind {}", settings.bind_address))?;

            info!(
                "{} ({}) listening on http://{}{}",
                settings.project_name,
                settings.server_name,
                listener.local_addr()?,
                settings.api_prefix
            );
            info!(
                "Public host {}, model {}, CORS origins {:?}",
                settings.server_host,
                container.ask_use_case().model_name(),
                settings.cors_origins
            );

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            info!("Server stopped");
        }

        Commands::Ask { query } => {
            let answer = container
                .ask_use_case()
                .execute(&Question::new(query))
                .await
                .context("Failed to get a response from the LLM")?;
            println!("{}", answer.response());
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
