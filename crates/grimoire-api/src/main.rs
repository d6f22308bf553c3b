//! Grimoire session host entry point.

use std::error::Error;
use std::sync::Arc;

use grimoire_api::config::{AppConfig, TransportMode};
use grimoire_api::error::AppError;
use grimoire_api::routes;
use grimoire_api::session::{self, Session};
use grimoire_api::state::AppState;
use grimoire_core::clock::SystemClock;
use grimoire_engine::SessionOutcome;
use grimoire_oracle::{ChatClient, LlmOracle};
use grimoire_script::Script;
use grimoire_script::application::loader::{ScriptLibrary, load_script};
use grimoire_storyteller::{ChannelTransport, CliTransport, SeededRng, StaticAllocator};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(config.transport);

    info!(
        script = %config.script_path.display(),
        players = config.players,
        "Starting Grimoire session"
    );

    let script = read_script(&config).await?;
    let mut rng = config
        .seed
        .map_or_else(SeededRng::from_entropy, SeededRng::from_seed);
    let allocator = StaticAllocator::new(config.role_counts);
    let players = session::seat_players(&script, config.players, &allocator, &mut rng).await?;

    let oracle = Arc::new(LlmOracle::new(ChatClient::new(config.chat.clone())));
    let clock = Arc::new(SystemClock);

    match config.transport {
        TransportMode::Cli => {
            let Session { mut engine, .. } = session::assemble(
                script,
                players,
                oracle,
                Arc::new(CliTransport::new()),
                clock,
                config.engine,
                true,
            );
            report(engine.run_session().await?);
        }
        TransportMode::Http => {
            let (transport, handle) = ChannelTransport::connected();
            let Session {
                mut engine,
                grimoire,
                log,
            } = session::assemble(
                script,
                players,
                oracle,
                Arc::new(transport),
                clock,
                config.engine,
                false,
            );
            let app_state = AppState::new(engine.session_id(), grimoire, log, handle);

            tokio::spawn(async move {
                match engine.run_session().await {
                    Ok(outcome) => report(outcome),
                    Err(e) => error!(error = %e, "session aborted"),
                }
            });

            let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
            info!("Listening on {}", config.listen_addr);
            axum::serve(listener, routes::app(app_state))
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
    }

    Ok(())
}

/// JSON logs when serving HTTP; plain logs on stderr in the terminal, where
/// stdout carries the transcript.
fn init_tracing(mode: TransportMode) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match mode {
        TransportMode::Http => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        TransportMode::Cli => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

async fn read_script(config: &AppConfig) -> Result<Script, AppError> {
    if config.script_path.is_dir() {
        let available = ScriptLibrary::new(config.script_path.clone()).list().await;
        return Err(AppError::Config(format!(
            "GRIMOIRE_SCRIPT must name a script file; {} contains: {}",
            config.script_path.display(),
            available.join(", ")
        )));
    }
    Ok(load_script(&config.script_path).await?)
}

fn report(outcome: SessionOutcome) {
    if outcome.is_runaway() {
        warn!(?outcome, "session stopped without a result");
    } else {
        info!(?outcome, "session finished");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
