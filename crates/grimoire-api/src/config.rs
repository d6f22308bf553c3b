//! Process configuration read from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use grimoire_core::allocation::RoleAllocation;
use grimoire_engine::EngineConfig;
use grimoire_oracle::ChatConfig;

use crate::error::AppError;

/// Default chat endpoint when `BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// How humans reach the storyteller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// Terminal: stdout and stdin.
    Cli,
    /// HTTP surface with an in-process channel.
    Http,
}

impl FromStr for TransportMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cli" => Ok(Self::Cli),
            "http" => Ok(Self::Http),
            other => Err(AppError::Config(format!(
                "GRIMOIRE_TRANSPORT must be cli or http, got {other:?}"
            ))),
        }
    }
}

/// Everything the binary needs to run a session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Script file.
    pub script_path: PathBuf,
    /// Number of seated players.
    pub players: u32,
    /// Team make-up to deal.
    pub role_counts: RoleAllocation,
    /// Seed for dealing; entropy when `None`.
    pub seed: Option<u64>,
    /// Human transport.
    pub transport: TransportMode,
    /// Listen address in HTTP mode.
    pub listen_addr: SocketAddr,
    /// Loop bounds.
    pub engine: EngineConfig,
    /// Chat model settings.
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or any
    /// value is invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or any
    /// value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} environment variable must be set")))
        };

        let script_path = PathBuf::from(required("GRIMOIRE_SCRIPT")?);
        let players = parse_value("GRIMOIRE_PLAYERS", &required("GRIMOIRE_PLAYERS")?)?;
        let role_counts = parse_role_counts(&required("GRIMOIRE_ROLE_COUNTS")?)?;
        let seed = lookup("GRIMOIRE_SEED")
            .map(|v| parse_value("GRIMOIRE_SEED", &v))
            .transpose()?;
        let transport = lookup("GRIMOIRE_TRANSPORT")
            .map_or(Ok(TransportMode::Cli), |v| v.parse())?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port: u16 = parse_value("PORT", &lookup("PORT").unwrap_or_else(|| "3000".to_owned()))?;
        let listen_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;

        let defaults = EngineConfig::default();
        let engine = EngineConfig {
            max_cycles: lookup("GRIMOIRE_MAX_CYCLES")
                .map_or(Ok(defaults.max_cycles), |v| parse_value("GRIMOIRE_MAX_CYCLES", &v))?,
            max_conversation_steps: lookup("GRIMOIRE_MAX_STEPS").map_or(
                Ok(defaults.max_conversation_steps),
                |v| parse_value("GRIMOIRE_MAX_STEPS", &v),
            )?,
        };

        let chat = ChatConfig {
            model: required("MODEL")?,
            api_key: required("API_KEY")?,
            base_url: lookup("BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            temperature: lookup("TEMPERATURE")
                .map_or(Ok(0.0), |v| parse_value("TEMPERATURE", &v))?,
        };

        Ok(Self {
            script_path,
            players,
            role_counts,
            seed,
            transport,
            listen_addr,
            engine,
            chat,
        })
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{key} is invalid: {e}")))
}

/// Parses `townsfolk=N,outsider=N,minion=N,demon=N`. Teams may appear in
/// any order; omitted teams count zero.
///
/// # Errors
///
/// Returns `AppError::Config` for unknown teams, malformed pairs or
/// non-numeric counts.
pub fn parse_role_counts(value: &str) -> Result<RoleAllocation, AppError> {
    let mut counts = RoleAllocation::default();
    for pair in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (team, count) = pair.split_once('=').ok_or_else(|| {
            AppError::Config(format!("GRIMOIRE_ROLE_COUNTS entry {pair:?} is not team=count"))
        })?;
        let count: u32 = parse_value("GRIMOIRE_ROLE_COUNTS", count)?;
        match team.trim().to_ascii_lowercase().as_str() {
            "townsfolk" => counts.townsfolk = count,
            "outsider" | "outsiders" => counts.outsider = count,
            "minion" | "minions" => counts.minion = count,
            "demon" | "demons" => counts.demon = count,
            other => {
                return Err(AppError::Config(format!(
                    "GRIMOIRE_ROLE_COUNTS names unknown team {other:?}"
                )));
            }
        }
    }
    Ok(counts)
}
