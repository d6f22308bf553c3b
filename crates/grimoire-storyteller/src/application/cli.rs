//! Terminal transport: stdout for delivery, stdin for answers.

use async_trait::async_trait;
use grimoire_core::error::DomainError;
use grimoire_core::player::Seat;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;

use super::transport::Transport;

/// Reads answers line by line from stdin.
#[derive(Debug)]
pub struct CliTransport {
    stdin: Mutex<BufReader<Stdin>>,
}

impl CliTransport {
    /// Creates a transport over the process's stdin and stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdin: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }

    async fn write_line(line: &str) -> Result<(), DomainError> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("{line}\n").as_bytes())
            .await
            .map_err(|e| DomainError::Transport(format!("stdout write failed: {e}")))?;
        stdout
            .flush()
            .await
            .map_err(|e| DomainError::Transport(format!("stdout flush failed: {e}")))
    }
}

impl Default for CliTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for CliTransport {
    async fn send(&self, seat: Seat, text: &str) -> Result<(), DomainError> {
        Self::write_line(&format!("[to seat {seat}] {text}")).await
    }

    async fn broadcast(&self, text: &str) -> Result<(), DomainError> {
        Self::write_line(&format!("[table] {text}")).await
    }

    async fn ask(&self, seat: Option<Seat>, prompt: &str) -> Result<String, DomainError> {
        match seat {
            Some(seat) => Self::write_line(&format!("[ask seat {seat}] {prompt}")).await?,
            None => Self::write_line(&format!("[ask table] {prompt}")).await?,
        }
        Self::write_line("text> ").await?;

        let mut line = String::new();
        let read = self
            .stdin
            .lock()
            .await
            .read_line(&mut line)
            .await
            .map_err(|e| DomainError::Transport(format!("stdin read failed: {e}")))?;
        if read == 0 {
            return Err(DomainError::Transport("stdin closed".into()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }
}
