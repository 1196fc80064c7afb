//! Printer adapters for sending ESC/POS data
//!
//! Supports network printers addressed by a net path of the form
//! `tcp://<host>:<port>` (most thermal printers listen on port 9100).

use crate::error::{PrintError, PrintResult};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

/// Network printer (raw TCP)
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    host: String,
    port: u16,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a new network printer
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            timeout: Duration::from_secs(5),
        }
    }

    /// Create from a net path string (e.g., "tcp://192.168.1.100:9100")
    pub fn from_net_path(path: &str) -> PrintResult<Self> {
        let rest = path.strip_prefix("tcp://").ok_or_else(|| {
            PrintError::InvalidConfig(format!("Expected tcp://<host>:<port>, got: {}", path))
        })?;

        let (host, port) = rest
            .rsplit_once(':')
            .ok_or_else(|| PrintError::InvalidConfig(format!("Missing port in net path: {}", path)))?;

        if host.is_empty() {
            return Err(PrintError::InvalidConfig(format!(
                "Missing host in net path: {}",
                path
            )));
        }

        let port: u16 = port
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid port in net path: {}", path)))?;

        Ok(Self::new(host, port))
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the printer endpoint as "host:port"
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(data), fields(endpoint = %self.endpoint(), data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Connecting to printer");

        let connect = TcpStream::connect((self.host.as_str(), self.port));
        let mut stream = tokio::time::timeout(self.timeout, connect)
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.endpoint())))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.endpoint(), e)))?;

        info!("Connected, sending {} bytes", data.len());

        stream.write_all(data).await?;
        stream.flush().await?;
        stream.shutdown().await?;

        info!("Print job sent successfully");
        Ok(())
    }

    #[instrument(fields(endpoint = %self.endpoint()))]
    async fn is_online(&self) -> bool {
        let check_timeout = Duration::from_millis(500);
        let connect = TcpStream::connect((self.host.as_str(), self.port));

        match tokio::time::timeout(check_timeout, connect).await {
            Ok(Ok(_)) => {
                info!("Printer online");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Printer offline");
                false
            }
            Err(_) => {
                warn!("Printer check timeout");
                false
            }
        }
    }
}
