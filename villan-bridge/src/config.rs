//! Environment configuration
//!
//! All configuration comes from environment variables (a `.env` file is
//! honored). The register→printer mapping is parsed and validated at
//! startup so a typo in a net path fails the bootstrap instead of a
//! print job at midnight.

use std::collections::HashMap;
use thiserror::Error;
use villan_printer::{NetworkPrinter, PrintError};

use crate::zettle::{DEFAULT_AUTH_URL, DEFAULT_PURCHASE_URL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid REGISTERS entry (expected name=tcp://host:port): {0}")]
    InvalidRegisterEntry(String),

    #[error("Invalid printer net path for {name}: {source}")]
    InvalidPrinter {
        name: String,
        #[source]
        source: PrintError,
    },
}

/// Bridge configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | CLIENT_ID | (required) | Zettle API client id |
/// | ASSERT_TOKEN | (required) | JWT assertion for the token exchange |
/// | ORGANIZATION_UUID | self | Zettle organization |
/// | LOG_LEVEL | info | tracing level |
/// | FETCH_LIMIT | 10 | purchases fetched per cycle |
/// | REGISTERS | (required) | `name=tcp://host:port` pairs, comma separated |
/// | KITCHEN_PRINTER | (required) | net path of the fixed kitchen printer |
/// | AUTH_URL | Zettle OAuth endpoint | token exchange URL override |
/// | PURCHASE_URL | Zettle purchase API | purchase listing URL override |
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub assertion_token: String,
    pub organization_uuid: String,
    pub log_level: String,
    pub fetch_limit: u32,
    pub auth_url: String,
    pub purchase_url: String,
    /// Register name → printer net path
    pub registers: HashMap<String, String>,
    /// Net path of the fixed kitchen printer
    pub kitchen_printer: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let registers = parse_registers(&require_var("REGISTERS")?)?;
        let kitchen_printer = require_var("KITCHEN_PRINTER")?;

        let config = Self {
            client_id: require_var("CLIENT_ID")?,
            assertion_token: require_var("ASSERT_TOKEN")?,
            organization_uuid: std::env::var("ORGANIZATION_UUID")
                .unwrap_or_else(|_| "self".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            fetch_limit: std::env::var("FETCH_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            auth_url: std::env::var("AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.into()),
            purchase_url: std::env::var("PURCHASE_URL")
                .unwrap_or_else(|_| DEFAULT_PURCHASE_URL.into()),
            registers,
            kitchen_printer,
        };

        config.validate_printers()?;
        Ok(config)
    }

    /// Check every configured net path parses
    fn validate_printers(&self) -> Result<(), ConfigError> {
        for (name, path) in &self.registers {
            NetworkPrinter::from_net_path(path).map_err(|source| ConfigError::InvalidPrinter {
                name: name.clone(),
                source,
            })?;
        }
        NetworkPrinter::from_net_path(&self.kitchen_printer).map_err(|source| {
            ConfigError::InvalidPrinter {
                name: "kitchen".into(),
                source,
            }
        })?;
        Ok(())
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

/// Parse `Kassa 1=tcp://10.0.0.10:9100,Kassa 2=tcp://10.0.0.11:9100`
fn parse_registers(raw: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut registers = HashMap::new();

    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (name, path) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidRegisterEntry(entry.to_string()))?;

        let name = name.trim();
        let path = path.trim();
        if name.is_empty() || path.is_empty() {
            return Err(ConfigError::InvalidRegisterEntry(entry.to_string()));
        }

        registers.insert(name.to_string(), path.to_string());
    }

    if registers.is_empty() {
        return Err(ConfigError::MissingVar("REGISTERS"));
    }

    Ok(registers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registers() {
        let map =
            parse_registers("Kassa 1=tcp://10.0.0.10:9100, Kassa 2=tcp://10.0.0.11:9100").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["Kassa 1"], "tcp://10.0.0.10:9100");
        assert_eq!(map["Kassa 2"], "tcp://10.0.0.11:9100");
    }

    #[test]
    fn test_parse_registers_rejects_malformed() {
        assert!(parse_registers("Kassa 1").is_err());
        assert!(parse_registers("=tcp://10.0.0.10:9100").is_err());
        assert!(parse_registers("").is_err());
    }

    #[test]
    fn test_validate_printers_rejects_bad_path() {
        let mut registers = HashMap::new();
        registers.insert("Kassa 1".to_string(), "10.0.0.10:9100".to_string());

        let config = Config {
            client_id: "id".into(),
            assertion_token: "token".into(),
            organization_uuid: "self".into(),
            log_level: "info".into(),
            fetch_limit: 10,
            auth_url: DEFAULT_AUTH_URL.into(),
            purchase_url: DEFAULT_PURCHASE_URL.into(),
            registers,
            kitchen_printer: "tcp://10.0.0.20:9100".into(),
        };

        assert!(config.validate_printers().is_err());
    }
}
