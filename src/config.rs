//! Engine configuration.
//!
//! The symbol universe is fixed at construction; there is no runtime
//! add/remove of symbols.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default symbol universe of the simulated exchange
pub const DEFAULT_SYMBOLS: [&str; 4] = ["AAPL", "GOOGL", "MSFT", "AMZN"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tradable symbols, one book each
    pub symbols: Vec<String>,

    /// Pre-allocated order slots per book side
    pub order_capacity: usize,

    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            order_capacity: 10_000,
            log_filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: EngineConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_symbols(&self.symbols)
    }
}

/// Non-empty, no blank entries, no duplicates
pub fn validate_symbols(symbols: &[String]) -> Result<(), ConfigError> {
    if symbols.is_empty() {
        return Err(ConfigError::NoSymbols);
    }

    let mut seen = HashSet::with_capacity(symbols.len());
    for symbol in symbols {
        if symbol.trim().is_empty() {
            return Err(ConfigError::BlankSymbol);
        }
        if !seen.insert(symbol.as_str()) {
            return Err(ConfigError::DuplicateSymbol(symbol.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.symbols, vec!["AAPL", "GOOGL", "MSFT", "AMZN"]);
        assert_eq!(config.order_capacity, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{"symbols": ["TSLA", "NVDA"]}"#).unwrap();

        assert_eq!(config.symbols, vec!["TSLA", "NVDA"]);
        assert_eq!(config.order_capacity, 10_000);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_invalid_symbol_sets() {
        assert!(matches!(
            EngineConfig::from_json(r#"{"symbols": []}"#),
            Err(ConfigError::NoSymbols)
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"symbols": ["AAPL", " "]}"#),
            Err(ConfigError::BlankSymbol)
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"symbols": ["AAPL", "AAPL"]}"#),
            Err(ConfigError::DuplicateSymbol(s)) if s == "AAPL"
        ));
        assert!(matches!(
            EngineConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("engine-config-{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        writeln!(file, r#"{{"symbols": ["AAPL"], "order_capacity": 16}}"#).unwrap();

        let config = EngineConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.symbols, vec!["AAPL"]);
        assert_eq!(config.order_capacity, 16);

        assert!(matches!(
            EngineConfig::load("/nonexistent/engine.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
