use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct AdapterConfig {
    pub tpmn: ExchangeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// Destination endpoint the outgoing wire request is addressed to.
    pub endpoint: String,
}

impl AdapterConfig {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: AdapterConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }
}

impl ExchangeConfig {
    /// Load the endpoint from the environment, for deployments that configure
    /// the adapter without a config file.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Ok(Self {
            endpoint: std::env::var("TPMN_ENDPOINT").context("TPMN_ENDPOINT not set")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_endpoint_from_toml() {
        let config: AdapterConfig = toml::from_str(
            r#"
            [tpmn]
            endpoint = "https://ad.exchange.example/rtb"
            "#,
        )
        .unwrap();

        assert_eq!(config.tpmn.endpoint, "https://ad.exchange.example/rtb");
    }
}
