//! Configuration for bulk order validation.

use crate::signing::{MAINNET_CHAIN_ID, SEAPORT_ADDRESS, SEAPORT_NAME, SEAPORT_VERSION};
use crate::{Error, Result};
use alloy_primitives::Address;
use serde::Deserialize;
use std::env;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub domain: DomainConfig,
    #[serde(default)]
    pub validator: ValidatorConfig,
}

/// EIP-712 domain the validator computes digests under.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainConfig {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            name: SEAPORT_NAME.to_string(),
            version: SEAPORT_VERSION.to_string(),
            chain_id: MAINNET_CHAIN_ID,
            verifying_contract: SEAPORT_ADDRESS.parse().unwrap_or(Address::ZERO),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ValidatorConfig {
    /// Signers the default allow-list policy accepts.
    #[serde(default)]
    pub authorized_signers: Vec<Address>,
}

impl Config {
    /// Load configuration from environment variables.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = DomainConfig::default();

        Ok(Self {
            domain: DomainConfig {
                name: env::var("SEAPORT_DOMAIN_NAME").unwrap_or(defaults.name),
                version: env::var("SEAPORT_DOMAIN_VERSION").unwrap_or(defaults.version),
                chain_id: match env::var("CHAIN_ID") {
                    Ok(raw) => raw.trim().parse().map_err(|_| Error::Config {
                        message: format!("CHAIN_ID is not a valid integer: {raw}"),
                    })?,
                    Err(_) => defaults.chain_id,
                },
                verifying_contract: match env::var("VERIFYING_CONTRACT") {
                    Ok(raw) => parse_address("VERIFYING_CONTRACT", &raw)?,
                    Err(_) => defaults.verifying_contract,
                },
            },
            validator: ValidatorConfig {
                authorized_signers: match env::var("AUTHORIZED_SIGNERS") {
                    Ok(raw) => parse_address_list("AUTHORIZED_SIGNERS", &raw)?,
                    Err(_) => Vec::new(),
                },
            },
        })
    }

    /// Load configuration from a file, overridden by `BULK__`-prefixed environment variables.
    ///
    /// Nested keys use a double underscore, e.g. `BULK__DOMAIN__CHAIN_ID=137`.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("domain.name", SEAPORT_NAME)?
            .set_default("domain.version", SEAPORT_VERSION)?
            .set_default("domain.chain_id", MAINNET_CHAIN_ID)?
            .set_default("domain.verifying_contract", SEAPORT_ADDRESS)?
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("BULK").prefix_separator("__").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration for testing (with defaults).
    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            domain: DomainConfig {
                chain_id: 31337,
                verifying_contract: Address::repeat_byte(0x5e),
                ..Default::default()
            },
            validator: ValidatorConfig::default(),
        }
    }
}

#[allow(clippy::result_large_err)]
fn parse_address(var: &str, raw: &str) -> Result<Address> {
    raw.trim().parse().map_err(|_| Error::Config {
        message: format!("{var} contains an invalid address: {raw}"),
    })
}

#[allow(clippy::result_large_err)]
fn parse_address_list(var: &str, raw: &str) -> Result<Vec<Address>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_address(var, s))
        .collect()
}
