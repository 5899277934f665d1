//! Network identification for the Flow Access API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseNetworkError;

/// The Flow network an Access API serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Flow mainnet (production network).
    #[default]
    Mainnet,
    /// Flow testnet (testing network).
    Testnet,
    /// Local emulator for development.
    Emulator,
    /// Any other deployment.
    Custom,
}

impl Network {
    /// Returns true if this is mainnet.
    pub fn is_mainnet(&self) -> bool {
        matches!(self, Network::Mainnet)
    }

    /// Returns true if this is testnet.
    pub fn is_testnet(&self) -> bool {
        matches!(self, Network::Testnet)
    }

    /// Returns true if this is the local emulator.
    pub fn is_emulator(&self) -> bool {
        matches!(self, Network::Emulator)
    }

    /// Returns the network identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Emulator => "emulator",
            Network::Custom => "custom",
        }
    }

    /// Base URL of the public REST Access API, if the network has one.
    pub fn rest_endpoint(&self) -> Option<&'static str> {
        match self {
            Network::Mainnet => Some("https://rest-mainnet.onflow.org/v1"),
            Network::Testnet => Some("https://rest-testnet.onflow.org/v1"),
            Network::Emulator => Some("http://127.0.0.1:8888/v1"),
            Network::Custom => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "emulator" | "local" => Ok(Network::Emulator),
            "custom" => Ok(Network::Custom),
            _ => Err(ParseNetworkError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_display() {
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
        assert_eq!(Network::Testnet.to_string(), "testnet");
        assert_eq!(Network::Emulator.to_string(), "emulator");
        assert_eq!(Network::Custom.to_string(), "custom");
    }

    #[test]
    fn test_network_predicates() {
        assert!(Network::Mainnet.is_mainnet());
        assert!(!Network::Mainnet.is_testnet());

        assert!(Network::Testnet.is_testnet());
        assert!(!Network::Testnet.is_mainnet());

        assert!(Network::Emulator.is_emulator());
    }

    #[test]
    fn test_default_is_mainnet() {
        assert_eq!(Network::default(), Network::Mainnet);
    }

    #[test]
    fn test_rest_endpoints() {
        assert_eq!(
            Network::Testnet.rest_endpoint(),
            Some("https://rest-testnet.onflow.org/v1")
        );
        assert!(Network::Emulator.rest_endpoint().unwrap().starts_with("http://"));
        assert_eq!(Network::Custom.rest_endpoint(), None);
    }

    #[test]
    fn test_network_parse() {
        assert_eq!("Testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("local".parse::<Network>().unwrap(), Network::Emulator);
        assert_eq!(
            "previewnet".parse::<Network>(),
            Err(ParseNetworkError::Unknown("previewnet".to_string()))
        );
    }

    #[test]
    fn test_network_serde() {
        assert_eq!(
            serde_json::to_string(&Network::Emulator).unwrap(),
            "\"emulator\""
        );
        let parsed: Network = serde_json::from_str("\"mainnet\"").unwrap();
        assert_eq!(parsed, Network::Mainnet);
    }
}
