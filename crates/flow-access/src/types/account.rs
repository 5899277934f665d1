//! Account addresses and account snapshots.

use std::collections::{BTreeMap, HashSet};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{base64::Base64, serde_as};

use super::{AccountPublicKey, FlowToken};
use crate::error::{Error, ParseAddressError};

/// Combined key weight needed to authorize a transaction for an account.
pub const ACCOUNT_KEY_WEIGHT_THRESHOLD: u32 = 1000;

/// An 8-byte account address.
///
/// Displayed as `0x` followed by 16 hex digits. Parsing accepts the `0x`
/// (or `0X`) prefix as optional and left-pads shorter input with zeros,
/// so `"0x1"` and `"0x0000000000000001"` are the same address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 8]);

impl Address {
    /// Length of an address in bytes.
    pub const LEN: usize = 8;

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Interpret the address as a big-endian integer.
    pub fn to_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self(value.to_be_bytes())
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() {
            return Err(ParseAddressError::Empty);
        }
        if digits.len() > Self::LEN * 2 {
            return Err(ParseAddressError::TooLong(s.to_string()));
        }

        let padded = format!("{:0>16}", digits);
        let mut bytes = [0u8; 8];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| ParseAddressError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Account snapshot as returned by the Access API.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account address.
    pub address: Address,
    /// FLOW balance.
    pub balance: FlowToken,
    /// Registered keys, including revoked ones.
    #[serde(default)]
    pub keys: Vec<AccountPublicKey>,
    /// Deployed contract code by contract name.
    #[serde_as(as = "BTreeMap<_, Base64>")]
    #[serde(default)]
    pub contracts: BTreeMap<String, Vec<u8>>,
}

impl Account {
    /// Look up a key by its index.
    pub fn key(&self, index: u32) -> Option<&AccountPublicKey> {
        self.keys.iter().find(|k| k.index == index)
    }

    /// Keys that are neither revoked nor zero-weight.
    pub fn active_keys(&self) -> impl Iterator<Item = &AccountPublicKey> {
        self.keys.iter().filter(|k| k.is_active())
    }

    /// Check that no key index appears twice.
    pub fn validate_keys(&self) -> Result<(), Error> {
        let mut seen = HashSet::with_capacity(self.keys.len());
        for key in &self.keys {
            if !seen.insert(key.index) {
                return Err(Error::DuplicateKeyIndex(key.index));
            }
        }
        Ok(())
    }

    /// Sum the weights of the listed keys.
    ///
    /// Each index counts once no matter how often it is listed. Revoked
    /// keys contribute nothing. An index the account does not have is an
    /// error.
    pub fn signing_weight(&self, key_indices: &[u32]) -> Result<u32, Error> {
        let mut seen = HashSet::with_capacity(key_indices.len());
        let mut total: u32 = 0;

        for &index in key_indices {
            if !seen.insert(index) {
                continue;
            }
            let key = self.key(index).ok_or(Error::KeyNotFound(index))?;
            if key.revoked {
                tracing::debug!(address = %self.address, index, "ignoring revoked key");
                continue;
            }
            total = total.saturating_add(key.weight);
        }

        Ok(total)
    }

    /// Check whether signatures from the listed keys authorize a
    /// transaction for this account.
    pub fn is_authorized(&self, key_indices: &[u32]) -> Result<bool, Error> {
        Ok(self.signing_weight(key_indices)? >= ACCOUNT_KEY_WEIGHT_THRESHOLD)
    }

    /// Get the deployed code of a contract, as UTF-8 source.
    pub fn contract_code(&self, name: &str) -> Option<Result<String, Error>> {
        self.contracts
            .get(name)
            .map(|code| String::from_utf8(code.clone()).map_err(Error::from))
    }
}
