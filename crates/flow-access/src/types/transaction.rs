//! Transaction, transaction status and transaction result types.

use std::fmt;
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, hex::Hex, serde_as};

use super::{AccountPublicKey, Address, Identifier};
use crate::error::{Error, KeyValidationError, ParseStatusError};

// ============================================================================
// Status
// ============================================================================

/// Lifecycle state of a submitted transaction, as known to the Access API
/// at query time.
///
/// The normal path is `Pending → Finalized → Executed → Sealed`. A
/// transaction that is not included in a block before its reference block
/// falls out of the expiry window ends in `Expired` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Submitted, not yet in a finalized block.
    Pending,
    /// Included in a finalized block.
    Finalized,
    /// Executed by execution nodes.
    Executed,
    /// Execution result sealed on chain.
    Sealed,
    /// Never included before the expiry window closed.
    Expired,
}

impl TransactionStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [TransactionStatus; 5] = [
        TransactionStatus::Pending,
        TransactionStatus::Finalized,
        TransactionStatus::Executed,
        TransactionStatus::Sealed,
        TransactionStatus::Expired,
    ];

    /// Get the wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Finalized => "Finalized",
            TransactionStatus::Executed => "Executed",
            TransactionStatus::Sealed => "Sealed",
            TransactionStatus::Expired => "Expired",
        }
    }

    /// Returns true if no further status change can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Sealed | TransactionStatus::Expired)
    }

    /// Returns true once execution results are available.
    pub fn is_executed(&self) -> bool {
        matches!(self, TransactionStatus::Executed | TransactionStatus::Sealed)
    }

    /// Position on the main path, `None` for `Expired`.
    fn stage(&self) -> Option<u8> {
        match self {
            TransactionStatus::Pending => Some(0),
            TransactionStatus::Finalized => Some(1),
            TransactionStatus::Executed => Some(2),
            TransactionStatus::Sealed => Some(3),
            TransactionStatus::Expired => None,
        }
    }

    /// Check whether a later observation may report `next` after `self`.
    ///
    /// Statuses only move forward along the main path. `Expired` is only
    /// reachable from `Pending`. Repeating the same status is allowed.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        if *self == next {
            return true;
        }
        match (self.stage(), next.stage()) {
            (Some(from), Some(to)) => to > from,
            (Some(_), None) => *self == TransactionStatus::Pending,
            (None, _) => false,
        }
    }

    /// Return `next` if it can follow `self`.
    pub fn advance(self, next: TransactionStatus) -> Result<TransactionStatus, Error> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            tracing::debug!(from = %self, to = %next, "rejected status regression");
            Err(Error::InvalidStatusTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError::Unknown(s.to_string()))
    }
}

// ============================================================================
// Events and results
// ============================================================================

/// An event emitted while executing a transaction.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Fully qualified event type, e.g. `A.0ae53cb6e3f42a79.FlowToken.TokensDeposited`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Transaction that emitted the event.
    pub transaction_id: Identifier,
    /// Position of the transaction in its block.
    pub transaction_index: u32,
    /// Position of the event within the transaction.
    pub event_index: u32,
    /// JSON-Cadence encoded payload.
    #[serde_as(as = "Base64")]
    pub payload: Vec<u8>,
}

impl Event {
    /// Decode the payload as JSON.
    pub fn payload_json<T: serde::de::DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_slice(&self.payload)?)
    }

    /// Get the payload in its wire form (standard base64).
    pub fn payload_base64(&self) -> String {
        STANDARD.encode(&self.payload)
    }
}

/// Outcome of a transaction, as reported by the Access API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    /// Block the transaction was included in.
    pub block_id: Identifier,
    /// Current status.
    pub status: TransactionStatus,
    /// Non-zero when execution failed.
    #[serde(default)]
    pub status_code: u32,
    /// Execution error, empty on success.
    #[serde(default)]
    pub error_message: String,
    /// Computation units consumed.
    #[serde(default)]
    pub computation_used: u64,
    /// Events emitted during execution.
    #[serde(default)]
    pub events: Vec<Event>,
}

impl TransactionResult {
    /// Returns true if the result is sealed.
    pub fn is_sealed(&self) -> bool {
        self.status == TransactionStatus::Sealed
    }

    /// Returns true if the transaction expired.
    pub fn is_expired(&self) -> bool {
        self.status == TransactionStatus::Expired
    }

    /// Returns true if execution reported an error.
    pub fn is_failure(&self) -> bool {
        self.status_code != 0 || !self.error_message.is_empty()
    }

    /// Returns true if the transaction is sealed without an error.
    pub fn is_success(&self) -> bool {
        self.is_sealed() && !self.is_failure()
    }

    /// Events whose type matches `event_type` exactly.
    pub fn events_of_type<'a>(&'a self, event_type: &'a str) -> impl Iterator<Item = &'a Event> {
        self.events.iter().filter(move |e| e.event_type == event_type)
    }
}

// ============================================================================
// Transaction body
// ============================================================================

/// The key that proposes a transaction and whose sequence number it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalKey {
    /// Account owning the key.
    pub address: Address,
    /// Index of the key on that account.
    pub key_index: u32,
    /// Expected current sequence number of the key.
    pub sequence_number: u64,
}

impl ProposalKey {
    /// Build a proposal key from an account key snapshot.
    ///
    /// Revoked keys cannot propose.
    pub fn for_key(address: Address, key: &AccountPublicKey) -> Result<Self, KeyValidationError> {
        if key.revoked {
            return Err(KeyValidationError::Revoked(key.index));
        }
        Ok(Self {
            address,
            key_index: key.index,
            sequence_number: key.sequence_number,
        })
    }
}

/// A signature over a transaction payload or envelope.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSignature {
    /// Signing account.
    pub address: Address,
    /// Index of the signing key on that account.
    pub key_index: u32,
    /// Raw signature bytes.
    #[serde_as(as = "Hex")]
    pub signature: Vec<u8>,
}

/// A transaction as returned by the Access API.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction identifier.
    pub id: Identifier,
    /// Cadence script source.
    #[serde_as(as = "Base64")]
    pub script: Vec<u8>,
    /// JSON-Cadence encoded arguments.
    #[serde_as(as = "Vec<Base64>")]
    #[serde(default)]
    pub arguments: Vec<Vec<u8>>,
    /// Block the transaction's expiry window is measured from.
    pub reference_block_id: Identifier,
    /// Maximum computation the transaction may use.
    pub gas_limit: u64,
    /// Account paying the fees.
    pub payer: Address,
    /// Proposal key.
    pub proposal_key: ProposalKey,
    /// Accounts authorizing the transaction.
    #[serde(default)]
    pub authorizers: Vec<Address>,
    /// Signatures over the payload.
    #[serde(default)]
    pub payload_signatures: Vec<TransactionSignature>,
    /// Signatures over the envelope.
    #[serde(default)]
    pub envelope_signatures: Vec<TransactionSignature>,
}

impl Transaction {
    /// Get the script as UTF-8 source.
    pub fn script_source(&self) -> Result<String, Error> {
        Ok(String::from_utf8(self.script.clone())?)
    }

    /// Get the script in its wire form (standard base64).
    pub fn script_base64(&self) -> String {
        STANDARD.encode(&self.script)
    }

    /// Decode the argument at `position` as JSON.
    pub fn argument_json<T: serde::de::DeserializeOwned>(
        &self,
        position: usize,
    ) -> Result<T, Error> {
        let raw = self
            .arguments
            .get(position)
            .ok_or(Error::ArgumentOutOfRange(position))?;
        Ok(serde_json::from_slice(raw)?)
    }

    /// Every account that must sign: proposer, authorizers, then payer,
    /// each listed once.
    pub fn signers(&self) -> Vec<Address> {
        let mut signers = Vec::with_capacity(self.authorizers.len() + 2);
        let candidates = std::iter::once(self.proposal_key.address)
            .chain(self.authorizers.iter().copied())
            .chain(std::iter::once(self.payer));
        for address in candidates {
            if !signers.contains(&address) {
                signers.push(address);
            }
        }
        signers
    }
}
