//! Error types for flow-access.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error) - Main error type, returned by most operations
//!   - [`ParseAddressError`] - Invalid account address
//!   - [`ParseIdentifierError`] - Invalid block/transaction identifier
//!   - [`ParseKeyError`] - Invalid public key material
//!   - [`ParseAlgorithmError`] - Unknown signing or hashing algorithm
//!   - [`ParseStatusError`] - Unknown transaction status
//!   - [`ParseAmountError`] - Invalid FLOW amount
//!   - [`ParseNetworkError`] - Unknown network name
//!   - [`KeyValidationError`] - Key entry not usable for signing
//!   - [`KeyTransitionError`] - Two key snapshots that cannot follow each other
//!
//! # Example
//!
//! ```
//! use flow_access::{Error, ParseStatusError, TransactionStatus};
//!
//! let err: Error = "Unknown".parse::<TransactionStatus>().unwrap_err().into();
//! assert!(matches!(err, Error::ParseStatus(ParseStatusError::Unknown(_))));
//! ```

use thiserror::Error;

use crate::types::{HashingAlgorithm, SigningAlgorithm, TransactionStatus};

/// Error parsing an account address.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseAddressError {
    #[error("Address is empty")]
    Empty,

    #[error("Address '{0}' is too long (max 16 hex characters)")]
    TooLong(String),

    #[error("Invalid hex in address: {0}")]
    InvalidHex(String),
}

/// Error parsing a 32-byte identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseIdentifierError {
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("Invalid identifier length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Error parsing or checking public key material.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseKeyError {
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("Invalid key length for {algorithm}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        algorithm: SigningAlgorithm,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid curve point: key bytes do not represent a valid point on the curve")]
    InvalidCurvePoint,
}

/// Error parsing a signing or hashing algorithm name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseAlgorithmError {
    #[error("Unknown signing algorithm: '{0}'")]
    UnknownSigning(String),

    #[error("Unknown hashing algorithm: '{0}'")]
    UnknownHashing(String),
}

/// Error parsing a transaction status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseStatusError {
    #[error("Unknown transaction status: '{0}'")]
    Unknown(String),
}

/// Error parsing a network name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseNetworkError {
    #[error("Unknown network: '{0}'")]
    Unknown(String),
}

/// Error parsing a FLOW amount.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("Ambiguous amount '{0}'. Use explicit units like '1.5 FLOW'")]
    AmbiguousAmount(String),

    #[error("Invalid amount format: '{0}'")]
    InvalidFormat(String),

    #[error("Invalid number in amount: '{0}'")]
    InvalidNumber(String),

    #[error("Too many decimal places in '{0}' (max 8)")]
    TooPrecise(String),

    #[error("Amount overflow: value too large")]
    Overflow,
}

/// An account key entry that cannot be used to authorize transactions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyValidationError {
    #[error("Key {0} has no signing algorithm")]
    MissingSigningAlgorithm(u32),

    #[error("Key {0} has no hashing algorithm")]
    MissingHashingAlgorithm(u32),

    #[error("Key {index}: {signing} cannot be paired with {hashing}")]
    IncompatibleAlgorithms {
        index: u32,
        signing: SigningAlgorithm,
        hashing: HashingAlgorithm,
    },

    #[error("Key {index} weight {weight} exceeds the maximum of {max}")]
    WeightOutOfRange { index: u32, weight: u32, max: u32 },

    #[error("Key {0} is revoked")]
    Revoked(u32),

    #[error("Key {index}: {source}")]
    InvalidKey {
        index: u32,
        #[source]
        source: ParseKeyError,
    },
}

/// Two snapshots of an account key that cannot be consecutive states of
/// the same key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyTransitionError {
    #[error("Key index changed from {previous} to {next}")]
    IndexChanged { previous: u32, next: u32 },

    #[error("Key material changed for key {0}")]
    KeyChanged(u32),

    #[error("Key {0} was revoked and cannot be reinstated")]
    Unrevoked(u32),

    #[error("Sequence number of key {index} went backwards: {previous} -> {next}")]
    SequenceRegressed { index: u32, previous: u64, next: u64 },
}

// ============================================================================
// Main Error Type
// ============================================================================

/// Main error type for flow-access operations.
#[derive(Debug, Error)]
pub enum Error {
    // ─── Parsing ───
    #[error(transparent)]
    ParseAddress(#[from] ParseAddressError),

    #[error(transparent)]
    ParseIdentifier(#[from] ParseIdentifierError),

    #[error(transparent)]
    ParseKey(#[from] ParseKeyError),

    #[error(transparent)]
    ParseAlgorithm(#[from] ParseAlgorithmError),

    #[error(transparent)]
    ParseStatus(#[from] ParseStatusError),

    #[error(transparent)]
    ParseAmount(#[from] ParseAmountError),

    #[error(transparent)]
    ParseNetwork(#[from] ParseNetworkError),

    // ─── Keys ───
    #[error(transparent)]
    KeyValidation(#[from] KeyValidationError),

    #[error(transparent)]
    KeyTransition(#[from] KeyTransitionError),

    #[error("Account has no key with index {0}")]
    KeyNotFound(u32),

    #[error("Account lists key index {0} more than once")]
    DuplicateKeyIndex(u32),

    // ─── Transactions ───
    #[error("Transaction status cannot move from {from} to {to}")]
    InvalidStatusTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    #[error("Transaction has no argument at position {0}")]
    ArgumentOutOfRange(usize),

    // ─── Hashing ───
    #[error("Hashing algorithm {0} cannot be used without a key")]
    UnsupportedHashingAlgorithm(HashingAlgorithm),

    // ─── Encoding ───
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
