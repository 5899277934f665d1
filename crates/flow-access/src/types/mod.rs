//! Core types for the Flow Access API.
//!
//! This module provides hand-written types mirroring the Access API
//! schema, designed for ergonomic use in client applications.

mod account;
mod algorithm;
mod block;
mod hash;
mod key;
mod network;
mod transaction;
mod units;

pub use account::{ACCOUNT_KEY_WEIGHT_THRESHOLD, Account, Address};
pub use algorithm::{HashingAlgorithm, SigningAlgorithm};
pub use block::BlockHeader;
pub use hash::Identifier;
pub use key::{AccountPublicKey, MAX_KEY_WEIGHT, PublicKey};
pub use network::Network;
pub use transaction::{
    Event, ProposalKey, Transaction, TransactionResult, TransactionSignature, TransactionStatus,
};
pub use units::FlowToken;
