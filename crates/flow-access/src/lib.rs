//! Typed models for the Flow Access API.
//!
//! **flow-access** provides the data types exchanged with a Flow Access
//! node: accounts and their keys, transactions, transaction results and
//! block headers, with exact JSON wire names and a few pure helpers on
//! top. It performs no I/O; bring your own HTTP client and decode
//! responses with `serde_json`.
//!
//! # Quick Start
//!
//! ```
//! use flow_access::*;
//!
//! let json = r#"{
//!     "block_id": "7bc42fe85d32ca513769a74f97f7e1a7bad6c9407f0d934c2aa645ef9cf613c7",
//!     "status": "Sealed",
//!     "status_code": 0,
//!     "error_message": "",
//!     "computation_used": 12,
//!     "events": []
//! }"#;
//!
//! let result: TransactionResult = serde_json::from_str(json)?;
//! assert_eq!(result.status, TransactionStatus::Sealed);
//! assert!(result.is_success());
//! # Ok::<(), flow_access::Error>(())
//! ```
//!
//! # Core Types
//!
//! - [`AccountPublicKey`] - One key registered on an account
//! - [`TransactionStatus`] - Lifecycle state of a submitted transaction
//! - [`Account`], [`Address`] - Account snapshot and 8-byte address
//! - [`SigningAlgorithm`], [`HashingAlgorithm`] - Key algorithms
//! - [`Identifier`] - 32-byte block/transaction id
//! - [`FlowToken`] - UFix64 FLOW amount
//!
//! # Multi-signature weights
//!
//! ```
//! use flow_access::*;
//!
//! # fn account() -> Account {
//! #     serde_json::from_str(r#"{"address":"0x01","balance":"0","keys":[
//! #         {"index":0,"public_key":"0x00","signing_algorithm":"ECDSAP256",
//! #          "hashing_algorithm":"SHA3_256","sequence_number":0,"weight":500,"revoked":false},
//! #         {"index":1,"public_key":"0x01","signing_algorithm":"ECDSAP256",
//! #          "hashing_algorithm":"SHA3_256","sequence_number":0,"weight":500,"revoked":false}
//! #     ]}"#).unwrap()
//! # }
//! let account = account();
//! assert!(!account.is_authorized(&[0])?);
//! assert!(account.is_authorized(&[0, 1])?);
//! # Ok::<(), flow_access::Error>(())
//! ```

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{
    Error, KeyTransitionError, KeyValidationError, ParseAddressError, ParseAlgorithmError,
    ParseAmountError, ParseIdentifierError, ParseKeyError, ParseNetworkError, ParseStatusError,
};
pub use types::*;
