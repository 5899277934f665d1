//! Signing and hashing algorithm identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::Digest as _;

use crate::error::{Error, ParseAlgorithmError};

/// Signature scheme an account key is registered with.
///
/// The Access API schema spells these `BLSBLS12381`, `ECDSAP256` and
/// `ECDSASecp256k1`. Nodes built on the crypto library sometimes emit the
/// library's own names (`ECDSA_P256`, ...); both forms are accepted when
/// decoding, and the schema form is always emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SigningAlgorithm {
    /// BLS signatures on the BLS12-381 curve.
    #[serde(rename = "BLSBLS12381", alias = "BLS_BLS12_381")]
    BlsBls12381,
    /// ECDSA on NIST P-256.
    #[serde(rename = "ECDSAP256", alias = "ECDSA_P256")]
    EcdsaP256,
    /// ECDSA on secp256k1.
    #[serde(rename = "ECDSASecp256k1", alias = "ECDSA_secp256k1")]
    EcdsaSecp256k1,
}

impl SigningAlgorithm {
    /// All known signing algorithms.
    pub const ALL: [SigningAlgorithm; 3] = [
        SigningAlgorithm::BlsBls12381,
        SigningAlgorithm::EcdsaP256,
        SigningAlgorithm::EcdsaSecp256k1,
    ];

    /// Get the wire name of this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningAlgorithm::BlsBls12381 => "BLSBLS12381",
            SigningAlgorithm::EcdsaP256 => "ECDSAP256",
            SigningAlgorithm::EcdsaSecp256k1 => "ECDSASecp256k1",
        }
    }

    /// Get the expected raw public key length in bytes.
    ///
    /// ECDSA keys are the uncompressed `X || Y` coordinates without the
    /// SEC1 `0x04` tag.
    pub fn public_key_len(&self) -> usize {
        match self {
            SigningAlgorithm::BlsBls12381 => 96,
            SigningAlgorithm::EcdsaP256 | SigningAlgorithm::EcdsaSecp256k1 => 64,
        }
    }

    /// Get the expected signature length in bytes.
    pub fn signature_len(&self) -> usize {
        match self {
            SigningAlgorithm::BlsBls12381 => 48,
            SigningAlgorithm::EcdsaP256 | SigningAlgorithm::EcdsaSecp256k1 => 64,
        }
    }

    /// Returns true if this is one of the ECDSA variants.
    pub fn is_ecdsa(&self) -> bool {
        matches!(
            self,
            SigningAlgorithm::EcdsaP256 | SigningAlgorithm::EcdsaSecp256k1
        )
    }

    /// Check whether an account key may pair this scheme with `hashing`.
    ///
    /// ECDSA keys hash with SHA2-256 or SHA3-256; BLS keys use KMAC128.
    pub fn is_compatible_with(&self, hashing: HashingAlgorithm) -> bool {
        match self {
            SigningAlgorithm::BlsBls12381 => hashing == HashingAlgorithm::Kmac128,
            SigningAlgorithm::EcdsaP256 | SigningAlgorithm::EcdsaSecp256k1 => matches!(
                hashing,
                HashingAlgorithm::Sha2_256 | HashingAlgorithm::Sha3_256
            ),
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SigningAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BLSBLS12381" | "BLS_BLS12_381" => Ok(SigningAlgorithm::BlsBls12381),
            "ECDSAP256" | "ECDSA_P256" => Ok(SigningAlgorithm::EcdsaP256),
            "ECDSASecp256k1" | "ECDSA_secp256k1" => Ok(SigningAlgorithm::EcdsaSecp256k1),
            other => Err(ParseAlgorithmError::UnknownSigning(other.to_string())),
        }
    }
}

/// Hash function an account key signs message digests with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashingAlgorithm {
    #[serde(rename = "SHA2_256")]
    Sha2_256,
    #[serde(rename = "SHA2_384")]
    Sha2_384,
    #[serde(rename = "SHA3_256")]
    Sha3_256,
    #[serde(rename = "SHA3_384")]
    Sha3_384,
    /// Keyed hash used by BLS keys.
    #[serde(rename = "KMAC128")]
    Kmac128,
}

impl HashingAlgorithm {
    /// All known hashing algorithms.
    pub const ALL: [HashingAlgorithm; 5] = [
        HashingAlgorithm::Sha2_256,
        HashingAlgorithm::Sha2_384,
        HashingAlgorithm::Sha3_256,
        HashingAlgorithm::Sha3_384,
        HashingAlgorithm::Kmac128,
    ];

    /// Get the wire name of this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashingAlgorithm::Sha2_256 => "SHA2_256",
            HashingAlgorithm::Sha2_384 => "SHA2_384",
            HashingAlgorithm::Sha3_256 => "SHA3_256",
            HashingAlgorithm::Sha3_384 => "SHA3_384",
            HashingAlgorithm::Kmac128 => "KMAC128",
        }
    }

    /// Get the digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            HashingAlgorithm::Sha2_256 | HashingAlgorithm::Sha3_256 => 32,
            HashingAlgorithm::Sha2_384 | HashingAlgorithm::Sha3_384 => 48,
            HashingAlgorithm::Kmac128 => 128,
        }
    }

    /// Hash `data` with this algorithm.
    ///
    /// KMAC128 is a keyed construction and is not available here; it
    /// returns [`Error::UnsupportedHashingAlgorithm`].
    pub fn digest(&self, data: &[u8]) -> Result<Vec<u8>, Error> {
        let out = match self {
            HashingAlgorithm::Sha2_256 => sha2::Sha256::digest(data).to_vec(),
            HashingAlgorithm::Sha2_384 => sha2::Sha384::digest(data).to_vec(),
            HashingAlgorithm::Sha3_256 => sha3::Sha3_256::digest(data).to_vec(),
            HashingAlgorithm::Sha3_384 => sha3::Sha3_384::digest(data).to_vec(),
            HashingAlgorithm::Kmac128 => {
                tracing::debug!("refusing unkeyed KMAC128 digest");
                return Err(Error::UnsupportedHashingAlgorithm(*self));
            }
        };
        Ok(out)
    }
}

impl fmt::Display for HashingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashingAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashingAlgorithm::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| ParseAlgorithmError::UnknownHashing(s.to_string()))
    }
}
