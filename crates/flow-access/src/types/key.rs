//! Account public keys.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{HashingAlgorithm, SigningAlgorithm};
use crate::error::{KeyTransitionError, KeyValidationError, ParseKeyError};

/// Maximum weight a single account key can carry.
pub const MAX_KEY_WEIGHT: u32 = 1000;

/// Raw public key material, hex encoded on the wire.
///
/// The bytes are kept as sent by the Access API. Use
/// [`validate_for`](Self::validate_for) to check them against the
/// signing algorithm registered with the key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey(Vec<u8>);

impl PublicKey {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Get the length of the key material in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no key material is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that this key is well-formed for `algorithm`.
    ///
    /// All algorithms get a length check. Secp256k1 keys are additionally
    /// checked to lie on the curve.
    pub fn validate_for(&self, algorithm: SigningAlgorithm) -> Result<(), ParseKeyError> {
        let expected = algorithm.public_key_len();
        if self.0.len() != expected {
            return Err(ParseKeyError::InvalidLength {
                algorithm,
                expected,
                actual: self.0.len(),
            });
        }

        if algorithm == SigningAlgorithm::EcdsaSecp256k1 {
            let mut sec1 = Vec::with_capacity(expected + 1);
            sec1.push(0x04);
            sec1.extend_from_slice(&self.0);
            k256::PublicKey::from_sec1_bytes(&sec1)
                .map_err(|_| ParseKeyError::InvalidCurvePoint)?;
        }

        Ok(())
    }
}

impl FromStr for PublicKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        hex::decode(digits)
            .map(Self)
            .map_err(|e| ParseKeyError::InvalidHex(e.to_string()))
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One public key registered on an account.
///
/// Values are snapshots decoded from Access API responses. The JSON shape
/// is exactly seven keys:
///
/// ```
/// use flow_access::{AccountPublicKey, SigningAlgorithm};
///
/// let key: AccountPublicKey = serde_json::from_str(r#"{
///     "index": 0,
///     "public_key": "0x0102",
///     "signing_algorithm": "ECDSAP256",
///     "hashing_algorithm": null,
///     "sequence_number": 12,
///     "weight": 1000,
///     "revoked": false
/// }"#).unwrap();
///
/// assert_eq!(key.signing_algorithm, Some(SigningAlgorithm::EcdsaP256));
/// assert_eq!(key.hashing_algorithm, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPublicKey {
    /// Position of this key in the account's key list.
    pub index: u32,
    /// Public key material.
    pub public_key: PublicKey,
    /// Signature scheme, if the server reported one.
    pub signing_algorithm: Option<SigningAlgorithm>,
    /// Hash function, if the server reported one.
    pub hashing_algorithm: Option<HashingAlgorithm>,
    /// Replay-protection counter for transactions proposed with this key.
    pub sequence_number: u64,
    /// Contribution toward the account's signing threshold.
    pub weight: u32,
    /// Whether the key has been revoked. Revocation is permanent.
    pub revoked: bool,
}

impl AccountPublicKey {
    /// Returns true if the key has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked
    }

    /// Returns true if the key can contribute to a signature.
    pub fn is_active(&self) -> bool {
        !self.revoked && self.weight > 0
    }

    /// Check that this key can be used to sign transactions.
    ///
    /// Requires both algorithms, a compatible pairing, key material of the
    /// right shape, a weight within range, and a non-revoked key.
    pub fn validate(&self) -> Result<(), KeyValidationError> {
        let index = self.index;
        if self.revoked {
            return Err(KeyValidationError::Revoked(index));
        }
        let signing = self
            .signing_algorithm
            .ok_or(KeyValidationError::MissingSigningAlgorithm(index))?;
        let hashing = self
            .hashing_algorithm
            .ok_or(KeyValidationError::MissingHashingAlgorithm(index))?;

        if !signing.is_compatible_with(hashing) {
            return Err(KeyValidationError::IncompatibleAlgorithms {
                index,
                signing,
                hashing,
            });
        }
        if self.weight > MAX_KEY_WEIGHT {
            return Err(KeyValidationError::WeightOutOfRange {
                index,
                weight: self.weight,
                max: MAX_KEY_WEIGHT,
            });
        }
        self.public_key
            .validate_for(signing)
            .map_err(|source| KeyValidationError::InvalidKey { index, source })
    }

    /// Check that `next` can be a later snapshot of this same key.
    ///
    /// The index and key material must match, revocation never reverts and
    /// the sequence number never goes backwards.
    pub fn check_successor(&self, next: &AccountPublicKey) -> Result<(), KeyTransitionError> {
        match self.transition_error(next) {
            None => Ok(()),
            Some(err) => {
                tracing::debug!(index = self.index, error = %err, "rejected key snapshot");
                Err(err)
            }
        }
    }

    fn transition_error(&self, next: &AccountPublicKey) -> Option<KeyTransitionError> {
        if self.index != next.index {
            return Some(KeyTransitionError::IndexChanged {
                previous: self.index,
                next: next.index,
            });
        }
        if self.public_key != next.public_key {
            return Some(KeyTransitionError::KeyChanged(self.index));
        }
        if self.revoked && !next.revoked {
            return Some(KeyTransitionError::Unrevoked(self.index));
        }
        if next.sequence_number < self.sequence_number {
            return Some(KeyTransitionError::SequenceRegressed {
                index: self.index,
                previous: self.sequence_number,
                next: next.sequence_number,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::elliptic_curve::sec1::ToEncodedPoint;

    // secp256k1 generator point, X || Y
    const SECP256K1_G: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                               483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    fn secp256k1_key() -> PublicKey {
        let secret = k256::SecretKey::random(&mut rand::rngs::OsRng);
        let point = secret.public_key().to_encoded_point(false);
        PublicKey::from_bytes(&point.as_bytes()[1..])
    }

    fn make_key(revoked: bool, sequence_number: u64) -> AccountPublicKey {
        AccountPublicKey {
            index: 0,
            public_key: SECP256K1_G.parse().unwrap(),
            signing_algorithm: Some(SigningAlgorithm::EcdsaSecp256k1),
            hashing_algorithm: Some(HashingAlgorithm::Sha3_256),
            sequence_number,
            weight: 1000,
            revoked,
        }
    }

    #[test]
    fn test_public_key_parse_with_and_without_prefix() {
        let a: PublicKey = "0xdeadbeef".parse().unwrap();
        let b: PublicKey = "deadbeef".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(a.to_string(), "0xdeadbeef");
        assert_eq!(a.len(), 4);

        let upper: PublicKey = "0XDEADBEEF".parse().unwrap();
        assert_eq!(upper, a);
    }

    #[test]
    fn test_public_key_invalid_hex() {
        assert!(matches!(
            "0xnothex".parse::<PublicKey>(),
            Err(ParseKeyError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_validate_secp256k1_point() {
        let g: PublicKey = SECP256K1_G.parse().unwrap();
        assert!(g.validate_for(SigningAlgorithm::EcdsaSecp256k1).is_ok());
        assert!(
            secp256k1_key()
                .validate_for(SigningAlgorithm::EcdsaSecp256k1)
                .is_ok()
        );

        // Flip the last byte of Y: no longer on the curve
        let mut bytes = g.as_bytes().to_vec();
        bytes[63] ^= 0x01;
        assert_eq!(
            PublicKey::from_bytes(bytes).validate_for(SigningAlgorithm::EcdsaSecp256k1),
            Err(ParseKeyError::InvalidCurvePoint)
        );
    }

    #[test]
    fn test_validate_length() {
        let short = PublicKey::from_bytes(vec![1u8; 33]);
        assert_eq!(
            short.validate_for(SigningAlgorithm::EcdsaP256),
            Err(ParseKeyError::InvalidLength {
                algorithm: SigningAlgorithm::EcdsaP256,
                expected: 64,
                actual: 33,
            })
        );
        let bls = PublicKey::from_bytes(vec![1u8; 96]);
        assert!(bls.validate_for(SigningAlgorithm::BlsBls12381).is_ok());
    }

    #[test]
    fn test_account_key_validate() {
        assert!(make_key(false, 0).validate().is_ok());

        let revoked = make_key(true, 0);
        assert_eq!(revoked.validate(), Err(KeyValidationError::Revoked(0)));

        let mut missing = make_key(false, 0);
        missing.hashing_algorithm = None;
        assert_eq!(
            missing.validate(),
            Err(KeyValidationError::MissingHashingAlgorithm(0))
        );

        let mut incompatible = make_key(false, 0);
        incompatible.hashing_algorithm = Some(HashingAlgorithm::Kmac128);
        assert!(matches!(
            incompatible.validate(),
            Err(KeyValidationError::IncompatibleAlgorithms { .. })
        ));

        let mut heavy = make_key(false, 0);
        heavy.weight = 1001;
        assert_eq!(
            heavy.validate(),
            Err(KeyValidationError::WeightOutOfRange {
                index: 0,
                weight: 1001,
                max: MAX_KEY_WEIGHT,
            })
        );
    }

    #[test]
    fn test_is_active() {
        assert!(make_key(false, 0).is_active());
        assert!(!make_key(true, 0).is_active());

        let mut zero = make_key(false, 0);
        zero.weight = 0;
        assert!(!zero.is_active());
    }

    #[test]
    fn test_check_successor_accepts_forward_progress() {
        let before = make_key(false, 4);
        assert!(before.check_successor(&make_key(false, 4)).is_ok());
        assert!(before.check_successor(&make_key(false, 9)).is_ok());
        assert!(before.check_successor(&make_key(true, 9)).is_ok());
    }

    #[test]
    fn test_check_successor_rejects_unrevoke() {
        let before = make_key(true, 4);
        assert_eq!(
            before.check_successor(&make_key(false, 4)),
            Err(KeyTransitionError::Unrevoked(0))
        );
    }

    #[test]
    fn test_check_successor_rejects_sequence_regression() {
        let before = make_key(false, 4);
        assert_eq!(
            before.check_successor(&make_key(false, 3)),
            Err(KeyTransitionError::SequenceRegressed {
                index: 0,
                previous: 4,
                next: 3,
            })
        );
    }

    #[test]
    fn test_check_successor_rejects_other_key() {
        let before = make_key(false, 0);

        let mut moved = make_key(false, 0);
        moved.index = 1;
        assert_eq!(
            before.check_successor(&moved),
            Err(KeyTransitionError::IndexChanged {
                previous: 0,
                next: 1
            })
        );

        let mut rotated = make_key(false, 0);
        rotated.public_key = secp256k1_key();
        assert_eq!(
            before.check_successor(&rotated),
            Err(KeyTransitionError::KeyChanged(0))
        );
    }
}
