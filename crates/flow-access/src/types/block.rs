//! Block header snapshot.

use serde::{Deserialize, Serialize};

use super::Identifier;

/// Block header as returned by the Access API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Block identifier.
    pub id: Identifier,
    /// Identifier of the parent block.
    pub parent_id: Identifier,
    /// Block height.
    pub height: u64,
    /// Proposal time (RFC 3339).
    pub timestamp: String,
}

impl BlockHeader {
    /// Check whether this block directly extends `parent`.
    pub fn is_child_of(&self, parent: &BlockHeader) -> bool {
        self.parent_id == parent.id && parent.height.checked_add(1) == Some(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(id: u8, parent: u8, height: u64) -> BlockHeader {
        BlockHeader {
            id: Identifier::from_bytes([id; 32]),
            parent_id: Identifier::from_bytes([parent; 32]),
            height,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_is_child_of() {
        let parent = header(1, 0, 10);
        assert!(header(2, 1, 11).is_child_of(&parent));
        assert!(!header(2, 1, 12).is_child_of(&parent));
        assert!(!header(2, 3, 11).is_child_of(&parent));
    }

    #[test]
    fn test_block_header_json() {
        let json = format!(
            r#"{{"id":"{}","parent_id":"{}","height":11,"timestamp":"2024-01-01T00:00:00Z"}}"#,
            "02".repeat(32),
            "01".repeat(32)
        );
        let parsed: BlockHeader = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, header(2, 1, 11));
    }
}
