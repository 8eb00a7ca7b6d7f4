//! Newtype IDs for type-safe identifiers.
//!
//! Keeps shop keys, group ids, tier ids and catalog product ids from being
//! mixed up at call sites that take several of them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// An opaque identifier.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ShopId);
define_id!(GroupId);
define_id!(TierId);
define_id!(ProductId);

impl GroupId {
    /// Generate a fresh store-assigned group id.
    pub fn generate() -> Self {
        Self(format!("grp_{}", random_token()))
    }
}

impl TierId {
    /// Tier id for the given position in a group's tier sequence.
    pub fn from_sequence(seq: u32) -> Self {
        Self(format!("tier-{}", seq))
    }
}

/// URL-safe random token, 16 characters.
fn random_token() -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::Rng;

    let bytes: [u8; 12] = rand::thread_rng().gen();
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("8123456789");
        assert_eq!(id.as_str(), "8123456789");
    }

    #[test]
    fn test_group_id_generation() {
        let id1 = GroupId::generate();
        let id2 = GroupId::generate();
        assert_ne!(id1, id2);
        assert!(id1.as_str().starts_with("grp_"));
    }

    #[test]
    fn test_tier_id_from_sequence() {
        assert_eq!(TierId::from_sequence(4).as_str(), "tier-4");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ShopId::new("demo.myshopify.com");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"demo.myshopify.com\""
        );
    }
}
