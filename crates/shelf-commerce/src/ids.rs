//! Newtype IDs for type-safe identifiers.
//!
//! Every entity is keyed by a positive integer handed out by the store.
//! Wrapping them prevents passing an `OrderId` where a `ProductId` is expected.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommerceError;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A positive integer identifier.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create an ID from its raw value.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                match u64::deserialize(deserializer)? {
                    0 => Err(serde::de::Error::custom("id must be a positive integer")),
                    id => Ok(Self(id)),
                }
            }
        }

        impl FromStr for $name {
            type Err = CommerceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().parse::<u64>() {
                    Ok(id) if id > 0 => Ok(Self(id)),
                    _ => Err(CommerceError::InvalidId(s.to_string())),
                }
            }
        }
    };
}

define_id!(CategoryId);
define_id!(ProductId);
define_id!(ReviewId);
define_id!(UserId);
define_id!(OrderId);
define_id!(OrderItemId);

/// The demo account every checkout is attributed to.
pub const DEMO_USER_ID: UserId = UserId::new(1);
