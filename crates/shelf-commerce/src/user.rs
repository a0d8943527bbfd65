//! Customer accounts.
//!
//! Authentication is out of scope; users exist so that orders and reviews
//! can be attributed to someone.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// A customer account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: String,
}

/// Fields needed to create a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
}

impl NewUser {
    /// Attach the id assigned by the store.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            full_name: self.full_name,
        }
    }
}
