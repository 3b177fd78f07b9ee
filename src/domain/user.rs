use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a registered user.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    /// Unique identifier of the user.
    pub id: i32,
    /// Login email, unique across all users.
    pub email: String,
    /// Argon2id hash of the user's password in PHC string format.
    pub password_hash: String,
    /// Timestamp for when the account was created.
    pub created_at: NaiveDateTime,
}

/// Payload required to insert a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login email, unique across all users.
    pub email: String,
    /// Argon2id hash of the user's password in PHC string format.
    pub password_hash: String,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}
