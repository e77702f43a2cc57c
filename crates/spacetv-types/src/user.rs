use serde::{Deserialize, Serialize};

/// Reserved uid meaning "no active user".
pub const LOGGED_OUT_UID: i64 = -1;

/// Stored account record.
///
/// Created by the login flow on successful authentication, never
/// mutated afterwards; only inserted and deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Platform account id. `-1` is reserved for the logged-out sentinel.
    pub uid: i64,
    /// Display name at login time.
    pub username: String,
    /// Avatar image URL.
    pub avatar: String,
    /// Opaque auth token blob for this account.
    pub auth_token: String,
}

impl UserProfile {
    pub fn new(
        uid: i64,
        username: impl Into<String>,
        avatar: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            uid,
            username: username.into(),
            avatar: avatar.into(),
            auth_token: auth_token.into(),
        }
    }

    /// The sentinel profile representing "nobody is logged in".
    pub fn logged_out() -> Self {
        Self {
            uid: LOGGED_OUT_UID,
            username: String::new(),
            avatar: String::new(),
            auth_token: String::new(),
        }
    }

    pub fn is_logged_out(&self) -> bool {
        self.uid == LOGGED_OUT_UID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_out_sentinel() {
        let sentinel = UserProfile::logged_out();
        assert_eq!(sentinel.uid, LOGGED_OUT_UID);
        assert!(sentinel.is_logged_out());
        assert!(!UserProfile::new(10, "a", "b", "c").is_logged_out());
    }
}
