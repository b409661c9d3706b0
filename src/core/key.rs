//! Read-only view of the key under edit.

/// One user ID of a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserId {
    /// The user ID string (`Name (Comment) <email>`).
    pub uid: String,
    /// Hash the engine accepts in `uid <hash>` selections.
    pub uid_hash: Option<String>,
}

impl UserId {
    /// A user ID without a selection hash.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            uid_hash: None,
        }
    }

    /// Attach the selection hash.
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.uid_hash = Some(hash.into());
        self
    }
}

/// The key passed to an edit operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Key {
    /// Primary key fingerprint.
    pub fingerprint: Option<String>,
    /// User IDs in engine order.
    pub user_ids: Vec<UserId>,
}

impl Key {
    /// A key identified by fingerprint.
    pub fn new(fingerprint: impl Into<String>) -> Self {
        Self {
            fingerprint: Some(fingerprint.into()),
            user_ids: Vec::new(),
        }
    }

    /// Append a user ID.
    pub fn with_user_id(mut self, uid: UserId) -> Self {
        self.user_ids.push(uid);
        self
    }

    /// The fingerprint, if the key has one.
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// The user ID at `index`.
    pub fn user_id(&self, index: usize) -> Option<&UserId> {
        self.user_ids.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_builders() {
        let key = Key::new("ABCD")
            .with_user_id(UserId::new("Alice <a@example.org>").with_hash("1234"))
            .with_user_id(UserId::new("Alice <alice@example.net>"));

        assert_eq!(key.fingerprint(), Some("ABCD"));
        assert_eq!(key.user_id(0).and_then(|u| u.uid_hash.as_deref()), Some("1234"));
        assert_eq!(key.user_id(1).and_then(|u| u.uid_hash.as_deref()), None);
        assert!(key.user_id(2).is_none());
    }

    #[test]
    fn test_default_key_has_no_fingerprint() {
        assert!(Key::default().fingerprint().is_none());
    }
}
