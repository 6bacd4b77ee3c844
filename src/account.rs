use crate::error::{NoteStoreError, Result};

/// Resolves the identifier of the signed-in user. The sign-in flow itself
/// lives outside this crate; callers resolve identity before touching notes.
pub trait IdentityProvider {
    fn current_user_id(&self) -> Option<String>;
}

/// Identity backed by a known, fixed user id. Useful for embedders that do
/// their own session handling, and for tests.
pub struct FixedIdentityProvider {
    user_id: String,
}

impl FixedIdentityProvider {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl IdentityProvider for FixedIdentityProvider {
    fn current_user_id(&self) -> Option<String> {
        if self.user_id.is_empty() {
            None
        } else {
            Some(self.user_id.clone())
        }
    }
}

pub fn require_user_id<I: IdentityProvider>(identity: &I) -> Result<String> {
    identity
        .current_user_id()
        .ok_or(NoteStoreError::Unauthenticated)
}
