//! Session entity read from the external session store.

/// A caller session.
///
/// Owned by the session store; this service only reads it and may trigger
/// creation of a guest instance when no session accompanies the request.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    /// Opaque session identifier, carried in the session cookie.
    pub id: String,
    pub user_name: String,
    /// True for guest sessions; drives the access policy.
    pub is_anonymous: bool,
}

impl Session {
    pub fn new(id: impl Into<String>, user_name: impl Into<String>, is_anonymous: bool) -> Self {
        Self {
            id: id.into(),
            user_name: user_name.into(),
            is_anonymous,
        }
    }
}
