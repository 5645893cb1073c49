//! The storage contract a session backend implements, and the record shapes
//! it exchanges with the authentication layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::Result;

/// Open mapping of the columns of a row that are not core fields.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// A session as seen by the authentication layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSession<I> {
    /// Opaque unique session identifier.
    pub id: String,
    /// Identifier of the user owning this session.
    pub user_id: I,
    /// Instant after which the session is no longer valid.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    /// Every other column stored alongside the core fields.
    #[serde(default)]
    pub attributes: Attributes,
}

/// A user as seen by the authentication layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseUser<I> {
    /// Primary key of the user.
    pub id: I,
    /// Every column of the user row other than the id.
    #[serde(default)]
    pub attributes: Attributes,
}

/// Result of [`Adapter::get_session_and_user`].
///
/// Either both entries are `Some` (the session and the user it references)
/// or both are `None`.
pub type SessionAndUser<I> = (Option<DatabaseSession<I>>, Option<DatabaseUser<I>>);

/// Operations a storage backend must support for session lifecycle
/// management.
///
/// Every operation issues a single query and resolves once the database has
/// confirmed it. Absence is reported through the return value, never as an
/// error: deleting or updating an unknown session is a no-op and looking one
/// up yields `(None, None)`.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Identifier type of users, fixed for a deployment.
    type UserId: Send + Sync;

    /// Deletes the session with the given id.
    async fn delete_session(&self, session_id: &str) -> Result<()>;

    /// Deletes every session belonging to the given user.
    async fn delete_user_sessions(&self, user_id: &Self::UserId) -> Result<()>;

    /// Looks up a session together with the user it belongs to.
    async fn get_session_and_user(&self, session_id: &str)
        -> Result<SessionAndUser<Self::UserId>>;

    /// Returns all sessions of the given user, in the order the database
    /// returns them.
    async fn get_user_sessions(
        &self,
        user_id: &Self::UserId,
    ) -> Result<Vec<DatabaseSession<Self::UserId>>>;

    /// Stores a new session. Fails if the id is taken or the user does not
    /// exist.
    async fn set_session(&self, session: &DatabaseSession<Self::UserId>) -> Result<()>;

    /// Moves the expiration of a session, leaving every other column as is.
    async fn update_session_expiration(
        &self,
        session_id: &str,
        expires_at: OffsetDateTime,
    ) -> Result<()>;

    /// Deletes every session whose expiration is at or before the current
    /// time. Never run automatically.
    async fn delete_expired_sessions(&self) -> Result<()>;
}
