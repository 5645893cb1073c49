//! Ready-made Sea-ORM entities for deployments whose sessions and users carry
//! no columns beyond the core ones.
//!
//! Both tables use text identifiers. The session table references the user
//! table through `user_id`.

/// Session table: `id`, `user_id`, `expires_at`.
pub mod session;

/// User table: `id`.
pub mod user;
