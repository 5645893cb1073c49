//! Table handles: how the adapter finds the core columns of the session and
//! user entities it is given.
//!
//! The core columns are located by name. For entities derived with
//! `DeriveEntityModel` the column name equals the model's field name, which
//! is also the key the model serializes under; fields renamed with
//! `column_name` or `serde(rename)` are not supported.

use std::fmt::Debug;

use sea_orm::EntityTrait;
use serde::{de::DeserializeOwned, Serialize};

mod private {
    pub trait Sealed {}

    impl Sealed for String {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}

/// Identifier type of users: text or numeric.
///
/// One type is chosen for a whole deployment through [`UserTable::Id`].
pub trait UserId:
    private::Sealed
    + Clone
    + Debug
    + PartialEq
    + Serialize
    + DeserializeOwned
    + Into<sea_orm::Value>
    + Send
    + Sync
    + 'static
{
}

impl UserId for String {}
impl UserId for i32 {}
impl UserId for i64 {}

/// An entity usable as the user table.
pub trait UserTable: EntityTrait {
    /// Type of the primary key column.
    type Id: UserId;

    /// Primary key column.
    fn id() -> Self::Column;
}

/// An entity usable as the session table.
///
/// # Examples
///
/// ```
/// use sea_orm::entity::prelude::*;
/// use serde::{Deserialize, Serialize};
/// use seaorm_session_adapter::SessionTable;
///
/// #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
/// #[sea_orm(table_name = "session")]
/// pub struct Model {
///     #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
///     pub id: String,
///     pub user_id: i64,
///     pub expires_at: DateTimeWithTimeZone,
///     pub ip_address: Option<String>,
/// }
///
/// #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
/// pub enum Relation {}
///
/// impl ActiveModelBehavior for ActiveModel {}
///
/// impl SessionTable for Entity {
///     type UserId = i64;
///
///     fn id() -> Column {
///         Column::Id
///     }
///
///     fn user_id() -> Column {
///         Column::UserId
///     }
///
///     fn expires_at() -> Column {
///         Column::ExpiresAt
///     }
/// }
/// ```
pub trait SessionTable: EntityTrait {
    /// Type of the column referencing the user table.
    type UserId: UserId;

    /// Primary key column.
    fn id() -> Self::Column;

    /// Column referencing the user's primary key.
    fn user_id() -> Self::Column;

    /// Expiration timestamp column.
    fn expires_at() -> Self::Column;
}
