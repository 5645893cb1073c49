//! Default session entity.
//!
//! Maps to the "session" table and carries only the core columns. Sessions
//! with extra attributes need their own entity implementing
//! [`SessionTable`](crate::SessionTable).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::table::SessionTable;

/// Sea-ORM entity model representing a session in the database.
///
/// # Database Schema
///
/// | Column     | Type                    | Description                       |
/// |------------|-------------------------|-----------------------------------|
/// | id         | TEXT (Primary Key)      | Session ID                        |
/// | user_id    | TEXT (references user)  | Owner of the session              |
/// | expires_at | TIMESTAMPTZ             | Session expiration timestamp      |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "session")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    #[sea_orm(column_type = "Text")]
    pub user_id: String,

    /// Sessions are invalid once this instant has passed; rows are only
    /// removed by an explicit call to `delete_expired_sessions`.
    pub expires_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl SessionTable for Entity {
    type UserId = String;

    fn id() -> Column {
        Column::Id
    }

    fn user_id() -> Column {
        Column::UserId
    }

    fn expires_at() -> Column {
        Column::ExpiresAt
    }
}
