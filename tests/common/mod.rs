#![allow(dead_code)]

use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    Schema, Set,
};
use seaorm_session_adapter::{Attributes, DatabaseSession};
use time::OffsetDateTime;

/// Text-keyed tables; sessions carry an extra `ip` column.
pub mod user {
    use sea_orm::entity::prelude::*;
    use seaorm_session_adapter::UserTable;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "user")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
        pub id: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl UserTable for Entity {
        type Id = String;

        fn id() -> Column {
            Column::Id
        }
    }
}

pub mod session {
    use sea_orm::entity::prelude::*;
    use seaorm_session_adapter::SessionTable;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "session")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
        pub id: String,
        pub user_id: String,
        pub expires_at: DateTimeWithTimeZone,
        pub ip: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::user::Entity",
            from = "Column::UserId",
            to = "super::user::Column::Id"
        )]
        User,
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
}

/// Integer-keyed tables with extra columns on both sides.
pub mod account {
    use sea_orm::entity::prelude::*;
    use seaorm_session_adapter::UserTable;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "account")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i64,
        pub email: String,
        pub verified: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl UserTable for Entity {
        type Id = i64;

        fn id() -> Column {
            Column::Id
        }
    }
}

pub mod account_session {
    use sea_orm::entity::prelude::*;
    use seaorm_session_adapter::SessionTable;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "account_session")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
        pub id: String,
        pub account_id: i64,
        pub expires_at: DateTimeWithTimeZone,
        pub user_agent: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::account::Entity",
            from = "Column::AccountId",
            to = "super::account::Column::Id"
        )]
        Account,
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl SessionTable for Entity {
        type UserId = i64;

        fn id() -> Column {
            Column::Id
        }

        fn user_id() -> Column {
            Column::AccountId
        }

        fn expires_at() -> Column {
            Column::ExpiresAt
        }
    }
}

/// Opens a fresh in-memory SQLite database with all test tables created.
pub async fn setup() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    // every pooled connection would get its own in-memory database
    opt.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .expect("failed to open in-memory database");

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let statements = [
        schema.create_table_from_entity(user::Entity),
        schema.create_table_from_entity(session::Entity),
        schema.create_table_from_entity(account::Entity),
        schema.create_table_from_entity(account_session::Entity),
    ];
    for statement in statements {
        db.execute(backend.build(&statement))
            .await
            .expect("failed to create table");
    }

    db
}

pub async fn insert_user(db: &DatabaseConnection, id: &str) {
    user::ActiveModel { id: Set(id.to_string()) }
        .insert(db)
        .await
        .expect("failed to insert user");
}

pub async fn insert_account(db: &DatabaseConnection, id: i64, email: &str) {
    account::Entity::insert(account::ActiveModel {
        id: Set(id),
        email: Set(email.to_string()),
        verified: Set(true),
    })
    .exec_without_returning(db)
    .await
    .expect("failed to insert account");
}

/// Current time truncated to whole seconds.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
        .replace_nanosecond(0)
        .expect("zero is a valid nanosecond")
}

pub fn session<I>(id: &str, user_id: I, expires_at: OffsetDateTime) -> DatabaseSession<I> {
    DatabaseSession {
        id: id.to_string(),
        user_id,
        expires_at,
        attributes: Attributes::new(),
    }
}
