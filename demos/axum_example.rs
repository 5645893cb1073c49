//! Axum Example for seaorm-session-adapter
//!
//! This example wires the adapter into a small Axum application: users are
//! created directly through Sea-ORM, everything session related goes through
//! the adapter, and expired sessions are purged by a background task owned by
//! the application.
//!
//! # Running the example
//!
//! ```bash
//! # Defaults to an in-memory SQLite database
//! cargo run --example axum_example --features sqlite
//! ```
//!
//! # Testing the example
//!
//! ```bash
//! # Create a user
//! curl -X POST "http://127.0.0.1:3000/users?username=ada"
//!
//! # Sign in, returns a session id
//! curl -X POST "http://127.0.0.1:3000/users/<user-id>/sessions"
//!
//! # Resolve the session
//! curl "http://127.0.0.1:3000/sessions/<session-id>"
//!
//! # Sign out everywhere
//! curl -X DELETE "http://127.0.0.1:3000/users/<user-id>/sessions"
//! ```

use std::{collections::HashMap, env, net::SocketAddr, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema, Set,
};
use seaorm_session_adapter::{Adapter, Attributes, DatabaseSession, SeaOrmAdapter};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod user {
    use sea_orm::entity::prelude::*;
    use seaorm_session_adapter::UserTable;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "user")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
        pub id: String,
        #[sea_orm(unique)]
        pub username: String,
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

mod session {
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
        pub user_agent: Option<String>,
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

type AuthAdapter = SeaOrmAdapter<session::Entity, user::Entity>;

const SESSION_LIFETIME: time::Duration = time::Duration::days(30);

// Application state that will be shared across handlers
#[derive(Clone)]
struct AppState {
    db: DatabaseConnection,
    adapter: AuthAdapter,
}

type HandlerResult<T> = Result<T, (StatusCode, String)>;

fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    dotenv().ok();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    info!("Connecting to database: {}", database_url);

    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10));
    let db = Database::connect(opt).await?;

    create_tables(&db).await?;
    info!("Connected to database");

    let adapter = AuthAdapter::new(db.clone());

    // The adapter never purges on its own
    let cleanup = adapter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            if let Err(e) = cleanup.delete_expired_sessions().await {
                warn!("Failed to delete expired sessions: {}", e);
            }
        }
    });

    let app = Router::new()
        .route("/users", post(create_user))
        .route(
            "/users/{user_id}/sessions",
            post(sign_in).get(list_sessions).delete(sign_out_everywhere),
        )
        .route("/sessions/{session_id}", get(resolve_session).delete(sign_out))
        .route("/sessions/{session_id}/extend", post(extend_session))
        .with_state(AppState { db, adapter });

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

async fn create_tables(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    for mut table in [
        schema.create_table_from_entity(user::Entity),
        schema.create_table_from_entity(session::Entity),
    ] {
        table.if_not_exists();
        db.execute(backend.build(&table)).await?;
    }

    Ok(())
}

// Route handlers

/// Example: POST /users?username=ada
async fn create_user(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> HandlerResult<impl IntoResponse> {
    let username = params
        .get("username")
        .ok_or((StatusCode::BAD_REQUEST, "Missing username parameter".to_string()))?;

    let user = user::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        username: Set(username.clone()),
    }
    .insert(&state.db)
    .await
    .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(json!({ "id": user.id }))))
}

/// Starts a new session for the user, remembering the client's user agent.
async fn sign_in(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> HandlerResult<impl IntoResponse> {
    let mut attributes = Attributes::new();
    if let Some(agent) = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
    {
        attributes.insert("user_agent".to_string(), json!(agent));
    }

    let session = DatabaseSession {
        id: uuid::Uuid::new_v4().to_string(),
        user_id,
        expires_at: OffsetDateTime::now_utc() + SESSION_LIFETIME,
        attributes,
    };
    state
        .adapter
        .set_session(&session)
        .await
        .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(session)))
}

async fn resolve_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<impl IntoResponse> {
    match state
        .adapter
        .get_session_and_user(&session_id)
        .await
        .map_err(internal_error)?
    {
        (Some(session), Some(user)) if session.expires_at > OffsetDateTime::now_utc() => {
            Ok(Json(json!({ "session": session, "user": user })))
        }
        _ => Err((StatusCode::UNAUTHORIZED, "Invalid session".to_string())),
    }
}

async fn list_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HandlerResult<impl IntoResponse> {
    let sessions = state
        .adapter
        .get_user_sessions(&user_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(sessions))
}

async fn extend_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<StatusCode> {
    state
        .adapter
        .update_session_expiration(&session_id, OffsetDateTime::now_utc() + SESSION_LIFETIME)
        .await
        .map_err(internal_error)?;

    Ok(StatusCode::NO_CONTENT)
}

async fn sign_out(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<StatusCode> {
    state
        .adapter
        .delete_session(&session_id)
        .await
        .map_err(internal_error)?;

    Ok(StatusCode::NO_CONTENT)
}

async fn sign_out_everywhere(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HandlerResult<StatusCode> {
    state
        .adapter
        .delete_user_sessions(&user_id)
        .await
        .map_err(internal_error)?;

    Ok(StatusCode::NO_CONTENT)
}
