//! HTTP routing layer for the todo store.
//!
//! Handlers extract the path id and JSON body, call into the shared
//! `TodoStore` and wrap the result in the response envelope. Each handler
//! holds the store lock for its whole mutate-then-read sequence, so the list
//! returned by POST or DELETE is exactly the state that request produced.

pub mod config;
pub mod error;
pub mod extract;
pub mod sitemap;

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderValue,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use todo_core::{NewTodo, Todo, TodoId, TodoPatch, TodoStore};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ErrorResponse, ServerError};
pub use extract::{ApiJson, ApiPath};

pub type Db = Arc<RwLock<TodoStore>>;

pub const USER_GREETING: &str = "Hello, this is your GET /user response ";
pub const CREATED_MESSAGE: &str = "Successfully created and added task to ToDo List";
pub const UPDATED_MESSAGE: &str = "Successfully updated task and updated ToDo List";
pub const DELETED_MESSAGE: &str = "Successfully deleted task and updated ToDo List";

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub msg: String,
}

/// Body of POST and DELETE responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub message: String,
    pub updated_list: Vec<Todo>,
}

/// Body of PUT responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub message: String,
    pub updated_from: Todo,
    pub updated_to: Todo,
}

/// Router over a freshly seeded store with permissive CORS.
pub fn app() -> Router {
    app_with_store(TodoStore::seeded())
}

pub fn app_with_store(store: TodoStore) -> Router {
    router(store, &ServerConfig::default())
}

pub fn router(store: TodoStore, config: &ServerConfig) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/", get(sitemap::sitemap))
        .route("/user", get(get_user))
        .route("/user/", get(get_user))
        .route("/todo", get(list_todos).post(add_todo))
        .route("/todo/", get(list_todos).post(add_todo))
        .route("/todo/{id}", put(update_todo).delete(delete_todo))
        .route("/todo/{id}/", put(update_todo).delete(delete_todo))
        .with_state(db)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    tracing::info!(
        addr = %listener.local_addr()?,
        database_url = %config.redacted_database_url(),
        "todo server listening"
    );
    axum::serve(listener, router(TodoStore::seeded(), &config)).await
}

async fn get_user() -> Json<UserResponse> {
    Json(UserResponse {
        msg: USER_GREETING.to_string(),
    })
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.list().to_vec())
}

async fn add_todo(
    State(db): State<Db>,
    ApiJson(input): ApiJson<NewTodo>,
) -> Result<Json<ListResponse>, ApiError> {
    let mut store = db.write().await;
    let id = store.add(input)?;
    tracing::info!(id, total = store.len(), "todo added");
    Ok(Json(ListResponse {
        message: CREATED_MESSAGE.to_string(),
        updated_list: store.list().to_vec(),
    }))
}

async fn update_todo(
    State(db): State<Db>,
    ApiPath(id): ApiPath<TodoId>,
    ApiJson(patch): ApiJson<TodoPatch>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let outcome = db.write().await.update(id, &patch)?;
    tracing::info!(id, "todo updated");
    Ok(Json(UpdateResponse {
        message: UPDATED_MESSAGE.to_string(),
        updated_from: outcome.updated_from,
        updated_to: outcome.updated_to,
    }))
}

async fn delete_todo(
    State(db): State<Db>,
    ApiPath(id): ApiPath<TodoId>,
) -> Json<ListResponse> {
    let mut store = db.write().await;
    let removed = store.delete(id);
    if removed == 0 {
        tracing::debug!(id, "delete of unknown todo ignored");
    } else {
        tracing::info!(id, removed, "todo deleted");
    }
    Json(ListResponse {
        message: DELETED_MESSAGE.to_string(),
        updated_list: store.list().to_vec(),
    })
}
