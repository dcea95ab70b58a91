//! In-memory stand-in for the todo store.
//!
//! Serves the four `/csbs` endpoints with the store's document shape
//! (`_id` / `todo`) and its JSON error bodies (`{"message": ...}`). Records
//! are kept in insertion order.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub todo: String,
}

#[derive(Deserialize)]
pub struct TodoInput {
    #[serde(default)]
    pub todo: Option<String>,
}

pub type Db = Arc<RwLock<Vec<Todo>>>;

type ApiResult<T> = Result<(StatusCode, Json<T>), (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    app_with(Db::default())
}

/// Router over an existing store, so tests can seed or inspect it.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/csbs/gettodo", get(list_todos))
        .route("/csbs/addtodo", post(create_todo))
        .route("/csbs/updatetodo/{id}", put(update_todo))
        .route("/csbs/deletetodo/{id}", delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

fn required_text(input: TodoInput) -> Result<String, (StatusCode, Json<Value>)> {
    input
        .todo
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Todo is required"))
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.clone())
}

async fn create_todo(State(db): State<Db>, Json(input): Json<TodoInput>) -> ApiResult<Todo> {
    let text = required_text(input)?;
    let todo = Todo {
        id: Uuid::new_v4().simple().to_string(),
        todo: text,
    };
    db.write().await.push(todo.clone());
    tracing::info!(id = %todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<TodoInput>,
) -> ApiResult<Todo> {
    let text = required_text(input)?;
    let mut todos = db.write().await;
    let todo = todos
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Todo not found"))?;
    todo.todo = text;
    tracing::info!(%id, "todo updated");
    Ok((StatusCode::OK, Json(todo.clone())))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Value> {
    let mut todos = db.write().await;
    let index = todos
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Todo not found"))?;
    todos.remove(index);
    tracing::info!(%id, "todo deleted");
    Ok((StatusCode::OK, Json(json!({ "message": "Todo deleted" }))))
}
