use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello API" }))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
