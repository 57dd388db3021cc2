// src/handlers/pages.rs

use axum::{response::IntoResponse, Json};
use serde_json::json;

// Stubs das páginas gateadas pelo page_guard. O front-end é servido à
// parte; estas rotas existem para a tabela de redirecionamento por papel.

pub async fn dashboard() -> impl IntoResponse {
    Json(json!({ "painel": "usuario" }))
}

pub async fn admin_dashboard() -> impl IntoResponse {
    Json(json!({ "painel": "admin" }))
}

pub async fn director_dashboard() -> impl IntoResponse {
    Json(json!({ "painel": "diretor" }))
}
