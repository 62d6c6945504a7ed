use actix_web::{http::StatusCode, HttpResponse};

/// Error body in the shape every handler error uses: `{ "error": ... }`
pub fn json_error(status: StatusCode, error: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "error": error
    }))
}
