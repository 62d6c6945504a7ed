use actix_web::{get, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the Scholarship Portal API!",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "scholarships": "/api/v1/scholarships",
        "health": "/api/v1/health"
    }))
}

/// Featured scholarships for the landing page
#[instrument(skip(state))]
pub async fn featured(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let featured = state.directory.featured_scholarships().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "featured": featured
    })))
}
