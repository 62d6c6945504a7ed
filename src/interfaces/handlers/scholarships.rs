use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        scholarship::{ScholarshipForm, ScholarshipNotesRequest},
        scholarship_query::ScholarshipListQuery,
    },
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(state, query))]
pub async fn list_scholarships(
    state: web::Data<AppState>,
    query: web::Query<ScholarshipListQuery>,
) -> Result<impl Responder, AppError> {
    let listing = state.directory.list_scholarships(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// Vocabularies the listing filters offer
pub async fn filter_options(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&state.filter_options)
}

#[instrument(skip(state))]
pub async fn get_scholarship(
    scholarship_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let detail = state.directory.get_scholarship_detail(&scholarship_id).await?;
    Ok(HttpResponse::Ok().json(detail))
}

// Back-office

#[instrument(skip(_claims, state))]
pub async fn admin_list_scholarships(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let scholarships = state.scholarship_admin.list_scholarships().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "total": scholarships.len(),
        "scholarships": scholarships
    })))
}

#[instrument(skip(_claims, state))]
pub async fn admin_get_scholarship(
    _claims: AdminClaims,
    scholarship_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let scholarship = state.scholarship_admin.get_scholarship(&scholarship_id).await?;
    Ok(HttpResponse::Ok().json(scholarship))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_scholarship(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<ScholarshipForm>,
) -> Result<impl Responder, AppError> {
    let response = state.scholarship_admin.create_scholarship(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_scholarship(
    _claims: AdminClaims,
    scholarship_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ScholarshipForm>,
) -> Result<impl Responder, AppError> {
    let updated = state.scholarship_admin
        .update_scholarship(&scholarship_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_scholarship_notes(
    _claims: AdminClaims,
    scholarship_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ScholarshipNotesRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state.scholarship_admin
        .update_notes(&scholarship_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(_claims, state))]
pub async fn delete_scholarship(
    _claims: AdminClaims,
    scholarship_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.scholarship_admin.delete_scholarship(&scholarship_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
