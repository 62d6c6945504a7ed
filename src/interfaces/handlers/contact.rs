use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::inquiry::{ContactInquiryForm, InquiryListQuery, InquiryNotesRequest},
    errors::AppError,
    limiter::rate_limiter::RateDecision,
    use_cases::extractors::AdminClaims,
    utils::get_client_ip::get_client_ip,
    AppState,
};

/// Public contact form. Submissions are rate limited per client IP.
#[instrument(skip(req, state, form))]
pub async fn submit_inquiry(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<ContactInquiryForm>,
) -> Result<impl Responder, AppError> {
    let client_ip = get_client_ip(&req, state.trust_x_forwarded_for);

    if let RateDecision::Limited { retry_after_secs } = state.contact_limiter.check(&client_ip) {
        tracing::warn!(client_ip = %client_ip, retry_after_secs, "Contact form rate limit hit");
        return Err(AppError::RateLimited { retry_after_secs });
    }

    let response = state.contact_handler.submit_inquiry(form.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(_claims, state, query))]
pub async fn list_inquiries(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<InquiryListQuery>,
) -> Result<impl Responder, AppError> {
    let inquiries = state.contact_handler.list_inquiries(query.include_archived).await?;
    Ok(HttpResponse::Ok().json(inquiries))
}

/// Inquiry detail; viewing marks it read
#[instrument(skip(_claims, state))]
pub async fn view_inquiry(
    _claims: AdminClaims,
    inquiry_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let inquiry = state.contact_handler.view_inquiry(&inquiry_id).await?;
    Ok(HttpResponse::Ok().json(inquiry))
}

#[instrument(skip(_claims, state))]
pub async fn mark_inquiry_read(
    _claims: AdminClaims,
    inquiry_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let inquiry = state.contact_handler.mark_read(&inquiry_id).await?;
    Ok(HttpResponse::Ok().json(inquiry))
}

#[instrument(skip(_claims, state))]
pub async fn archive_inquiry(
    _claims: AdminClaims,
    inquiry_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let inquiry = state.contact_handler.archive(&inquiry_id).await?;
    Ok(HttpResponse::Ok().json(inquiry))
}

#[instrument(skip(_claims, state))]
pub async fn unarchive_inquiry(
    _claims: AdminClaims,
    inquiry_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let inquiry = state.contact_handler.unarchive(&inquiry_id).await?;
    Ok(HttpResponse::Ok().json(inquiry))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_inquiry_notes(
    _claims: AdminClaims,
    inquiry_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<InquiryNotesRequest>,
) -> Result<impl Responder, AppError> {
    let inquiry = state.contact_handler
        .update_notes(&inquiry_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(inquiry))
}

#[instrument(skip(_claims, state))]
pub async fn delete_inquiry(
    _claims: AdminClaims,
    inquiry_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.contact_handler.delete_inquiry(&inquiry_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
