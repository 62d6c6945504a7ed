use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::page::PageForm, errors::AppError, use_cases::extractors::AdminClaims, AppState};

/// Published page by slug, with its HTML sanitized
#[instrument(skip(state))]
pub async fn get_public_page(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let page = state.page_handler.get_published_page(&slug).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[instrument(skip(_claims, state))]
pub async fn list_pages(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let pages = state.page_handler.list_pages().await?;
    Ok(HttpResponse::Ok().json(pages))
}

#[instrument(skip(_claims, state))]
pub async fn get_page(
    _claims: AdminClaims,
    page_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let page = state.page_handler.get_page(&page_id).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_page(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<PageForm>,
) -> Result<impl Responder, AppError> {
    let page = state.page_handler.create_page(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(page))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_page(
    _claims: AdminClaims,
    page_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<PageForm>,
) -> Result<impl Responder, AppError> {
    let page = state.page_handler.update_page(&page_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[instrument(skip(_claims, state))]
pub async fn delete_page(
    _claims: AdminClaims,
    page_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.page_handler.delete_page(&page_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
