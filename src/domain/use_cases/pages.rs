use std::sync::Arc;

use crate::{
    entities::page::{Page, PageForm, PageInsert, PageListResponse, PublicPage},
    errors::AppError,
    repositories::page::PageRepository,
    utils::{html::sanitize_page_html, valid_id::valid_id},
};

const NOT_FOUND: &str = "Page not found";

pub struct PageHandler<R>
where
    R: PageRepository + ?Sized,
{
    pub page_repo: Arc<R>,
}

impl<R> PageHandler<R>
where
    R: PageRepository + ?Sized,
{
    pub fn new(page_repo: Arc<R>) -> Self {
        PageHandler { page_repo }
    }

    /// Serves a published page with its HTML sanitized. Drafts are not found.
    pub async fn get_published_page(&self, slug: &str) -> Result<PublicPage, AppError> {
        let page = self.page_repo
            .get_page_by_slug(slug.trim())
            .await?
            .filter(|p| p.is_published)
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

        Ok(PublicPage {
            content_html: sanitize_page_html(&page.content_html),
            slug: page.slug,
            title: page.title,
            hero_image_url: page.hero_image_url,
            seo_description: page.seo_description,
            last_updated: page.last_updated,
        })
    }

    pub async fn list_pages(&self) -> Result<PageListResponse, AppError> {
        let pages = self.page_repo.list_pages().await?;
        Ok(PageListResponse { total: pages.len(), pages })
    }

    pub async fn get_page(&self, id: &str) -> Result<Page, AppError> {
        let id = valid_id(id, NOT_FOUND)?;
        self.page_repo
            .get_page_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    pub async fn create_page(&self, form: PageForm) -> Result<Page, AppError> {
        let insert = PageInsert::try_from(form)?;
        let page = self.page_repo.create_page(&insert).await?;
        tracing::info!(id = page.id, slug = %page.slug, "Page created");
        Ok(page)
    }

    pub async fn update_page(&self, id: &str, form: PageForm) -> Result<Page, AppError> {
        let id = valid_id(id, NOT_FOUND)?;
        let insert = PageInsert::try_from(form)?;
        let page = self.page_repo.update_page(id, &insert).await?;
        tracing::info!(id, slug = %page.slug, "Page updated");
        Ok(page)
    }

    pub async fn delete_page(&self, id: &str) -> Result<(), AppError> {
        let id = valid_id(id, NOT_FOUND)?;
        self.page_repo.delete_page(id).await?;
        tracing::info!(id, "Page deleted");
        Ok(())
    }
}
