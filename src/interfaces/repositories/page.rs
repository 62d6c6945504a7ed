use async_trait::async_trait;
use std::borrow::Cow;

use crate::{
    entities::page::{Page, PageInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxPageRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// All pages, most recently updated first
    async fn list_pages(&self) -> Result<Vec<Page>, AppError>;
    async fn get_page_by_id(&self, id: i64) -> Result<Option<Page>, AppError>;
    async fn get_page_by_slug(&self, slug: &str) -> Result<Option<Page>, AppError>;
    async fn create_page(&self, page: &PageInsert) -> Result<Page, AppError>;
    async fn update_page(&self, id: i64, page: &PageInsert) -> Result<Page, AppError>;
    async fn delete_page(&self, id: i64) -> Result<(), AppError>;
    async fn count_pages(&self, published_only: bool) -> Result<i64, AppError>;
}

impl SqlxPageRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxPageRepo { pool }
    }
}

fn map_slug_conflict(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
            AppError::Conflict("A page with this slug already exists".to_string())
        }
        _ => AppError::from(e),
    }
}

#[async_trait]
impl PageRepository for SqlxPageRepo {
    async fn list_pages(&self) -> Result<Vec<Page>, AppError> {
        let pages = sqlx::query_as::<_, Page>("SELECT * FROM pages ORDER BY last_updated DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(pages)
    }

    async fn get_page_by_id(&self, id: i64) -> Result<Option<Page>, AppError> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_page_by_slug(&self, slug: &str) -> Result<Option<Page>, AppError> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create_page(&self, page: &PageInsert) -> Result<Page, AppError> {
        sqlx::query_as::<_, Page>(
            r#"
            INSERT INTO pages (slug, title, hero_image_url, content_html, is_published, seo_description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&page.slug)
        .bind(&page.title)
        .bind(&page.hero_image_url)
        .bind(&page.content_html)
        .bind(page.is_published)
        .bind(&page.seo_description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_slug_conflict)
    }

    async fn update_page(&self, id: i64, page: &PageInsert) -> Result<Page, AppError> {
        sqlx::query_as::<_, Page>(
            r#"
            UPDATE pages SET
                slug = $2, title = $3, hero_image_url = $4, content_html = $5,
                is_published = $6, seo_description = $7, last_updated = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&page.slug)
        .bind(&page.title)
        .bind(&page.hero_image_url)
        .bind(&page.content_html)
        .bind(page.is_published)
        .bind(&page.seo_description)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_slug_conflict)?
        .ok_or_else(|| AppError::NotFound("Page not found".to_string()))
    }

    async fn delete_page(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Page not found".to_string()));
        }
        Ok(())
    }

    async fn count_pages(&self, published_only: bool) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM pages WHERE ($1 = FALSE OR is_published = TRUE)",
        )
        .bind(published_only)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
