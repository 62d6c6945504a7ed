use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::validation::{
    new_validation_error, non_blank, validate_not_blank, validate_slug, validate_url,
};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_SLUG_LENGTH: u64 = 200;
const MAX_TITLE_LENGTH: u64 = 500;
const MAX_HERO_URL_LENGTH: u64 = 1000;
const MAX_SEO_LENGTH: u64 = 500;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Page {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub hero_image_url: Option<String>,
    pub content_html: String,
    pub is_published: bool,
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PageInsert {
    pub slug: String,
    pub title: String,
    pub hero_image_url: Option<String>,
    pub content_html: String,
    pub is_published: bool,
    pub seo_description: Option<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PublicPage {
    pub slug: String,
    pub title: String,
    pub hero_image_url: Option<String>,
    pub content_html: String,
    pub seo_description: Option<String>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PageListResponse {
    pub pages: Vec<Page>,
    pub total: usize,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Create or replace a page. A missing slug is derived from the title.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PageForm {
    #[validate(length(max = MAX_SLUG_LENGTH), custom(function = "validate_slug"))]
    pub slug: Option<String>,

    #[validate(
        length(min = 1, max = MAX_TITLE_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = MAX_HERO_URL_LENGTH), custom(function = "validate_url"))]
    pub hero_image_url: Option<String>,

    #[validate(custom(function = "validate_not_blank"))]
    pub content_html: String,

    #[serde(default)]
    pub is_published: bool,

    #[validate(length(max = MAX_SEO_LENGTH))]
    pub seo_description: Option<String>,
}

impl TryFrom<PageForm> for PageInsert {
    type Error = validator::ValidationErrors;

    fn try_from(mut form: PageForm) -> Result<Self, Self::Error> {
        // An empty slug means "derive it", not "invalid slug"
        form.slug = non_blank(form.slug);
        form.validate()?;

        let title = form.title.trim().to_string();
        let slug = form.slug.unwrap_or_else(|| slug::slugify(&title));
        if slug.is_empty() {
            let mut errors = validator::ValidationErrors::new();
            errors.add("slug", new_validation_error("slug_empty", "Title does not yield a usable slug"));
            return Err(errors);
        }

        Ok(PageInsert {
            slug,
            title,
            hero_image_url: non_blank(form.hero_image_url),
            content_html: form.content_html,
            is_published: form.is_published,
            seo_description: non_blank(form.seo_description),
        })
    }
}
