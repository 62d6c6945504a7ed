use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::entities::validation::{
    new_validation_error, non_blank, validate_currency, validate_not_blank, validate_url,
};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_TITLE_LENGTH: u64 = 200;
const MAX_CATEGORY_LENGTH: u64 = 100;
const MAX_DEGREE_LEVEL_LENGTH: u64 = 50;
const MAX_CURRENCY_LENGTH: u64 = 10;
const MAX_URL_LENGTH: u64 = 500;
const MAX_INFO_LENGTH: u64 = 1000;
pub const MAX_SCHOLARSHIP_NOTES_LENGTH: u64 = 1000;
pub const DEFAULT_CURRENCY: &str = "USD";

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Scholarship {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub country: String,
    pub field_of_study: String,
    pub degree_level: String,
    pub deadline: DateTime<Utc>,
    pub amount: Decimal,
    pub currency: String,
    pub eligibility: String,
    pub required_documents: String,
    pub application_url: Option<String>,
    pub official_website: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub additional_info: Option<String>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Scholarship {
    /// Listed publicly only while active and not past its deadline.
    /// A deadline equal to `now` still counts as open.
    pub fn is_listable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.deadline >= now
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.deadline < now
    }

    pub fn to_summary(&self) -> ScholarshipSummary {
        ScholarshipSummary {
            id: self.id,
            title: self.title.clone(),
            country: self.country.clone(),
            field_of_study: self.field_of_study.clone(),
            degree_level: self.degree_level.clone(),
            deadline: self.deadline,
            amount: self.amount,
            currency: self.currency.clone(),
            is_featured: self.is_featured,
        }
    }

    pub fn to_public_response(&self, now: DateTime<Utc>) -> ScholarshipPublicResponse {
        ScholarshipPublicResponse {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            country: self.country.clone(),
            field_of_study: self.field_of_study.clone(),
            degree_level: self.degree_level.clone(),
            deadline: self.deadline,
            amount: self.amount,
            currency: self.currency.clone(),
            eligibility: self.eligibility.clone(),
            required_documents: self.required_documents.clone(),
            application_url: self.application_url.clone(),
            official_website: self.official_website.clone(),
            is_featured: self.is_featured,
            additional_info: self.additional_info.clone(),
            is_expired: self.is_expired_at(now),
            last_updated: self.last_updated,
        }
    }
}

/// Validated column values for an insert or a full update.
#[derive(Debug, Clone)]
pub struct ScholarshipInsert {
    pub title: String,
    pub description: String,
    pub country: String,
    pub field_of_study: String,
    pub degree_level: String,
    pub deadline: DateTime<Utc>,
    pub amount: Decimal,
    pub currency: String,
    pub eligibility: String,
    pub required_documents: String,
    pub application_url: Option<String>,
    pub official_website: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub additional_info: Option<String>,
    pub admin_notes: Option<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ScholarshipSummary {
    pub id: i64,
    pub title: String,
    pub country: String,
    pub field_of_study: String,
    pub degree_level: String,
    pub deadline: DateTime<Utc>,
    pub amount: Decimal,
    pub currency: String,
    pub is_featured: bool,
}

/// Public view of a scholarship; admin notes never leave the back-office.
#[derive(Debug, Clone, Serialize)]
pub struct ScholarshipPublicResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub country: String,
    pub field_of_study: String,
    pub degree_level: String,
    pub deadline: DateTime<Utc>,
    pub amount: Decimal,
    pub currency: String,
    pub eligibility: String,
    pub required_documents: String,
    pub application_url: Option<String>,
    pub official_website: Option<String>,
    pub is_featured: bool,
    pub additional_info: Option<String>,
    pub is_expired: bool,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ScholarshipCreatedResponse {
    pub id: i64,
    pub public_url: String,
    pub admin_url: String,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScholarshipForm {
    #[validate(
        length(min = 1, max = MAX_TITLE_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,

    #[validate(
        length(min = 1, max = MAX_CATEGORY_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub country: String,

    #[validate(
        length(min = 1, max = MAX_CATEGORY_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub field_of_study: String,

    #[validate(
        length(min = 1, max = MAX_DEGREE_LEVEL_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub degree_level: String,

    pub deadline: DateTime<Utc>,

    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,

    #[validate(
        length(max = MAX_CURRENCY_LENGTH),
        custom(function = "validate_currency")
    )]
    pub currency: Option<String>,

    #[validate(custom(function = "validate_not_blank"))]
    pub eligibility: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub required_documents: String,

    #[validate(length(max = MAX_URL_LENGTH), custom(function = "validate_url"))]
    pub application_url: Option<String>,

    #[validate(length(max = MAX_URL_LENGTH), custom(function = "validate_url"))]
    pub official_website: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_featured: bool,

    #[validate(length(max = MAX_INFO_LENGTH))]
    pub additional_info: Option<String>,

    #[validate(length(max = MAX_SCHOLARSHIP_NOTES_LENGTH))]
    pub admin_notes: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct ScholarshipNotesRequest {
    #[validate(length(max = MAX_SCHOLARSHIP_NOTES_LENGTH))]
    pub admin_notes: Option<String>,
}

pub fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() {
        return Err(new_validation_error("negative_amount", "Amount cannot be negative"));
    }
    Ok(())
}

// ───── Conversions ──────────────────────────────────────────────────

impl TryFrom<ScholarshipForm> for ScholarshipInsert {
    type Error = validator::ValidationErrors;

    fn try_from(form: ScholarshipForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(ScholarshipInsert {
            title: form.title.trim().to_string(),
            description: form.description,
            country: form.country.trim().to_string(),
            field_of_study: form.field_of_study.trim().to_string(),
            degree_level: form.degree_level.trim().to_string(),
            deadline: form.deadline,
            amount: form.amount,
            currency: non_blank(form.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            eligibility: form.eligibility,
            required_documents: form.required_documents,
            application_url: non_blank(form.application_url),
            official_website: non_blank(form.official_website),
            is_active: form.is_active,
            is_featured: form.is_featured,
            additional_info: non_blank(form.additional_info),
            admin_notes: non_blank(form.admin_notes),
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::Duration;

    /// A listable scholarship with sensible defaults, adjusted per test.
    pub fn scholarship(id: i64, title: &str, deadline_in_days: i64) -> Scholarship {
        let now = Utc::now();
        Scholarship {
            id,
            title: title.to_string(),
            description: format!("{title} description"),
            country: "GERMANY".into(),
            field_of_study: "ARTS".into(),
            degree_level: "MASTER'S DEGREE".into(),
            deadline: now + Duration::days(deadline_in_days),
            amount: Decimal::new(10_000, 0),
            currency: DEFAULT_CURRENCY.into(),
            eligibility: "Anyone".into(),
            required_documents: "Transcript".into(),
            application_url: None,
            official_website: None,
            is_active: true,
            is_featured: false,
            additional_info: None,
            admin_notes: None,
            created_at: now,
            last_updated: now,
        }
    }

    pub fn form(title: &str) -> ScholarshipForm {
        ScholarshipForm {
            title: title.to_string(),
            description: "Fully funded".into(),
            country: "IRELAND".into(),
            field_of_study: "ENGINEERING AND TECHNOLOGY".into(),
            degree_level: "DOCTORAL/PHD".into(),
            deadline: Utc::now() + Duration::days(30),
            amount: Decimal::new(25_000, 0),
            currency: None,
            eligibility: "Graduates".into(),
            required_documents: "CV".into(),
            application_url: Some("https://example.org/apply".into()),
            official_website: None,
            is_active: true,
            is_featured: false,
            additional_info: Some("   ".into()),
            admin_notes: None,
        }
    }
}
