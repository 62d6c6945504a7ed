use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::validation::{non_blank, validate_not_blank, validate_phone};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_NAME_LENGTH: u64 = 100;
const MAX_EMAIL_LENGTH: u64 = 100;
const MAX_PHONE_LENGTH: u64 = 20;
const MAX_SUBJECT_LENGTH: u64 = 200;
const MAX_MESSAGE_LENGTH: u64 = 5000;
const MAX_TYPE_LENGTH: u64 = 50;
pub const MAX_INQUIRY_NOTES_LENGTH: u64 = 500;
pub const DEFAULT_INQUIRY_TYPE: &str = "General";

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ContactInquiry {
    pub id: i64,
    pub full_name: String,
    pub email_address: String,
    pub phone_number: Option<String>,
    pub subject: String,
    pub message: String,
    pub inquiry_type: String,
    pub is_read: bool,
    pub is_archived: bool,
    pub read_date: Option<DateTime<Utc>>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ContactInquiryInsert {
    pub full_name: String,
    pub email_address: String,
    pub phone_number: Option<String>,
    pub subject: String,
    pub message: String,
    pub inquiry_type: String,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ContactInquiryCreatedResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct InquiryListResponse {
    pub inquiries: Vec<ContactInquiry>,
    pub total: usize,
    pub unread: usize,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactInquiryForm {
    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub full_name: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = MAX_EMAIL_LENGTH)
    )]
    pub email_address: String,

    #[validate(length(max = MAX_PHONE_LENGTH), custom(function = "validate_phone"))]
    pub phone_number: Option<String>,

    #[validate(
        length(min = 1, max = MAX_SUBJECT_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub subject: String,

    #[validate(
        length(min = 1, max = MAX_MESSAGE_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub message: String,

    #[validate(length(max = MAX_TYPE_LENGTH))]
    pub inquiry_type: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct InquiryNotesRequest {
    #[validate(length(max = MAX_INQUIRY_NOTES_LENGTH))]
    pub admin_notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InquiryListQuery {
    #[serde(default)]
    pub include_archived: bool,
}

impl TryFrom<ContactInquiryForm> for ContactInquiryInsert {
    type Error = validator::ValidationErrors;

    fn try_from(mut form: ContactInquiryForm) -> Result<Self, Self::Error> {
        form.phone_number = non_blank(form.phone_number);
        form.validate()?;

        Ok(ContactInquiryInsert {
            full_name: form.full_name.trim().to_string(),
            email_address: form.email_address.trim().to_string(),
            phone_number: form.phone_number,
            subject: form.subject.trim().to_string(),
            message: form.message,
            inquiry_type: non_blank(form.inquiry_type)
                .unwrap_or_else(|| DEFAULT_INQUIRY_TYPE.to_string()),
        })
    }
}
