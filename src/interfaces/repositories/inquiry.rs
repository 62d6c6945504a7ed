use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    entities::inquiry::{ContactInquiry, ContactInquiryInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxInquiryRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    async fn create_inquiry(&self, inquiry: &ContactInquiryInsert) -> Result<ContactInquiry, AppError>;
    /// Newest first
    async fn list_inquiries(&self, include_archived: bool) -> Result<Vec<ContactInquiry>, AppError>;
    async fn recent_inquiries(&self, limit: i64) -> Result<Vec<ContactInquiry>, AppError>;
    async fn get_inquiry(&self, id: i64) -> Result<Option<ContactInquiry>, AppError>;
    /// Sets `read_date` only on the first read
    async fn mark_read(&self, id: i64, at: DateTime<Utc>) -> Result<ContactInquiry, AppError>;
    async fn set_archived(&self, id: i64, archived: bool) -> Result<ContactInquiry, AppError>;
    async fn update_notes(&self, id: i64, notes: Option<String>) -> Result<ContactInquiry, AppError>;
    async fn delete_inquiry(&self, id: i64) -> Result<(), AppError>;
    async fn count_inquiries(&self, unread_only: bool) -> Result<i64, AppError>;
}

impl SqlxInquiryRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxInquiryRepo { pool }
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Inquiry not found".to_string())
}

#[async_trait]
impl InquiryRepository for SqlxInquiryRepo {
    async fn create_inquiry(&self, inquiry: &ContactInquiryInsert) -> Result<ContactInquiry, AppError> {
        let created = sqlx::query_as::<_, ContactInquiry>(
            r#"
            INSERT INTO contact_inquiries (full_name, email_address, phone_number, subject, message, inquiry_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&inquiry.full_name)
        .bind(&inquiry.email_address)
        .bind(&inquiry.phone_number)
        .bind(&inquiry.subject)
        .bind(&inquiry.message)
        .bind(&inquiry.inquiry_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_inquiries(&self, include_archived: bool) -> Result<Vec<ContactInquiry>, AppError> {
        let inquiries = sqlx::query_as::<_, ContactInquiry>(
            r#"
            SELECT * FROM contact_inquiries
            WHERE ($1 = TRUE OR is_archived = FALSE)
            ORDER BY created_at DESC
            "#,
        )
        .bind(include_archived)
        .fetch_all(&self.pool)
        .await?;

        Ok(inquiries)
    }

    async fn recent_inquiries(&self, limit: i64) -> Result<Vec<ContactInquiry>, AppError> {
        let inquiries = sqlx::query_as::<_, ContactInquiry>(
            "SELECT * FROM contact_inquiries ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(inquiries)
    }

    async fn get_inquiry(&self, id: i64) -> Result<Option<ContactInquiry>, AppError> {
        sqlx::query_as::<_, ContactInquiry>("SELECT * FROM contact_inquiries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn mark_read(&self, id: i64, at: DateTime<Utc>) -> Result<ContactInquiry, AppError> {
        sqlx::query_as::<_, ContactInquiry>(
            r#"
            UPDATE contact_inquiries SET
                is_read = TRUE,
                read_date = COALESCE(read_date, $2),
                last_updated = CASE WHEN is_read THEN last_updated ELSE NOW() END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(not_found)
    }

    async fn set_archived(&self, id: i64, archived: bool) -> Result<ContactInquiry, AppError> {
        sqlx::query_as::<_, ContactInquiry>(
            "UPDATE contact_inquiries SET is_archived = $2, last_updated = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(archived)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(not_found)
    }

    async fn update_notes(&self, id: i64, notes: Option<String>) -> Result<ContactInquiry, AppError> {
        sqlx::query_as::<_, ContactInquiry>(
            "UPDATE contact_inquiries SET admin_notes = $2, last_updated = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(not_found)
    }

    async fn delete_inquiry(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM contact_inquiries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    async fn count_inquiries(&self, unread_only: bool) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM contact_inquiries
            WHERE ($1 = FALSE OR (is_read = FALSE AND is_archived = FALSE))
            "#,
        )
        .bind(unread_only)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
