use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    entities::{
        inquiry::{
            ContactInquiry, ContactInquiryCreatedResponse, ContactInquiryForm,
            ContactInquiryInsert, InquiryListResponse, InquiryNotesRequest,
        },
        validation::non_blank,
    },
    errors::AppError,
    repositories::inquiry::InquiryRepository,
    utils::valid_id::valid_id,
};

const NOT_FOUND: &str = "Inquiry not found";

pub struct ContactHandler<R>
where
    R: InquiryRepository + ?Sized,
{
    pub inquiry_repo: Arc<R>,
}

impl<R> ContactHandler<R>
where
    R: InquiryRepository + ?Sized,
{
    pub fn new(inquiry_repo: Arc<R>) -> Self {
        ContactHandler { inquiry_repo }
    }

    /// Handles a public contact-form submission
    pub async fn submit_inquiry(
        &self,
        form: ContactInquiryForm,
    ) -> Result<ContactInquiryCreatedResponse, AppError> {
        let insert = ContactInquiryInsert::try_from(form)?;
        let inquiry = self.inquiry_repo.create_inquiry(&insert).await?;

        tracing::info!(id = inquiry.id, inquiry_type = %inquiry.inquiry_type, "Contact inquiry received");

        Ok(ContactInquiryCreatedResponse {
            id: inquiry.id,
            message: "Thank you for contacting us. We will get back to you soon.".to_string(),
        })
    }

    /// Lists inquiries newest first, optionally including archived ones
    pub async fn list_inquiries(&self, include_archived: bool) -> Result<InquiryListResponse, AppError> {
        let inquiries = self.inquiry_repo.list_inquiries(include_archived).await?;
        let unread = inquiries.iter().filter(|i| !i.is_read).count();

        Ok(InquiryListResponse {
            total: inquiries.len(),
            unread,
            inquiries,
        })
    }

    /// Opening an inquiry in the back-office counts as reading it
    pub async fn view_inquiry(&self, id: &str) -> Result<ContactInquiry, AppError> {
        self.mark_read(id).await
    }

    pub async fn mark_read(&self, id: &str) -> Result<ContactInquiry, AppError> {
        let id = valid_id(id, NOT_FOUND)?;
        self.inquiry_repo.mark_read(id, Utc::now()).await
    }

    pub async fn archive(&self, id: &str) -> Result<ContactInquiry, AppError> {
        let id = valid_id(id, NOT_FOUND)?;
        self.inquiry_repo.set_archived(id, true).await
    }

    pub async fn unarchive(&self, id: &str) -> Result<ContactInquiry, AppError> {
        let id = valid_id(id, NOT_FOUND)?;
        self.inquiry_repo.set_archived(id, false).await
    }

    pub async fn update_notes(
        &self,
        id: &str,
        request: InquiryNotesRequest,
    ) -> Result<ContactInquiry, AppError> {
        request.validate()?;
        let id = valid_id(id, NOT_FOUND)?;
        self.inquiry_repo.update_notes(id, non_blank(request.admin_notes)).await
    }

    pub async fn delete_inquiry(&self, id: &str) -> Result<(), AppError> {
        let id = valid_id(id, NOT_FOUND)?;
        self.inquiry_repo.delete_inquiry(id).await?;
        tracing::info!(id, "Contact inquiry deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::inquiry::fixtures::form;
    use crate::repositories::{inquiry::MockInquiryRepository, memory::MemoryStore};

    fn handler() -> ContactHandler<MemoryStore> {
        ContactHandler::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn submission_is_stored_unread() {
        let handler = handler();
        let created = handler.submit_inquiry(form("Ada Lovelace")).await.unwrap();

        let list = handler.list_inquiries(false).await.unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.unread, 1);
        assert_eq!(list.inquiries[0].id, created.id);
        assert_eq!(list.inquiries[0].inquiry_type, "General");
    }

    #[tokio::test]
    async fn invalid_submission_never_reaches_the_store() {
        let handler = ContactHandler::new(Arc::new(MockInquiryRepository::new()));
        let mut bad = form("Ada");
        bad.email_address = "nope".into();
        assert!(matches!(handler.submit_inquiry(bad).await, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn viewing_marks_read_once() {
        let handler = handler();
        let id = handler.submit_inquiry(form("Ada")).await.unwrap().id.to_string();

        let first = handler.view_inquiry(&id).await.unwrap();
        assert!(first.is_read);
        let read_date = first.read_date;
        assert!(read_date.is_some());

        let second = handler.view_inquiry(&id).await.unwrap();
        assert_eq!(second.read_date, read_date);
    }

    #[tokio::test]
    async fn archived_inquiries_are_hidden_by_default() {
        let handler = handler();
        let id = handler.submit_inquiry(form("Ada")).await.unwrap().id.to_string();
        handler.submit_inquiry(form("Grace")).await.unwrap();

        handler.archive(&id).await.unwrap();
        assert_eq!(handler.list_inquiries(false).await.unwrap().total, 1);
        assert_eq!(handler.list_inquiries(true).await.unwrap().total, 2);

        handler.unarchive(&id).await.unwrap();
        assert_eq!(handler.list_inquiries(false).await.unwrap().total, 2);
    }

    #[tokio::test]
    async fn notes_have_a_length_limit() {
        let handler = handler();
        let id = handler.submit_inquiry(form("Ada")).await.unwrap().id.to_string();

        let too_long = InquiryNotesRequest { admin_notes: Some("n".repeat(501)) };
        assert!(matches!(handler.update_notes(&id, too_long).await, Err(AppError::ValidationError(_))));

        let ok = InquiryNotesRequest { admin_notes: Some("Called back".into()) };
        assert_eq!(handler.update_notes(&id, ok).await.unwrap().admin_notes.as_deref(), Some("Called back"));
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let handler = handler();
        assert!(matches!(handler.view_inquiry("77").await, Err(AppError::NotFound(_))));
        assert!(matches!(handler.delete_inquiry("abc").await, Err(AppError::NotFound(_))));
    }
}
