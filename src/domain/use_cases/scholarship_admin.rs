use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::{
        scholarship::{
            Scholarship, ScholarshipCreatedResponse, ScholarshipForm, ScholarshipInsert,
            ScholarshipNotesRequest,
        },
        scholarship_query::{ScholarshipFilter, ScholarshipOrder, ScholarshipPredicate, Window},
        validation::non_blank,
    },
    errors::AppError,
    repositories::scholarship::ScholarshipRepository,
    utils::valid_id::valid_id,
};

const NOT_FOUND: &str = "Scholarship not found";

pub struct ScholarshipAdminHandler<R>
where
    R: ScholarshipRepository + ?Sized,
{
    pub scholarship_repo: Arc<R>,
}

impl<R> ScholarshipAdminHandler<R>
where
    R: ScholarshipRepository + ?Sized,
{
    pub fn new(scholarship_repo: Arc<R>) -> Self {
        ScholarshipAdminHandler { scholarship_repo }
    }

    /// Lists every scholarship, most recently updated first
    pub async fn list_scholarships(&self) -> Result<Vec<Scholarship>, AppError> {
        self.scholarship_repo
            .find(&ScholarshipFilter::new(), ScholarshipOrder::LastUpdatedDesc, Window::all())
            .await
    }

    /// Fetches a scholarship regardless of its active flag or deadline
    pub async fn get_scholarship(&self, id: &str) -> Result<Scholarship, AppError> {
        let id = valid_id(id, NOT_FOUND)?;
        let filter = ScholarshipFilter::new().and(ScholarshipPredicate::IdEquals(id));

        self.scholarship_repo
            .find(&filter, ScholarshipOrder::DeadlineAsc, Window::first(1))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    /// Creates a scholarship from a validated form
    pub async fn create_scholarship(
        &self,
        form: ScholarshipForm,
    ) -> Result<ScholarshipCreatedResponse, AppError> {
        let insert = ScholarshipInsert::try_from(form)?;
        let created = self.scholarship_repo.create(&insert).await?;

        tracing::info!(id = created.id, title = %created.title, "Scholarship created");

        Ok(ScholarshipCreatedResponse {
            id: created.id,
            public_url: format!("/api/v1/scholarships/{}", created.id),
            admin_url: format!("/api/v1/admin/scholarships/{}", created.id),
        })
    }

    /// Replaces every editable field of a scholarship
    pub async fn update_scholarship(
        &self,
        id: &str,
        form: ScholarshipForm,
    ) -> Result<Scholarship, AppError> {
        let id = valid_id(id, NOT_FOUND)?;
        let insert = ScholarshipInsert::try_from(form)?;

        let updated = self.scholarship_repo.update(id, &insert).await?;
        tracing::info!(id, "Scholarship updated");
        Ok(updated)
    }

    pub async fn update_notes(
        &self,
        id: &str,
        request: ScholarshipNotesRequest,
    ) -> Result<Scholarship, AppError> {
        request.validate()?;
        let id = valid_id(id, NOT_FOUND)?;

        self.scholarship_repo.update_notes(id, non_blank(request.admin_notes)).await
    }

    pub async fn delete_scholarship(&self, id: &str) -> Result<(), AppError> {
        let id = valid_id(id, NOT_FOUND)?;
        self.scholarship_repo.delete(id).await?;
        tracing::info!(id, "Scholarship deleted");
        Ok(())
    }
}
