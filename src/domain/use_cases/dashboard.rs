use std::sync::Arc;

use chrono::Utc;

use crate::{
    entities::{
        dashboard::{DashboardStats, RECENT_ITEMS},
        scholarship_query::{ScholarshipFilter, ScholarshipOrder, Window},
    },
    errors::AppError,
    repositories::{
        inquiry::InquiryRepository, page::PageRepository, scholarship::ScholarshipRepository,
    },
};

pub struct DashboardHandler<S, P, I>
where
    S: ScholarshipRepository + ?Sized,
    P: PageRepository + ?Sized,
    I: InquiryRepository + ?Sized,
{
    pub scholarship_repo: Arc<S>,
    pub page_repo: Arc<P>,
    pub inquiry_repo: Arc<I>,
}

impl<S, P, I> DashboardHandler<S, P, I>
where
    S: ScholarshipRepository + ?Sized,
    P: PageRepository + ?Sized,
    I: InquiryRepository + ?Sized,
{
    pub fn new(scholarship_repo: Arc<S>, page_repo: Arc<P>, inquiry_repo: Arc<I>) -> Self {
        DashboardHandler { scholarship_repo, page_repo, inquiry_repo }
    }

    /// Aggregates counts and recent activity for the back-office landing page
    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let all = ScholarshipFilter::new();
        let listable = ScholarshipFilter::listable(Utc::now());

        let recent_scholarships = self.scholarship_repo
            .find(&all, ScholarshipOrder::CreatedAtDesc, Window::first(RECENT_ITEMS))
            .await?;

        Ok(DashboardStats {
            total_scholarships: self.scholarship_repo.count(&all).await?,
            active_scholarships: self.scholarship_repo.count(&listable).await?,
            total_pages: self.page_repo.count_pages(false).await?,
            published_pages: self.page_repo.count_pages(true).await?,
            total_inquiries: self.inquiry_repo.count_inquiries(false).await?,
            unread_inquiries: self.inquiry_repo.count_inquiries(true).await?,
            recent_inquiries: self.inquiry_repo.recent_inquiries(RECENT_ITEMS).await?,
            recent_scholarships: recent_scholarships.iter().map(|s| s.to_summary()).collect(),
        })
    }
}
