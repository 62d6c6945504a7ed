use std::sync::Arc;

use crate::repositories::{
    inquiry::InquiryRepository,
    memory::MemoryStore,
    page::PageRepository,
    scholarship::ScholarshipRepository,
    sqlx_repo::{SqlxInquiryRepo, SqlxPageRepo, SqlxScholarshipRepo, SqlxUserRepo},
    user::UserRepository,
};


#[derive(Clone)]
pub struct SharedRepositories {
    pub user_repo: Arc<dyn UserRepository>,
    pub scholarship_repo: Arc<dyn ScholarshipRepository>,
    pub page_repo: Arc<dyn PageRepository>,
    pub inquiry_repo: Arc<dyn InquiryRepository>,
}

impl SharedRepositories {
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            user_repo: Arc::new(SqlxUserRepo::new(pool.clone())),
            scholarship_repo: Arc::new(SqlxScholarshipRepo::new(pool.clone())),
            page_repo: Arc::new(SqlxPageRepo::new(pool.clone())),
            inquiry_repo: Arc::new(SqlxInquiryRepo::new(pool)),
        }
    }

    /// Every repository backed by the same process-local store.
    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        SharedRepositories {
            user_repo: store.clone(),
            scholarship_repo: store.clone(),
            page_repo: store.clone(),
            inquiry_repo: store,
        }
    }
}
