use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::{
    entities::{
        inquiry::{ContactInquiry, ContactInquiryInsert},
        page::{Page, PageInsert},
        scholarship::{Scholarship, ScholarshipInsert},
        scholarship_query::{ScholarshipFilter, ScholarshipOrder, Window},
        user::{User, UserInsert},
    },
    errors::AppError,
    repositories::{
        inquiry::InquiryRepository, page::PageRepository,
        scholarship::ScholarshipRepository, user::UserRepository,
    },
};

#[derive(Default)]
struct Tables {
    scholarships: Vec<Scholarship>,
    pages: Vec<Page>,
    inquiries: Vec<ContactInquiry>,
    users: Vec<User>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Process-local record store. Rows are kept in insertion order, which is
/// also id order; stable sorts leave ties in that order.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully formed scholarship row, keeping its timestamps.
    /// The id is assigned by the store.
    pub fn insert_scholarship(&self, mut scholarship: Scholarship) -> i64 {
        let mut tables = self.tables.write();
        scholarship.id = tables.next_id();
        let id = scholarship.id;
        tables.scholarships.push(scholarship);
        id
    }

    /// Inserts a fully formed inquiry row, keeping its timestamps.
    pub fn insert_inquiry(&self, mut inquiry: ContactInquiry) -> i64 {
        let mut tables = self.tables.write();
        inquiry.id = tables.next_id();
        let id = inquiry.id;
        tables.inquiries.push(inquiry);
        id
    }
}

fn scholarship_from_insert(id: i64, insert: &ScholarshipInsert, now: DateTime<Utc>) -> Scholarship {
    Scholarship {
        id,
        title: insert.title.clone(),
        description: insert.description.clone(),
        country: insert.country.clone(),
        field_of_study: insert.field_of_study.clone(),
        degree_level: insert.degree_level.clone(),
        deadline: insert.deadline,
        amount: insert.amount,
        currency: insert.currency.clone(),
        eligibility: insert.eligibility.clone(),
        required_documents: insert.required_documents.clone(),
        application_url: insert.application_url.clone(),
        official_website: insert.official_website.clone(),
        is_active: insert.is_active,
        is_featured: insert.is_featured,
        additional_info: insert.additional_info.clone(),
        admin_notes: insert.admin_notes.clone(),
        created_at: now,
        last_updated: now,
    }
}

fn page_from_insert(id: i64, insert: &PageInsert, now: DateTime<Utc>) -> Page {
    Page {
        id,
        slug: insert.slug.clone(),
        title: insert.title.clone(),
        hero_image_url: insert.hero_image_url.clone(),
        content_html: insert.content_html.clone(),
        is_published: insert.is_published,
        seo_description: insert.seo_description.clone(),
        created_at: now,
        last_updated: now,
    }
}

fn scholarship_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Scholarship {} not found", id))
}

fn page_not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}

fn inquiry_not_found() -> AppError {
    AppError::NotFound("Inquiry not found".to_string())
}

fn slug_conflict() -> AppError {
    AppError::Conflict("A page with this slug already exists".to_string())
}

#[async_trait]
impl ScholarshipRepository for MemoryStore {
    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn find(
        &self,
        filter: &ScholarshipFilter,
        order: ScholarshipOrder,
        window: Window,
    ) -> Result<Vec<Scholarship>, AppError> {
        let mut matched: Vec<Scholarship> = self.tables.read()
            .scholarships
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();

        matched.sort_by(|a, b| order.compare(a, b));
        Ok(window.apply(matched))
    }

    async fn count(&self, filter: &ScholarshipFilter) -> Result<i64, AppError> {
        let count = self.tables.read()
            .scholarships
            .iter()
            .filter(|s| filter.matches(s))
            .count();
        Ok(count as i64)
    }

    async fn create(&self, insert: &ScholarshipInsert) -> Result<Scholarship, AppError> {
        let mut tables = self.tables.write();
        let id = tables.next_id();
        let scholarship = scholarship_from_insert(id, insert, Utc::now());
        tables.scholarships.push(scholarship.clone());
        Ok(scholarship)
    }

    async fn update(&self, id: i64, insert: &ScholarshipInsert) -> Result<Scholarship, AppError> {
        let mut tables = self.tables.write();
        let row = tables.scholarships
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| scholarship_not_found(id))?;

        let mut updated = scholarship_from_insert(id, insert, Utc::now());
        updated.created_at = row.created_at;
        *row = updated.clone();
        Ok(updated)
    }

    async fn update_notes(&self, id: i64, notes: Option<String>) -> Result<Scholarship, AppError> {
        let mut tables = self.tables.write();
        let row = tables.scholarships
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| scholarship_not_found(id))?;

        row.admin_notes = notes;
        row.last_updated = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.write();
        let before = tables.scholarships.len();
        tables.scholarships.retain(|s| s.id != id);
        if tables.scholarships.len() == before {
            return Err(scholarship_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl PageRepository for MemoryStore {
    async fn list_pages(&self) -> Result<Vec<Page>, AppError> {
        let mut pages = self.tables.read().pages.clone();
        pages.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(pages)
    }

    async fn get_page_by_id(&self, id: i64) -> Result<Option<Page>, AppError> {
        Ok(self.tables.read().pages.iter().find(|p| p.id == id).cloned())
    }

    async fn get_page_by_slug(&self, slug: &str) -> Result<Option<Page>, AppError> {
        Ok(self.tables.read().pages.iter().find(|p| p.slug == slug).cloned())
    }

    async fn create_page(&self, page: &PageInsert) -> Result<Page, AppError> {
        let mut tables = self.tables.write();
        if tables.pages.iter().any(|p| p.slug == page.slug) {
            return Err(slug_conflict());
        }
        let id = tables.next_id();
        let created = page_from_insert(id, page, Utc::now());
        tables.pages.push(created.clone());
        Ok(created)
    }

    async fn update_page(&self, id: i64, page: &PageInsert) -> Result<Page, AppError> {
        let mut tables = self.tables.write();
        if tables.pages.iter().any(|p| p.slug == page.slug && p.id != id) {
            return Err(slug_conflict());
        }
        let row = tables.pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(page_not_found)?;

        let mut updated = page_from_insert(id, page, Utc::now());
        updated.created_at = row.created_at;
        *row = updated.clone();
        Ok(updated)
    }

    async fn delete_page(&self, id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.write();
        let before = tables.pages.len();
        tables.pages.retain(|p| p.id != id);
        if tables.pages.len() == before {
            return Err(page_not_found());
        }
        Ok(())
    }

    async fn count_pages(&self, published_only: bool) -> Result<i64, AppError> {
        let count = self.tables.read()
            .pages
            .iter()
            .filter(|p| !published_only || p.is_published)
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl InquiryRepository for MemoryStore {
    async fn create_inquiry(&self, inquiry: &ContactInquiryInsert) -> Result<ContactInquiry, AppError> {
        let mut tables = self.tables.write();
        let id = tables.next_id();
        let now = Utc::now();
        let created = ContactInquiry {
            id,
            full_name: inquiry.full_name.clone(),
            email_address: inquiry.email_address.clone(),
            phone_number: inquiry.phone_number.clone(),
            subject: inquiry.subject.clone(),
            message: inquiry.message.clone(),
            inquiry_type: inquiry.inquiry_type.clone(),
            is_read: false,
            is_archived: false,
            read_date: None,
            admin_notes: None,
            created_at: now,
            last_updated: now,
        };
        tables.inquiries.push(created.clone());
        Ok(created)
    }

    async fn list_inquiries(&self, include_archived: bool) -> Result<Vec<ContactInquiry>, AppError> {
        let mut inquiries: Vec<ContactInquiry> = self.tables.read()
            .inquiries
            .iter()
            .filter(|i| include_archived || !i.is_archived)
            .cloned()
            .collect();
        inquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(inquiries)
    }

    async fn recent_inquiries(&self, limit: i64) -> Result<Vec<ContactInquiry>, AppError> {
        let mut inquiries = self.list_inquiries(true).await?;
        inquiries.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(inquiries)
    }

    async fn get_inquiry(&self, id: i64) -> Result<Option<ContactInquiry>, AppError> {
        Ok(self.tables.read().inquiries.iter().find(|i| i.id == id).cloned())
    }

    async fn mark_read(&self, id: i64, at: DateTime<Utc>) -> Result<ContactInquiry, AppError> {
        let mut tables = self.tables.write();
        let row = tables.inquiries
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(inquiry_not_found)?;

        if !row.is_read {
            row.is_read = true;
            row.last_updated = Utc::now();
        }
        if row.read_date.is_none() {
            row.read_date = Some(at);
        }
        Ok(row.clone())
    }

    async fn set_archived(&self, id: i64, archived: bool) -> Result<ContactInquiry, AppError> {
        let mut tables = self.tables.write();
        let row = tables.inquiries
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(inquiry_not_found)?;

        row.is_archived = archived;
        row.last_updated = Utc::now();
        Ok(row.clone())
    }

    async fn update_notes(&self, id: i64, notes: Option<String>) -> Result<ContactInquiry, AppError> {
        let mut tables = self.tables.write();
        let row = tables.inquiries
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(inquiry_not_found)?;

        row.admin_notes = notes;
        row.last_updated = Utc::now();
        Ok(row.clone())
    }

    async fn delete_inquiry(&self, id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.write();
        let before = tables.inquiries.len();
        tables.inquiries.retain(|i| i.id != id);
        if tables.inquiries.len() == before {
            return Err(inquiry_not_found());
        }
        Ok(())
    }

    async fn count_inquiries(&self, unread_only: bool) -> Result<i64, AppError> {
        let count = self.tables.read()
            .inquiries
            .iter()
            .filter(|i| !unread_only || (!i.is_read && !i.is_archived))
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().users.iter().find(|u| u.email == email).cloned())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, user: &UserInsert) -> Result<i64, AppError> {
        let mut tables = self.tables.write();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("User with this email already exists".to_string()));
        }
        let id = tables.next_id();
        let now = Utc::now();
        tables.users.push(User {
            id,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            is_admin: user.is_admin,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn count_users(&self) -> Result<u64, AppError> {
        Ok(self.tables.read().users.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        inquiry::fixtures::form as inquiry_form,
        scholarship::fixtures::scholarship,
    };

    #[tokio::test]
    async fn ties_keep_insertion_order() {
        let store = MemoryStore::new();
        for title in ["A", "B", "C"] {
            store.insert_scholarship(scholarship(0, title, 5));
        }

        let rows = store
            .find(&ScholarshipFilter::new(), ScholarshipOrder::CountryAsc, Window::all())
            .await
            .unwrap();
        let titles: Vec<&str> = rows.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() {
        let store = MemoryStore::new();
        let page = PageInsert {
            slug: "faq".into(),
            title: "FAQ".into(),
            hero_image_url: None,
            content_html: "<p>Q</p>".into(),
            is_published: true,
            seo_description: None,
        };
        let first = store.create_page(&page).await.unwrap();
        assert!(matches!(store.create_page(&page).await, Err(AppError::Conflict(_))));

        // Re-saving a page under its own slug is fine
        assert!(store.update_page(first.id, &page).await.is_ok());
    }

    #[tokio::test]
    async fn read_date_is_set_once() {
        let store = MemoryStore::new();
        let insert = ContactInquiryInsert::try_from(inquiry_form("Ada")).unwrap();
        let inquiry = store.create_inquiry(&insert).await.unwrap();

        let first_read = Utc::now();
        let read = store.mark_read(inquiry.id, first_read).await.unwrap();
        assert_eq!(read.read_date, Some(first_read));

        let again = store
            .mark_read(inquiry.id, first_read + chrono::Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(again.read_date, Some(first_read));
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(ScholarshipRepository::delete(&store, 42).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.set_archived(42, true).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.delete_page(42).await, Err(AppError::NotFound(_))));
    }
}
