use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    entities::{
        scholarship::ScholarshipSummary,
        scholarship_query::{
            total_pages, ListingFilters, ListingParams, PagedScholarships, ScholarshipDetail,
            ScholarshipFilter, ScholarshipListQuery, ScholarshipOrder, Window, FEATURED_LIMIT,
            PAGE_SIZE, RELATED_LIMIT,
        },
    },
    errors::AppError,
    repositories::scholarship::ScholarshipRepository,
    utils::valid_id::valid_id,
};

const NOT_FOUND: &str = "Scholarship not found";

/// Public read side of the scholarship directory: listing, detail and
/// featured lookups. Holds no state beyond the store handle.
pub struct ScholarshipDirectory<R>
where
    R: ScholarshipRepository + ?Sized,
{
    pub scholarship_repo: Arc<R>,
}

impl<R> ScholarshipDirectory<R>
where
    R: ScholarshipRepository + ?Sized,
{
    pub fn new(scholarship_repo: Arc<R>) -> Self {
        ScholarshipDirectory { scholarship_repo }
    }

    /// Filters, sorts and pages the listable scholarships
    pub async fn list_scholarships(
        &self,
        query: ScholarshipListQuery,
    ) -> Result<PagedScholarships, AppError> {
        self.list_scholarships_at(ListingParams::from(query), Utc::now()).await
    }

    pub async fn list_scholarships_at(
        &self,
        params: ListingParams,
        now: DateTime<Utc>,
    ) -> Result<PagedScholarships, AppError> {
        let filter = ScholarshipFilter::listing(&params, now);

        let total_count = self.scholarship_repo.count(&filter).await?;
        let items = self.scholarship_repo
            .find(&filter, params.sort.order(), Window::page(params.page, PAGE_SIZE))
            .await?;

        tracing::debug!(
            total_count,
            page = params.page,
            returned = items.len(),
            "Scholarship listing served"
        );

        Ok(PagedScholarships {
            items: items.iter().map(|s| s.to_summary()).collect(),
            total_count,
            total_pages: total_pages(total_count, PAGE_SIZE),
            current_page: params.page,
            page_size: PAGE_SIZE,
            filters: ListingFilters::from(&params),
        })
    }

    /// Looks up an active scholarship by id together with related records
    pub async fn get_scholarship_detail(&self, id: &str) -> Result<ScholarshipDetail, AppError> {
        self.get_scholarship_detail_at(id, Utc::now()).await
    }

    pub async fn get_scholarship_detail_at(
        &self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<ScholarshipDetail, AppError> {
        let id = valid_id(id, NOT_FOUND)?;

        let scholarship = self.scholarship_repo
            .find(&ScholarshipFilter::active_by_id(id), ScholarshipOrder::DeadlineAsc, Window::first(1))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

        let related = self.scholarship_repo
            .find(
                &ScholarshipFilter::related_to(&scholarship),
                ScholarshipOrder::DeadlineAsc,
                Window::first(RELATED_LIMIT),
            )
            .await?;

        Ok(ScholarshipDetail {
            scholarship: scholarship.to_public_response(now),
            related: related.iter().map(|s| s.to_summary()).collect(),
        })
    }

    /// Listable scholarships for the landing page, featured ones first
    pub async fn featured_scholarships(&self) -> Result<Vec<ScholarshipSummary>, AppError> {
        self.featured_scholarships_at(Utc::now()).await
    }

    pub async fn featured_scholarships_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScholarshipSummary>, AppError> {
        let featured = self.scholarship_repo
            .find(
                &ScholarshipFilter::listable(now),
                ScholarshipOrder::FeaturedThenDeadline,
                Window::first(FEATURED_LIMIT),
            )
            .await?;

        Ok(featured.iter().map(|s| s.to_summary()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;

    use crate::entities::{
        scholarship::{fixtures::scholarship, Scholarship},
        scholarship_query::{ScholarshipPredicate, SortKey},
    };
    use crate::repositories::{memory::MemoryStore, scholarship::MockScholarshipRepository};

    fn params(page: i64) -> ListingParams {
        ListingParams {
            search: None,
            country: None,
            field_of_study: None,
            degree_level: None,
            sort: SortKey::DeadlineAsc,
            sort_param: None,
            page,
        }
    }

    fn seeded(rows: Vec<Scholarship>) -> (Arc<MemoryStore>, ScholarshipDirectory<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        for row in rows {
            store.insert_scholarship(row);
        }
        (store.clone(), ScholarshipDirectory::new(store))
    }

    fn varied(n: i64) -> Vec<Scholarship> {
        let countries = ["USA", "GERMANY", "CANADA"];
        let fields = ["ARTS", "ENGINEERING AND TECHNOLOGY", "LAW, POLITICS, SOCIAL, and SCIENCES"];
        (1..=n)
            .map(|i| {
                let mut s = scholarship(0, &format!("Scholarship {i}"), 1 + (i * 7) % 40);
                s.country = countries[(i % 3) as usize].into();
                s.field_of_study = fields[((i / 3) % 3) as usize].into();
                s.amount = Decimal::new(1_000 * ((i * 13) % 17 + 1), 0);
                s.is_active = i % 5 != 0;
                s
            })
            .collect()
    }

    // ───── Mocked store ─────────────────────────────────────────────

    #[tokio::test]
    async fn listing_asks_store_for_requested_page_and_order() {
        let mut repo = MockScholarshipRepository::new();
        repo.expect_count()
            .withf(|filter| filter.predicates().len() == 3)
            .returning(|_| Ok(30));
        repo.expect_find()
            .withf(|filter, order, window| {
                filter.predicates().contains(&ScholarshipPredicate::CountryEquals("USA".into()))
                    && *order == ScholarshipOrder::AmountDesc
                    && window.offset == 12
                    && window.limit == Some(12)
            })
            .returning(|_, _, _| Ok(vec![]));

        let directory = ScholarshipDirectory::new(Arc::new(repo));
        let mut p = params(2);
        p.country = Some("USA".into());
        p.sort = SortKey::AmountDesc;

        let page = directory.list_scholarships_at(p, Utc::now()).await.unwrap();
        assert_eq!(page.total_count, 30);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let mut repo = MockScholarshipRepository::new();
        repo.expect_count()
            .returning(|_| Err(AppError::InternalError("connection reset".into())));

        let directory = ScholarshipDirectory::new(Arc::new(repo));
        let result = directory.list_scholarships_at(params(1), Utc::now()).await;
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }

    #[tokio::test]
    async fn non_numeric_id_never_reaches_the_store() {
        let repo = MockScholarshipRepository::new();
        let directory = ScholarshipDirectory::new(Arc::new(repo));

        for raw in ["", "abc", "-3"] {
            let result = directory.get_scholarship_detail(raw).await;
            assert!(matches!(result, Err(AppError::NotFound(_))));
        }
    }

    // ───── Listing properties against the in-memory store ──────────

    #[tokio::test]
    async fn fifteen_listable_records_split_twelve_and_three() {
        let rows = (1..=15).map(|i| scholarship(0, &format!("S{i}"), i)).collect();
        let (_, directory) = seeded(rows);
        let now = Utc::now();

        let first = directory.list_scholarships_at(params(1), now).await.unwrap();
        assert_eq!(first.items.len(), 12);
        assert_eq!(first.total_count, 15);
        assert_eq!(first.total_pages, 2);
        assert!(first.items.windows(2).all(|pair| pair[0].deadline <= pair[1].deadline));
        assert_eq!(first.items[0].title, "S1");
        assert_eq!(first.items[11].title, "S12");

        let second = directory.list_scholarships_at(params(2), now).await.unwrap();
        assert_eq!(second.items.len(), 3);
        assert_eq!(second.total_count, 15);

        let third = directory.list_scholarships_at(params(3), now).await.unwrap();
        assert!(third.items.is_empty());
        assert_eq!(third.total_count, 15);
        assert_eq!(third.total_pages, 2);
    }

    #[tokio::test]
    async fn every_item_satisfies_every_active_filter() {
        let (_, directory) = seeded(varied(40));
        let now = Utc::now();
        let mut p = params(1);
        p.country = Some("USA".into());
        p.field_of_study = Some("ARTS".into());

        let page = directory.list_scholarships_at(p.clone(), now).await.unwrap();
        assert!(page.total_count > 0);
        for item in &page.items {
            assert_eq!(item.country, "USA");
            assert_eq!(item.field_of_study, "ARTS");
            assert!(item.deadline >= now);
        }

        let without_field = directory
            .list_scholarships_at(ListingParams { field_of_study: None, ..p }, now)
            .await
            .unwrap();
        assert!(without_field.total_count >= page.total_count);
    }

    #[tokio::test]
    async fn count_does_not_depend_on_page() {
        let (_, directory) = seeded(varied(40));
        let now = Utc::now();
        let mut counts = Vec::new();
        for page in [1, 2, 3, 50] {
            counts.push(directory.list_scholarships_at(params(page), now).await.unwrap().total_count);
        }
        assert!(counts.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(counts[0], 32);
    }

    #[tokio::test]
    async fn sorted_pages_are_monotonic() {
        let (_, directory) = seeded(varied(40));
        let now = Utc::now();

        for (key, check) in [
            (SortKey::AmountDesc, (|a: &ScholarshipSummary, b: &ScholarshipSummary| a.amount >= b.amount) as fn(&_, &_) -> bool),
            (SortKey::AmountAsc, |a, b| a.amount <= b.amount),
            (SortKey::DeadlineDesc, |a, b| a.deadline >= b.deadline),
            (SortKey::DeadlineAsc, |a, b| a.deadline <= b.deadline),
            (SortKey::CountryAsc, |a, b| a.country <= b.country),
        ] {
            let mut all = Vec::new();
            for page in 1..=3 {
                let mut p = params(page);
                p.sort = key;
                all.extend(directory.list_scholarships_at(p, now).await.unwrap().items);
            }
            assert_eq!(all.len(), 32, "{key:?}");
            assert!(all.windows(2).all(|w| check(&w[0], &w[1])), "{key:?}");
        }
    }

    #[tokio::test]
    async fn search_matches_any_text_field() {
        let mut by_title = scholarship(0, "Engineering Excellence Award", 10);
        by_title.field_of_study = "ARTS".into();
        let mut by_field = scholarship(0, "Future Leaders", 10);
        by_field.field_of_study = "ENGINEERING AND TECHNOLOGY".into();
        let mut by_description = scholarship(0, "Open Grant", 10);
        by_description.description = "Open to engineering majors".into();
        let unrelated = scholarship(0, "Music Prize", 10);

        let (_, directory) = seeded(vec![by_title, by_field, by_description, unrelated]);
        let mut p = params(1);
        p.search = Some("Engineering".into());

        let page = directory.list_scholarships_at(p, Utc::now()).await.unwrap();
        let titles: Vec<&str> = page.items.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(page.total_count, 3);
        assert!(!titles.contains(&"Music Prize"));
    }

    #[tokio::test]
    async fn expired_record_is_hidden_from_listing_but_reachable_by_id() {
        let now = Utc::now();
        let mut expired = scholarship(0, "Just Missed", 0);
        expired.deadline = now - Duration::seconds(1);
        let (_, directory) = seeded(vec![expired]);

        let page = directory.list_scholarships_at(params(1), now).await.unwrap();
        assert_eq!(page.total_count, 0);

        let detail = directory.get_scholarship_detail_at("1", now).await.unwrap();
        assert_eq!(detail.scholarship.title, "Just Missed");
        assert!(detail.scholarship.is_expired);
    }

    #[tokio::test]
    async fn deadline_equal_to_now_is_still_listed() {
        let now = Utc::now();
        let mut edge = scholarship(0, "Last Call", 0);
        edge.deadline = now;
        let (_, directory) = seeded(vec![edge]);

        let page = directory.list_scholarships_at(params(1), now).await.unwrap();
        assert_eq!(page.total_count, 1);
    }

    #[tokio::test]
    async fn inactive_or_missing_records_are_not_found() {
        let mut inactive = scholarship(0, "Hidden", 10);
        inactive.is_active = false;
        let (_, directory) = seeded(vec![inactive]);

        assert!(matches!(directory.get_scholarship_detail("1").await, Err(AppError::NotFound(_))));
        assert!(matches!(directory.get_scholarship_detail("999").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn related_excludes_self_and_caps_at_three() {
        let mut rows = vec![scholarship(0, "Base", 30)];
        for i in 0..5 {
            let mut r = scholarship(0, &format!("Same country {i}"), 20 - i);
            r.field_of_study = "LAW, POLITICS, SOCIAL, and SCIENCES".into();
            rows.push(r);
        }
        let mut other = scholarship(0, "Elsewhere", 1);
        other.country = "CANADA".into();
        other.field_of_study = "LAW, POLITICS, SOCIAL, and SCIENCES".into();
        rows.push(other);

        let (_, directory) = seeded(rows);
        let detail = directory.get_scholarship_detail("1").await.unwrap();

        assert_eq!(detail.related.len(), 3);
        assert!(detail.related.iter().all(|r| r.id != 1));
        assert!(detail.related.iter().all(|r| r.country == "GERMANY" || r.field_of_study == "ARTS"));
        assert!(detail.related.windows(2).all(|w| w[0].deadline <= w[1].deadline));
    }

    #[tokio::test]
    async fn related_includes_expired_records() {
        let base = scholarship(0, "Base", 30);
        let expired_sibling = scholarship(0, "Closed Sibling", -10);
        let (_, directory) = seeded(vec![base, expired_sibling]);

        let detail = directory.get_scholarship_detail("1").await.unwrap();
        assert_eq!(detail.related.len(), 1);
        assert_eq!(detail.related[0].title, "Closed Sibling");
    }

    #[tokio::test]
    async fn featured_come_first_and_are_capped() {
        let mut rows: Vec<Scholarship> = (1..=8).map(|i| scholarship(0, &format!("S{i}"), i)).collect();
        rows[7].is_featured = true;
        let mut expired_featured = scholarship(0, "Expired featured", -1);
        expired_featured.is_featured = true;
        rows.push(expired_featured);

        let (_, directory) = seeded(rows);
        let featured = directory.featured_scholarships().await.unwrap();

        assert_eq!(featured.len(), 6);
        assert_eq!(featured[0].title, "S8");
        assert!(featured.iter().all(|s| s.title != "Expired featured"));
    }

    #[tokio::test]
    async fn filters_are_echoed_back() {
        let (_, directory) = seeded(vec![]);
        let page = directory
            .list_scholarships(ScholarshipListQuery {
                search: Some("  nursing ".into()),
                sort: Some("amount_asc".into()),
                page: Some("abc".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.filters.search.as_deref(), Some("nursing"));
        assert_eq!(page.filters.sort.as_deref(), Some("amount_asc"));
    }
}
