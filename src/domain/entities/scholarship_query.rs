use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::scholarship::{Scholarship, ScholarshipPublicResponse, ScholarshipSummary};

pub const PAGE_SIZE: i64 = 12;
pub const RELATED_LIMIT: i64 = 3;
pub const FEATURED_LIMIT: i64 = 6;

// ───── Raw listing input ─────────────────────────────────────────────

/// Query string of the public listing, exactly as the client sent it.
/// `page` stays a string so a non-numeric value falls back to page 1
/// instead of failing extraction.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipListQuery {
    pub search: Option<String>,
    pub country: Option<String>,
    pub field_of_study: Option<String>,
    pub degree_level: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
}

/// Normalized listing parameters. Whitespace-only values are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingParams {
    pub search: Option<String>,
    pub country: Option<String>,
    pub field_of_study: Option<String>,
    pub degree_level: Option<String>,
    pub sort: SortKey,
    pub sort_param: Option<String>,
    pub page: i64,
}

impl From<ScholarshipListQuery> for ListingParams {
    fn from(query: ScholarshipListQuery) -> Self {
        let sort_param = present(query.sort).map(|s| s.trim().to_string());

        ListingParams {
            search: present(query.search).map(|s| s.trim().to_string()),
            country: present(query.country),
            field_of_study: present(query.field_of_study),
            degree_level: present(query.degree_level),
            sort: SortKey::from_param(sort_param.as_deref()),
            sort_param,
            page: clamp_page(query.page.as_deref()),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Pages start at 1; anything non-numeric or below 1 becomes 1.
pub fn clamp_page(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(1)
        .max(1)
}

// ───── Sorting ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    AmountDesc,
    AmountAsc,
    DeadlineDesc,
    CountryAsc,
    #[default]
    DeadlineAsc,
}

impl SortKey {
    /// Unknown keys fall back to the soonest deadline first.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("amount_desc") => SortKey::AmountDesc,
            Some("amount_asc") => SortKey::AmountAsc,
            Some("deadline_desc") => SortKey::DeadlineDesc,
            Some("country_asc") => SortKey::CountryAsc,
            _ => SortKey::DeadlineAsc,
        }
    }

    pub fn order(self) -> ScholarshipOrder {
        match self {
            SortKey::AmountDesc => ScholarshipOrder::AmountDesc,
            SortKey::AmountAsc => ScholarshipOrder::AmountAsc,
            SortKey::DeadlineDesc => ScholarshipOrder::DeadlineDesc,
            SortKey::CountryAsc => ScholarshipOrder::CountryAsc,
            SortKey::DeadlineAsc => ScholarshipOrder::DeadlineAsc,
        }
    }
}

/// Orderings a store must support. Only the listed key is compared;
/// ties keep the store's natural retrieval order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScholarshipOrder {
    DeadlineAsc,
    DeadlineDesc,
    AmountAsc,
    AmountDesc,
    CountryAsc,
    FeaturedThenDeadline,
    LastUpdatedDesc,
    CreatedAtDesc,
}

impl ScholarshipOrder {
    pub fn compare(self, a: &Scholarship, b: &Scholarship) -> Ordering {
        match self {
            ScholarshipOrder::DeadlineAsc => a.deadline.cmp(&b.deadline),
            ScholarshipOrder::DeadlineDesc => b.deadline.cmp(&a.deadline),
            ScholarshipOrder::AmountAsc => a.amount.cmp(&b.amount),
            ScholarshipOrder::AmountDesc => b.amount.cmp(&a.amount),
            ScholarshipOrder::CountryAsc => a.country.cmp(&b.country),
            ScholarshipOrder::FeaturedThenDeadline => b.is_featured
                .cmp(&a.is_featured)
                .then_with(|| a.deadline.cmp(&b.deadline)),
            ScholarshipOrder::LastUpdatedDesc => b.last_updated.cmp(&a.last_updated),
            ScholarshipOrder::CreatedAtDesc => b.created_at.cmp(&a.created_at),
        }
    }
}

// ───── Filtering ─────────────────────────────────────────────────────

/// One condition over a scholarship. A filter is a list of these joined by AND.
#[derive(Debug, Clone, PartialEq)]
pub enum ScholarshipPredicate {
    Active,
    DeadlineOnOrAfter(DateTime<Utc>),
    /// Case-insensitive substring of title, description, country or field of study.
    /// The in-memory store folds case with Unicode `to_lowercase`; Postgres uses
    /// `ILIKE`, which follows the database collation. Both agree on ASCII input.
    Search(String),
    CountryEquals(String),
    FieldOfStudyEquals(String),
    DegreeLevelEquals(String),
    IdEquals(i64),
    IdNotEquals(i64),
    CountryOrFieldOfStudy { country: String, field_of_study: String },
}

impl ScholarshipPredicate {
    pub fn matches(&self, s: &Scholarship) -> bool {
        match self {
            ScholarshipPredicate::Active => s.is_active,
            ScholarshipPredicate::DeadlineOnOrAfter(now) => s.deadline >= *now,
            ScholarshipPredicate::Search(term) => {
                let needle = term.to_lowercase();
                [&s.title, &s.description, &s.country, &s.field_of_study]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            ScholarshipPredicate::CountryEquals(country) => &s.country == country,
            ScholarshipPredicate::FieldOfStudyEquals(field) => &s.field_of_study == field,
            ScholarshipPredicate::DegreeLevelEquals(level) => &s.degree_level == level,
            ScholarshipPredicate::IdEquals(id) => s.id == *id,
            ScholarshipPredicate::IdNotEquals(id) => s.id != *id,
            ScholarshipPredicate::CountryOrFieldOfStudy { country, field_of_study } => {
                &s.country == country || &s.field_of_study == field_of_study
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScholarshipFilter {
    predicates: Vec<ScholarshipPredicate>,
}

impl ScholarshipFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: ScholarshipPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn and_if(self, value: Option<&str>, make: fn(String) -> ScholarshipPredicate) -> Self {
        match value {
            Some(v) => self.and(make(v.to_string())),
            None => self,
        }
    }

    pub fn predicates(&self) -> &[ScholarshipPredicate] {
        &self.predicates
    }

    /// Empty filters match everything.
    pub fn matches(&self, s: &Scholarship) -> bool {
        self.predicates.iter().all(|p| p.matches(s))
    }

    /// Active and not yet past the deadline.
    pub fn listable(now: DateTime<Utc>) -> Self {
        Self::new()
            .and(ScholarshipPredicate::Active)
            .and(ScholarshipPredicate::DeadlineOnOrAfter(now))
    }

    pub fn listing(params: &ListingParams, now: DateTime<Utc>) -> Self {
        Self::listable(now)
            .and_if(params.search.as_deref(), ScholarshipPredicate::Search)
            .and_if(params.country.as_deref(), ScholarshipPredicate::CountryEquals)
            .and_if(params.field_of_study.as_deref(), ScholarshipPredicate::FieldOfStudyEquals)
            .and_if(params.degree_level.as_deref(), ScholarshipPredicate::DegreeLevelEquals)
    }

    /// Detail lookups ignore the deadline: expired but active records stay reachable by id.
    pub fn active_by_id(id: i64) -> Self {
        Self::new()
            .and(ScholarshipPredicate::IdEquals(id))
            .and(ScholarshipPredicate::Active)
    }

    /// Related records skip the deadline check as well.
    pub fn related_to(s: &Scholarship) -> Self {
        Self::new()
            .and(ScholarshipPredicate::Active)
            .and(ScholarshipPredicate::IdNotEquals(s.id))
            .and(ScholarshipPredicate::CountryOrFieldOfStudy {
                country: s.country.clone(),
                field_of_study: s.field_of_study.clone(),
            })
    }
}

// ───── Windowing ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: Option<i64>,
}

impl Window {
    pub fn all() -> Self {
        Window { offset: 0, limit: None }
    }

    pub fn first(limit: i64) -> Self {
        Window { offset: 0, limit: Some(limit) }
    }

    /// Window of the given 1-based page. Huge pages saturate instead of overflowing.
    pub fn page(page: i64, page_size: i64) -> Self {
        Window {
            offset: page.max(1).saturating_sub(1).saturating_mul(page_size),
            limit: Some(page_size),
        }
    }

    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let iter = items.into_iter().skip(offset);
        match self.limit {
            Some(limit) => iter.take(usize::try_from(limit).unwrap_or(0)).collect(),
            None => iter.collect(),
        }
    }
}

pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
    if total_count <= 0 {
        0
    } else {
        (total_count + page_size - 1) / page_size
    }
}

// ───── Results ───────────────────────────────────────────────────────

/// Active filter state, echoed back so clients can rebuild links. Keys
/// match the listing's query parameter names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilters {
    pub search: Option<String>,
    pub country: Option<String>,
    pub field_of_study: Option<String>,
    pub degree_level: Option<String>,
    pub sort: Option<String>,
}

impl From<&ListingParams> for ListingFilters {
    fn from(params: &ListingParams) -> Self {
        ListingFilters {
            search: params.search.clone(),
            country: params.country.clone(),
            field_of_study: params.field_of_study.clone(),
            degree_level: params.degree_level.clone(),
            sort: params.sort_param.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PagedScholarships {
    pub items: Vec<ScholarshipSummary>,
    pub total_count: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
    pub filters: ListingFilters,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScholarshipDetail {
    pub scholarship: ScholarshipPublicResponse,
    pub related: Vec<ScholarshipSummary>,
}
