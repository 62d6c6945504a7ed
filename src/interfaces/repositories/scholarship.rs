use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use crate::{
    entities::{
        scholarship::{Scholarship, ScholarshipInsert},
        scholarship_query::{ScholarshipFilter, ScholarshipOrder, ScholarshipPredicate, Window},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxScholarshipRepo,
};

/// Record store for scholarships. `find` and `count` must agree on the
/// filtered set for a given snapshot; ordering only compares the listed key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScholarshipRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn find(
        &self,
        filter: &ScholarshipFilter,
        order: ScholarshipOrder,
        window: Window,
    ) -> Result<Vec<Scholarship>, AppError>;
    async fn count(&self, filter: &ScholarshipFilter) -> Result<i64, AppError>;
    async fn create(&self, insert: &ScholarshipInsert) -> Result<Scholarship, AppError>;
    async fn update(&self, id: i64, insert: &ScholarshipInsert) -> Result<Scholarship, AppError>;
    async fn update_notes(&self, id: i64, notes: Option<String>) -> Result<Scholarship, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

impl SqlxScholarshipRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxScholarshipRepo { pool }
    }
}

/// Escapes LIKE metacharacters so user input only ever matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, predicate: &ScholarshipPredicate) {
    match predicate {
        ScholarshipPredicate::Active => {
            qb.push("is_active = TRUE");
        }
        ScholarshipPredicate::DeadlineOnOrAfter(now) => {
            qb.push("deadline >= ").push_bind(*now);
        }
        ScholarshipPredicate::Search(term) => {
            let pattern = format!("%{}%", escape_like(term));
            qb.push("(title ILIKE ").push_bind(pattern.clone())
                .push(" OR description ILIKE ").push_bind(pattern.clone())
                .push(" OR country ILIKE ").push_bind(pattern.clone())
                .push(" OR field_of_study ILIKE ").push_bind(pattern)
                .push(")");
        }
        ScholarshipPredicate::CountryEquals(country) => {
            qb.push("country = ").push_bind(country.clone());
        }
        ScholarshipPredicate::FieldOfStudyEquals(field) => {
            qb.push("field_of_study = ").push_bind(field.clone());
        }
        ScholarshipPredicate::DegreeLevelEquals(level) => {
            qb.push("degree_level = ").push_bind(level.clone());
        }
        ScholarshipPredicate::IdEquals(id) => {
            qb.push("id = ").push_bind(*id);
        }
        ScholarshipPredicate::IdNotEquals(id) => {
            qb.push("id <> ").push_bind(*id);
        }
        ScholarshipPredicate::CountryOrFieldOfStudy { country, field_of_study } => {
            qb.push("(country = ").push_bind(country.clone())
                .push(" OR field_of_study = ").push_bind(field_of_study.clone())
                .push(")");
        }
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ScholarshipFilter) {
    for (i, predicate) in filter.predicates().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        push_predicate(qb, predicate);
    }
}

fn order_clause(order: ScholarshipOrder) -> &'static str {
    match order {
        ScholarshipOrder::DeadlineAsc => " ORDER BY deadline ASC",
        ScholarshipOrder::DeadlineDesc => " ORDER BY deadline DESC",
        ScholarshipOrder::AmountAsc => " ORDER BY amount ASC",
        ScholarshipOrder::AmountDesc => " ORDER BY amount DESC",
        ScholarshipOrder::CountryAsc => " ORDER BY country ASC",
        ScholarshipOrder::FeaturedThenDeadline => " ORDER BY is_featured DESC, deadline ASC",
        ScholarshipOrder::LastUpdatedDesc => " ORDER BY last_updated DESC",
        ScholarshipOrder::CreatedAtDesc => " ORDER BY created_at DESC",
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Scholarship {} not found", id))
}

#[async_trait]
impl ScholarshipRepository for SqlxScholarshipRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn find(
        &self,
        filter: &ScholarshipFilter,
        order: ScholarshipOrder,
        window: Window,
    ) -> Result<Vec<Scholarship>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM scholarships");
        push_filter(&mut qb, filter);
        qb.push(order_clause(order));
        if let Some(limit) = window.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }
        if window.offset > 0 {
            qb.push(" OFFSET ").push_bind(window.offset);
        }

        let rows = qb.build_query_as::<Scholarship>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn count(&self, filter: &ScholarshipFilter) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM scholarships");
        push_filter(&mut qb, filter);

        let count = qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, insert: &ScholarshipInsert) -> Result<Scholarship, AppError> {
        let scholarship = sqlx::query_as::<_, Scholarship>(
            r#"
            INSERT INTO scholarships (
                title, description, country, field_of_study, degree_level,
                deadline, amount, currency, eligibility, required_documents,
                application_url, official_website, is_active, is_featured,
                additional_info, admin_notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(&insert.title)
        .bind(&insert.description)
        .bind(&insert.country)
        .bind(&insert.field_of_study)
        .bind(&insert.degree_level)
        .bind(insert.deadline)
        .bind(insert.amount)
        .bind(&insert.currency)
        .bind(&insert.eligibility)
        .bind(&insert.required_documents)
        .bind(&insert.application_url)
        .bind(&insert.official_website)
        .bind(insert.is_active)
        .bind(insert.is_featured)
        .bind(&insert.additional_info)
        .bind(&insert.admin_notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(scholarship)
    }

    async fn update(&self, id: i64, insert: &ScholarshipInsert) -> Result<Scholarship, AppError> {
        sqlx::query_as::<_, Scholarship>(
            r#"
            UPDATE scholarships SET
                title = $2, description = $3, country = $4, field_of_study = $5,
                degree_level = $6, deadline = $7, amount = $8, currency = $9,
                eligibility = $10, required_documents = $11, application_url = $12,
                official_website = $13, is_active = $14, is_featured = $15,
                additional_info = $16, admin_notes = $17, last_updated = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&insert.title)
        .bind(&insert.description)
        .bind(&insert.country)
        .bind(&insert.field_of_study)
        .bind(&insert.degree_level)
        .bind(insert.deadline)
        .bind(insert.amount)
        .bind(&insert.currency)
        .bind(&insert.eligibility)
        .bind(&insert.required_documents)
        .bind(&insert.application_url)
        .bind(&insert.official_website)
        .bind(insert.is_active)
        .bind(insert.is_featured)
        .bind(&insert.additional_info)
        .bind(&insert.admin_notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    async fn update_notes(&self, id: i64, notes: Option<String>) -> Result<Scholarship, AppError> {
        sqlx::query_as::<_, Scholarship>(
            "UPDATE scholarships SET admin_notes = $2, last_updated = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM scholarships WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
