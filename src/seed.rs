use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::{
    entities::{page::PageInsert, scholarship::ScholarshipInsert, scholarship_query::ScholarshipFilter},
    errors::AppError,
    repositories::{page::PageRepository, scholarship::ScholarshipRepository},
    settings::AppConfig,
    shared_repos::SharedRepositories,
    AppState,
};

/// Seeds the admin account and the default pages, plus sample scholarships
/// when enabled and the directory is empty. Safe to run on every start.
pub async fn seed_defaults(
    config: &AppConfig,
    state: &AppState,
    repos: &SharedRepositories,
) -> Result<(), AppError> {
    state.auth_handler
        .ensure_admin(&config.admin_email, &config.admin_password)
        .await?;

    let mut created_pages = 0;
    for page in default_pages() {
        if repos.page_repo.get_page_by_slug(&page.slug).await?.is_none() {
            repos.page_repo.create_page(&page).await?;
            created_pages += 1;
        }
    }
    if created_pages > 0 {
        tracing::info!(created_pages, "Default pages seeded");
    }

    if config.seed_sample_data && repos.scholarship_repo.count(&ScholarshipFilter::new()).await? == 0 {
        let samples = sample_scholarships();
        for scholarship in &samples {
            repos.scholarship_repo.create(scholarship).await?;
        }
        tracing::info!(count = samples.len(), "Sample scholarships seeded");
    }

    Ok(())
}

fn page(slug: &str, title: &str, content_html: &str, seo_description: Option<&str>) -> PageInsert {
    PageInsert {
        slug: slug.to_string(),
        title: title.to_string(),
        hero_image_url: None,
        content_html: content_html.to_string(),
        is_published: true,
        seo_description: seo_description.map(str::to_string),
    }
}

fn default_pages() -> Vec<PageInsert> {
    vec![
        page(
            "home",
            "Welcome Home",
            "<h1>Welcome</h1><p>This is the home page. Edit it from the back-office.</p>",
            Some("Scholarships and study abroad guidance"),
        ),
        page(
            "faq",
            "Frequently Asked Questions",
            "<h3>How do I apply for a scholarship?</h3>\
             <p>Open a scholarship from the directory and follow its application link. \
             Every scholarship runs its own application process.</p>\
             <h3>What services do you offer?</h3>\
             <p>Admissions support, visa guidance, accommodation advice and relocation help.</p>",
            None,
        ),
        page("privacy-policy", "Privacy Policy", "<h1>Privacy Policy</h1><p>Replace this text.</p>", None),
        page("terms-of-service", "Terms of Service", "<h1>Terms of Service</h1><p>Replace this text.</p>", None),
    ]
}

#[allow(clippy::too_many_arguments)]
fn sample(
    title: &str,
    description: &str,
    country: &str,
    field_of_study: &str,
    degree_level: &str,
    amount: i64,
    currency: &str,
    months_until_deadline: i64,
    website: &str,
    is_featured: bool,
) -> ScholarshipInsert {
    ScholarshipInsert {
        title: title.to_string(),
        description: description.to_string(),
        country: country.to_string(),
        field_of_study: field_of_study.to_string(),
        degree_level: degree_level.to_string(),
        deadline: Utc::now() + Duration::days(30 * months_until_deadline),
        amount: Decimal::from(amount),
        currency: currency.to_string(),
        eligibility: "International applicants holding a qualifying prior degree.".to_string(),
        required_documents: "Application form\nAcademic transcripts\nTwo references\nEnglish test results"
            .to_string(),
        application_url: Some(website.to_string()),
        official_website: Some(website.to_string()),
        is_active: true,
        is_featured,
        additional_info: None,
        admin_notes: None,
    }
}

fn sample_scholarships() -> Vec<ScholarshipInsert> {
    vec![
        sample(
            "Fulbright Foreign Student Program",
            "Government sponsored graduate study exchange in the United States.",
            "USA",
            "ARTS",
            "MASTER'S DEGREE",
            50_000,
            "USD",
            6,
            "https://fulbright.state.gov",
            true,
        ),
        sample(
            "Chevening Scholarships",
            "Fully funded one-year master's study in the United Kingdom.",
            "UNITED KINGDOM",
            "BUSINESS, MANAGEMENT AND ECONOMICS",
            "MASTER'S DEGREE",
            35_000,
            "GBP",
            4,
            "https://www.chevening.org",
            true,
        ),
        sample(
            "DAAD Research Grants",
            "Doctoral research funding at German universities.",
            "GERMANY",
            "ENGINEERING AND TECHNOLOGY",
            "DOCTORAL/PHD",
            15_000,
            "EUR",
            5,
            "https://www.daad.de",
            false,
        ),
        sample(
            "Government of Ireland International Education Scholarship",
            "Stipend and fee waiver for a year of study in Ireland.",
            "IRELAND",
            "HEALTH SCIENCES, MEDICINE, NURSING, PARAMEDIC AND KINESIOLOGY",
            "POSTGRADUATE DIPLOMA",
            10_000,
            "EUR",
            3,
            "https://hea.ie",
            false,
        ),
    ]
}
