mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;
pub mod shared_repos;
pub mod seed;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, limiter, utils};

use auth::jwt::JwtService;
use limiter::rate_limiter::RateLimiterStore;
use repositories::{
    inquiry::InquiryRepository,
    page::PageRepository,
    scholarship::ScholarshipRepository,
    user::UserRepository,
};
use settings::{AppConfig, FilterOptions};
use shared_repos::SharedRepositories;
use use_cases::{
    auth::AuthHandler,
    contact::ContactHandler,
    dashboard::DashboardHandler,
    pages::PageHandler,
    scholarship_admin::ScholarshipAdminHandler,
    scholarship_directory::ScholarshipDirectory,
};

pub type AppAuthHandler = AuthHandler<dyn UserRepository, JwtService>;
pub type AppDashboardHandler =
    DashboardHandler<dyn ScholarshipRepository, dyn PageRepository, dyn InquiryRepository>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub directory: ScholarshipDirectory<dyn ScholarshipRepository>,
    pub scholarship_admin: ScholarshipAdminHandler<dyn ScholarshipRepository>,
    pub page_handler: PageHandler<dyn PageRepository>,
    pub contact_handler: ContactHandler<dyn InquiryRepository>,
    pub dashboard_handler: AppDashboardHandler,
    pub contact_limiter: RateLimiterStore,
    pub filter_options: FilterOptions,
    pub trust_x_forwarded_for: bool,
}

impl AppState {
    pub fn new(config: &AppConfig, repos: SharedRepositories) -> Self {
        let jwt_service = JwtService::new(config);

        AppState {
            auth_handler: AuthHandler::new(repos.user_repo, jwt_service),
            directory: ScholarshipDirectory::new(repos.scholarship_repo.clone()),
            scholarship_admin: ScholarshipAdminHandler::new(repos.scholarship_repo.clone()),
            page_handler: PageHandler::new(repos.page_repo.clone()),
            contact_handler: ContactHandler::new(repos.inquiry_repo.clone()),
            dashboard_handler: DashboardHandler::new(
                repos.scholarship_repo,
                repos.page_repo,
                repos.inquiry_repo,
            ),
            contact_limiter: RateLimiterStore::per_hour(config.contact_rate_limit_per_hour),
            filter_options: config.filter_options.clone(),
            trust_x_forwarded_for: config.trust_x_forwarded_for,
        }
    }
}
