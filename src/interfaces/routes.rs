use actix_web::web;

use crate::handlers::{home, system};

mod admin;
mod auth;
mod contact;
mod json_error;
mod pages;
mod scholarships;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home::home);

    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(system::health_check))
            .route("/home", web::get().to(home::featured))
            .configure(scholarships::config_routes)
            .configure(pages::config_routes)
            .configure(contact::config_routes)
            .configure(auth::config_routes)
            .configure(admin::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
