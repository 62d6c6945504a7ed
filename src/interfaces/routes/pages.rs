use actix_web::web;

use crate::handlers::pages;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/pages/{slug}")
            .route(web::get().to(pages::get_public_page))
    );
}
