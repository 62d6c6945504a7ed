use actix_web::web;

use crate::handlers::scholarships;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/scholarships")
            .service(
                web::resource("")
                    .route(web::get().to(scholarships::list_scholarships))
            )
            .service(
                web::resource("/filters")
                    .route(web::get().to(scholarships::filter_options))
            )
            .service(
                web::resource("/{scholarship_id}")
                    .route(web::get().to(scholarships::get_scholarship))
            )
    );
}
