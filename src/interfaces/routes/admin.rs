use actix_web::web;

use crate::handlers::{auth, contact, pages, scholarships};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(auth::admin_dashboard)
            .service(
                web::resource("/pages")
                    .route(web::get().to(pages::list_pages))
                    .route(web::post().to(pages::create_page))
            )
            .service(
                web::resource("/pages/{page_id}")
                    .route(web::get().to(pages::get_page))
                    .route(web::put().to(pages::update_page))
                    .route(web::delete().to(pages::delete_page))
            )
            .service(
                web::resource("/scholarships")
                    .route(web::get().to(scholarships::admin_list_scholarships))
                    .route(web::post().to(scholarships::create_scholarship))
            )
            .service(
                web::resource("/scholarships/{scholarship_id}")
                    .route(web::get().to(scholarships::admin_get_scholarship))
                    .route(web::put().to(scholarships::update_scholarship))
                    .route(web::delete().to(scholarships::delete_scholarship))
            )
            .service(
                web::resource("/scholarships/{scholarship_id}/notes")
                    .route(web::put().to(scholarships::update_scholarship_notes))
            )
            .service(
                web::resource("/inquiries")
                    .route(web::get().to(contact::list_inquiries))
            )
            .service(
                web::resource("/inquiries/{inquiry_id}")
                    .route(web::get().to(contact::view_inquiry))
                    .route(web::delete().to(contact::delete_inquiry))
            )
            .service(
                web::resource("/inquiries/{inquiry_id}/read")
                    .route(web::post().to(contact::mark_inquiry_read))
            )
            .service(
                web::resource("/inquiries/{inquiry_id}/archive")
                    .route(web::post().to(contact::archive_inquiry))
            )
            .service(
                web::resource("/inquiries/{inquiry_id}/unarchive")
                    .route(web::post().to(contact::unarchive_inquiry))
            )
            .service(
                web::resource("/inquiries/{inquiry_id}/notes")
                    .route(web::put().to(contact::update_inquiry_notes))
            )
    );
}
