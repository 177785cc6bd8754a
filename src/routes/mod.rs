// Route exports
pub mod discovery;
pub mod relationship;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(discovery::configure)
            .configure(relationship::configure),
    );
}
