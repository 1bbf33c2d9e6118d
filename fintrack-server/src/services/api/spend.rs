use actix_web::web::*;

use crate::handlers::spend;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(resource("/create-schema").route(post().to(spend::create_schema)))
        .service(resource("/create-spend").route(post().to(spend::create_spend)))
        .service(resource("/update-monthly-spend").route(patch().to(spend::update_monthly_spend)))
        .service(resource("/monthly-spend").route(get().to(spend::get_monthly_spend)));
}
