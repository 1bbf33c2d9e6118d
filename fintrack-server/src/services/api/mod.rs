use actix_web::web::*;

mod auth;
mod spend;
mod user;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.configure(auth::configure)
        .configure(spend::configure)
        .configure(user::configure);
}
