use actix_web::web::*;

use crate::handlers::auth;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/auth")
            .service(resource("/token").route(post().to(auth::obtain_tokens)))
            .service(resource("/refresh").route(post().to(auth::refresh_tokens)))
            .service(resource("/logout").route(post().to(auth::logout))),
    );
}
