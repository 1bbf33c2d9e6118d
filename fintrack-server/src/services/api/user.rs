use actix_web::web::*;

use crate::handlers::user;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/users")
            .service(resource("/get-user").route(get().to(user::get_user)))
            .service(resource("/detail/full-name").route(get().to(user::detail_full_name)))
            .service(resource("/detail/phone-number").route(get().to(user::detail_phone_number)))
            .service(
                resource("/wrong-phone-number/{unique_id}")
                    .route(patch().to(user::wrong_phone_number)),
            ),
    )
    .service(scope("/change").service(resource("/full-name").route(patch().to(user::change_full_name))))
    .service(scope("/verify").service(resource("/email").route(post().to(user::verify_email))));
}
