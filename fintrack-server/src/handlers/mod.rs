pub mod auth;
pub mod spend;
pub mod user;

pub(crate) fn to_json_data<T: serde::Serialize>(
    data: T,
) -> Result<serde_json::Value, error::HttpErrorResponse> {
    serde_json::to_value(data).map_err(|_| {
        error::HttpErrorResponse::InternalError(String::from("Failed to serialize response"))
    })
}

pub mod current_user {
    use actix_web::web;
    use fintrack_common::db::{self, DbThreadPool};
    use fintrack_common::models::user::User;
    use uuid::Uuid;

    use super::error::HttpErrorResponse;

    /// Resolves the user an access token belongs to. The token's signature and expiry
    /// have already been checked; this rejects blacklisted tokens and tokens whose
    /// subject no longer exists.
    pub async fn resolve(
        token: String,
        user_id: Uuid,
        db_thread_pool: &DbThreadPool,
    ) -> Result<User, HttpErrorResponse> {
        let pool_ref = db_thread_pool.clone();

        let is_blacklisted = match web::block(move || {
            let mut auth_dao = db::auth::Dao::new(&pool_ref);
            auth_dao.is_access_token_blacklisted(&token)
        })
        .await?
        {
            Ok(b) => b,
            Err(e) => {
                log::error!("{e}");
                return Err(HttpErrorResponse::DatabaseError(String::from(
                    "Failed to check token blacklist",
                )));
            }
        };

        if is_blacklisted {
            return Err(HttpErrorResponse::Unauthorized(String::from(
                "Token has been blacklisted",
            )));
        }

        let pool_ref = db_thread_pool.clone();

        match web::block(move || {
            let mut user_dao = db::user::Dao::new(&pool_ref);
            user_dao.get_user_by_uuid(user_id)
        })
        .await?
        {
            Ok(u) => Ok(u),
            Err(e) if e.is_not_found() => Err(HttpErrorResponse::Unauthorized(String::from(
                "User not found",
            ))),
            Err(e) => {
                log::error!("{e}");
                Err(HttpErrorResponse::DatabaseError(String::from(
                    "Failed to get user",
                )))
            }
        }
    }
}

pub mod error {
    use fintrack_common::token::TokenError;

    use actix_web::http::StatusCode;
    use actix_web::{HttpResponse, HttpResponseBuilder};
    use serde::Serialize;
    use std::fmt;
    use tokio::sync::oneshot;

    #[derive(Debug, Serialize)]
    pub struct ErrorBody {
        pub success: bool,
        pub error_type: &'static str,
        pub message: String,
    }

    #[derive(Debug)]
    pub enum HttpErrorResponse {
        // 400
        ForceInputSameData(String),
        MandatoryInput(String),
        InvalidOperation(String),
        InvalidFormat(String),

        // 401
        Unauthorized(String),

        // 404
        DoesNotExist(String),

        // 409
        AlreadyExists(String),
        AlreadyVerified(String),
        AlreadyFilled(String),

        // 500
        DatabaseError(String),
        InternalError(String),
    }

    impl std::error::Error for HttpErrorResponse {}

    impl fmt::Display for HttpErrorResponse {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let body: ErrorBody = self.into();
            write!(f, "{}: {}", body.error_type, body.message)
        }
    }

    impl From<&HttpErrorResponse> for ErrorBody {
        fn from(resp: &HttpErrorResponse) -> Self {
            let (error_type, message) = match resp {
                HttpErrorResponse::ForceInputSameData(msg) => {
                    ("ENTITY_FORCE_INPUT_SAME_DATA", msg)
                }
                HttpErrorResponse::MandatoryInput(msg) => ("MANDATORY_INPUT", msg),
                HttpErrorResponse::InvalidOperation(msg) => ("INVALID_OPERATION", msg),
                HttpErrorResponse::InvalidFormat(msg) => ("INVALID_FORMAT", msg),
                HttpErrorResponse::Unauthorized(msg) => ("UNAUTHORIZED", msg),
                HttpErrorResponse::DoesNotExist(msg) => ("ENTITY_DOES_NOT_EXIST", msg),
                HttpErrorResponse::AlreadyExists(msg) => ("ENTITY_ALREADY_EXIST", msg),
                HttpErrorResponse::AlreadyVerified(msg) => ("ENTITY_ALREADY_VERIFIED", msg),
                HttpErrorResponse::AlreadyFilled(msg) => ("ENTITY_ALREADY_FILLED", msg),
                HttpErrorResponse::DatabaseError(msg) => ("DATABASE_ERROR", msg),
                HttpErrorResponse::InternalError(msg) => ("SERVICE_ERROR", msg),
            };

            ErrorBody {
                success: false,
                error_type,
                message: message.clone(),
            }
        }
    }

    impl actix_web::error::ResponseError for HttpErrorResponse {
        fn error_response(&self) -> HttpResponse {
            HttpResponseBuilder::new(self.status_code()).json(ErrorBody::from(self))
        }

        fn status_code(&self) -> StatusCode {
            match *self {
                HttpErrorResponse::ForceInputSameData(_)
                | HttpErrorResponse::MandatoryInput(_)
                | HttpErrorResponse::InvalidOperation(_)
                | HttpErrorResponse::InvalidFormat(_) => StatusCode::BAD_REQUEST,
                HttpErrorResponse::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                HttpErrorResponse::DoesNotExist(_) => StatusCode::NOT_FOUND,
                HttpErrorResponse::AlreadyExists(_)
                | HttpErrorResponse::AlreadyVerified(_)
                | HttpErrorResponse::AlreadyFilled(_) => StatusCode::CONFLICT,
                HttpErrorResponse::DatabaseError(_) | HttpErrorResponse::InternalError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        }
    }

    impl From<actix_web::error::BlockingError> for HttpErrorResponse {
        fn from(_err: actix_web::error::BlockingError) -> Self {
            HttpErrorResponse::InternalError(String::from("Actix thread pool failure"))
        }
    }

    impl From<oneshot::error::RecvError> for HttpErrorResponse {
        fn from(_err: oneshot::error::RecvError) -> Self {
            HttpErrorResponse::InternalError(String::from("Rayon thread pool failure"))
        }
    }

    impl From<TokenError> for HttpErrorResponse {
        fn from(err: TokenError) -> Self {
            match err {
                TokenError::TokenInvalid => {
                    HttpErrorResponse::Unauthorized(String::from("Invalid token"))
                }
                TokenError::TokenExpired => {
                    HttpErrorResponse::Unauthorized(String::from("Token expired"))
                }
                TokenError::TokenMissing => {
                    HttpErrorResponse::Unauthorized(String::from("Missing token"))
                }
                TokenError::WrongTokenType => {
                    HttpErrorResponse::Unauthorized(String::from("Wrong token type"))
                }
            }
        }
    }

}
