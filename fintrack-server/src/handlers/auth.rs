use actix_web::{web, HttpResponse};
use fintrack_common::db::{self, DbThreadPool};
use fintrack_common::request_io::{CredentialPair, ResponseEnvelope, TokenPair};
use fintrack_common::token::auth_token::{AuthToken, AuthTokenType, NewAuthTokenClaims};
use fintrack_common::validators::Validity;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::oneshot;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::env;
use crate::handlers::{self, error::HttpErrorResponse};
use crate::middleware::auth::{Access, Refresh, VerifiedToken};
use crate::middleware::FromAuthHeader;

pub async fn obtain_tokens(
    db_thread_pool: web::Data<DbThreadPool>,
    credentials: web::Json<CredentialPair>,
) -> Result<HttpResponse, HttpErrorResponse> {
    const INCORRECT_CREDENTIALS_MSG: &str = "Incorrect unique ID or PIN";

    if let Validity::Invalid(msg) = credentials.validate_pin() {
        return Err(HttpErrorResponse::InvalidFormat(msg));
    }

    let user_id = credentials.unique_id;
    let pool_ref = db_thread_pool.as_ref().clone();

    let user = match web::block(move || {
        let mut user_dao = db::user::Dao::new(&pool_ref);
        user_dao.get_user_by_uuid(user_id)
    })
    .await?
    {
        Ok(u) => u,
        // Unauthorized rather than not-found to prevent user enumeration
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::Unauthorized(String::from(
                INCORRECT_CREDENTIALS_MSG,
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to get user",
            )));
        }
    };

    let Some(pin_hash) = user.pin_hash else {
        return Err(HttpErrorResponse::Unauthorized(String::from(
            INCORRECT_CREDENTIALS_MSG,
        )));
    };

    let pin = Zeroizing::new(credentials.pin.clone());
    let (sender, receiver) = oneshot::channel();

    rayon::spawn(move || {
        let hash = match argon2_kdf::Hash::from_str(&pin_hash) {
            Ok(h) => h,
            Err(e) => {
                sender.send(Err(e)).expect("Sending to channel failed");
                return;
            }
        };

        let does_pin_match_hash =
            hash.verify_with_secret(pin.as_bytes(), (&env::CONF.hashing_key).into());

        sender
            .send(Ok(does_pin_match_hash))
            .expect("Sending to channel failed");
    });

    match receiver.await? {
        Ok(true) => (),
        Ok(false) => {
            return Err(HttpErrorResponse::Unauthorized(String::from(
                INCORRECT_CREDENTIALS_MSG,
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(String::from(
                "Failed to verify PIN",
            )));
        }
    };

    let token_pair = sign_and_save_token_pair(user.user_uuid, &db_thread_pool).await?;

    Ok(HttpResponse::Ok().json(ResponseEnvelope::succeeded(
        "Authentication successful.",
        Some(handlers::to_json_data(token_pair)?),
    )))
}

pub async fn refresh_tokens(
    db_thread_pool: web::Data<DbThreadPool>,
    token: VerifiedToken<Refresh, FromAuthHeader>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let user_id = token.claims.user_id;
    let raw_token = token.raw_token;

    let pool_ref = db_thread_pool.as_ref().clone();

    let is_blacklisted = match web::block(move || {
        let mut auth_dao = db::auth::Dao::new(&pool_ref);
        auth_dao.is_refresh_token_blacklisted(&raw_token)
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

    let pool_ref = db_thread_pool.as_ref().clone();

    match web::block(move || {
        let mut user_dao = db::user::Dao::new(&pool_ref);
        user_dao.get_user_by_uuid(user_id)
    })
    .await?
    {
        Ok(_) => (),
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::Unauthorized(String::from(
                "User not found",
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to get user",
            )));
        }
    };

    blacklist_latest_token_pair(user_id, &db_thread_pool).await?;

    let token_pair = sign_and_save_token_pair(user_id, &db_thread_pool).await?;

    Ok(HttpResponse::Ok().json(ResponseEnvelope::succeeded(
        "Tokens refreshed.",
        Some(handlers::to_json_data(token_pair)?),
    )))
}

pub async fn logout(
    db_thread_pool: web::Data<DbThreadPool>,
    token: VerifiedToken<Access, FromAuthHeader>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let user = handlers::current_user::resolve(
        token.raw_token,
        token.claims.user_id,
        &db_thread_pool,
    )
    .await?;

    blacklist_latest_token_pair(user.user_uuid, &db_thread_pool).await?;

    Ok(HttpResponse::Ok().json(ResponseEnvelope::succeeded("Logged out.", None)))
}

async fn sign_and_save_token_pair(
    user_id: Uuid,
    db_thread_pool: &DbThreadPool,
) -> Result<TokenPair, HttpErrorResponse> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| HttpErrorResponse::InternalError(String::from("Failed to fetch system time")))?;

    let access_token_claims = NewAuthTokenClaims {
        user_id,
        expiration: (now + env::CONF.access_token_lifetime).as_secs(),
        token_type: AuthTokenType::Access,
    };
    let access_token =
        AuthToken::sign_new(access_token_claims, &env::CONF.access_token_signing_key);

    let refresh_token_claims = NewAuthTokenClaims {
        user_id,
        expiration: (now + env::CONF.refresh_token_lifetime).as_secs(),
        token_type: AuthTokenType::Refresh,
    };
    let refresh_token =
        AuthToken::sign_new(refresh_token_claims, &env::CONF.refresh_token_signing_key);

    let access_token_copy = access_token.clone();
    let refresh_token_copy = refresh_token.clone();
    let pool_ref = db_thread_pool.clone();

    match web::block(move || {
        let mut auth_dao = db::auth::Dao::new(&pool_ref);
        auth_dao.save_token_pair(user_id, &access_token_copy, &refresh_token_copy)
    })
    .await?
    {
        Ok(_) => (),
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to save tokens",
            )));
        }
    };

    Ok(TokenPair {
        access_token,
        refresh_token,
        server_time: now.as_millis(),
    })
}

async fn blacklist_latest_token_pair(
    user_id: Uuid,
    db_thread_pool: &DbThreadPool,
) -> Result<(), HttpErrorResponse> {
    let pool_ref = db_thread_pool.clone();

    match web::block(move || {
        let mut auth_dao = db::auth::Dao::new(&pool_ref);
        let token_pair = auth_dao.get_latest_token_pair(user_id)?;
        auth_dao.blacklist_token_pair(
            user_id,
            &token_pair.access_token,
            &token_pair.refresh_token,
        )
    })
    .await?
    {
        Ok(_) => Ok(()),
        // A user with no saved session has nothing to blacklist
        Err(e) if e.is_not_found() => Ok(()),
        Err(e) => {
            log::error!("{e}");
            Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to blacklist tokens",
            )))
        }
    }
}
