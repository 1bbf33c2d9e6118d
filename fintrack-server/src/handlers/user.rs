use actix_web::{web, HttpResponse};
use fintrack_common::db::{self, DbThreadPool};
use fintrack_common::otp::Otp;
use fintrack_common::request_io::{
    InputFullName, InputOtp, InputPhoneNumber, OutputFullName, OutputPhoneNumber, OutputUniqueId,
    ResponseEnvelope,
};
use fintrack_common::validators::{self, Validity};
use std::time::SystemTime;
use uuid::Uuid;

use crate::env;
use crate::handlers::{self, error::HttpErrorResponse, to_json_data};
use crate::middleware::auth::{Access, VerifiedToken};
use crate::middleware::FromAuthHeader;

pub async fn get_user(
    db_thread_pool: web::Data<DbThreadPool>,
    query: web::Query<InputPhoneNumber>,
) -> Result<HttpResponse, HttpErrorResponse> {
    if let Validity::Invalid(msg) = validators::validate_phone_number(&query.phone_number) {
        return Err(HttpErrorResponse::InvalidFormat(msg));
    }

    let phone_number = query.phone_number.clone();
    let pool_ref = db_thread_pool.as_ref().clone();

    let user = match web::block(move || {
        let mut user_dao = db::user::Dao::new(&pool_ref);
        user_dao.get_user_by_phone_number(&phone_number)
    })
    .await?
    {
        Ok(u) => u,
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::DoesNotExist(String::from(
                "User not found.",
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to get user",
            )));
        }
    };

    let data = to_json_data(OutputUniqueId {
        unique_id: user.user_uuid,
    })?;

    let message = if user.verified_phone_number {
        "User found."
    } else {
        "User should validate phone number first."
    };

    Ok(HttpResponse::Ok().json(ResponseEnvelope::succeeded(message, Some(data))))
}

pub async fn detail_full_name(
    db_thread_pool: web::Data<DbThreadPool>,
    token: VerifiedToken<Access, FromAuthHeader>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let user = handlers::current_user::resolve(
        token.raw_token,
        token.claims.user_id,
        &db_thread_pool,
    )
    .await?;

    let data = to_json_data(OutputFullName {
        full_name: user.full_name,
    })?;

    Ok(HttpResponse::Ok().json(ResponseEnvelope::succeeded(
        "Extracting account full name info.",
        Some(data),
    )))
}

pub async fn detail_phone_number(
    db_thread_pool: web::Data<DbThreadPool>,
    token: VerifiedToken<Access, FromAuthHeader>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let user = handlers::current_user::resolve(
        token.raw_token,
        token.claims.user_id,
        &db_thread_pool,
    )
    .await?;

    let data = to_json_data(OutputPhoneNumber {
        phone_number: user.phone_number,
        verified_phone_number: user.verified_phone_number,
    })?;

    Ok(HttpResponse::Ok().json(ResponseEnvelope::succeeded(
        "Extracting account phone number info.",
        Some(data),
    )))
}

pub async fn change_full_name(
    db_thread_pool: web::Data<DbThreadPool>,
    token: VerifiedToken<Access, FromAuthHeader>,
    input: web::Json<InputFullName>,
) -> Result<HttpResponse, HttpErrorResponse> {
    if let Validity::Invalid(msg) = validators::validate_full_name(&input.full_name) {
        return Err(HttpErrorResponse::InvalidFormat(msg));
    }

    let user = handlers::current_user::resolve(
        token.raw_token,
        token.claims.user_id,
        &db_thread_pool,
    )
    .await?;

    if user.full_name.as_deref() == Some(&input.full_name) {
        return Err(HttpErrorResponse::ForceInputSameData(String::from(
            "Cannot change name into same name.",
        )));
    }

    let user_id = user.user_uuid;
    let full_name = input.full_name.clone();
    let pool_ref = db_thread_pool.as_ref().clone();

    match web::block(move || {
        let mut user_dao = db::user::Dao::new(&pool_ref);
        user_dao.update_full_name(user_id, &full_name)
    })
    .await?
    {
        Ok(_) => (),
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to change full name",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(ResponseEnvelope::succeeded(
        "User successfully changed full name.",
        None,
    )))
}

pub async fn verify_email(
    db_thread_pool: web::Data<DbThreadPool>,
    token: VerifiedToken<Access, FromAuthHeader>,
    input: web::Json<InputOtp>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let user = handlers::current_user::resolve(
        token.raw_token,
        token.claims.user_id,
        &db_thread_pool,
    )
    .await?;

    let user_id = user.user_uuid;
    let pool_ref = db_thread_pool.as_ref().clone();

    let saved_otp = match web::block(move || {
        let mut auth_dao = db::auth::Dao::new(&pool_ref);
        auth_dao.get_latest_otp(user_id)
    })
    .await?
    {
        Ok(o) => o,
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::DoesNotExist(String::from(
                "Data not found.",
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to get OTP data",
            )));
        }
    };

    if user.email.is_none() {
        return Err(HttpErrorResponse::MandatoryInput(String::from(
            "User should add email first.",
        )));
    }

    if user.verified_email {
        return Err(HttpErrorResponse::AlreadyVerified(String::from(
            "User email already verified.",
        )));
    }

    if let Validity::Invalid(msg) = validators::validate_otp(&input.otp_code) {
        return Err(HttpErrorResponse::InvalidFormat(msg));
    }

    if chrono::Utc::now().naive_utc() > saved_otp.expired_at {
        return Err(HttpErrorResponse::InvalidOperation(String::from(
            "OTP already expired.",
        )));
    }

    if !Otp::are_equal(&input.otp_code, &saved_otp.otp_number) {
        return Err(HttpErrorResponse::InvalidOperation(String::from(
            "Invalid OTP code.",
        )));
    }

    let pool_ref = db_thread_pool.as_ref().clone();

    match web::block(move || {
        let mut user_dao = db::user::Dao::new(&pool_ref);
        user_dao.mark_email_verified(user_id)
    })
    .await?
    {
        Ok(_) => (),
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to update email verification status",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(ResponseEnvelope::succeeded("User email verified.", None)))
}

pub async fn wrong_phone_number(
    db_thread_pool: web::Data<DbThreadPool>,
    unique_id: web::Path<Uuid>,
    input: web::Json<InputPhoneNumber>,
) -> Result<HttpResponse, HttpErrorResponse> {
    if let Validity::Invalid(msg) = validators::validate_phone_number(&input.phone_number) {
        return Err(HttpErrorResponse::InvalidFormat(msg));
    }

    let user_id = *unique_id;
    let pool_ref = db_thread_pool.as_ref().clone();

    let user = match web::block(move || {
        let mut user_dao = db::user::Dao::new(&pool_ref);
        user_dao.get_user_by_uuid(user_id)
    })
    .await?
    {
        Ok(u) => u,
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::DoesNotExist(String::from(
                "Account not found.",
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to get user",
            )));
        }
    };

    if user.phone_number.as_deref() == Some(&input.phone_number) {
        return Err(HttpErrorResponse::ForceInputSameData(String::from(
            "Cannot changed into same phone number.",
        )));
    }

    let phone_number = input.phone_number.clone();
    let pool_ref = db_thread_pool.as_ref().clone();

    let phone_number_registered = match web::block(move || {
        let mut user_dao = db::user::Dao::new(&pool_ref);
        user_dao.phone_number_exists(&phone_number)
    })
    .await?
    {
        Ok(r) => r,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to check phone number",
            )));
        }
    };

    if phone_number_registered {
        return Err(HttpErrorResponse::AlreadyExists(String::from(
            "Phone number already registered.",
        )));
    }

    if user.full_name.is_none() {
        return Err(HttpErrorResponse::MandatoryInput(String::from(
            "User should fill full name first.",
        )));
    }

    if user.pin_hash.is_some() {
        return Err(HttpErrorResponse::AlreadyFilled(String::from(
            "Account already set pin.",
        )));
    }

    let phone_number = input.phone_number.clone();
    let otp = Otp::generate(6);
    let otp_expired_at = chrono::DateTime::<chrono::Utc>::from(
        SystemTime::now() + env::CONF.otp_lifetime,
    )
    .naive_utc();
    let pool_ref = db_thread_pool.as_ref().clone();

    match web::block(move || {
        let mut user_dao = db::user::Dao::new(&pool_ref);
        user_dao.update_phone_number_and_reset_otp(user_id, &phone_number, &otp, otp_expired_at)
    })
    .await?
    {
        Ok(_) => (),
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to update phone number",
            )));
        }
    };

    let data = to_json_data(OutputUniqueId {
        unique_id: user.user_uuid,
    })?;

    Ok(HttpResponse::Accepted().json(ResponseEnvelope::succeeded(
        "Phone number successfully updated.",
        Some(data),
    )))
}
