use actix_web::{web, HttpResponse};
use fintrack_common::db::{self, DbThreadPool};
use fintrack_common::request_io::{
    InputEditSpend, InputMonthYear, InputSchema, InputSpend, OutputSpend, ResponseEnvelope,
};
use uuid::Uuid;

use crate::handlers::{self, error::HttpErrorResponse};
use crate::middleware::auth::{Access, VerifiedToken};
use crate::middleware::FromAuthHeader;

fn validate_month_year(month: i32, year: i32) -> Result<(), HttpErrorResponse> {
    if !(1..=12).contains(&month) {
        return Err(HttpErrorResponse::InvalidFormat(String::from(
            "Month must be between 1 and 12.",
        )));
    }

    if !(1000..=9999).contains(&year) {
        return Err(HttpErrorResponse::InvalidFormat(String::from(
            "Year must be a four-digit number.",
        )));
    }

    Ok(())
}

fn validate_day(day: i32) -> Result<(), HttpErrorResponse> {
    if !(1..=31).contains(&day) {
        return Err(HttpErrorResponse::InvalidFormat(String::from(
            "Day must be between 1 and 31.",
        )));
    }

    Ok(())
}

async fn schema_exists(
    user_id: Uuid,
    month: i32,
    year: i32,
    category: String,
    db_thread_pool: &DbThreadPool,
) -> Result<bool, HttpErrorResponse> {
    let pool_ref = db_thread_pool.clone();

    match web::block(move || {
        let mut spend_dao = db::spend::Dao::new(&pool_ref);
        spend_dao.schema_exists(user_id, month, year, &category)
    })
    .await?
    {
        Ok(e) => Ok(e),
        Err(e) => {
            log::error!("{e}");
            Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to check for existing schema",
            )))
        }
    }
}

pub async fn create_schema(
    db_thread_pool: web::Data<DbThreadPool>,
    token: VerifiedToken<Access, FromAuthHeader>,
    input: web::Json<InputSchema>,
) -> Result<HttpResponse, HttpErrorResponse> {
    validate_month_year(input.month, input.year)?;

    let user = handlers::current_user::resolve(
        token.raw_token,
        token.claims.user_id,
        &db_thread_pool,
    )
    .await?;

    let is_available = schema_exists(
        user.user_uuid,
        input.month,
        input.year,
        input.category.clone(),
        &db_thread_pool,
    )
    .await?;

    if is_available {
        return Err(HttpErrorResponse::AlreadyExists(format!(
            "Category {} already saved.",
            input.category,
        )));
    }

    let user_id = user.user_uuid;
    let schema_data = input.into_inner();
    let pool_ref = db_thread_pool.as_ref().clone();

    match web::block(move || {
        let mut spend_dao = db::spend::Dao::new(&pool_ref);
        spend_dao.create_schema(user_id, &schema_data)
    })
    .await?
    {
        Ok(_) => (),
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to create schema",
            )));
        }
    };

    Ok(HttpResponse::Created().json(ResponseEnvelope::succeeded("Created new category.", None)))
}

pub async fn create_spend(
    db_thread_pool: web::Data<DbThreadPool>,
    token: VerifiedToken<Access, FromAuthHeader>,
    input: web::Json<InputSpend>,
) -> Result<HttpResponse, HttpErrorResponse> {
    validate_day(input.spend_day)?;
    validate_month_year(input.spend_month, input.spend_year)?;

    let user = handlers::current_user::resolve(
        token.raw_token,
        token.claims.user_id,
        &db_thread_pool,
    )
    .await?;

    let is_available = schema_exists(
        user.user_uuid,
        input.spend_month,
        input.spend_year,
        input.category.clone(),
        &db_thread_pool,
    )
    .await?;

    let user_id = user.user_uuid;
    let spend_data = input.into_inner();
    let pool_ref = db_thread_pool.as_ref().clone();

    match web::block(move || {
        let mut spend_dao = db::spend::Dao::new(&pool_ref);
        spend_dao.create_spend(user_id, &spend_data, !is_available)
    })
    .await?
    {
        Ok(_) => (),
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to create spend record",
            )));
        }
    };

    let message = if is_available {
        "Created new spend money."
    } else {
        "Created new spend money and schema data."
    };

    Ok(HttpResponse::Created().json(ResponseEnvelope::succeeded(message, None)))
}

pub async fn update_monthly_spend(
    db_thread_pool: web::Data<DbThreadPool>,
    token: VerifiedToken<Access, FromAuthHeader>,
    input: web::Json<InputEditSpend>,
) -> Result<HttpResponse, HttpErrorResponse> {
    validate_day(input.spend_day)?;
    validate_month_year(input.spend_month, input.spend_year)?;
    validate_day(input.changed_spend_day)?;
    validate_month_year(input.changed_spend_month, input.changed_spend_year)?;

    let user = handlers::current_user::resolve(
        token.raw_token,
        token.claims.user_id,
        &db_thread_pool,
    )
    .await?;

    let user_id = user.user_uuid;
    let changed_category = input.changed_category_into.clone();
    let pool_ref = db_thread_pool.as_ref().clone();

    let category_already_saved = match web::block(move || {
        let mut spend_dao = db::spend::Dao::new(&pool_ref);
        spend_dao.category_exists(user_id, &changed_category)
    })
    .await?
    {
        Ok(e) => e,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to check for existing category",
            )));
        }
    };

    if !category_already_saved {
        return Err(HttpErrorResponse::DoesNotExist(format!(
            "Category {} is not found on database. You should create it first.",
            input.changed_category_into,
        )));
    }

    let spend_data = input.into_inner();
    let pool_ref = db_thread_pool.as_ref().clone();

    match web::block(move || {
        let mut spend_dao = db::spend::Dao::new(&pool_ref);
        let spend = spend_dao.find_spend_by_fields(user_id, &spend_data)?;
        spend_dao.update_spend(spend.id, user_id, &spend_data)
    })
    .await?
    {
        Ok(_) => (),
        Err(e) if e.is_not_found() => {
            return Err(HttpErrorResponse::DoesNotExist(String::from(
                "Data daily spending not found. Please create first.",
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to update spend record",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(ResponseEnvelope::succeeded(
        "Update daily spending data success.",
        None,
    )))
}

pub async fn get_monthly_spend(
    db_thread_pool: web::Data<DbThreadPool>,
    token: VerifiedToken<Access, FromAuthHeader>,
    query: web::Query<InputMonthYear>,
) -> Result<HttpResponse, HttpErrorResponse> {
    validate_month_year(query.month, query.year)?;

    let user = handlers::current_user::resolve(
        token.raw_token,
        token.claims.user_id,
        &db_thread_pool,
    )
    .await?;

    let user_id = user.user_uuid;
    let month = query.month;
    let year = query.year;
    let pool_ref = db_thread_pool.as_ref().clone();

    let spends = match web::block(move || {
        let mut spend_dao = db::spend::Dao::new(&pool_ref);
        spend_dao.get_spends_for_month(user_id, month, year)
    })
    .await?
    {
        Ok(s) => s,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::DatabaseError(String::from(
                "Failed to get spend records",
            )));
        }
    };

    if spends.is_empty() {
        return Err(HttpErrorResponse::DoesNotExist(String::from(
            "No spending data found for the requested month.",
        )));
    }

    let spends: Vec<OutputSpend> = spends.into_iter().map(OutputSpend::from).collect();

    let data = handlers::to_json_data(spends)?;

    Ok(HttpResponse::Ok().json(ResponseEnvelope::succeeded(
        "Monthly spending data found.",
        Some(data),
    )))
}
