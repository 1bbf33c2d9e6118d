use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::user_otps;

#[derive(Clone, Debug, Serialize, Deserialize, Identifiable, Queryable)]
#[diesel(table_name = user_otps)]
pub struct UserOtp {
    pub id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub user_uuid: Uuid,
    pub otp_number: String,
    pub expired_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = user_otps)]
pub struct NewUserOtp<'a> {
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub user_uuid: Uuid,
    pub otp_number: &'a str,
    pub expired_at: NaiveDateTime,
}
