use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::users;

#[derive(Clone, Debug, Serialize, Deserialize, Identifiable, Queryable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub user_uuid: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,

    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,

    pub password_hash: Option<String>,
    pub pin_hash: Option<String>,
    pub pin_enabled: bool,

    pub verified_email: bool,
    pub verified_phone_number: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub user_uuid: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,

    pub username: &'a str,
    pub full_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone_number: Option<&'a str>,

    pub password_hash: Option<&'a str>,
    pub pin_hash: Option<&'a str>,
    pub pin_enabled: bool,

    pub verified_email: bool,
    pub verified_phone_number: bool,
}
