use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::blacklist_tokens;

#[derive(Clone, Debug, Serialize, Deserialize, Identifiable, Queryable)]
#[diesel(table_name = blacklist_tokens)]
pub struct BlacklistToken {
    pub id: i32,
    pub blacklisted_at: NaiveDateTime,
    pub user_uuid: Uuid,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = blacklist_tokens)]
pub struct NewBlacklistToken<'a> {
    pub blacklisted_at: NaiveDateTime,
    pub user_uuid: Uuid,
    pub access_token: &'a str,
    pub refresh_token: &'a str,
}
