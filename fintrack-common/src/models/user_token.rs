use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::user_tokens;

#[derive(Clone, Debug, Serialize, Deserialize, Identifiable, Queryable)]
#[diesel(table_name = user_tokens)]
pub struct UserToken {
    pub id: i32,
    pub created_at: NaiveDateTime,
    pub user_uuid: Uuid,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = user_tokens)]
pub struct NewUserToken<'a> {
    pub created_at: NaiveDateTime,
    pub user_uuid: Uuid,
    pub access_token: &'a str,
    pub refresh_token: &'a str,
}
