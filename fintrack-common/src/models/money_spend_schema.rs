use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::money_spend_schemas;

#[derive(Clone, Debug, Serialize, Deserialize, Identifiable, Queryable)]
#[diesel(table_name = money_spend_schemas)]
pub struct MoneySpendSchema {
    pub id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub user_uuid: Uuid,

    pub month: i32,
    pub year: i32,
    pub category: String,
    pub budget: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = money_spend_schemas)]
pub struct NewMoneySpendSchema<'a> {
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub user_uuid: Uuid,

    pub month: i32,
    pub year: i32,
    pub category: &'a str,
    pub budget: i64,
}
