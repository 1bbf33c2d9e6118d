use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::money_spends;

#[derive(Clone, Debug, Serialize, Deserialize, Identifiable, Queryable)]
#[diesel(table_name = money_spends)]
pub struct MoneySpend {
    pub id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub user_uuid: Uuid,

    pub spend_day: i32,
    pub spend_month: i32,
    pub spend_year: i32,

    pub category: String,
    pub description: String,
    pub amount: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = money_spends)]
pub struct NewMoneySpend<'a> {
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub user_uuid: Uuid,

    pub spend_day: i32,
    pub spend_month: i32,
    pub spend_year: i32,

    pub category: &'a str,
    pub description: &'a str,
    pub amount: i64,
}
