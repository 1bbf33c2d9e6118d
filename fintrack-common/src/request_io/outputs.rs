use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::money_spend::MoneySpend;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ResponseEnvelope {
    pub fn succeeded(message: &str, data: Option<Value>) -> Self {
        Self {
            success: true,
            message: String::from(message),
            data,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub server_time: u128,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputUniqueId {
    pub unique_id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputFullName {
    pub full_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputPhoneNumber {
    pub phone_number: Option<String>,
    pub verified_phone_number: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputSpend {
    pub spend_day: i32,
    pub spend_month: i32,
    pub spend_year: i32,
    pub category: String,
    pub description: String,
    pub amount: i64,
}

impl From<MoneySpend> for OutputSpend {
    fn from(spend: MoneySpend) -> Self {
        Self {
            spend_day: spend.spend_day,
            spend_month: spend.spend_month,
            spend_year: spend.spend_year,
            category: spend.category,
            description: spend.description,
            amount: spend.amount,
        }
    }
}
