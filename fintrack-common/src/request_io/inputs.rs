use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validators;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CredentialPair {
    pub unique_id: Uuid,
    pub pin: String,
}

impl CredentialPair {
    pub fn validate_pin(&self) -> validators::Validity {
        validators::validate_pin(&self.pin)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputFullName {
    pub full_name: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputOtp {
    pub otp_code: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputPhoneNumber {
    pub phone_number: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputSchema {
    pub month: i32,
    pub year: i32,
    pub category: String,
    pub budget: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputSpend {
    pub spend_day: i32,
    pub spend_month: i32,
    pub spend_year: i32,
    pub category: String,
    pub description: String,
    pub amount: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputEditSpend {
    pub spend_day: i32,
    pub spend_month: i32,
    pub spend_year: i32,
    pub category: String,
    pub description: String,
    pub amount: i64,

    pub changed_spend_day: i32,
    pub changed_spend_month: i32,
    pub changed_spend_year: i32,
    pub changed_category_into: String,
    pub changed_description_into: String,
    pub changed_amount_into: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputMonthYear {
    pub month: i32,
    pub year: i32,
}
