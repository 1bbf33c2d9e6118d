pub mod blacklist_token;
pub mod money_spend;
pub mod money_spend_schema;
pub mod user;
pub mod user_otp;
pub mod user_token;
