#![cfg(not(doctest))]

#[macro_use]
extern crate diesel;

pub mod db;
pub mod models;
pub mod otp;
pub mod request_io;
pub mod schema;
#[cfg(test)]
pub mod test_env;
pub mod token;
pub mod validators;
