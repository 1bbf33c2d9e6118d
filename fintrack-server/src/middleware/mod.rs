pub mod auth;

use fintrack_common::token::TokenError;

use actix_web::HttpRequest;

use crate::handlers::error::HttpErrorResponse;

pub trait TokenLocation {
    fn get_from_request<'a>(req: &'a HttpRequest, key: &str) -> Option<&'a str>;
}

pub struct FromAuthHeader {}

impl TokenLocation for FromAuthHeader {
    fn get_from_request<'a>(req: &'a HttpRequest, key: &str) -> Option<&'a str> {
        let header = req.headers().get(key)?;
        let header = header.to_str().ok()?;

        header.strip_prefix("Bearer ").map(str::trim)
    }
}

#[inline(always)]
fn into_actix_error_res<T>(result: Result<T, TokenError>) -> Result<T, HttpErrorResponse> {
    match result {
        Ok(t) => Ok(t),
        Err(TokenError::TokenInvalid) => Err(HttpErrorResponse::Unauthorized(String::from(
            "Token is invalid",
        ))),
        Err(TokenError::TokenExpired) => Err(HttpErrorResponse::Unauthorized(String::from(
            "Token is expired",
        ))),
        Err(TokenError::TokenMissing) => Err(HttpErrorResponse::Unauthorized(String::from(
            "Token is missing",
        ))),
        Err(TokenError::WrongTokenType) => Err(HttpErrorResponse::Unauthorized(String::from(
            "Incorrect token type",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::test::TestRequest;

    #[test]
    fn test_get_token_from_auth_header() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc123.def456"))
            .to_http_request();

        assert_eq!(
            FromAuthHeader::get_from_request(&req, "Authorization"),
            Some("abc123.def456"),
        );

        let req = TestRequest::default()
            .insert_header(("Authorization", "abc123.def456"))
            .to_http_request();

        assert!(FromAuthHeader::get_from_request(&req, "Authorization").is_none());

        let req = TestRequest::default().to_http_request();

        assert!(FromAuthHeader::get_from_request(&req, "Authorization").is_none());
    }
}
