use fintrack_common::token::auth_token::{AuthToken, AuthTokenClaims, AuthTokenType};
use fintrack_common::token::{DecodedToken, Token, TokenError};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures::future;
use std::marker::PhantomData;

use crate::env;
use crate::handlers::error::HttpErrorResponse;
use crate::middleware::{into_actix_error_res, TokenLocation};

pub trait RequestAuthTokenType {
    fn token_name() -> &'static str;
    fn token_type() -> AuthTokenType;
    fn signing_key() -> &'static [u8];
}

pub struct Access {}
pub struct Refresh {}

impl RequestAuthTokenType for Access {
    fn token_name() -> &'static str {
        "Authorization"
    }
    fn token_type() -> AuthTokenType {
        AuthTokenType::Access
    }
    fn signing_key() -> &'static [u8] {
        &env::CONF.access_token_signing_key
    }
}

impl RequestAuthTokenType for Refresh {
    fn token_name() -> &'static str {
        "Authorization"
    }
    fn token_type() -> AuthTokenType {
        AuthTokenType::Refresh
    }
    fn signing_key() -> &'static [u8] {
        &env::CONF.refresh_token_signing_key
    }
}

type AuthDecodedToken = DecodedToken<<AuthToken as Token>::Claims, <AuthToken as Token>::Verifier>;

/// A token whose signature, expiry, and type have been checked. The raw token string is
/// kept so handlers can run it against the blacklist table.
#[derive(Debug)]
pub struct VerifiedToken<T: RequestAuthTokenType, L: TokenLocation> {
    pub claims: AuthTokenClaims,
    pub raw_token: String,
    _marker: PhantomData<(T, L)>,
}

impl<T, L> FromRequest for VerifiedToken<T, L>
where
    T: RequestAuthTokenType,
    L: TokenLocation,
{
    type Error = HttpErrorResponse;
    type Future = future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let (decoded_token, raw_token) =
            match into_actix_error_res(get_and_decode_token::<T, L>(req)) {
                Ok(t) => t,
                Err(e) => return future::err(e),
            };

        let claims = match into_actix_error_res(verify_token::<T>(&decoded_token)) {
            Ok(c) => c,
            Err(e) => return future::err(e),
        };

        future::ok(VerifiedToken {
            claims,
            raw_token,
            _marker: PhantomData,
        })
    }
}

#[inline]
fn get_and_decode_token<T, L>(req: &HttpRequest) -> Result<(AuthDecodedToken, String), TokenError>
where
    T: RequestAuthTokenType,
    L: TokenLocation,
{
    let extracted = match L::get_from_request(req, T::token_name()) {
        Some(h) => h,
        None => return Err(TokenError::TokenMissing),
    };

    AuthToken::decode(extracted).map(|t| (t, String::from(extracted)))
}

#[inline]
fn verify_token<T: RequestAuthTokenType>(
    decoded_token: &AuthDecodedToken,
) -> Result<AuthTokenClaims, TokenError> {
    let claims = decoded_token.verify(T::signing_key())?;

    if claims.token_type != T::token_type() {
        return Err(TokenError::WrongTokenType);
    }

    Ok(claims.clone())
}
