use crate::token::{Expiring, HmacSha256Verifier, Token, TokenError};

use base64::engine::general_purpose::URL_SAFE as b64_urlsafe;
use base64::Engine;
use hmac::Mac;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::HmacSha256;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum AuthTokenType {
    Access,
    Refresh,
}

impl std::convert::TryFrom<u8> for AuthTokenType {
    type Error = TokenError;

    fn try_from(value: u8) -> Result<Self, TokenError> {
        match value {
            1 => Ok(AuthTokenType::Access),
            2 => Ok(AuthTokenType::Refresh),
            _ => Err(TokenError::WrongTokenType),
        }
    }
}

impl std::convert::From<AuthTokenType> for u8 {
    fn from(token_type: AuthTokenType) -> Self {
        match token_type {
            AuthTokenType::Access => 1,
            AuthTokenType::Refresh => 2,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthTokenClaims {
    #[serde(rename = "uid")]
    pub user_id: Uuid,
    #[serde(rename = "exp")]
    pub expiration: u64,
    #[serde(rename = "typ")]
    pub token_type: AuthTokenType,
    #[serde(rename = "slt")]
    pub salt: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewAuthTokenClaims {
    #[serde(rename = "uid")]
    pub user_id: Uuid,
    #[serde(rename = "exp")]
    pub expiration: u64,
    #[serde(rename = "typ")]
    pub token_type: AuthTokenType,
}

impl Expiring for AuthTokenClaims {
    fn expiration(&self) -> u64 {
        self.expiration
    }
}

pub struct AuthToken {}

impl AuthToken {
    pub fn sign_new(claims: NewAuthTokenClaims, signing_key: &[u8]) -> String {
        let claims = AuthTokenClaims {
            user_id: claims.user_id,
            expiration: claims.expiration,
            token_type: claims.token_type,
            salt: rand::thread_rng().gen(),
        };

        let mut token_unencoded =
            serde_json::to_vec(&claims).expect("Failed to transform claims into JSON");

        let mut mac = HmacSha256::new_from_slice(signing_key).expect("HMAC key should not fail");
        mac.update(&token_unencoded);
        let signature = mac.finalize();
        token_unencoded.extend_from_slice(&signature.into_bytes());

        b64_urlsafe.encode(&token_unencoded)
    }
}

impl Token for AuthToken {
    type Claims = AuthTokenClaims;
    type Verifier = HmacSha256Verifier;

    fn token_name() -> &'static str {
        "AuthToken"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    #[test]
    fn test_sign_and_verify() {
        let user_id = Uuid::now_v7();
        let exp = (SystemTime::now() + Duration::from_secs(10))
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let signing_key = [9; 64];

        let claims = NewAuthTokenClaims {
            user_id,
            expiration: exp,
            token_type: AuthTokenType::Access,
        };

        let token = AuthToken::sign_new(claims, &signing_key);
        let t = AuthToken::decode(&token).unwrap();
        let claims = t.verify(&signing_key).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.expiration, exp);
        assert_eq!(claims.token_type, AuthTokenType::Access);

        assert!(
            String::from_utf8_lossy(&b64_urlsafe.decode(&token).unwrap())
                .contains(&format!("{}", exp))
        );

        let claims = NewAuthTokenClaims {
            user_id,
            expiration: exp,
            token_type: AuthTokenType::Refresh,
        };

        let token = AuthToken::sign_new(claims, &signing_key);
        let mut t = b64_urlsafe.decode(token).unwrap();

        // Make the signature invalid
        let last_byte = t.pop().unwrap();
        if last_byte == 0x01 {
            t.push(0x02);
        } else {
            t.push(0x01);
        }

        let t = b64_urlsafe.encode(t);

        assert!(AuthToken::decode(&t).unwrap().verify(&signing_key).is_err());

        let exp = (SystemTime::now() - Duration::from_secs(10))
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = NewAuthTokenClaims {
            user_id,
            expiration: exp,
            token_type: AuthTokenType::Access,
        };

        let token = AuthToken::sign_new(claims, &signing_key);
        assert!(AuthToken::decode(&token)
            .unwrap()
            .verify(&signing_key)
            .is_err());
    }

    #[test]
    fn test_tokens_are_salted() {
        let user_id = Uuid::now_v7();
        let exp = (SystemTime::now() + Duration::from_secs(10))
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let signing_key = [9; 64];

        let claims = NewAuthTokenClaims {
            user_id,
            expiration: exp,
            token_type: AuthTokenType::Access,
        };

        let first = AuthToken::sign_new(claims.clone(), &signing_key);
        let second = AuthToken::sign_new(claims, &signing_key);

        assert_ne!(first, second);
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let exp = (SystemTime::now() + Duration::from_secs(10))
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = NewAuthTokenClaims {
            user_id: Uuid::now_v7(),
            expiration: exp,
            token_type: AuthTokenType::Refresh,
        };

        let token = AuthToken::sign_new(claims, &[7; 64]);
        assert!(AuthToken::decode(&token).unwrap().verify(&[8; 64]).is_err());
    }
}
