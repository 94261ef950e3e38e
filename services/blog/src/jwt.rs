//! Token service for issuing and verifying access tokens
//!
//! Tokens are stateless: the signed claims carry the user id and an
//! absolute expiry, and validity is signature plus clock — no revocation
//! list, no stored server state. Expiry is computed from timezone-aware
//! UTC time and checked with zero leeway.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;

/// Access token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub user_id: i64,
    /// Expiration time as a UTC unix timestamp
    pub exp: i64,
}

/// Token service
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    ttl_minutes: i64,
}

impl TokenService {
    /// Initialize a new token service from the auth configuration
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = true;
        // No clock leeway: an expired token is rejected immediately.
        validation.leeway = 0;

        TokenService {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            header: Header::new(config.algorithm),
            validation,
            ttl_minutes: config.access_token_expire_minutes,
        }
    }

    /// Issue an access token for a user
    pub fn issue(&self, user_id: i64) -> Result<String> {
        let expire = Utc::now() + Duration::minutes(self.ttl_minutes);
        let claims = Claims {
            user_id,
            exp: expire.timestamp(),
        };

        let token = encode(&self.header, &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify a token and return the embedded user id
    ///
    /// Fails when the signature is invalid, the `user_id` claim is missing,
    /// or the token has expired.
    pub fn verify(&self, token: &str) -> Result<i64> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::Algorithm;

    fn test_service() -> TokenService {
        TokenService::new(&AuthConfig {
            secret_key: "test-secret".to_string(),
            algorithm: Algorithm::HS256,
            access_token_expire_minutes: 15,
        })
    }

    #[test]
    fn test_round_trip() {
        let service = test_service();
        let token = service.issue(42).unwrap();
        assert_eq!(service.verify(&token).unwrap(), 42);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = test_service();
        let claims = Claims {
            user_id: 42,
            exp: (Utc::now() - Duration::minutes(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let service = test_service();
        let other = TokenService::new(&AuthConfig {
            secret_key: "other-secret".to_string(),
            algorithm: Algorithm::HS256,
            access_token_expire_minutes: 15,
        });

        let token = other.issue(42).unwrap();
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = test_service();
        let mut token = service.issue(42).unwrap();
        token.push('x');
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_missing_user_id_claim_is_rejected() {
        #[derive(Serialize)]
        struct Anonymous {
            exp: i64,
        }

        let service = test_service();
        let claims = Anonymous {
            exp: (Utc::now() + Duration::minutes(15)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service.verify(&token).is_err());
    }
}
