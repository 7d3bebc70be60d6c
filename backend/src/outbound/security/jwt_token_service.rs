//! HS256 JWT implementation of the [`TokenService`] port.
//!
//! Claims carry `{userId, role, name, iat, exp}`. Expiry is checked against the
//! injected clock rather than the system clock so tests stay deterministic.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{Identity, Role, UserId};

/// Lifetime of an issued token, in days.
pub const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    user_id: UserId,
    role: Role,
    name: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    secret: Arc<Zeroizing<Vec<u8>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Create a service signing with `secret` and issuing tokens valid for
    /// [`TOKEN_TTL_DAYS`].
    #[must_use]
    pub fn new(secret: Zeroizing<Vec<u8>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: Arc::new(secret),
            ttl: Duration::days(TOKEN_TTL_DAYS),
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        let now = self.clock.utc();
        let claims = Claims {
            user_id: identity.user_id,
            role: identity.role,
            name: identity.name.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Self::validation(),
        )
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::expired(),
            _ => TokenError::invalid(err.to_string()),
        })?;

        let claims = data.claims;
        if claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::expired());
        }
        Ok(Identity {
            user_id: claims.user_id,
            role: claims.role,
            name: claims.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{FixtureClock, fixture_timestamp};
    use rstest::{fixture, rstest};

    fn service_at(offset: Duration, secret: &[u8]) -> JwtTokenService {
        JwtTokenService::new(
            Zeroizing::new(secret.to_vec()),
            Arc::new(FixtureClock {
                utc_now: fixture_timestamp() + offset,
            }),
        )
    }

    #[fixture]
    fn identity() -> Identity {
        Identity {
            user_id: UserId::random(),
            role: Role::Student,
            name: "Ada Lovelace".to_owned(),
        }
    }

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[rstest]
    fn issued_tokens_verify_to_the_same_identity(identity: Identity) {
        let service = service_at(Duration::zero(), SECRET);
        let token = service.issue(&identity).expect("token issued");
        assert_eq!(service.verify(&token).expect("token verifies"), identity);
    }

    #[rstest]
    fn tokens_expire_after_seven_days(identity: Identity) {
        let token = service_at(Duration::zero(), SECRET)
            .issue(&identity)
            .expect("token issued");

        let almost = service_at(Duration::days(7) - Duration::seconds(1), SECRET);
        assert!(almost.verify(&token).is_ok());

        let expired = service_at(Duration::days(7), SECRET);
        assert_eq!(expired.verify(&token), Err(TokenError::Expired));
    }

    #[rstest]
    fn tokens_signed_with_another_secret_are_invalid(identity: Identity) {
        let token = service_at(Duration::zero(), b"another-secret-another-secret-xx")
            .issue(&identity)
            .expect("token issued");

        let result = service_at(Duration::zero(), SECRET).verify(&token);
        assert!(matches!(result, Err(TokenError::Invalid { .. })));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-jwt")]
    #[case("a.b.c")]
    fn garbage_is_invalid(#[case] token: &str) {
        let result = service_at(Duration::zero(), SECRET).verify(token);
        assert!(matches!(result, Err(TokenError::Invalid { .. })));
    }
}
