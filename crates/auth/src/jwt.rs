//! Bearer token verification.
//!
//! Tokens are only trusted once their signature checks out against the
//! configured key. Claims of an unverified token are never read.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::{HotelClaims, TokenValidationError};

/// Verifies a raw bearer token and yields its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str) -> Result<HotelClaims, TokenValidationError>;
}

/// HMAC-SHA256 validator with a shared secret.
///
/// `exp` and `nbf` are checked when the issuer sets them; neither is required.
#[derive(Clone)]
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_nbf = true;
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }
}

impl core::fmt::Debug for Hs256JwtValidator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256JwtValidator").finish_non_exhaustive()
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str) -> Result<HotelClaims, TokenValidationError> {
        // Reject foreign algorithms before touching the payload.
        let header = jsonwebtoken::decode_header(token).map_err(|e| {
            tracing::debug!(error = %e, "bearer token header rejected");
            TokenValidationError::Malformed
        })?;
        if header.alg != Algorithm::HS256 {
            return Err(TokenValidationError::UnexpectedSigningMethod);
        }

        let data = jsonwebtoken::decode::<HotelClaims>(token, &self.key, &self.validation)
            .map_err(|e| map_jwt_error(e.kind()))?;

        Ok(data.claims)
    }
}

fn map_jwt_error(kind: &ErrorKind) -> TokenValidationError {
    match kind {
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Utf8(_) => {
            TokenValidationError::Malformed
        }
        ErrorKind::InvalidSignature => TokenValidationError::SignatureInvalid,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenValidationError::UnexpectedSigningMethod
        }
        ErrorKind::ExpiredSignature => TokenValidationError::Expired,
        ErrorKind::ImmatureSignature => TokenValidationError::NotActive,
        ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
            TokenValidationError::InvalidClaims
        }
        _ => TokenValidationError::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelbook_core::HotelId;
    use jsonwebtoken::{EncodingKey, Header, get_current_timestamp};
    use serde_json::json;

    const SECRET: &str = "SigningString";

    fn mint(alg: Algorithm, secret: &str, claims: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::new(alg),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("failed to encode jwt")
    }

    fn standard_claims() -> serde_json::Value {
        json!({
            "sub": "8790c514-73b6-400f-8f28-acc74d342a22",
            "name": "H.A. Kerr",
            "hotel": 123,
            "admin": true,
        })
    }

    #[test]
    fn valid_token_yields_identity() {
        let validator = Hs256JwtValidator::new(SECRET);
        let token = mint(Algorithm::HS256, SECRET, standard_claims());

        let user = validator.validate(&token).unwrap().into_user();
        assert_eq!(user.name(), "H.A. Kerr");
        assert!(user.is_admin());
        assert_eq!(user.hotel_id(), HotelId::new(123));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let validator = Hs256JwtValidator::new(SECRET);
        let token = mint(Algorithm::HS256, "someone-else", standard_claims());

        assert_eq!(
            validator.validate(&token),
            Err(TokenValidationError::SignatureInvalid)
        );
    }

    #[test]
    fn other_hmac_algorithm_is_rejected() {
        let validator = Hs256JwtValidator::new(SECRET);
        let token = mint(Algorithm::HS512, SECRET, standard_claims());

        assert_eq!(
            validator.validate(&token),
            Err(TokenValidationError::UnexpectedSigningMethod)
        );
    }

    #[test]
    fn unsigned_token_is_rejected() {
        let validator = Hs256JwtValidator::new(SECRET);
        // {"alg":"none","typ":"JWT"}.{"name":"Mallory","admin":true,"hotel":123}.
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJuYW1lIjoiTWFsbG9yeSIsImFkbWluIjp0cnVlLCJob3RlbCI6MTIzfQ.";

        assert!(validator.validate(token).is_err());
    }

    #[test]
    fn garbage_is_malformed() {
        let validator = Hs256JwtValidator::new(SECRET);
        assert_eq!(
            validator.validate("not-a-token"),
            Err(TokenValidationError::Malformed)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let validator = Hs256JwtValidator::new(SECRET);
        let mut claims = standard_claims();
        claims["exp"] = json!(get_current_timestamp() - 3600);
        let token = mint(Algorithm::HS256, SECRET, claims);

        assert_eq!(validator.validate(&token), Err(TokenValidationError::Expired));
    }

    #[test]
    fn future_token_is_not_active() {
        let validator = Hs256JwtValidator::new(SECRET);
        let mut claims = standard_claims();
        claims["nbf"] = json!(get_current_timestamp() + 3600);
        let token = mint(Algorithm::HS256, SECRET, claims);

        assert_eq!(validator.validate(&token), Err(TokenValidationError::NotActive));
    }

    #[test]
    fn missing_claim_is_invalid_claims() {
        let validator = Hs256JwtValidator::new(SECRET);
        let token = mint(Algorithm::HS256, SECRET, json!({ "name": "x", "hotel": 1 }));

        assert_eq!(
            validator.validate(&token),
            Err(TokenValidationError::InvalidClaims)
        );
    }

    #[test]
    fn mistyped_claim_is_invalid_claims() {
        let validator = Hs256JwtValidator::new(SECRET);
        let token = mint(
            Algorithm::HS256,
            SECRET,
            json!({ "name": "x", "admin": "true", "hotel": 1 }),
        );

        assert_eq!(
            validator.validate(&token),
            Err(TokenValidationError::InvalidClaims)
        );
    }
}
