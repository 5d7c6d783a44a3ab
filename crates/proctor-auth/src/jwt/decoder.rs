//! JWT signature and structure verification.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::error::CredentialError;

use super::claims::Claims;

/// Verifies token signatures and decodes claims.
///
/// Expiry is not checked here; callers compare `exp` against their own
/// clock.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a new decoder for the given secret.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verifies the signature, then the structural fields.
    pub fn verify(&self, token: &str) -> Result<Claims, CredentialError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                JwtErrorKind::InvalidSignature => CredentialError::InvalidSignature,
                _ => CredentialError::MalformedToken,
            },
        )?;

        let claims = data.claims;
        if claims.exp <= claims.iat || claims.sub.is_empty() {
            return Err(CredentialError::MalformedToken);
        }

        Ok(claims)
    }
}
