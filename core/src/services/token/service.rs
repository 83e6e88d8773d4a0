//! JWT token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::role::Role;
use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for issuing and verifying HS256 access tokens.
///
/// Token revocation is handled by the Redis session layer; JWTs are
/// short-lived and expire on their own.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiry(&self) -> i64 {
        self.config.access_token_expiry
    }

    /// Generate an access token scoped to a user's workspace and role
    pub fn generate_access_token(
        &self,
        user_id: Uuid,
        workspace_id: Uuid,
        role: Role,
        is_verified: bool,
    ) -> Result<String, DomainError> {
        let claims = Claims::new_access(
            user_id,
            workspace_id,
            role,
            is_verified,
            self.config.access_token_expiry,
            &self.config.issuer,
            &self.config.audience,
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verify an access token and return its claims
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let error = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    jsonwebtoken::errors::ErrorKind::InvalidToken => TokenError::InvalidTokenFormat,
                    _ => TokenError::InvalidClaims,
                };
                DomainError::Token(error)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(TokenServiceConfig::default())
    }

    #[test]
    fn test_generate_and_verify() {
        let service = service();
        let user_id = Uuid::new_v4();
        let workspace_id = Uuid::new_v4();

        let token = service
            .generate_access_token(user_id, workspace_id, Role::Owner, true)
            .unwrap();
        let claims = service.verify_access_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.workspace_uuid().unwrap(), workspace_id);
        assert_eq!(claims.role, "owner");
        assert!(claims.is_verified);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = service();
        let result = service.verify_access_token("not.a.jwt");
        assert!(matches!(
            result,
            Err(DomainError::Token(TokenError::InvalidTokenFormat) | DomainError::Token(TokenError::InvalidClaims))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuing = service();
        let token = issuing
            .generate_access_token(Uuid::new_v4(), Uuid::new_v4(), Role::Member, false)
            .unwrap();

        let verifying = TokenService::new(TokenServiceConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..Default::default()
        });
        assert!(matches!(
            verifying.verify_access_token(&token),
            Err(DomainError::Token(TokenError::InvalidSignature))
        ));
    }

    #[test]
    fn test_issuer_and_audience_come_from_config() {
        let issuing = TokenService::new(TokenServiceConfig {
            issuer: "partner".to_string(),
            audience: "partner-api".to_string(),
            ..Default::default()
        });
        let token = issuing
            .generate_access_token(Uuid::new_v4(), Uuid::new_v4(), Role::Member, true)
            .unwrap();

        let claims = issuing.verify_access_token(&token).unwrap();
        assert_eq!(claims.iss, "partner");
        assert_eq!(claims.aud, "partner-api");

        // A service with different issuer/audience settings rejects it
        let other = service();
        assert!(matches!(
            other.verify_access_token(&token),
            Err(DomainError::Token(TokenError::InvalidClaims))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new(TokenServiceConfig {
            access_token_expiry: -300,
            ..Default::default()
        });
        let token = service
            .generate_access_token(Uuid::new_v4(), Uuid::new_v4(), Role::Member, true)
            .unwrap();

        assert!(matches!(
            service.verify_access_token(&token),
            Err(DomainError::Token(TokenError::TokenExpired))
        ));
    }
}
