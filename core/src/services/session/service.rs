//! Session service implementation

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::user::Role;
use crate::domain::value_objects::SessionPrincipal;
use crate::errors::{AuthError, DomainError, DomainResult};

use super::config::SessionServiceConfig;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (username)
    pub sub: String,

    /// Role at the time of sign-in
    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID
    pub jti: String,
}

/// A freshly issued session token
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies signed session tokens
#[derive(Clone)]
pub struct SessionService {
    config: SessionServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionService {
    /// Creates a new session service
    pub fn new(config: SessionServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Session lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.config.ttl_seconds
    }

    /// Issues a token for an authenticated principal
    pub fn issue(&self, principal: &SessionPrincipal) -> DomainResult<SessionToken> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.config.ttl_seconds);

        let claims = SessionClaims {
            sub: principal.username.clone(),
            role: principal.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            nbf: now.timestamp(),
            iss: self.config.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| DomainError::Internal {
                message: format!("Failed to sign session token: {}", e),
            },
        )?;

        Ok(SessionToken { token, expires_at })
    }

    /// Verifies a token and returns the principal it carries
    ///
    /// Any signature, format, issuer or expiry failure maps to
    /// `AuthError::Unauthenticated`.
    pub fn verify(&self, token: &str) -> DomainResult<SessionPrincipal> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "Rejected session token");
            DomainError::Auth(AuthError::Unauthenticated)
        })?;

        Ok(SessionPrincipal::new(data.claims.sub, data.claims.role))
    }

    /// Expiry of a verified token, if it can be read
    pub fn expires_at(&self, token: &str) -> Option<DateTime<Utc>> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .ok()
            .and_then(|data| Utc.timestamp_opt(data.claims.exp, 0).single())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SessionService {
        SessionService::new(SessionServiceConfig {
            secret: "test-secret".to_string(),
            ttl_seconds: 3600,
            issuer: "folio".to_string(),
        })
    }

    #[test]
    fn test_issue_and_verify() {
        let service = service();
        let principal = SessionPrincipal::new("alice", Role::Viewer);

        let session = service.issue(&principal).unwrap();
        assert!(session.expires_at > Utc::now());

        let verified = service.verify(&session.token).unwrap();
        assert_eq!(verified, principal);
        assert!(service.expires_at(&session.token).is_some());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = service();
        let session = service.issue(&SessionPrincipal::new("alice", Role::Viewer)).unwrap();

        let mut tampered = session.token.clone();
        tampered.push('x');
        let result = service.verify(&tampered);
        assert!(matches!(result, Err(DomainError::Auth(AuthError::Unauthenticated))));

        assert!(service.verify("garbage").is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let other = SessionService::new(SessionServiceConfig {
            secret: "other-secret".to_string(),
            ..SessionServiceConfig::default()
        });
        let session = other.issue(&SessionPrincipal::new("owner", Role::Editor)).unwrap();

        assert!(service().verify(&session.token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let expired = SessionService::new(SessionServiceConfig {
            secret: "test-secret".to_string(),
            ttl_seconds: -3600,
            issuer: "folio".to_string(),
        });
        let session = expired.issue(&SessionPrincipal::new("alice", Role::Viewer)).unwrap();

        let result = service().verify(&session.token);
        assert!(matches!(result, Err(DomainError::Auth(AuthError::Unauthenticated))));
    }
}
