//! Signing and verification of compact session tokens

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::domain::entities::token::{
    AccessClaims, Claims, RefreshClaims, TokenKind, TokenPair,
};
use crate::errors::{DomainResult, TokenError};

use super::config::TokenConfig;

/// Stateless codec for HS256-signed tokens.
///
/// Issues access and refresh tokens carrying a kind discriminator, and only
/// hands claims back through the kind-checked [`verify_access`] and
/// [`verify_refresh`] entry points. A refresh token presented where an
/// access token is expected fails verification, and vice versa.
///
/// Expiry is evaluated with zero leeway: a token is rejected from the first
/// second after its window, on this host's clock.
///
/// [`verify_access`]: SignedTokenCodec::verify_access
/// [`verify_refresh`]: SignedTokenCodec::verify_refresh
pub struct SignedTokenCodec {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SignedTokenCodec {
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;
        // The default 60s leeway would keep tokens alive past their window
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Issues a signed token of the given kind for `subject`
    ///
    /// # Arguments
    ///
    /// * `subject` - The user's email address
    /// * `kind` - Access or refresh; decides the validity window
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact signed token
    /// * `Err(DomainError)` - Signing failed
    pub fn issue(&self, subject: &str, kind: TokenKind) -> DomainResult<String> {
        self.issue_at(subject, kind, Utc::now())
    }

    /// Issues a token as of an explicit instant; used by tests to produce
    /// tokens near or past their expiry without sleeping.
    pub(crate) fn issue_at(
        &self,
        subject: &str,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
    ) -> DomainResult<String> {
        let claims = Claims::new(
            subject,
            kind,
            issued_at,
            self.config.window(kind),
            &self.config.issuer,
        );
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            TokenError::GenerationFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Issues a fresh access/refresh pair for `subject`
    pub fn issue_pair(&self, subject: &str) -> DomainResult<TokenPair> {
        self.issue_pair_at(subject, Utc::now())
    }

    pub(crate) fn issue_pair_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> DomainResult<TokenPair> {
        let access = self.issue_at(subject, TokenKind::Access, issued_at)?;
        let refresh = self.issue_at(subject, TokenKind::Refresh, issued_at)?;
        Ok(TokenPair::new(
            access,
            refresh,
            self.config.window_seconds(TokenKind::Access),
            self.config.window_seconds(TokenKind::Refresh),
        ))
    }

    /// Verifies a token and proves it carries the `access` discriminator
    ///
    /// # Returns
    ///
    /// * `Ok(AccessClaims)` - Signature, expiry, issuer, and kind all valid
    /// * `Err(TokenError::Expired)` - Signature valid but window elapsed
    /// * `Err(TokenError::WrongKind)` - Valid token of the other kind
    /// * `Err(TokenError::MalformedOrInvalidSignature)` - Everything else
    pub fn verify_access(&self, token: &str) -> DomainResult<AccessClaims> {
        let claims = self.decode_checked(token)?;
        if claims.kind != TokenKind::Access {
            return Err(TokenError::WrongKind {
                expected: TokenKind::Access,
            }
            .into());
        }
        Ok(AccessClaims(claims))
    }

    /// Verifies a token and proves it carries the `refresh` discriminator
    pub fn verify_refresh(&self, token: &str) -> DomainResult<RefreshClaims> {
        let claims = self.decode_checked(token)?;
        if claims.kind != TokenKind::Refresh {
            return Err(TokenError::WrongKind {
                expected: TokenKind::Refresh,
            }
            .into());
        }
        Ok(RefreshClaims(claims))
    }

    /// Decodes and validates signature, issuer, and expiry.
    ///
    /// Expiry maps to its own variant only because jsonwebtoken checks the
    /// signature before the claims; every other failure collapses into one
    /// opaque variant so callers cannot distinguish tampering from garbage.
    fn decode_checked(&self, token: &str) -> Result<Claims, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::MalformedOrInvalidSignature,
                }
            })?;
        Ok(data.claims)
    }
}
