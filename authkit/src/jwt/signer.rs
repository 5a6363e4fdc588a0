use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Issues and verifies signed, time-bound tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a single injected secret. Hold one
/// signer per token class to run access and refresh tokens on distinct
/// secrets.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenSigner {
    /// Create a signer over the given secret.
    ///
    /// The secret should be at least 256 bits and come from configuration
    /// loaded once at startup, never from an ambient global.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a compact token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// # Errors
    /// * `Expired` - Signature checks out but the token is past its expiry
    /// * `InvalidSignature` - Token was not signed with this signer's secret
    /// * `Malformed` - Not a parseable token at all
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::new(self.algorithm);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::Malformed(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use uuid::Uuid;

    use super::*;
    use crate::jwt::claims::TokenKind;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let signer = TokenSigner::new(SECRET);
        let subject = Uuid::new_v4();
        let claims = Claims::access(subject, "user@example.com", Duration::minutes(15));

        let token = signer.issue(&claims).expect("Failed to issue token");
        let verified = signer.verify(&token).expect("Failed to verify token");

        assert_eq!(verified, claims);
        assert_eq!(verified.kind, TokenKind::Access);
    }

    #[test]
    fn test_verify_expired_token() {
        let signer = TokenSigner::new(SECRET);
        // Far enough in the past to clear the default decoding leeway
        let claims = Claims::refresh(Uuid::new_v4(), Duration::minutes(-5));

        let token = signer.issue(&claims).expect("Failed to issue token");
        assert_eq!(signer.verify(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_verify_wrong_secret() {
        let signer = TokenSigner::new(SECRET);
        let other = TokenSigner::new(b"another_secret_also_32_bytes_long!");
        let claims = Claims::refresh(Uuid::new_v4(), Duration::days(7));

        let token = signer.issue(&claims).expect("Failed to issue token");
        assert_eq!(other.verify(&token), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_verify_tampered_signature() {
        let signer = TokenSigner::new(SECRET);
        let claims = Claims::access(Uuid::new_v4(), "user@example.com", Duration::minutes(15));

        let mut token = signer.issue(&claims).expect("Failed to issue token");
        let flipped = if token.ends_with('A') { 'B' } else { 'A' };
        token.pop();
        token.push(flipped);

        assert_eq!(signer.verify(&token), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_verify_garbage() {
        let signer = TokenSigner::new(SECRET);
        assert!(matches!(
            signer.verify("not-a-token"),
            Err(JwtError::Malformed(_))
        ));
    }
}
