use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Discriminates the two token classes carried in a pair.
///
/// Embedded in every token so an access token can never be exchanged as a
/// refresh token, nor presented the other way around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims embedded in a signed token.
///
/// Access tokens carry the subject id and email; refresh tokens carry the
/// subject id only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: Uuid,

    /// Subject email, present on access tokens only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier; keeps tokens minted within the same second
    /// from colliding, which rotation-by-digest depends on
    pub jti: Uuid,

    /// Token class
    pub kind: TokenKind,
}

impl Claims {
    /// Build access-token claims expiring `lifetime` from now.
    pub fn access(subject: Uuid, email: impl Into<String>, lifetime: Duration) -> Self {
        Self::stamped(subject, Some(email.into()), lifetime, TokenKind::Access)
    }

    /// Build refresh-token claims expiring `lifetime` from now.
    pub fn refresh(subject: Uuid, lifetime: Duration) -> Self {
        Self::stamped(subject, None, lifetime, TokenKind::Refresh)
    }

    fn stamped(subject: Uuid, email: Option<String>, lifetime: Duration, kind: TokenKind) -> Self {
        let now = Utc::now();
        Self {
            sub: subject,
            email,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            jti: Uuid::new_v4(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims() {
        let subject = Uuid::new_v4();
        let claims = Claims::access(subject, "user@example.com", Duration::minutes(15));

        assert_eq!(claims.sub, subject);
        assert_eq!(claims.email.as_deref(), Some("user@example.com"));
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_refresh_claims_omit_email() {
        let claims = Claims::refresh(Uuid::new_v4(), Duration::days(7));

        assert_eq!(claims.email, None);
        assert_eq!(claims.kind, TokenKind::Refresh);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_same_second_claims_are_distinct() {
        let subject = Uuid::new_v4();
        let first = Claims::refresh(subject, Duration::days(7));
        let second = Claims::refresh(subject, Duration::days(7));
        assert_ne!(first, second);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let claims = Claims::refresh(Uuid::new_v4(), Duration::days(7));
        let json = serde_json::to_string(&claims).expect("Failed to serialize claims");
        assert!(json.contains(r#""kind":"refresh""#));
        assert!(!json.contains("email"));
    }
}
