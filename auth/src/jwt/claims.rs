use serde::Deserialize;
use serde::Serialize;

/// Identity a token is minted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Username the token speaks for
    pub subject: String,

    /// Role granted at issuance
    pub role: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            role: role.into(),
        }
    }
}

/// Verified token claims.
///
/// Only ever produced by [`JwtHandler::verify`](super::JwtHandler::verify) after the
/// signature, expiry and claim presence checks have passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Role of the subject at issuance
    pub role: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

/// Payload as it appears on the wire, before claim presence is checked.
#[derive(Debug, Deserialize)]
pub(crate) struct WireClaims {
    #[serde(default)]
    pub sub: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub exp: Option<i64>,
}

impl WireClaims {
    /// Promote to [`Claims`] when every required claim is present and non-empty.
    pub(crate) fn into_claims(self) -> Option<Claims> {
        let sub = self.sub.filter(|s| !s.is_empty())?;
        let role = self.role.filter(|r| !r.is_empty())?;
        let exp = self.exp?;
        Some(Claims { sub, role, exp })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_claims_requires_subject_and_role() {
        let wire = WireClaims {
            sub: Some("alice".to_string()),
            role: None,
            exp: Some(1000),
        };
        assert!(wire.into_claims().is_none());

        let wire = WireClaims {
            sub: Some(String::new()),
            role: Some("user".to_string()),
            exp: Some(1000),
        };
        assert!(wire.into_claims().is_none());

        let wire = WireClaims {
            sub: Some("alice".to_string()),
            role: Some("user".to_string()),
            exp: Some(1000),
        };
        let claims = wire.into_claims().expect("all claims present");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.role, "user");
    }
}
