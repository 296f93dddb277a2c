//! Tencent Cloud API credentials

use crate::utils::log_sanitizer::mask_secret;

/// A `SecretId`/`SecretKey` pair, optionally with an STS session token.
#[derive(Clone)]
pub struct Credential {
    pub(crate) secret_id: String,
    pub(crate) secret_key: String,
    pub(crate) token: Option<String>,
}

impl Credential {
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            token: None,
        }
    }

    /// Attach a temporary security token (sent as `X-TC-Token`).
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into()).filter(|t: &String| !t.is_empty());
        self
    }

    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("secret_id", &mask_secret(&self.secret_id))
            .field("secret_key", &"***")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_secret_key() {
        let cred = Credential::new("AKIDabcdef", "super-secret").with_token("tok");
        let out = format!("{cred:?}");
        assert!(!out.contains("super-secret"));
        assert!(!out.contains("tok\""));
        assert!(out.contains("AKID******"));
    }

    #[test]
    fn empty_token_is_ignored() {
        let cred = Credential::new("id", "key").with_token("");
        assert!(cred.token().is_none());
    }
}
