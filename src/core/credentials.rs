use crate::utils::get_env::get_env_var_opt;
use base64::prelude::*;

// Upstream API identity, resolved once at startup. The secret never leaves
// this struct except inside the derived Authorization value.
#[derive(Clone)]
pub struct ApiCredentials {
    id: String,
    secret: String,
}

impl ApiCredentials {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }

    // Both halves must be configured and non-empty, otherwise the pair is
    // treated as absent and every proxied call fails fast.
    pub fn resolve() -> Option<Self> {
        let id = get_env_var_opt("VECTORIZER_API_ID")?;
        let secret = get_env_var_opt("VECTORIZER_API_SECRET")?;
        Some(Self::new(id, secret))
    }

    pub fn authorization_header(&self) -> String {
        let raw = format!("{}:{}", self.id, self.secret);
        format!("Basic {}", BASE64_STANDARD.encode(raw))
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}
