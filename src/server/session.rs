use crate::utils::get_env::get_env_var_opt;

// Optional shared-secret login gate. Unconfigured means the tool is open
// and every login attempt succeeds. Plain case-sensitive comparison, no
// rate limiting or lockout; this guards a shared-use tool, not tenants.
#[derive(Clone, Default)]
pub struct SessionGate {
    credentials: Option<(String, String)>,
}

impl SessionGate {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        let credentials = match (username, password) {
            (Some(user), Some(pass)) => Some((user, pass)),
            _ => None,
        };
        Self { credentials }
    }

    pub fn from_env() -> Self {
        Self::new(
            get_env_var_opt("AUTH_USERNAME"),
            get_env_var_opt("AUTH_PASSWORD"),
        )
    }

    pub fn required(&self) -> bool {
        self.credentials.is_some()
    }

    // Callers must not reveal which field was wrong on failure.
    pub fn login(&self, username: &str, password: &str) -> bool {
        match &self.credentials {
            None => true,
            Some((expected_user, expected_pass)) => {
                username == expected_user && password == expected_pass
            }
        }
    }
}

#[cfg(test)]
mod cfg_tests {
    use crate::server::session::SessionGate;

    #[test]
    pub fn test_unconfigured_gate_accepts_everything() {
        let gate = SessionGate::new(None, None);
        assert!(!gate.required());
        assert!(gate.login("anyone", "anything"));
        assert!(gate.login("", ""));
    }

    #[test]
    pub fn test_half_configured_gate_is_unconfigured() {
        let gate = SessionGate::new(Some("admin".to_string()), None);
        assert!(!gate.required());
        assert!(gate.login("whoever", "whatever"));
    }

    #[test]
    pub fn test_configured_gate_requires_exact_match() {
        let gate = SessionGate::new(Some("admin".to_string()), Some("secret".to_string()));
        assert!(gate.required());
        assert!(gate.login("admin", "secret"));
        assert!(!gate.login("admin", "wrong"));
        assert!(!gate.login("wrong", "secret"));
        assert!(!gate.login("Admin", "secret"));
        assert!(!gate.login("admin", "Secret"));
        assert!(!gate.login("", ""));
    }
}
