//! Credential checking
//!
//! The demo login compares against one fixed username/password pair. The
//! trait is the seam where a real authentication backend would plug in.

/// Username accepted by [`FixedCredentials::default`]
pub const DEMO_USERNAME: &str = "admin";

/// Password accepted by [`FixedCredentials::default`]
pub const DEMO_PASSWORD: &str = "1234";

/// Decides whether a username/password pair is valid
pub trait CredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Plain equality against a single known pair
#[derive(Clone, Debug)]
pub struct FixedCredentials {
    username: String,
    password: String,
}

impl FixedCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for FixedCredentials {
    fn default() -> Self {
        Self::new(DEMO_USERNAME, DEMO_PASSWORD)
    }
}

impl CredentialVerifier for FixedCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_pair() {
        let creds = FixedCredentials::default();
        assert!(creds.verify("admin", "1234"));
        assert!(!creds.verify("admin", "12345"));
        assert!(!creds.verify("Admin", "1234"));
        assert!(!creds.verify("", ""));
    }
}
