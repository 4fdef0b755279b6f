//! Credentials for the EZID API.
//!
//! EZID uses HTTP Basic authentication on every request. A public sandbox
//! account exists; whenever its username is supplied the matching password is
//! used, whatever password the caller passed.

use std::env;

/// Username of the public sandbox account.
pub const TEST_USERNAME: &str = "apitest";

/// Password of the public sandbox account.
pub const TEST_PASSWORD: &str = "apitest";

/// Environment variable read by [`Credentials::from_env`] for the username.
pub const USERNAME_ENV: &str = "EZID_USERNAME";

/// Environment variable read by [`Credentials::from_env`] for the password.
pub const PASSWORD_ENV: &str = "EZID_PASSWORD";

/// Basic-auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials. The sandbox username always gets the sandbox
    /// password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        let password = if username == TEST_USERNAME {
            TEST_PASSWORD.to_string()
        } else {
            password.into()
        };
        Self { username, password }
    }

    /// Credentials of the public sandbox account.
    pub fn test() -> Self {
        Self::new(TEST_USERNAME, TEST_PASSWORD)
    }

    /// Read `EZID_USERNAME` / `EZID_PASSWORD`, falling back to the sandbox
    /// account when no username is set.
    pub fn from_env() -> Self {
        match env::var(USERNAME_ENV) {
            Ok(username) if !username.is_empty() => {
                let password = env::var(PASSWORD_ENV).unwrap_or_default();
                Self::new(username, password)
            }
            _ => Self::test(),
        }
    }

    /// Account username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Account password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether these are the sandbox account's credentials.
    pub fn is_test(&self) -> bool {
        self.username == TEST_USERNAME
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::test()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
