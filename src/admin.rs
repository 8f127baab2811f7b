//! The single admin identity
//!
//! All mutating endpoints are only available to the admin, there are no other users or roles

use std::sync::Arc;

use anyhow::Result;
use anyhow::bail;
use uuid::Uuid;

use crate::password::generate;
use crate::password::hash;
use crate::password::is_valid_hash;
use crate::password::verify;
use crate::utils::env_var;
use crate::utils::env_var_or_else;

/// Credentials of the admin
#[derive(Clone, Debug)]
pub struct AdminCredentials {
    /// Shared between all requests
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// Expected username
    username: String,

    /// Argon2 hash of the expected password, PHC string format
    hashed_password: String,
}

impl AdminCredentials {
    /// Create credentials from a username and an already hashed password
    ///
    /// # Errors
    ///
    /// Will return `Err` when the hashed password is not a valid PHC string
    pub fn new(username: String, hashed_password: String) -> Result<Self> {
        if !is_valid_hash(&hashed_password) {
            bail!("Hashed admin password is not a valid PHC string");
        }

        Ok(Self {
            inner: Arc::new(Inner {
                username,
                hashed_password,
            }),
        })
    }

    /// Load the admin credentials from the environment
    ///
    /// - `ADMIN_USERNAME`, generated when missing
    /// - `ADMIN_PASSWORD_HASH`, takes precedence over `ADMIN_PASSWORD`
    /// - `ADMIN_PASSWORD`, hashed on startup, generated when missing
    ///
    /// # Errors
    ///
    /// Will return `Err` when `ADMIN_PASSWORD_HASH` is not a valid PHC string
    pub fn from_env() -> Result<Self> {
        let username = env_var_or_else("ADMIN_USERNAME", || {
            let username = Uuid::new_v4().to_string();
            tracing::info!("`ADMIN_USERNAME` not set, generating new username: {username}");
            username
        });

        let hashed_password = if let Some(hashed_password) = env_var("ADMIN_PASSWORD_HASH") {
            hashed_password
        } else {
            let password = env_var_or_else("ADMIN_PASSWORD", || {
                let password = generate();
                tracing::info!("`ADMIN_PASSWORD` not set, generating new password: {password}");
                password
            });

            hash(&password).map_err(|err| anyhow::anyhow!("Could not hash password: {err}"))?
        };

        Self::new(username, hashed_password)
    }

    /// Verify a presented username and password
    ///
    /// Both parts are always checked, the outcome does not tell which part was wrong.
    ///
    /// Returns the verified username
    pub async fn verify(&self, username: &str, password: &str) -> Option<String> {
        let inner = Arc::clone(&self.inner);
        let password = password.to_string();

        // hashing is expensive, keep it away from the request threads
        let is_valid_password =
            tokio::task::spawn_blocking(move || verify(&inner.hashed_password, &password))
                .await
                .unwrap_or(false);

        let is_valid_username = username == self.inner.username;

        (is_valid_username && is_valid_password).then(|| username.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> AdminCredentials {
        AdminCredentials::new("admin".to_string(), hash("verysecret").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_verify() {
        let credentials = credentials();

        assert_eq!(
            Some("admin".to_string()),
            credentials.verify("admin", "verysecret").await
        );
    }

    #[tokio::test]
    async fn test_verify_wrong_factors() {
        let credentials = credentials();

        assert_eq!(None, credentials.verify("root", "verysecret").await);
        assert_eq!(None, credentials.verify("admin", "notsosecret").await);
        assert_eq!(None, credentials.verify("root", "notsosecret").await);
        assert_eq!(None, credentials.verify("", "").await);
    }

    #[test]
    fn test_invalid_hash() {
        assert!(AdminCredentials::new("admin".to_string(), "plaintext".to_string()).is_err());
    }
}
