//! Management API credentials
//!
//! Resolution order:
//! - `[credentials]` table of a TOML file (explicit path, else the per-user default)
//! - OS keyring when the file sets `use_keyring = true`
//! - command-line user/password

use crate::error::ProbeError;
use keyring::Entry;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const KEYRING_SERVICE: &str = "rmqcheck";

#[derive(Debug, Default, Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    credentials: CredentialsSection,
}

#[derive(Debug, Default, Deserialize)]
struct CredentialsSection {
    username: Option<String>,
    password: Option<String>,
    #[serde(default)]
    use_keyring: bool,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Resolve credentials, starting from the command-line values.
    ///
    /// An explicit file must exist; the default file is optional.
    pub async fn resolve(
        user: &str,
        password: &str,
        explicit_file: Option<&Path>,
    ) -> Result<Self, ProbeError> {
        let mut creds = Self::new(user, password);

        let path = match explicit_file {
            Some(path) => path.to_path_buf(),
            None => match Self::default_file_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("no credentials file, using command-line credentials");
                    return Ok(creds);
                }
            },
        };

        let section = Self::read_file(&path).await?;
        info!("Loaded credentials from {}", path.display());

        if let Some(username) = section.username {
            creds.username = username;
        }
        if let Some(password) = section.password {
            creds.password = password;
        }
        if section.use_keyring {
            creds.password = Self::keyring_password(creds.username.clone()).await?;
        }
        Ok(creds)
    }

    /// `<config dir>/rmqcheck/credentials.toml`
    pub fn default_file_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("rmqcheck");
        path.push("credentials.toml");
        Some(path)
    }

    async fn read_file(path: &Path) -> Result<CredentialsSection, ProbeError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            ProbeError::Credentials(format!("cannot read {}: {}", path.display(), e))
        })?;
        let file: CredentialsFile = toml::from_str(&content).map_err(|e| {
            ProbeError::Credentials(format!("cannot parse {}: {}", path.display(), e))
        })?;
        Ok(file.credentials)
    }

    /// Platform stores (keyutils, keychain, credential manager) can block, so the lookup runs
    /// on the blocking pool.
    async fn keyring_password(username: String) -> Result<String, ProbeError> {
        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(KEYRING_SERVICE, &username)
                .map_err(|e| ProbeError::Credentials(format!("keyring: {e}")))?;
            Self::password_from_entry(&entry, &username)
        })
        .await
        .map_err(|e| ProbeError::Credentials(format!("keyring lookup aborted: {e}")))?
    }

    fn password_from_entry(entry: &Entry, username: &str) -> Result<String, ProbeError> {
        entry
            .get_password()
            .map_err(|e| ProbeError::Credentials(format!("keyring entry for {username}: {e}")))
    }
}
