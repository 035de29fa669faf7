//! Credential file handling
//!
//! The file is plain JSON holding the username and an unsalted sha256 hex
//! of the password, despite the `.enc` name. Kept as a data contract for
//! the login frontend; it is not a hardened authentication scheme.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    /// sha256 hex of the password
    pub password: String,
}

/// sha256 hex digest of a password
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the default admin/admin credentials if the file is missing
    pub fn init_default(&self) -> Result<()> {
        if !self.path.exists() {
            log::warn!(
                "Credential file {} not found, creating default user '{}'",
                self.path.display(),
                DEFAULT_USERNAME
            );
            self.save(DEFAULT_USERNAME, DEFAULT_PASSWORD)?;
        }
        Ok(())
    }

    pub fn load(&self) -> Result<Credentials> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Stores the username and the hash of the given plaintext password
    pub fn save(&self, username: &str, password: &str) -> Result<()> {
        let credentials = Credentials {
            username: username.to_string(),
            password: hash_password(password),
        };
        fs::write(&self.path, serde_json::to_string(&credentials)?)?;
        Ok(())
    }

    /// Checks a username/password pair against the stored credentials
    pub fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let credentials = self.load()?;
        Ok(credentials.username == username && credentials.password == hash_password(password))
    }
}
