//! Secure credential storage using the system keyring
//!
//! Holds the GitHub token used for pull-request calls. Uses the system
//! keyring (macOS Keychain, Linux Secret Service) with in-memory caching to
//! minimize keychain prompts.
//!
//! For development and CI the `GITHUB_TOKEN` environment variable overrides
//! the keyring. Priority: env var > cache > keyring.

use std::sync::RwLock;

use keyring::Entry;
use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{Result, RevueError};

const SERVICE_NAME: &str = "revue";
const GITHUB_TOKEN_KEY: &str = "github_token";
const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

// In-memory credential cache
// Option<Option<T>>:
//   - None = not yet fetched from keyring
//   - Some(None) = fetched, but no credential exists
//   - Some(Some(value)) = fetched and cached
static GITHUB_TOKEN_CACHE: Lazy<RwLock<Option<Option<SecretString>>>> =
    Lazy::new(|| RwLock::new(None));

/// Credential store for secure token management
pub struct CredentialStore;

impl CredentialStore {
    /// Store the GitHub token securely
    ///
    /// Updates both the keyring and the in-memory cache.
    pub fn store_github_token(token: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, GITHUB_TOKEN_KEY)?;
        entry.set_password(token)?;

        if let Ok(mut cache) = GITHUB_TOKEN_CACHE.write() {
            *cache = Some(Some(SecretString::from(token.to_string())));
        }

        Ok(())
    }

    /// Retrieve the stored GitHub token
    ///
    /// Priority: environment variable > cache > keyring
    pub fn get_github_token() -> Result<Option<SecretString>> {
        if let Ok(token) = std::env::var(GITHUB_TOKEN_ENV) {
            if !token.is_empty() {
                return Ok(Some(SecretString::from(token)));
            }
        }

        if let Ok(cache) = GITHUB_TOKEN_CACHE.read() {
            if let Some(cached_value) = cache.as_ref() {
                return Ok(cached_value.clone());
            }
        }

        let result = Self::fetch_github_token_from_keyring()?;

        if let Ok(mut cache) = GITHUB_TOKEN_CACHE.write() {
            *cache = Some(result.clone());
        }

        Ok(result)
    }

    /// Fetch the GitHub token directly from keyring (no cache)
    fn fetch_github_token_from_keyring() -> Result<Option<SecretString>> {
        let entry = Entry::new(SERVICE_NAME, GITHUB_TOKEN_KEY)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(SecretString::from(password))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(RevueError::Credential(format!(
                "Cannot access system keychain. Make sure your keyring is unlocked. ({})",
                e
            ))),
        }
    }

    /// Delete the stored GitHub token
    ///
    /// Clears both the keyring and the in-memory cache.
    pub fn delete_github_token() -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, GITHUB_TOKEN_KEY)?;
        let result = match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(RevueError::Credential(e.to_string())),
        };

        if let Ok(mut cache) = GITHUB_TOKEN_CACHE.write() {
            *cache = Some(None);
        }

        result
    }

    /// Check if a GitHub token is stored
    pub fn has_github_token() -> Result<bool> {
        Ok(Self::get_github_token()?.is_some())
    }

    /// Mask a token for display (first 4 and last 4 characters)
    pub fn mask_token(token: &SecretString) -> String {
        let raw = token.expose_secret();
        if raw.len() <= 8 {
            return "****".to_string();
        }
        format!("{}…{}", &raw[..4], &raw[raw.len() - 4..])
    }
}
