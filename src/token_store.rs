//! Token storage abstraction for CrumbCompass clients.
//!
//! The client never reaches for ambient global state: the access/refresh
//! token pair lives behind the [`TokenStore`] trait, injected at
//! construction time. This keeps token handling swappable (in-memory for
//! tests and short-lived tools, a config-dir file for CLI-style apps) and
//! makes the auth flows testable with doubles.

use crate::error::{CrumbLinkError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};

/// The access/refresh token pair issued by the CrumbCompass backend.
///
/// Created on login/registration, overwritten on refresh, deleted on
/// logout or an unrecoverable 401.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenPair {
    /// Short-lived bearer token attached to every authenticated request.
    pub access_token: String,

    /// Longer-lived token exchanged for a new access token on 401.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenPair {
    /// Create a pair holding only an access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
        }
    }

    /// Create a full access/refresh pair.
    pub fn with_refresh(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: Some(refresh_token.into()),
        }
    }
}

/// Trait for token storage backends.
///
/// Writes are whole-pair overwrites, so concurrent readers only ever
/// observe a complete pair. Implementations must be `Send + Sync`; the
/// client reads the store on every request.
///
/// # Security Note
///
/// Persistent implementations MUST protect the stored tokens:
/// - Files should use restrictive permissions (0600 on Unix)
/// - Tokens should never be logged
pub trait TokenStore: Send + Sync {
    /// Retrieve the stored token pair, if any.
    fn get(&self) -> Result<Option<TokenPair>>;

    /// Store a token pair, replacing any existing one.
    fn set(&self, tokens: &TokenPair) -> Result<()>;

    /// Delete the stored token pair.
    ///
    /// Returns `Ok(())` even if nothing was stored.
    fn clear(&self) -> Result<()>;
}

/// In-memory token store; the default backend.
///
/// Does NOT persist tokens across restarts. Useful for:
/// - Unit and integration tests
/// - Short-lived tools that log in on every run
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Option<TokenPair>>,
}

impl MemoryTokenStore {
    /// Create a new empty in-memory token store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<TokenPair>> {
        let guard = self
            .tokens
            .read()
            .map_err(|_| CrumbLinkError::InternalError("token store lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn set(&self, tokens: &TokenPair) -> Result<()> {
        let mut guard = self
            .tokens
            .write()
            .map_err(|_| CrumbLinkError::InternalError("token store lock poisoned".into()))?;
        *guard = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .tokens
            .write()
            .map_err(|_| CrumbLinkError::InternalError("token store lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

/// File-based token storage.
///
/// Persists the token pair in TOML format with secure file permissions
/// (0600 on Unix).
///
/// # File Location
///
/// - Windows: `~/.crumbcompass/tokens.toml`
/// - Linux/macOS: `~/.config/crumbcompass/tokens.toml`
///
/// # File Format
///
/// ```toml
/// access_token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// refresh_token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// ```
#[derive(Debug)]
pub struct FileTokenStore {
    file_path: PathBuf,
    cache: Mutex<Option<TokenPair>>,
}

impl FileTokenStore {
    /// Default token file path.
    pub fn default_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".crumbcompass").join("tokens.toml")
            } else {
                PathBuf::from(".crumbcompass").join("tokens.toml")
            }
        }

        #[cfg(not(target_os = "windows"))]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("crumbcompass").join("tokens.toml")
            } else if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("crumbcompass").join("tokens.toml")
            } else {
                PathBuf::from(".crumbcompass").join("tokens.toml")
            }
        }
    }

    /// Create a file-based token store at the default location.
    pub fn new() -> Result<Self> {
        Self::with_path(Self::default_path())
    }

    /// Create a file-based token store at a custom location.
    pub fn with_path(file_path: PathBuf) -> Result<Self> {
        let store = Self {
            file_path,
            cache: Mutex::new(None),
        };
        let loaded = store.load_from_disk()?;
        *store.lock_cache()? = loaded;
        Ok(store)
    }

    fn lock_cache(&self) -> Result<std::sync::MutexGuard<'_, Option<TokenPair>>> {
        self.cache
            .lock()
            .map_err(|_| CrumbLinkError::InternalError("token store lock poisoned".into()))
    }

    fn load_from_disk(&self) -> Result<Option<TokenPair>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.file_path).map_err(|e| {
            CrumbLinkError::ConfigurationError(format!(
                "cannot read token file {}: {}",
                self.file_path.display(),
                e
            ))
        })?;

        let tokens: TokenPair = toml::from_str(&contents).map_err(|e| {
            CrumbLinkError::ConfigurationError(format!(
                "token file {} is corrupt: {}",
                self.file_path.display(),
                e
            ))
        })?;

        Ok(Some(tokens))
    }

    fn save_to_disk(&self, tokens: &TokenPair) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CrumbLinkError::ConfigurationError(format!(
                    "cannot create token directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let contents = toml::to_string_pretty(tokens).map_err(|e| {
            CrumbLinkError::SerializationError(format!("cannot serialize tokens: {}", e))
        })?;

        fs::write(&self.file_path, contents).map_err(|e| {
            CrumbLinkError::ConfigurationError(format!(
                "cannot write token file {}: {}",
                self.file_path.display(),
                e
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.file_path, perms).map_err(|e| {
                CrumbLinkError::ConfigurationError(format!(
                    "cannot set permissions on {}: {}",
                    self.file_path.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<TokenPair>> {
        Ok(self.lock_cache()?.clone())
    }

    fn set(&self, tokens: &TokenPair) -> Result<()> {
        self.save_to_disk(tokens)?;
        *self.lock_cache()? = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path).map_err(|e| {
                CrumbLinkError::ConfigurationError(format!(
                    "cannot delete token file {}: {}",
                    self.file_path.display(),
                    e
                ))
            })?;
        }
        *self.lock_cache()? = None;
        Ok(())
    }
}
