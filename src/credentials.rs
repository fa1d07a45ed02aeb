//! Session credential storage.
//!
//! A [`CredentialStore`] is the single place tokens live: one slot holding an
//! access/refresh pair behind one mutex. The pair is always written and
//! cleared together, so callers never observe a half-updated session. Stores
//! are cheap to clone and all clones share the same slot.
//!
//! By default the store is in-memory only. [`CredentialStore::persistent`]
//! additionally mirrors the slot to a JSON file so a session survives
//! process restarts.

use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};

use crate::error::Result;
use crate::types::TokenResponse;

/// An access token and the refresh token that can renew it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer credential authorizing API calls.
    pub access_token: String,

    /// Longer-lived credential used to obtain a new access token.
    pub refresh_token: String,
}

impl TokenPair {
    /// Create a new `TokenPair`.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl From<TokenResponse> for TokenPair {
    fn from(tokens: TokenResponse) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}

impl From<&TokenResponse> for TokenPair {
    fn from(tokens: &TokenResponse) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
        }
    }
}

/// Shared storage for the session's token pair.
///
/// Absence of a pair means "unauthenticated". At most one pair is active at
/// a time; a successful login or refresh overwrites the whole pair and a
/// logout or irrecoverable auth failure removes it.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    slot: Arc<Mutex<Option<TokenPair>>>,
    path: Option<PathBuf>,
}

impl CredentialStore {
    /// Create a store that keeps tokens in memory only.
    pub fn in_memory() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            path: None,
        }
    }

    /// Create a store backed by a JSON file.
    ///
    /// If the file exists and parses, the session it holds is resumed.
    /// A missing or unreadable file starts the store unauthenticated.
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let initial = fs::File::open(&path)
            .ok()
            .and_then(|file| from_reader(BufReader::new(file)).ok());
        Self {
            slot: Arc::new(Mutex::new(initial)),
            path: Some(path),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<TokenPair>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The stored access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.lock().as_ref().map(|pair| pair.access_token.clone())
    }

    /// The stored refresh token, if any.
    pub fn refresh_token(&self) -> Option<String> {
        self.lock().as_ref().map(|pair| pair.refresh_token.clone())
    }

    /// The stored pair, if any.
    pub fn pair(&self) -> Option<TokenPair> {
        self.lock().clone()
    }

    /// Whether a token pair is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    /// Store a new token pair, replacing any existing one.
    ///
    /// Both tokens are written together under one lock; there is no state in
    /// which only one of them is updated.
    pub fn store(&self, pair: TokenPair) -> Result<()> {
        let mut slot = self.lock();
        if let Some(path) = &self.path {
            let file = fs::File::create(path)?;
            to_writer_pretty(BufWriter::new(file), &pair)?;
        }
        *slot = Some(pair);
        Ok(())
    }

    /// Remove the stored pair, if any.
    pub fn clear(&self) -> Result<()> {
        let mut slot = self.lock();
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        *slot = None;
        Ok(())
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
