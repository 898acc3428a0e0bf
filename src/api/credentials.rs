//! Access/refresh token storage

use std::sync::Mutex;

/// Bearer pair issued by login, register and token refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    /// Full header value, `Bearer ...` included
    pub access: String,
    pub refresh: String,
}

impl Tokens {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

pub trait CredentialStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn store(&self, tokens: Tokens);
    fn clear(&self);
}

/// Process-local credentials; forgotten on exit
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    tokens: Mutex<Option<Tokens>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: Tokens) -> Self {
        Self {
            tokens: Mutex::new(Some(tokens)),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Option<Tokens>) -> T) -> T {
        match self.tokens.lock() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write(&self, value: Option<Tokens>) {
        match self.tokens.lock() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.read(|tokens| tokens.as_ref().map(|t| t.access.clone()))
    }

    fn refresh_token(&self) -> Option<String> {
        self.read(|tokens| tokens.as_ref().map(|t| t.refresh.clone()))
    }

    fn store(&self, tokens: Tokens) {
        self.write(Some(tokens));
    }

    fn clear(&self) {
        self.write(None);
    }
}
