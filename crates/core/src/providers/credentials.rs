//! API key lookup.
//!
//! Keys come from the provider's environment variable first and fall back
//! to values entered during the session. Nothing is written to disk, and
//! `Debug` output never shows the key.

use crate::providers::kind::{normalize_name, ProviderKind};
use std::collections::HashMap;
use std::fmt;

/// An API key. Only [`Credential::expose`] reveals the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Where a resolved credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    Session,
}

/// Per-session credential store.
#[derive(Clone)]
pub struct CredentialStore {
    session: HashMap<String, Credential>,
    read_env: bool,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// A store that consults environment variables before session values.
    pub fn new() -> Self {
        Self {
            session: HashMap::new(),
            read_env: true,
        }
    }

    /// A store that only knows what is set on it. Used by tests.
    pub fn without_env() -> Self {
        Self {
            session: HashMap::new(),
            read_env: false,
        }
    }

    /// Store a key for the rest of the session. Blank keys are ignored.
    pub fn set(&mut self, provider: &str, key: impl Into<String>) {
        let key = key.into();
        if key.trim().is_empty() {
            return;
        }
        self.session
            .insert(normalize_name(provider), Credential::new(key.trim()));
    }

    pub fn clear(&mut self, provider: &str) {
        self.session.remove(&normalize_name(provider));
    }

    /// Resolve the key for `provider`, environment first.
    pub fn get(&self, provider: &str) -> Option<Credential> {
        self.lookup(provider).map(|(credential, _)| credential)
    }

    /// Where the key for `provider` would come from, if anywhere.
    pub fn source(&self, provider: &str) -> Option<CredentialSource> {
        self.lookup(provider).map(|(_, source)| source)
    }

    fn lookup(&self, provider: &str) -> Option<(Credential, CredentialSource)> {
        if self.read_env {
            if let Some(kind) = ProviderKind::from_name(provider) {
                if let Ok(value) = std::env::var(kind.env_var()) {
                    if !value.trim().is_empty() {
                        return Some((
                            Credential::new(value.trim()),
                            CredentialSource::Environment,
                        ));
                    }
                }
            }
        }

        self.session
            .get(&normalize_name(provider))
            .map(|credential| (credential.clone(), CredentialSource::Session))
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut providers: Vec<&str> = self.session.keys().map(String::as_str).collect();
        providers.sort_unstable();
        f.debug_struct("CredentialStore")
            .field("session_providers", &providers)
            .field("read_env", &self.read_env)
            .finish()
    }
}
