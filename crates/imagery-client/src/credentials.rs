//! API key lookup.

use crate::config::API_KEY_VARS;

/// Source of the imagery API key, consulted on every fetch.
pub trait CredentialProvider: Send + Sync {
    /// The key, or `None` when it is not configured. Empty values count as
    /// not configured.
    fn api_key(&self) -> Option<String>;
}

/// Reads the key from process environment at call time.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    vars: Vec<String>,
}

impl EnvCredential {
    pub fn new(vars: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            vars: vars.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for EnvCredential {
    fn default() -> Self {
        Self::new(API_KEY_VARS)
    }
}

impl CredentialProvider for EnvCredential {
    fn api_key(&self) -> Option<String> {
        self.vars
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }
}

/// A fixed key, or a fixed absence of one.
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(pub Option<String>);

impl StaticCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredential {
    fn api_key(&self) -> Option<String> {
        self.0.clone().filter(|key| !key.trim().is_empty())
    }
}
