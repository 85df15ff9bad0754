//! Storage key configuration.
//!
//! Every persisted concern lives under its own fixed key. Keys are passed
//! explicitly to services and adapters; nothing reads them from globals.

const DEFAULT_NAMESPACE: &str = "next-coding";

/// Store keys for each persisted concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub todos: String,
    pub locale: String,
    pub theme: String,
}

impl StorageKeys {
    /// Builds versioned keys under `namespace`, e.g. `<namespace>.todos.v1`.
    pub fn with_namespace(namespace: &str) -> Self {
        Self {
            todos: format!("{namespace}.todos.v1"),
            locale: format!("{namespace}.locale.v1"),
            theme: format!("{namespace}.theme.v1"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }
}
