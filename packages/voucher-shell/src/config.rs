use crate::store::USER_URL_KEY;

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    storage_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: USER_URL_KEY.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the address under `key` instead of [`USER_URL_KEY`].
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}
