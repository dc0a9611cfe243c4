//! Database configuration.

/// Configuration for opening a database.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to create the database directory if it doesn't exist.
    pub create_if_missing: bool,

    /// Whether every save fsyncs the store file and directory
    /// (safer but slower).
    pub sync_on_save: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            sync_on_save: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to create the database directory if missing.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether every save fsyncs the store file and directory.
    #[must_use]
    pub const fn sync_on_save(mut self, value: bool) -> Self {
        self.sync_on_save = value;
        self
    }
}
