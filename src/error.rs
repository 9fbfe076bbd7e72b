/// CLI error types. The detection engine itself is infallible — absence of a
/// match is `None` or an empty list — so every variant here belongs to the
/// command-line surface: I/O, config parsing, output encoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A config key holds a value outside its accepted set.
    #[error("invalid config value for `{key}`: `{value}`")]
    InvalidConfig {
        /// The `.termlinks.toml` key.
        key: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Underlying I/O error from the filesystem or stdin.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON output encoding failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped serde_json error.
        #[from]
        serde_json::Error,
    ),

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// The file watcher could not be created or registered.
    #[error("watch: {0}")]
    Watch(
        /// The wrapped notify error.
        #[from]
        notify::Error,
    ),
}
