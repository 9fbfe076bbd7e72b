use std::path::Path;

use termlinks::OperatingSystem;

use crate::error::Error;

/// Output format for CLI reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable columns.
    Text,
    /// One JSON object per reported line.
    Json,
}

/// Project configuration loaded from `.termlinks.toml`.
/// Both keys are optional; the host platform supplies the OS default.
pub struct Config {
    /// Path syntax to assume when scanning.
    pub os: OperatingSystem,
    /// Default report format (CLI flags override this).
    pub format: OutputFormat,
}

/// Raw TOML structure for `.termlinks.toml`.
#[derive(serde::Deserialize)]
struct TermlinksTomlConfig {
    format: Option<String>,
    os: Option<String>,
}

impl Config {
    /// Load config from `.termlinks.toml` in the given root directory.
    /// Returns host defaults if the file doesn't exist. Returns an error if
    /// the file exists but is malformed — never silently falls back to
    /// defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// `Error::TomlDe` if the TOML is malformed, or `Error::InvalidConfig`
    /// for an unrecognized `os`/`format` value.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".termlinks.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::host_defaults()),
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: TermlinksTomlConfig = toml::from_str(&content)?;
        let mut config = Self::host_defaults();
        if let Some(os) = raw.os {
            config.os = parse_os(&os)?;
        }
        if let Some(format) = raw.format {
            config.format = parse_format(&format)?;
        }
        Ok(config)
    }

    /// Defaults when no config file exists: the host's own path syntax,
    /// text output.
    fn host_defaults() -> Self {
        let os = if cfg!(windows) {
            OperatingSystem::Windows
        } else {
            OperatingSystem::NonWindows
        };
        Self {
            os,
            format: OutputFormat::Text,
        }
    }
}

/// Parse the `os` config key.
fn parse_os(value: &str) -> Result<OperatingSystem, Error> {
    match value {
        "windows" => Ok(OperatingSystem::Windows),
        "unix" => Ok(OperatingSystem::NonWindows),
        _ => Err(Error::InvalidConfig {
            key: "os",
            value: value.to_string(),
        }),
    }
}

/// Parse the `format` config key.
fn parse_format(value: &str) -> Result<OutputFormat, Error> {
    match value {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(Error::InvalidConfig {
            key: "format",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_host_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".termlinks.toml"), "os = \"windows\"\nformat = \"json\"\n")
            .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.os, OperatingSystem::Windows);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_os_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".termlinks.toml"), "os = \"beos\"\n").unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(Error::InvalidConfig { key: "os", .. })
        ));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".termlinks.toml"), "os = [").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }
}
