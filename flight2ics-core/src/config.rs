//! flight2ics configuration.
//!
//! Settings are layered: built-in defaults, then ~/.config/flight2ics/config.toml,
//! then `FLIGHT2ICS_` environment variables (`__` separates nested keys, e.g.
//! `FLIGHT2ICS_ICS__FOLD_LINES=true`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{Flight2IcsError, Flight2IcsResult};

static DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_PRODID: &str = "-//flight2ics//Flight Calendar//EN";
pub const DEFAULT_UID_DOMAIN: &str = "flight2ics.app";
pub const DEFAULT_REMINDER_DESCRIPTION: &str = "Flight Reminder";
pub const DEFAULT_PORT: u16 = 4096;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Flight2IcsConfig {
    /// Where `flight2ics ics` writes invites unless told otherwise
    pub output_dir: PathBuf,
    pub ics: IcsSettings,
    pub lookup: LookupSettings,
    pub server: ServerSettings,
}

impl Default for Flight2IcsConfig {
    fn default() -> Self {
        Flight2IcsConfig {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            ics: IcsSettings::default(),
            lookup: LookupSettings::default(),
            server: ServerSettings::default(),
        }
    }
}

/// Fixed values written into every generated invite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IcsSettings {
    pub prodid: String,
    /// Domain suffix of generated UIDs (`<flight>-<millis>@<domain>`)
    pub uid_domain: String,
    /// How long before departure the reminder fires
    #[serde(with = "humantime_duration")]
    pub alarm_before: Duration,
    pub reminder_description: String,
    /// Fold content lines longer than 75 octets
    pub fold_lines: bool,
}

impl Default for IcsSettings {
    fn default() -> Self {
        IcsSettings {
            prodid: DEFAULT_PRODID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            alarm_before: Duration::from_secs(2 * 60 * 60),
            reminder_description: DEFAULT_REMINDER_DESCRIPTION.to_string(),
            fold_lines: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    /// Simulated response time of the mock lookup
    #[serde(with = "humantime_duration")]
    pub latency: Duration,
}

impl Default for LookupSettings {
    fn default() -> Self {
        LookupSettings {
            latency: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings { port: DEFAULT_PORT }
    }
}

impl Flight2IcsConfig {
    pub fn config_path() -> Flight2IcsResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Flight2IcsError::Config("Could not determine config directory".into()))?
            .join("flight2ics");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented config file on first run.
    pub fn load() -> Flight2IcsResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit file. A missing file is not an error.
    pub fn load_from(path: &Path) -> Flight2IcsResult<Self> {
        Self::load_layered(path, env_source())
    }

    fn load_layered(path: &Path, env: Environment) -> Flight2IcsResult<Self> {
        log::debug!("Loading config from {}", path.display());

        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| Flight2IcsError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| Flight2IcsError::Config(e.to_string()))
    }

    /// Output directory with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.output_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Effective settings rendered as TOML.
    pub fn to_toml(&self) -> Flight2IcsResult<String> {
        toml::to_string_pretty(self).map_err(|e| Flight2IcsError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Flight2IcsResult<()> {
        let contents = format!(
            "\
# flight2ics configuration

# Where `flight2ics ics` writes invites:
# output_dir = \"{DEFAULT_OUTPUT_DIR}\"

[ics]
# prodid = \"{DEFAULT_PRODID}\"
# uid_domain = \"{DEFAULT_UID_DOMAIN}\"
# alarm_before = \"2h\"
# reminder_description = \"{DEFAULT_REMINDER_DESCRIPTION}\"
# fold_lines = false

[lookup]
# latency = \"500ms\"

[server]
# port = {DEFAULT_PORT}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Flight2IcsError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| Flight2IcsError::Config(format!("Could not write config file: {e}")))?;

        log::info!("Created default config at {}", path.display());

        Ok(())
    }
}

/// `FLIGHT2ICS_` variables, `__` between nested keys.
fn env_source() -> Environment {
    Environment::with_prefix("FLIGHT2ICS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Serde adapter for durations written as humantime strings ("2h", "500ms").
mod humantime_duration {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
