//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Terminal client configuration.
///
/// Environment variables (a `.env` file is honoured):
/// - `TACTICS_SCENARIO` - scenario RON file (default: bundled sample)
/// - `TACTICS_CONFIG` - rules TOML file (default: built-in rules)
/// - `TACTICS_TICK_MS` - frame interval in milliseconds (default: 16, minimum 1)
/// - `TACTICS_LOG_DIR` - directory for log files (default: `./logs`)
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub scenario: Option<PathBuf>,
    pub rules: Option<PathBuf>,
    pub tick: Duration,
    pub log_dir: PathBuf,
}

impl ClientConfig {
    pub const DEFAULT_TICK_MS: u64 = 16;

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = read_var::<PathBuf>(&lookup, "TACTICS_SCENARIO") {
            config.scenario = Some(path);
        }
        if let Some(path) = read_var::<PathBuf>(&lookup, "TACTICS_CONFIG") {
            config.rules = Some(path);
        }
        if let Some(ms) = read_var::<u64>(&lookup, "TACTICS_TICK_MS") {
            config.tick = Duration::from_millis(ms.max(1));
        }
        if let Some(dir) = read_var::<PathBuf>(&lookup, "TACTICS_LOG_DIR") {
            config.log_dir = dir;
        }

        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scenario: None,
            rules: None,
            tick: Duration::from_millis(Self::DEFAULT_TICK_MS),
            log_dir: PathBuf::from("logs"),
        }
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
