use crate::error::{PfResult, PinForgeError};
use crate::log::LogLayout;
use crate::sequence::EnabledTypes;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PIN_COUNT: &str = "6";
pub const DEFAULT_LOG_PATH: &str = "data/pin_log.csv";
/// Upper bound on spots per generated sequence. Also covers the combination
/// pool, which is smaller.
pub const MAX_PIN_COUNT: usize = 100;

/// Validated per-request generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub pin_count: usize,
    pub enabled_types: EnabledTypes,
    pub hard_mode: bool,
    pub macs_mode: bool,
}

impl GenerationConfig {
    pub fn new(pin_count: usize, enabled_types: EnabledTypes) -> Self {
        Self {
            pin_count,
            enabled_types,
            hard_mode: false,
            macs_mode: false,
        }
    }

    pub fn hard(mut self, on: bool) -> Self {
        self.hard_mode = on;
        self
    }

    pub fn macs(mut self, on: bool) -> Self {
        self.macs_mode = on;
        self
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(6, EnabledTypes::default())
    }
}

/// Where and how the durable log lives.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    #[arg(global = true, long = "log", default_value = DEFAULT_LOG_PATH)]
    pub log_path: PathBuf,

    #[arg(global = true, long, default_value = "per_pin")]
    pub layout: LogLayout,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            layout: LogLayout::PerPin,
        }
    }
}

impl LogSettings {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PinForgeError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            PinForgeError::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })
    }

    /// Lets flags typed on the command line win over values from a file.
    pub fn merge_from_cli(&mut self, cli: &LogSettings, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(log_path, "log_path");
        update_if_present!(layout, "layout");
    }
}

/// Parses a raw count ("pins", "entries", combo length). Anything that is
/// not a positive integer is an `InvalidArgument`.
pub fn parse_count(raw: &str, what: &str) -> PfResult<usize> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| PinForgeError::InvalidArgument(format!("Invalid {}: '{}'", what, raw)))?;

    if value <= 0 {
        return Err(PinForgeError::InvalidArgument(format!(
            "{} must be positive, got {}",
            what, value
        )));
    }
    usize::try_from(value)
        .map_err(|_| PinForgeError::InvalidArgument(format!("{} out of range: {}", what, value)))
}

/// Form-style boolean: only the literal `true` switches a flag on.
pub fn parse_flag(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some(v) if v.eq_ignore_ascii_case("true"))
}
