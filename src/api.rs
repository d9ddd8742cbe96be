use crate::config::{parse_count, parse_flag, GenerationConfig, LogSettings, DEFAULT_PIN_COUNT};
use crate::error::PinForgeError;
use crate::generator::SequenceGenerator;
use crate::history::{HistoryView, RecentHistory};
use crate::log::{self, CsvSequenceLog, LogEntry, LogFilter, SequenceLog};
use crate::profiles::{resolve_lock_type_code, LockProfile};
use crate::sequence::{EnabledTypes, PinRecord};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

/// Everything a request needs, created once at process start and passed by
/// reference into each call.
pub struct PinForgeState<L: SequenceLog = CsvSequenceLog> {
    pub log: Mutex<L>,
    pub history: RecentHistory,
    pub generator: Mutex<SequenceGenerator>,
}

impl PinForgeState<CsvSequenceLog> {
    pub fn from_settings(settings: &LogSettings, seed: Option<u64>) -> Self {
        Self::new(
            CsvSequenceLog::new(&settings.log_path, settings.layout),
            seed,
        )
    }
}

impl<L: SequenceLog> PinForgeState<L> {
    pub fn new(log: L, seed: Option<u64>) -> Self {
        Self {
            log: Mutex::new(log),
            history: RecentHistory::default(),
            generator: Mutex::new(SequenceGenerator::new(seed)),
        }
    }

    fn log(&self) -> MutexGuard<'_, L> {
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Structured failure handed back to the caller instead of a crash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: String,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self.kind.as_str() {
            "invalid_argument" | "config_error" => 400,
            "not_found" => 404,
            "unsatisfiable_constraint" => 422,
            _ => 500,
        }
    }
}

impl From<PinForgeError> for ApiError {
    fn from(e: PinForgeError) -> Self {
        Self {
            kind: e.kind().to_string(),
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

/// Raw, form-style generation parameters. Missing values take defaults;
/// flags are on only when literally `"true"`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub struct GenerateRequest {
    pub lock_type: Option<String>,
    pub pins: Option<String>,
    pub standard: Option<String>,
    pub spool: Option<String>,
    pub serrated: Option<String>,
    pub hard_mode: Option<String>,
    pub macs_mode: Option<String>,
}

impl GenerateRequest {
    pub fn profile(&self) -> LockProfile {
        LockProfile::resolve(self.lock_type.as_deref().unwrap_or("A1100"))
    }

    pub fn to_config(&self, profile: &LockProfile) -> Result<GenerationConfig, PinForgeError> {
        let pin_count = match (self.pins.as_deref(), &profile.dial) {
            (Some(raw), Some(_)) => parse_count(raw, "combination length")?,
            (Some(raw), None) => parse_count(raw, "pin count")?,
            (None, Some(dial)) => dial.default_length,
            (None, None) => parse_count(DEFAULT_PIN_COUNT, "pin count")?,
        };

        Ok(GenerationConfig {
            pin_count,
            enabled_types: EnabledTypes::from_flags(
                parse_flag(self.standard.as_deref()),
                parse_flag(self.spool.as_deref()),
                parse_flag(self.serrated.as_deref()),
            ),
            hard_mode: parse_flag(self.hard_mode.as_deref()),
            macs_mode: parse_flag(self.macs_mode.as_deref()),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub filter_lock_type: Option<String>,
    pub entries: Option<String>,
}

impl ExportRequest {
    pub fn to_filter(&self) -> Result<LogFilter, PinForgeError> {
        let mut filter = LogFilter::default();
        if let Some(code) = self.filter_lock_type.as_deref().filter(|c| !c.trim().is_empty()) {
            filter = filter.lock_type(resolve_lock_type_code(code));
        }
        if let Some(raw) = self.entries.as_deref().filter(|r| !r.trim().is_empty()) {
            let limit: i64 = raw.trim().parse().map_err(|_| {
                PinForgeError::InvalidArgument(format!("Invalid entries: '{}'", raw))
            })?;
            // Zero or negative means "everything".
            if let Ok(limit) = usize::try_from(limit) {
                filter = filter.limit(limit);
            }
        }
        Ok(filter)
    }
}

/// Service: generate a sequence, log it and remember it.
pub fn generate_sequence<L: SequenceLog>(
    state: &PinForgeState<L>,
    request: &GenerateRequest,
) -> Result<Vec<PinRecord>, ApiError> {
    let profile = request.profile();
    let config = request.to_config(&profile)?;

    let result = {
        let mut generator = state.generator.lock().unwrap_or_else(|e| e.into_inner());
        generator.generate(&profile, &config)?
    };

    if let Err(e) = state.log().append(LogEntry::from(&result)) {
        warn!("Failed to log {} sequence: {}", result.lock_type_code, e);
        return Err(e.into());
    }

    info!(
        "🔐 Generated {} sequence with {} spots",
        result.lock_type_code,
        result.len()
    );
    let pins = result.pins.clone();
    state.history.record(result);
    Ok(pins)
}

/// Service: the recent-history ring, newest first.
pub fn recent_sequences<L: SequenceLog>(state: &PinForgeState<L>) -> Vec<HistoryView> {
    state.history.views()
}

/// Service: write the filtered log as a table. Nothing to export is
/// `not_found`.
pub fn export_log<L: SequenceLog, W: Write>(
    state: &PinForgeState<L>,
    request: &ExportRequest,
    out: W,
) -> Result<usize, ApiError> {
    let filter = request.to_filter()?;
    let exported = log::export(&*state.log(), &filter, out)?;
    info!("📤 Exported {} sequences", exported);
    Ok(exported)
}

/// Service: wipe the durable log and the recent history.
pub fn clear_log<L: SequenceLog>(state: &PinForgeState<L>) -> Result<String, ApiError> {
    state.log().clear()?;
    state.history.reset();
    Ok("Log cleared successfully".to_string())
}
