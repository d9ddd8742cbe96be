use super::{LogEntry, LoggedPin};
use crate::error::{PfResult, PinForgeError};
use crate::sequence::PinType;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;
use strum_macros::{Display, EnumString};
use tracing::warn;

/// Fixed number of spot columns in the one-row-per-sequence layout.
pub const MAX_SPOTS: usize = 10;

const PER_PIN_HEADER: [&str; 6] = ["Timestamp", "Lock Type", "Spot", "Height", "Type", "Hard Mode"];
const PER_SEQUENCE_PREFIX: [&str; 4] = ["Lock #", "Timestamp", "Lock Type", "Hard Mode"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum LogLayout {
    /// `Timestamp,Lock Type,Spot,Height,Type,Hard Mode`, one row per pin.
    #[strum(to_string = "per_pin", serialize = "per-pin")]
    PerPin,
    /// `Lock #,Timestamp,Lock Type,Hard Mode,Spot 1..Spot 10`, one row per
    /// sequence with `"<height> <type>"` cells.
    #[strum(to_string = "per_sequence", serialize = "per-sequence")]
    PerSequence,
}

impl LogLayout {
    pub fn header(&self) -> Vec<String> {
        match self {
            Self::PerPin => PER_PIN_HEADER.iter().map(|s| s.to_string()).collect(),
            Self::PerSequence => PER_SEQUENCE_PREFIX
                .iter()
                .map(|s| s.to_string())
                .chain((1..=MAX_SPOTS).map(|i| format!("Spot {}", i)))
                .collect(),
        }
    }

    pub fn matches_header(&self, header: &StringRecord) -> bool {
        let expected = self.header();
        header.len() == expected.len() && header.iter().zip(&expected).all(|(a, b)| a.trim() == b.as_str())
    }

    pub fn check_fits(&self, entry: &LogEntry) -> PfResult<()> {
        if *self == Self::PerSequence && entry.pins.len() > MAX_SPOTS {
            return Err(PinForgeError::InvalidArgument(format!(
                "sequence of {} spots does not fit the {}-spot log layout",
                entry.pins.len(),
                MAX_SPOTS
            )));
        }
        Ok(())
    }

    /// Serializes one entry. `number` is the running lock number used by the
    /// per-sequence layout.
    pub fn write_entry<W: Write>(
        &self,
        wtr: &mut csv::Writer<W>,
        entry: &LogEntry,
        number: u64,
    ) -> PfResult<()> {
        self.check_fits(entry)?;
        let hard = entry.hard_mode.to_string();

        match self {
            Self::PerPin => {
                for (i, pin) in entry.pins.iter().enumerate() {
                    let spot = (i + 1).to_string();
                    let height = pin.height.to_string();
                    let kind = pin.pin_type.to_string();
                    wtr.write_record([
                        entry.timestamp.as_str(),
                        entry.lock_type_code.as_str(),
                        spot.as_str(),
                        height.as_str(),
                        kind.as_str(),
                        hard.as_str(),
                    ])?;
                }
            }
            Self::PerSequence => {
                let mut row = vec![
                    number.to_string(),
                    entry.timestamp.clone(),
                    entry.lock_type_code.clone(),
                    hard,
                ];
                for slot in 0..MAX_SPOTS {
                    row.push(match entry.pins.get(slot) {
                        Some(pin) => format!("{} {}", pin.height, pin.pin_type),
                        None => String::new(),
                    });
                }
                wtr.write_record(&row)?;
            }
        }
        Ok(())
    }

    /// Rebuilds entries from data rows. Rows that do not parse (e.g. a torn
    /// final write) are skipped with a warning.
    pub fn read_entries<I>(&self, records: I) -> Vec<LogEntry>
    where
        I: IntoIterator<Item = csv::Result<StringRecord>>,
    {
        let mut entries: Vec<LogEntry> = Vec::new();

        for (row_idx, result) in records.into_iter().enumerate() {
            let rec = match result {
                Ok(rec) => rec,
                Err(e) if e.is_io_error() => {
                    warn!("[Row {}] Read failed, stopping: {}", row_idx + 1, e);
                    break;
                }
                Err(e) => {
                    warn!("[Row {}] CSV parse error: {}", row_idx + 1, e);
                    continue;
                }
            };

            match self {
                Self::PerPin => match parse_pin_row(&rec) {
                    Some((spot, head, pin)) => {
                        let continues = entries.last().is_some_and(|current| {
                            spot != 1
                                && spot == current.pins.len() + 1
                                && current.timestamp == head.timestamp
                                && current.lock_type_code == head.lock_type_code
                        });

                        if continues {
                            if let Some(current) = entries.last_mut() {
                                current.pins.push(pin);
                            }
                        } else if spot == 1 {
                            let mut entry = head;
                            entry.pins.push(pin);
                            entries.push(entry);
                        } else {
                            warn!("[Row {}] Orphaned spot {} skipped", row_idx + 1, spot);
                        }
                    }
                    None => warn!("[Row {}] Malformed pin row skipped", row_idx + 1),
                },
                Self::PerSequence => match parse_sequence_row(&rec) {
                    Some(entry) => entries.push(entry),
                    None => warn!("[Row {}] Malformed sequence row skipped", row_idx + 1),
                },
            }
        }

        entries
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Returns the spot number, an entry header carrying the row's metadata,
/// and the pin itself.
fn parse_pin_row(rec: &StringRecord) -> Option<(usize, LogEntry, LoggedPin)> {
    if rec.len() < PER_PIN_HEADER.len() {
        return None;
    }
    let spot: usize = rec[2].trim().parse().ok()?;
    let height: u8 = rec[3].trim().parse().ok()?;
    let pin_type = PinType::from_str(rec[4].trim()).ok()?;
    let hard_mode = parse_bool(&rec[5])?;

    let head = LogEntry {
        timestamp: rec[0].to_string(),
        lock_type_code: rec[1].to_string(),
        hard_mode,
        pins: Vec::new(),
    };
    Some((spot, head, LoggedPin { height, pin_type }))
}

fn parse_sequence_row(rec: &StringRecord) -> Option<LogEntry> {
    if rec.len() < PER_SEQUENCE_PREFIX.len() + MAX_SPOTS {
        return None;
    }
    rec[0].trim().parse::<u64>().ok()?;
    let hard_mode = parse_bool(&rec[3])?;

    let mut pins = Vec::new();
    for cell in rec.iter().skip(PER_SEQUENCE_PREFIX.len()) {
        let cell = cell.trim();
        if cell.is_empty() {
            break;
        }
        let (height, kind) = cell.split_once(' ')?;
        pins.push(LoggedPin {
            height: height.parse().ok()?,
            pin_type: PinType::from_str(kind.trim()).ok()?,
        });
    }
    if pins.is_empty() {
        return None;
    }

    Some(LogEntry {
        timestamp: rec[1].to_string(),
        lock_type_code: rec[2].to_string(),
        hard_mode,
        pins,
    })
}
