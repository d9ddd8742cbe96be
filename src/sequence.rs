use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum_macros::{Display, EnumIter, EnumString};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PinType {
    Standard,
    Spool,
    Serrated,
    Combination,
}

/// The caller's selection of pin types. Never empty: an empty selection
/// collapses to `{standard}`. `combination` is not selectable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeSet<PinType>", into = "BTreeSet<PinType>")]
pub struct EnabledTypes(BTreeSet<PinType>);

impl From<BTreeSet<PinType>> for EnabledTypes {
    fn from(set: BTreeSet<PinType>) -> Self {
        Self::new(set)
    }
}

impl From<EnabledTypes> for BTreeSet<PinType> {
    fn from(enabled: EnabledTypes) -> Self {
        enabled.0
    }
}

impl EnabledTypes {
    pub fn new<I: IntoIterator<Item = PinType>>(types: I) -> Self {
        let mut set: BTreeSet<PinType> = types
            .into_iter()
            .filter(|t| *t != PinType::Combination)
            .collect();
        if set.is_empty() {
            set.insert(PinType::Standard);
        }
        Self(set)
    }

    pub fn from_flags(standard: bool, spool: bool, serrated: bool) -> Self {
        let flagged = [
            (standard, PinType::Standard),
            (spool, PinType::Spool),
            (serrated, PinType::Serrated),
        ];
        Self::new(flagged.into_iter().filter(|(on, _)| *on).map(|(_, t)| t))
    }

    pub fn contains(&self, t: PinType) -> bool {
        self.0.contains(&t)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = PinType> + '_ {
        self.0.iter().copied()
    }
}

impl Default for EnabledTypes {
    fn default() -> Self {
        Self::new([PinType::Standard])
    }
}

/// One generated position. Serializes as `{spot, pin, type}`, the shape
/// client code consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRecord {
    #[serde(rename = "spot")]
    pub position: usize,
    #[serde(rename = "pin")]
    pub height: u8,
    #[serde(rename = "type")]
    pub pin_type: PinType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceResult {
    pub lock_type_code: String,
    pub timestamp: String,
    pub hard_mode: bool,
    pub pins: Vec<PinRecord>,
}

impl SequenceResult {
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn heights(&self) -> Vec<u8> {
        self.pins.iter().map(|p| p.height).collect()
    }

    pub fn types(&self) -> Vec<PinType> {
        self.pins.iter().map(|p| p.pin_type).collect()
    }
}
