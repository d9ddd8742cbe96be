use crate::sequence::PinType;
use std::ops::RangeInclusive;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// The closed set of lock profiles the generator knows about.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(ascii_case_insensitive)]
pub enum LockType {
    #[strum(to_string = "A1100", serialize = "american")]
    A1100,
    #[strum(to_string = "SC1", serialize = "schlage")]
    Sc1,
    #[strum(to_string = "KW1", serialize = "kwikset")]
    Kw1,
    #[strum(to_string = "SAFE", serialize = "combination", serialize = "dial")]
    Safe,
}

/// Height-keyed type assignment rule. Rules are evaluated in order and the
/// first one that resolves to an enabled type wins.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRule {
    /// Heights in range always get `pin_type`, provided the caller enabled it.
    Forced {
        heights: RangeInclusive<u8>,
        pin_type: PinType,
    },
    /// Heights in range pick among the enabled `choices` by weight.
    Weighted {
        heights: RangeInclusive<u8>,
        choices: Vec<(PinType, f64)>,
    },
}

impl TypeRule {
    pub fn applies_to(&self, height: u8) -> bool {
        match self {
            Self::Forced { heights, .. } | Self::Weighted { heights, .. } => {
                heights.contains(&height)
            }
        }
    }
}

/// Combination dial parameters: values are drawn without replacement from
/// `values` minus the `excluded` band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialSpec {
    pub excluded: RangeInclusive<u8>,
    pub default_length: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LockProfile {
    pub code: String,
    pub height_domain: RangeInclusive<u8>,
    pub macs_limit: Option<u8>,
    pub rules: Vec<TypeRule>,
    pub dial: Option<DialSpec>,
}

// Low pins are the "easy" bin where spools and serrations compete.
const SPOOL_WEIGHT: f64 = 0.7;
const SERRATED_WEIGHT: f64 = 0.3;

fn low_pin_rule(heights: RangeInclusive<u8>) -> TypeRule {
    TypeRule::Weighted {
        heights,
        choices: vec![
            (PinType::Spool, SPOOL_WEIGHT),
            (PinType::Serrated, SERRATED_WEIGHT),
        ],
    }
}

fn top_pin_rule(height: u8) -> TypeRule {
    TypeRule::Forced {
        heights: height..=height,
        pin_type: PinType::Standard,
    }
}

impl LockType {
    pub fn profile(&self) -> LockProfile {
        match self {
            Self::A1100 => LockProfile {
                code: self.to_string(),
                height_domain: 1..=8,
                macs_limit: None,
                rules: vec![top_pin_rule(8), low_pin_rule(1..=3)],
                dial: None,
            },
            Self::Sc1 => LockProfile {
                code: self.to_string(),
                height_domain: 0..=9,
                macs_limit: Some(7),
                rules: vec![top_pin_rule(9), low_pin_rule(0..=2)],
                dial: None,
            },
            Self::Kw1 => LockProfile {
                code: self.to_string(),
                height_domain: 1..=6,
                macs_limit: Some(4),
                rules: vec![top_pin_rule(6), low_pin_rule(1..=2)],
                dial: None,
            },
            Self::Safe => LockProfile {
                code: self.to_string(),
                height_domain: 0..=99,
                macs_limit: None,
                rules: Vec::new(),
                dial: Some(DialSpec {
                    excluded: 4..=12,
                    default_length: 3,
                }),
            },
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::A1100 => "Practice tumbler, 8 depths",
            Self::Sc1 => "Schlage SC1 keyway, 10 depths",
            Self::Kw1 => "Kwikset KW1 keyway, 6 depths",
            Self::Safe => "Combination dial, 0-99",
        }
    }
}

/// Maps a free-form selector onto a canonical lock type code. Unknown
/// selectors pass through unchanged.
pub fn resolve_lock_type_code(raw: &str) -> String {
    match LockType::from_str(raw.trim()) {
        Ok(lock) => lock.to_string(),
        Err(_) => raw.to_string(),
    }
}

impl LockProfile {
    /// Looks up the profile for a selector. Unknown selectors generate
    /// against the default tumbler but keep their own code.
    pub fn resolve(raw: &str) -> Self {
        match LockType::from_str(raw.trim()) {
            Ok(lock) => lock.profile(),
            Err(_) => LockProfile {
                code: raw.to_string(),
                ..LockType::A1100.profile()
            },
        }
    }

    pub fn is_combination(&self) -> bool {
        self.dial.is_some()
    }

    pub fn max_height(&self) -> u8 {
        *self.height_domain.end()
    }

    pub fn domain_size(&self) -> usize {
        self.height_domain.clone().count()
    }
}
