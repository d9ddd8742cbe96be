pub mod repair;
pub mod sampling;

use crate::config::{GenerationConfig, MAX_PIN_COUNT};
use crate::error::{PfResult, PinForgeError};
use crate::profiles::{DialSpec, LockProfile, TypeRule};
use crate::sequence::{EnabledTypes, PinRecord, PinType, SequenceResult, TIMESTAMP_FORMAT};
use fastrand::Rng;
use sampling::{candidate_heights, WeightedChoice};
use tracing::debug;

/// Minimum height change between neighbours in hard mode.
pub const HARD_MODE_MIN_DELTA: u8 = 2;

pub struct SequenceGenerator {
    pub rng: Rng,
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SequenceGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => Rng::with_seed(s),
            None => Rng::new(),
        };
        Self { rng }
    }

    pub fn generate(
        &mut self,
        profile: &LockProfile,
        config: &GenerationConfig,
    ) -> PfResult<SequenceResult> {
        if config.pin_count == 0 {
            return Err(PinForgeError::InvalidArgument(
                "pin count must be positive".to_string(),
            ));
        }
        if config.pin_count > MAX_PIN_COUNT {
            return Err(PinForgeError::InvalidArgument(format!(
                "pin count {} exceeds the maximum of {}",
                config.pin_count, MAX_PIN_COUNT
            )));
        }

        let pins = match &profile.dial {
            Some(dial) => self.generate_combination(profile, dial, config.pin_count)?,
            None => self.generate_pins(profile, config)?,
        };

        Ok(SequenceResult {
            lock_type_code: profile.code.clone(),
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            hard_mode: config.hard_mode && !profile.is_combination(),
            pins,
        })
    }

    fn generate_pins(
        &mut self,
        profile: &LockProfile,
        config: &GenerationConfig,
    ) -> PfResult<Vec<PinRecord>> {
        let domain = &profile.height_domain;
        if config.hard_mode && profile.domain_size() < 2 {
            return Err(PinForgeError::UnsatisfiableConstraint(format!(
                "hard mode needs at least two heights, {} has {:?}",
                profile.code, domain
            )));
        }

        let min_delta = config.hard_mode.then_some(HARD_MODE_MIN_DELTA);
        let max_delta = if config.macs_mode {
            if profile.macs_limit.is_none() {
                debug!("MACS mode ignored: {} defines no MACS limit", profile.code);
            }
            profile.macs_limit
        } else {
            None
        };

        let mut pins = Vec::with_capacity(config.pin_count);
        let mut previous: Option<u8> = None;

        for position in 1..=config.pin_count {
            let candidates = candidate_heights(domain, previous, min_delta, max_delta);
            if candidates.is_empty() {
                return Err(PinForgeError::UnsatisfiableConstraint(format!(
                    "no height in {:?} satisfies the adjacency rules after {:?} at spot {}",
                    domain, previous, position
                )));
            }

            let height = candidates[self.rng.usize(..candidates.len())];
            let pin_type = self.assign_type(profile, height, &config.enabled_types);

            pins.push(PinRecord {
                position,
                height,
                pin_type,
            });
            previous = Some(height);
        }

        if let Some(idx) = repair::repair_all_spool(&mut pins, &config.enabled_types) {
            debug!("Repaired all-spool sequence at spot {}", idx + 1);
        }
        repair::suppress_serrated(&mut pins, &config.enabled_types);

        Ok(pins)
    }

    fn assign_type(&mut self, profile: &LockProfile, height: u8, enabled: &EnabledTypes) -> PinType {
        for rule in profile.rules.iter().filter(|r| r.applies_to(height)) {
            match rule {
                TypeRule::Forced { pin_type, .. } => {
                    if enabled.contains(*pin_type) {
                        return *pin_type;
                    }
                }
                TypeRule::Weighted { choices, .. } => {
                    let competing = choices
                        .iter()
                        .copied()
                        .filter(|(t, _)| enabled.contains(*t));
                    if let Some(choice) = WeightedChoice::new(competing) {
                        return choice.sample(&mut self.rng);
                    }
                }
            }
        }

        let options: Vec<PinType> = enabled.iter().collect();
        options[self.rng.usize(..options.len())]
    }

    fn generate_combination(
        &mut self,
        profile: &LockProfile,
        dial: &DialSpec,
        length: usize,
    ) -> PfResult<Vec<PinRecord>> {
        let mut pool: Vec<u8> = profile
            .height_domain
            .clone()
            .filter(|v| !dial.excluded.contains(v))
            .collect();

        if length > pool.len() {
            return Err(PinForgeError::InvalidArgument(format!(
                "combination length {} exceeds the {} distinct values available",
                length,
                pool.len()
            )));
        }

        self.rng.shuffle(&mut pool);
        pool.truncate(length);

        Ok(pool
            .into_iter()
            .enumerate()
            .map(|(i, value)| PinRecord {
                position: i + 1,
                height: value,
                pin_type: PinType::Combination,
            })
            .collect())
    }
}
