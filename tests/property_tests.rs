use pinforge::config::GenerationConfig;
use pinforge::generator::SequenceGenerator;
use pinforge::profiles::LockType;
use pinforge::sequence::{EnabledTypes, PinType};
use proptest::prelude::*;

// --- STRATEGIES ---

fn arb_pin_lock() -> impl Strategy<Value = LockType> {
    prop_oneof![
        Just(LockType::A1100),
        Just(LockType::Sc1),
        Just(LockType::Kw1),
    ]
}

prop_compose! {
    fn arb_config()(
        pin_count in 1usize..16,
        standard in any::<bool>(),
        spool in any::<bool>(),
        serrated in any::<bool>(),
        hard_mode in any::<bool>(),
        macs_mode in any::<bool>()
    ) -> GenerationConfig {
        GenerationConfig {
            pin_count,
            enabled_types: EnabledTypes::from_flags(standard, spool, serrated),
            hard_mode,
            macs_mode,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_pin_sequences_honour_every_rule(
        lock in arb_pin_lock(),
        config in arb_config(),
        seed in any::<u64>()
    ) {
        let profile = lock.profile();
        let result = SequenceGenerator::new(Some(seed))
            .generate(&profile, &config)
            .unwrap();

        prop_assert_eq!(result.len(), config.pin_count);
        for (i, pin) in result.pins.iter().enumerate() {
            prop_assert_eq!(pin.position, i + 1);
            prop_assert!(profile.height_domain.contains(&pin.height));
            prop_assert!(pin.pin_type != PinType::Combination);
        }

        for pair in result.pins.windows(2) {
            let delta = pair[0].height.abs_diff(pair[1].height);
            if config.hard_mode {
                prop_assert!(delta >= 2, "hard mode delta {}", delta);
            }
            if config.macs_mode {
                if let Some(limit) = profile.macs_limit {
                    prop_assert!(delta <= limit, "MACS delta {} > {}", delta, limit);
                }
            }
        }

        if !config.enabled_types.contains(PinType::Serrated) {
            prop_assert!(result.pins.iter().all(|p| p.pin_type != PinType::Serrated));
        }

        let enabled = &config.enabled_types;
        if enabled.contains(PinType::Standard) || enabled.contains(PinType::Serrated) {
            let top = result.pins.iter().map(|p| p.height).max().unwrap();
            let below: Vec<_> = result.pins.iter().filter(|p| p.height < top).collect();
            if !below.is_empty() {
                prop_assert!(below.iter().any(|p| p.pin_type != PinType::Spool));
            }
        }
    }

    #[test]
    fn test_combinations_are_distinct_and_outside_band(
        length in 1usize..=91,
        seed in any::<u64>()
    ) {
        let profile = LockType::Safe.profile();
        let config = GenerationConfig::new(length, EnabledTypes::default());
        let result = SequenceGenerator::new(Some(seed))
            .generate(&profile, &config)
            .unwrap();

        prop_assert_eq!(result.len(), length);
        let mut values = result.heights();
        prop_assert!(values.iter().all(|v| !(4..=12).contains(v) && *v <= 99));
        prop_assert!(result.pins.iter().all(|p| p.pin_type == PinType::Combination));
        values.sort_unstable();
        values.dedup();
        prop_assert_eq!(values.len(), length);
    }
}
