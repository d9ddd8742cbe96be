use crate::sequence::{EnabledTypes, PinRecord, PinType};

/// A sequence whose every below-max pin is a spool is too easy: promote the
/// first of those pins. Touches at most one record and returns its index.
pub fn repair_all_spool(pins: &mut [PinRecord], enabled: &EnabledTypes) -> Option<usize> {
    let max_height = pins.iter().map(|p| p.height).max()?;

    let mut below_max = pins
        .iter()
        .enumerate()
        .filter(|(_, p)| p.height < max_height)
        .peekable();
    let first = below_max.peek().map(|(idx, _)| *idx)?;

    if !below_max.all(|(_, p)| p.pin_type == PinType::Spool) {
        return None;
    }

    let replacement = if enabled.contains(PinType::Standard) {
        PinType::Standard
    } else if enabled.contains(PinType::Serrated) {
        PinType::Serrated
    } else {
        PinType::Standard
    };
    pins[first].pin_type = replacement;
    Some(first)
}

/// Caller selection beats height rules: without `serrated` enabled, nothing
/// may come out serrated.
pub fn suppress_serrated(pins: &mut [PinRecord], enabled: &EnabledTypes) -> usize {
    if enabled.contains(PinType::Serrated) {
        return 0;
    }
    let mut downgraded = 0;
    for pin in pins.iter_mut().filter(|p| p.pin_type == PinType::Serrated) {
        pin.pin_type = PinType::Standard;
        downgraded += 1;
    }
    downgraded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pins(spec: &[(u8, PinType)]) -> Vec<PinRecord> {
        spec.iter()
            .enumerate()
            .map(|(i, &(height, pin_type))| PinRecord {
                position: i + 1,
                height,
                pin_type,
            })
            .collect()
    }

    #[test]
    fn test_all_spool_below_max_is_repaired_once() {
        let mut seq = pins(&[
            (2, PinType::Spool),
            (8, PinType::Standard),
            (3, PinType::Spool),
        ]);
        let enabled = EnabledTypes::new([PinType::Standard, PinType::Spool]);
        assert_eq!(repair_all_spool(&mut seq, &enabled), Some(0));
        assert_eq!(seq[0].pin_type, PinType::Standard);
        assert_eq!(seq[2].pin_type, PinType::Spool);
    }

    #[test]
    fn test_repair_prefers_serrated_without_standard() {
        let mut seq = pins(&[(1, PinType::Spool), (5, PinType::Spool)]);
        let enabled = EnabledTypes::new([PinType::Spool, PinType::Serrated]);
        repair_all_spool(&mut seq, &enabled);
        assert_eq!(seq[0].pin_type, PinType::Serrated);
    }

    #[test]
    fn test_repair_falls_back_to_standard() {
        let mut seq = pins(&[(1, PinType::Spool), (5, PinType::Spool)]);
        let enabled = EnabledTypes::new([PinType::Spool]);
        repair_all_spool(&mut seq, &enabled);
        assert_eq!(seq[0].pin_type, PinType::Standard);
    }

    #[test]
    fn test_mixed_sequence_is_left_alone() {
        let mut seq = pins(&[(1, PinType::Spool), (2, PinType::Serrated), (5, PinType::Spool)]);
        let enabled = EnabledTypes::new([PinType::Spool, PinType::Serrated]);
        assert_eq!(repair_all_spool(&mut seq, &enabled), None);
    }

    #[test]
    fn test_flat_sequence_has_nothing_to_repair() {
        let mut seq = pins(&[(4, PinType::Spool), (4, PinType::Spool)]);
        let enabled = EnabledTypes::new([PinType::Spool, PinType::Standard]);
        assert_eq!(repair_all_spool(&mut seq, &enabled), None);
    }

    #[test]
    fn test_serrated_is_downgraded_when_not_enabled() {
        let mut seq = pins(&[(1, PinType::Serrated), (2, PinType::Spool)]);
        let enabled = EnabledTypes::new([PinType::Spool]);
        assert_eq!(suppress_serrated(&mut seq, &enabled), 1);
        assert_eq!(seq[0].pin_type, PinType::Standard);
    }
}
