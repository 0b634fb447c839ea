//! Distance tier lookup and schedule checks.

use rust_decimal::Decimal;

use super::error::PricingError;
use super::models::{DistanceRange, DistanceTier};

/// Find the tier covering `distance` meters.
///
/// Ranges are scanned in order. A `Terminal` result means the order cannot
/// be delivered; a distance matched by nothing is a schedule defect.
pub fn resolve(distance: u64, ranges: &[DistanceRange]) -> Result<DistanceTier, PricingError> {
    ranges
        .iter()
        .map(DistanceRange::tier)
        .find(|tier| tier.contains(distance))
        .ok_or(PricingError::NoMatchingRange { distance })
}

/// Check that a schedule is contiguous from 0 and ends in a terminal entry.
///
/// All problems are reported together so a venue can be fixed in one pass.
pub fn validate_schedule(ranges: &[DistanceRange]) -> Result<(), PricingError> {
    let mut errors = Vec::new();

    let Some(first) = ranges.first() else {
        return Err(PricingError::MalformedSchedule {
            message: "schedule has no distance ranges".to_string(),
            errors: vec!["distance_ranges is empty".to_string()],
        });
    };

    if first.min != 0 {
        errors.push(format!("first range starts at {} m instead of 0", first.min));
    }

    let last_index = ranges.len() - 1;
    for (i, range) in ranges.iter().enumerate() {
        if range.is_terminal() {
            if i != last_index {
                errors.push(format!("terminal range at index {} is not last", i));
            }
            continue;
        }

        if range.min >= range.max {
            errors.push(format!(
                "range {} has min {} >= max {}",
                i, range.min, range.max
            ));
        }
        if range.a < 0 {
            errors.push(format!("range {} has negative a = {}", i, range.a));
        }
        if range.b < Decimal::ZERO {
            errors.push(format!("range {} has negative b = {}", i, range.b));
        }
        if let Some(next) = ranges.get(i + 1) {
            if next.min != range.max {
                errors.push(format!(
                    "range {} ends at {} m but range {} starts at {} m",
                    i,
                    range.max,
                    i + 1,
                    next.min
                ));
            }
        }
    }

    if !ranges[last_index].is_terminal() {
        errors.push("schedule does not end with a terminal range (max = 0)".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(PricingError::MalformedSchedule {
            message: format!("{} problem(s) in distance ranges", errors.len()),
            errors,
        })
    }
}

/// Check a venue's flat amounts together with its schedule.
///
/// Negative `order_minimum` or `base_price` would let totals go below zero.
pub fn validate_venue_pricing(
    order_minimum: i64,
    base_price: i64,
    ranges: &[DistanceRange],
) -> Result<(), PricingError> {
    let mut errors = Vec::new();
    if order_minimum < 0 {
        errors.push(format!("negative order_minimum = {}", order_minimum));
    }
    if base_price < 0 {
        errors.push(format!("negative base_price = {}", base_price));
    }

    match validate_schedule(ranges) {
        Ok(()) if errors.is_empty() => return Ok(()),
        Ok(()) => {}
        Err(PricingError::MalformedSchedule {
            errors: schedule_errors,
            ..
        }) => errors.extend(schedule_errors),
        Err(other) => return Err(other),
    }

    Err(PricingError::MalformedSchedule {
        message: format!("{} problem(s) in venue pricing", errors.len()),
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn helsinki_schedule() -> Vec<DistanceRange> {
        vec![
            DistanceRange::priced(0, 500, 0, dec!(0)),
            DistanceRange::priced(500, 1000, 100, dec!(0)),
            DistanceRange::priced(1000, 1500, 200, dec!(0)),
            DistanceRange::priced(1500, 2000, 200, dec!(1)),
            DistanceRange::terminal(2000),
        ]
    }

    fn error_list(result: Result<(), PricingError>) -> Vec<String> {
        match result {
            Err(PricingError::MalformedSchedule { errors, .. }) => errors,
            other => panic!("expected MalformedSchedule, got {:?}", other),
        }
    }

    // ==================== resolve tests ====================

    #[test]
    fn test_resolve_first_tier() {
        let tier = resolve(177, &helsinki_schedule()).unwrap();
        assert_eq!(
            tier,
            DistanceTier::Priced { min: 0, max: 500, a: 0, b: dec!(0) }
        );
    }

    #[test]
    fn test_resolve_lower_bound_is_inclusive() {
        let tier = resolve(500, &helsinki_schedule()).unwrap();
        assert_eq!(
            tier,
            DistanceTier::Priced { min: 500, max: 1000, a: 100, b: dec!(0) }
        );
    }

    #[test]
    fn test_resolve_upper_bound_is_exclusive() {
        let tier = resolve(1999, &helsinki_schedule()).unwrap();
        assert!(matches!(tier, DistanceTier::Priced { min: 1500, .. }));

        let tier = resolve(2000, &helsinki_schedule()).unwrap();
        assert_eq!(tier, DistanceTier::Terminal { min: 2000 });
    }

    #[test]
    fn test_resolve_far_distance_hits_terminal() {
        let tier = resolve(5740, &helsinki_schedule()).unwrap();
        assert_eq!(tier, DistanceTier::Terminal { min: 2000 });
    }

    #[test]
    fn test_resolve_without_terminal_is_an_error() {
        let ranges = vec![DistanceRange::priced(0, 500, 0, dec!(0))];
        assert_eq!(
            resolve(800, &ranges),
            Err(PricingError::NoMatchingRange { distance: 800 })
        );
    }

    #[test]
    fn test_resolve_empty_schedule_is_an_error() {
        assert_eq!(
            resolve(0, &[]),
            Err(PricingError::NoMatchingRange { distance: 0 })
        );
    }

    // ==================== validate_schedule tests ====================

    #[test]
    fn test_validate_accepts_well_formed_schedule() {
        assert_eq!(validate_schedule(&helsinki_schedule()), Ok(()));
    }

    #[test]
    fn test_validate_accepts_terminal_only() {
        assert_eq!(validate_schedule(&[DistanceRange::terminal(0)]), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty() {
        let errors = error_list(validate_schedule(&[]));
        assert_eq!(errors, vec!["distance_ranges is empty".to_string()]);
    }

    #[test]
    fn test_validate_rejects_gap() {
        let ranges = vec![
            DistanceRange::priced(0, 500, 0, dec!(0)),
            DistanceRange::priced(600, 1000, 100, dec!(0)),
            DistanceRange::terminal(1000),
        ];
        let errors = error_list(validate_schedule(&ranges));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("ends at 500"));
    }

    #[test]
    fn test_validate_rejects_missing_terminal() {
        let ranges = vec![DistanceRange::priced(0, 500, 0, dec!(0))];
        let errors = error_list(validate_schedule(&ranges));
        assert!(errors[0].contains("terminal"));
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let ranges = vec![
            DistanceRange::priced(100, 50, -1, dec!(-2)),
            DistanceRange::terminal(50),
            DistanceRange::priced(50, 80, 0, dec!(0)),
        ];
        let errors = error_list(validate_schedule(&ranges));
        // start, min >= max, negative a, negative b, terminal not last, no terminal at end
        assert_eq!(errors.len(), 6, "{:?}", errors);
    }

    // ==================== validate_venue_pricing tests ====================

    #[test]
    fn test_venue_pricing_accepts_helsinki() {
        assert_eq!(validate_venue_pricing(1000, 190, &helsinki_schedule()), Ok(()));
        assert_eq!(validate_venue_pricing(0, 0, &helsinki_schedule()), Ok(()));
    }

    #[test]
    fn test_venue_pricing_rejects_negative_amounts() {
        let errors = error_list(validate_venue_pricing(-1, -190, &helsinki_schedule()));
        assert_eq!(
            errors,
            vec![
                "negative order_minimum = -1".to_string(),
                "negative base_price = -190".to_string(),
            ]
        );
    }

    #[test]
    fn test_venue_pricing_includes_schedule_problems() {
        let ranges = vec![DistanceRange::priced(0, 500, 0, dec!(0))];
        let errors = error_list(validate_venue_pricing(1000, -5, &ranges));
        assert_eq!(errors.len(), 2, "{:?}", errors);
        assert!(errors[0].contains("base_price"));
        assert!(errors[1].contains("terminal"));
    }
}
