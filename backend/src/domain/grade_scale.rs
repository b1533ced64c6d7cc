//! Letter-grade resolution against an ordered threshold scale.

use shared::ScaleEntry;
use std::cmp::Ordering;

/// Resolve a percentage to the matching scale entry.
///
/// Entries are scanned in descending `min` order and the first whose
/// threshold is at or below `percent` wins. A percentage below every
/// threshold resolves to the lowest entry. No interpolation: 92.999 on a
/// scale with an A at 93 is not an A. Percentages outside 0..=100 (extra
/// credit, penalties) go through the same scan without special-casing.
///
/// Returns `None` only for an empty scale; callers substitute the built-in
/// default before resolving.
pub fn resolve(percent: f64, scale: &[ScaleEntry]) -> Option<&ScaleEntry> {
    let mut ordered: Vec<&ScaleEntry> = scale.iter().collect();
    ordered.sort_by(|a, b| b.min.partial_cmp(&a.min).unwrap_or(Ordering::Equal));

    ordered
        .iter()
        .find(|entry| percent >= entry.min)
        .copied()
        .or_else(|| ordered.last().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tier_scale() -> Vec<ScaleEntry> {
        vec![
            ScaleEntry::new("A", 93.0, 4.0),
            ScaleEntry::new("B", 83.0, 3.0),
            ScaleEntry::new("F", 0.0, 0.0),
        ]
    }

    #[test]
    fn thresholds_are_inclusive() {
        let scale = three_tier_scale();
        assert_eq!(resolve(93.0, &scale).unwrap().letter, "A");
        assert_eq!(resolve(92.999, &scale).unwrap().letter, "B");
        assert_eq!(resolve(83.0, &scale).unwrap().letter, "B");
    }

    #[test]
    fn below_every_threshold_falls_back_to_lowest() {
        let scale = three_tier_scale();
        assert_eq!(resolve(-5.0, &scale).unwrap().letter, "F");
    }

    #[test]
    fn extra_credit_resolves_to_top_tier() {
        let scale = three_tier_scale();
        assert_eq!(resolve(112.0, &scale).unwrap().letter, "A");
    }

    #[test]
    fn unordered_scale_is_sorted_before_scanning() {
        let scale = vec![
            ScaleEntry::new("F", 0.0, 0.0),
            ScaleEntry::new("A", 93.0, 4.0),
            ScaleEntry::new("B", 83.0, 3.0),
        ];
        assert_eq!(resolve(95.0, &scale).unwrap().letter, "A");
        assert_eq!(resolve(85.0, &scale).unwrap().letter, "B");
    }

    #[test]
    fn empty_scale_resolves_to_none() {
        assert!(resolve(50.0, &[]).is_none());
    }
}
