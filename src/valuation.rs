//! Outlier-filtered price averaging.
//!
//! Samples further than 30% from the median are discarded before averaging.

use crate::constants::{MEDIAN_LOWER_BOUND, MEDIAN_UPPER_BOUND};
use crate::types::PriceSample;

/// Median of the samples; mean of the two middle values for an even count.
pub fn median(samples: &[PriceSample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = samples.iter().map(|s| s.isk()).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Keep samples within `[0.7 * median, 1.3 * median]`, preserving order.
pub fn filter_outliers(samples: &[PriceSample]) -> Vec<PriceSample> {
    let Some(median) = median(samples) else {
        return Vec::new();
    };
    let lower = MEDIAN_LOWER_BOUND * median;
    let upper = MEDIAN_UPPER_BOUND * median;

    samples
        .iter()
        .copied()
        .filter(|s| lower <= s.isk() && s.isk() <= upper)
        .collect()
}

/// Average unit price after outlier filtering, or `None` when nothing survives.
pub fn average_price(samples: &[PriceSample]) -> Option<f64> {
    let kept = filter_outliers(samples);
    if kept.is_empty() {
        return None;
    }
    let sum: f64 = kept.iter().map(|s| s.isk()).sum();
    Some(sum / kept.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(values: &[f64]) -> Vec<PriceSample> {
        values.iter().copied().map(PriceSample).collect()
    }

    #[test]
    fn median_of_odd_and_even_counts() {
        assert_eq!(median(&samples(&[3.0, 1.0, 2.0])), Some(2.0));
        assert_eq!(median(&samples(&[4.0, 1.0, 3.0, 2.0])), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn single_spike_is_filtered() {
        let prices = samples(&[100.0, 100.0, 100.0, 1000.0]);
        assert_eq!(median(&prices), Some(100.0));
        assert_eq!(filter_outliers(&prices), samples(&[100.0, 100.0, 100.0]));
        assert_eq!(average_price(&prices), Some(100.0));
    }

    #[test]
    fn bounds_are_inclusive() {
        let prices = samples(&[70.0, 100.0, 130.0]);
        assert_eq!(filter_outliers(&prices).len(), 3);
        assert_eq!(average_price(&prices), Some(100.0));
    }

    #[test]
    fn all_samples_can_be_filtered() {
        // median 0.5 lies between both samples, each deviating by 100%
        let prices = samples(&[0.0, 1.0]);
        assert!(filter_outliers(&prices).is_empty());
        assert_eq!(average_price(&prices), None);
    }

    #[test]
    fn no_samples_has_no_average() {
        assert_eq!(average_price(&[]), None);
    }

    #[test]
    fn tritanium_example_averages_to_median() {
        let prices = samples(&[5_200_000.0, 5_300_000.0, 5_250_000.0]);
        let avg = average_price(&prices).unwrap();
        assert!((avg - 5_250_000.0).abs() < 1e-6);
    }
}
