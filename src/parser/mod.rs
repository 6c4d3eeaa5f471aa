use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::constants::{MILLION, THOUSAND};
use crate::types::PriceSample;

/// Turns raw price-history markup into scaled price samples.
pub trait PriceExtractor: Send + Sync {
    fn extract(&self, markup: &str) -> Vec<PriceSample>;
}

/// Matches cell text such as `>12,5M<` or `>850k<`.
static SUFFIX_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r">([\d.,]+)([Mk])<").expect("price token pattern is valid"));

/// Picks every `<number><M|k>` token sitting directly between two tags.
/// Commas are decimal separators.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuffixTokenExtractor;

impl SuffixTokenExtractor {
    pub fn new() -> Self {
        Self
    }

    fn scale(value: &str, suffix: &str) -> Option<PriceSample> {
        let number: f64 = value.replace(',', ".").parse().ok()?;
        let multiplier = if suffix == "M" { MILLION } else { THOUSAND };
        Some(PriceSample(number * multiplier))
    }
}

impl PriceExtractor for SuffixTokenExtractor {
    fn extract(&self, markup: &str) -> Vec<PriceSample> {
        let mut samples = Vec::new();
        for captures in SUFFIX_TOKEN.captures_iter(markup) {
            let value = &captures[1];
            let suffix = &captures[2];
            match Self::scale(value, suffix) {
                Some(sample) => samples.push(sample),
                None => debug!("Dropping unparsable price token {}{}", value, suffix),
            }
        }
        debug!("Extracted {} price samples", samples.len());
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn isk(samples: Vec<PriceSample>) -> Vec<f64> {
        samples.into_iter().map(PriceSample::isk).collect()
    }

    #[test]
    fn scales_million_and_thousand_suffixes() {
        let html = "<td>5,2M</td><td>5.3M</td><td>850k</td>";
        assert_eq!(isk(SuffixTokenExtractor.extract(html)), vec![5_200_000.0, 5_300_000.0, 850_000.0]);
    }

    #[test]
    fn ignores_tokens_outside_tag_delimiters() {
        let html = "<p>Total 5M traded</p><span> 3M</span><b>7k</b>";
        assert_eq!(isk(SuffixTokenExtractor.extract(html)), vec![7_000.0]);
    }

    #[test]
    fn ignores_other_suffixes() {
        let html = "<td>4B</td><td>12K</td><td>9m</td>";
        assert!(SuffixTokenExtractor.extract(html).is_empty());
    }

    #[test]
    fn drops_tokens_that_are_not_numbers() {
        let html = "<td>1,2,3M</td><td>,M</td><td>2M</td>";
        assert_eq!(isk(SuffixTokenExtractor.extract(html)), vec![2_000_000.0]);
    }

    #[test]
    fn empty_markup_yields_no_samples() {
        assert!(SuffixTokenExtractor::new().extract("").is_empty());
    }
}
