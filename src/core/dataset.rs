//! In-memory variant dataset
//!
//! The dataset is loaded once at startup and only read afterwards, so it is
//! shared between requests behind an `Arc` without locking.

use crate::domain::errors::ReportError;
use crate::domain::result::Result;
use crate::domain::variant::{EffectListing, VariantRecord};

/// Effect tag that selects every record
pub const ALL_EFFECTS: &str = "all";

/// Immutable table of variant records in source order
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<VariantRecord>,
}

impl Dataset {
    /// Creates a dataset from records in source order
    pub fn new(records: Vec<VariantRecord>) -> Self {
        Self { records }
    }

    /// Creates an empty dataset
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[VariantRecord] {
        &self.records
    }

    /// Finds the first record whose identifier equals `variant_id` exactly
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::VariantNotFound`] when no record matches.
    pub fn lookup(&self, variant_id: &str) -> Result<&VariantRecord> {
        self.records
            .iter()
            .find(|record| record.uploaded_variation == variant_id)
            .ok_or_else(|| ReportError::VariantNotFound(variant_id.to_string()))
    }

    /// Lists variants by effect tag
    ///
    /// `all` (any case) returns every record paired with its effect class.
    /// Any other tag filters on the effect class ignoring case and returns
    /// identifiers only.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::EffectNotFound`] when the listing is empty.
    pub fn list_by_effect(&self, effect: &str) -> Result<EffectListing> {
        let listing = if is_all_effects(effect) {
            EffectListing::All(
                self.records
                    .iter()
                    .map(|r| (r.uploaded_variation.clone(), r.effect_class.clone()))
                    .collect(),
            )
        } else {
            EffectListing::Matching(
                self.records
                    .iter()
                    .filter(|r| r.has_effect(effect))
                    .map(|r| r.uploaded_variation.clone())
                    .collect(),
            )
        };

        if listing.is_empty() {
            return Err(ReportError::EffectNotFound(effect.to_string()));
        }

        Ok(listing)
    }
}

/// Whether `effect` is the `all` tag, ignoring case
pub fn is_all_effects(effect: &str) -> bool {
    effect.to_lowercase() == ALL_EFFECTS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(vec![
            VariantRecord::new("1_100_A/G")
                .with_effect_class("Pathogenic")
                .with_summary("first"),
            VariantRecord::new("2_200_C/T").with_effect_class("benign"),
            VariantRecord::new("1_100_A/G")
                .with_effect_class("benign")
                .with_summary("duplicate"),
            VariantRecord::new("3_300_G/A").with_effect_class("PATHOGENIC"),
        ])
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let dataset = sample();
        let record = dataset.lookup("1_100_A/G").unwrap();
        assert_eq!(record.summary.as_deref(), Some("first"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dataset = Dataset::new(vec![VariantRecord::new("rs12AB")]);
        assert!(dataset.lookup("rs12AB").is_ok());
        assert!(matches!(
            dataset.lookup("rs12ab"),
            Err(ReportError::VariantNotFound(_))
        ));
    }

    #[test]
    fn test_lookup_missing_variant() {
        let err = Dataset::empty().lookup("rs404").unwrap_err();
        assert_eq!(err.to_string(), "Variant rs404 not found in the dataset.");
    }

    #[test]
    fn test_list_all_preserves_order_and_pairs() {
        let listing = sample().list_by_effect("ALL").unwrap();
        assert_eq!(
            listing,
            EffectListing::All(vec![
                ("1_100_A/G".to_string(), Some("Pathogenic".to_string())),
                ("2_200_C/T".to_string(), Some("benign".to_string())),
                ("1_100_A/G".to_string(), Some("benign".to_string())),
                ("3_300_G/A".to_string(), Some("PATHOGENIC".to_string())),
            ])
        );
    }

    #[test]
    fn test_list_by_effect_filters_ignoring_case() {
        let listing = sample().list_by_effect("Pathogenic").unwrap();
        assert_eq!(
            listing,
            EffectListing::Matching(vec!["1_100_A/G".to_string(), "3_300_G/A".to_string()])
        );
    }

    #[test]
    fn test_list_by_effect_no_match() {
        let err = sample().list_by_effect("uncertain").unwrap_err();
        assert!(matches!(err, ReportError::EffectNotFound(ref e) if e == "uncertain"));
    }

    #[test]
    fn test_list_all_on_empty_dataset_is_not_found() {
        assert!(Dataset::empty().list_by_effect("all").is_err());
    }
}
