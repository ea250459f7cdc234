//! Variant dataset rows
//!
//! A [`VariantRecord`] is one row of the variant dataset. Column names follow the
//! upstream spreadsheet export, so the serde renames below are part of the
//! dataset contract.

use serde::{Deserialize, Serialize};

/// Fallback for an absent `Summary` cell
pub const NO_SUMMARY: &str = "No explanation available.";
/// Fallback for an absent `method` cell
pub const NO_METHOD: &str = "No Methods available";
/// Fallback for an absent `recommendation` cell
pub const NO_RECOMMENDATION: &str = "No recommendation available.";
/// Fallback for an absent `counselor's note` cell
pub const NO_COUNSELOR_NOTE: &str = "No Counselor's Note available.";
/// Fallback for an absent `conclusion report` cell
pub const NO_CONCLUSION: &str = "No conclusion available.";

/// One row of the variant dataset
///
/// Immutable once loaded. Empty cells deserialize as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariantRecord {
    /// Variant identifier, the lookup key
    #[serde(rename = "Uploaded_variation")]
    pub uploaded_variation: String,

    /// HGVS-style nomenclature
    #[serde(rename = "Nomenclature", default)]
    pub nomenclature: Option<String>,

    /// Zygosity call
    #[serde(rename = "Zygosity", default)]
    pub zygosity: Option<String>,

    /// Five-class effect tag (pathogenic, benign, ...)
    #[serde(rename = "effectid_5cls", default)]
    pub effect_class: Option<String>,

    /// Raw ACMG criteria annotation
    #[serde(rename = "acmg_criteria", default)]
    pub acmg_criteria: Option<String>,

    #[serde(rename = "Summary", default)]
    pub summary: Option<String>,

    #[serde(rename = "method", default)]
    pub method: Option<String>,

    #[serde(rename = "recommendation", default)]
    pub recommendation: Option<String>,

    #[serde(rename = "counselor's note", default)]
    pub counselor_note: Option<String>,

    #[serde(rename = "conclusion report", default)]
    pub conclusion_report: Option<String>,
}

impl VariantRecord {
    /// Creates a record with only the identifier set
    pub fn new(uploaded_variation: impl Into<String>) -> Self {
        Self {
            uploaded_variation: uploaded_variation.into(),
            ..Self::default()
        }
    }

    /// Sets the nomenclature
    pub fn with_nomenclature(mut self, value: impl Into<String>) -> Self {
        self.nomenclature = Some(value.into());
        self
    }

    /// Sets the zygosity
    pub fn with_zygosity(mut self, value: impl Into<String>) -> Self {
        self.zygosity = Some(value.into());
        self
    }

    /// Sets the effect class
    pub fn with_effect_class(mut self, value: impl Into<String>) -> Self {
        self.effect_class = Some(value.into());
        self
    }

    /// Sets the raw ACMG criteria
    pub fn with_acmg_criteria(mut self, value: impl Into<String>) -> Self {
        self.acmg_criteria = Some(value.into());
        self
    }

    /// Sets the executive summary
    pub fn with_summary(mut self, value: impl Into<String>) -> Self {
        self.summary = Some(value.into());
        self
    }

    /// Sets the testing method text
    pub fn with_method(mut self, value: impl Into<String>) -> Self {
        self.method = Some(value.into());
        self
    }

    /// Sets the recommendation
    pub fn with_recommendation(mut self, value: impl Into<String>) -> Self {
        self.recommendation = Some(value.into());
        self
    }

    /// Sets the counselor's note
    pub fn with_counselor_note(mut self, value: impl Into<String>) -> Self {
        self.counselor_note = Some(value.into());
        self
    }

    /// Sets the conclusion
    pub fn with_conclusion_report(mut self, value: impl Into<String>) -> Self {
        self.conclusion_report = Some(value.into());
        self
    }

    /// Raw ACMG criteria, empty when absent
    pub fn acmg_criteria(&self) -> &str {
        present(&self.acmg_criteria).unwrap_or("")
    }

    pub fn summary_or_default(&self) -> &str {
        present(&self.summary).unwrap_or(NO_SUMMARY)
    }

    pub fn method_or_default(&self) -> &str {
        present(&self.method).unwrap_or(NO_METHOD)
    }

    pub fn recommendation_or_default(&self) -> &str {
        present(&self.recommendation).unwrap_or(NO_RECOMMENDATION)
    }

    pub fn counselor_note_or_default(&self) -> &str {
        present(&self.counselor_note).unwrap_or(NO_COUNSELOR_NOTE)
    }

    pub fn conclusion_or_default(&self) -> &str {
        present(&self.conclusion_report).unwrap_or(NO_CONCLUSION)
    }

    /// Effect class comparison, ignoring case
    pub fn has_effect(&self, effect: &str) -> bool {
        self.effect_class
            .as_deref()
            .is_some_and(|class| class.to_lowercase() == effect.to_lowercase())
    }
}

// Blank cells count as absent
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Result of listing variants by effect tag
///
/// The `all` listing pairs each identifier with its effect class while a
/// filtered listing carries identifiers only. Callers rely on the difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectListing {
    /// Every record, with its effect class
    All(Vec<(String, Option<String>)>),
    /// Identifiers whose effect class matched the requested tag
    Matching(Vec<String>),
}

impl EffectListing {
    pub fn len(&self) -> usize {
        match self {
            EffectListing::All(pairs) => pairs.len(),
            EffectListing::Matching(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display lines for the variant list document
    pub fn display_lines(&self) -> Vec<String> {
        match self {
            EffectListing::All(pairs) => pairs
                .iter()
                .map(|(id, effect)| match effect {
                    Some(effect) => format!("{id} ({effect})"),
                    None => id.clone(),
                })
                .collect(),
            EffectListing::Matching(ids) => ids.clone(),
        }
    }
}
