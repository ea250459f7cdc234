//! Structured report assembly
//!
//! [`build_json`] maps a dataset row onto the [`Report`] shape returned by the
//! JSON endpoint. It is a pure function: fallbacks are applied here and
//! nothing is looked up or written.

use crate::core::annotation::{self, AnnotationEntry};
use crate::domain::errors::ReportError;
use crate::domain::patient::PatientInfo;
use crate::domain::variant::VariantRecord;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Separator between method steps in the `method` column
pub const METHOD_STEP_SEPARATOR: &str = ". ";

pub const INVALID_FORMAT: &str = "Invalid format. Supported formats are 'pdf' and 'json'.";

/// Output format of a single-variant report
///
/// Parsing is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Pdf,
    Json,
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(ReportFormat::Pdf),
            "json" => Ok(ReportFormat::Json),
            _ => Err(ReportError::Validation(INVALID_FORMAT.to_string())),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Pdf => write!(f, "pdf"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// The single row of the interpretation table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpretationRow {
    /// Variant nomenclature
    pub variant_detail: String,
    pub zygosity: String,
    /// Effect class
    pub acmg: String,
}

impl InterpretationRow {
    /// Builds the row, leaving absent cells empty
    pub fn from_record(record: &VariantRecord) -> Self {
        Self {
            variant_detail: record.nomenclature.clone().unwrap_or_default(),
            zygosity: record.zygosity.clone().unwrap_or_default(),
            acmg: record.effect_class.clone().unwrap_or_default(),
        }
    }

    pub fn cells(&self) -> Vec<String> {
        vec![
            self.variant_detail.clone(),
            self.zygosity.clone(),
            self.acmg.clone(),
        ]
    }
}

/// Assembled report for one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Requested variant identifier
    pub variant: String,
    pub patient_info: PatientInfo,
    pub executive_summary: String,
    /// Method text as stored in the dataset
    pub testing_material_and_methods: String,
    /// Method text split into steps
    pub methods: Vec<String>,
    pub interpretation_table: InterpretationRow,
    pub acmg_interpretation: String,
    pub recommendation: String,
    pub counselors_note: String,
    pub conclusion: String,
}

/// Builds the structured report for `record`
pub fn build_json(
    record: &VariantRecord,
    patient: &PatientInfo,
    entries: &[AnnotationEntry],
) -> Report {
    let method = record.method_or_default();

    Report {
        variant: record.uploaded_variation.clone(),
        patient_info: patient.clone(),
        executive_summary: record.summary_or_default().to_string(),
        testing_material_and_methods: method.to_string(),
        methods: split_methods(method),
        interpretation_table: InterpretationRow::from_record(record),
        acmg_interpretation: annotation::render(entries),
        recommendation: record.recommendation_or_default().to_string(),
        counselors_note: record.counselor_note_or_default().to_string(),
        conclusion: record.conclusion_or_default().to_string(),
    }
}

/// Splits method text into steps on `". "`
///
/// Steps are kept verbatim, including a trailing period on the last one.
pub fn split_methods(text: &str) -> Vec<String> {
    text.split(METHOD_STEP_SEPARATOR)
        .map(ToString::to_string)
        .collect()
}
