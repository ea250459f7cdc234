//! Layout-agnostic report documents
//!
//! A [`ReportDocument`] is the ordered list of blocks a renderer lays out onto
//! pages. The block order is the report contract; page breaks, fonts and cell
//! widths belong to the renderer (see [`crate::adapters::pdf`]).

use crate::core::annotation::{self, AnnotationEntry};
use crate::core::dataset::is_all_effects;
use crate::core::report::{split_methods, InterpretationRow};
use crate::domain::patient::PatientInfo;
use crate::domain::variant::{EffectListing, VariantRecord};

/// Title printed in the first-page header
pub const REPORT_TITLE: &str = "Variant Analysis Report";

pub const EXECUTIVE_SUMMARY: &str = "Executive Summary";
pub const METHODS: &str = "Testing Material and Methods";
pub const ACMG_RESULT: &str = "ACMG Result & Interpretation";
pub const INTERPRETATION: &str = "Interpretation";
pub const RECOMMENDATION: &str = "Recommendation";
pub const COUNSELOR_NOTE: &str = "Counselor's Note";
pub const CONCLUSION: &str = "Conclusion";

/// Shown when the method text yields no steps
pub const NO_METHOD_STEPS: &str = "No testing material or methods available.";

/// Interpretation table headers
pub const TABLE_HEADERS: [&str; 3] = ["Variant Detail", "Zygosity", "ACMG"];
/// Interpretation table column widths in millimetres
pub const TABLE_WIDTHS_MM: [f32; 3] = [70.0, 40.0, 70.0];

/// One layout instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// `Generated Version: ...`, right-aligned italic
    GeneratedVersion(String),
    /// `Label: value` lines
    PatientInfo(Vec<(String, String)>),
    /// Section heading on a shaded band
    StyledHeading(String),
    /// Bold sub-heading
    Title(String),
    Paragraph(String),
    BulletList(Vec<String>),
    Table {
        headers: Vec<String>,
        widths_mm: Vec<f32>,
        rows: Vec<Vec<String>>,
    },
}

/// A titled sequence of blocks
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    /// First-page header title
    pub title: String,
    pub blocks: Vec<Block>,
}

impl ReportDocument {
    fn new() -> Self {
        Self {
            title: REPORT_TITLE.to_string(),
            blocks: Vec::new(),
        }
    }

    fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    fn section(&mut self, heading: &str, text: &str) -> &mut Self {
        self.push(Block::StyledHeading(heading.to_string()))
            .push(Block::Paragraph(text.to_string()))
    }

    /// Headings of all styled sections, in order
    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::StyledHeading(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Builds the full variant report layout
pub fn build_document(
    record: &VariantRecord,
    patient: &PatientInfo,
    entries: &[AnnotationEntry],
    version: &str,
) -> ReportDocument {
    let mut doc = ReportDocument::new();

    doc.push(Block::GeneratedVersion(version.to_string()))
        .push(Block::PatientInfo(
            patient
                .labeled_fields()
                .iter()
                .map(|(label, value)| (label.to_string(), value.to_string()))
                .collect(),
        ))
        .section(EXECUTIVE_SUMMARY, record.summary_or_default());

    doc.push(Block::StyledHeading(METHODS.to_string()));
    let steps = split_methods(record.method_or_default());
    if steps.iter().any(|step| !step.trim().is_empty()) {
        doc.push(Block::BulletList(steps));
    } else {
        doc.push(Block::Paragraph(NO_METHOD_STEPS.to_string()));
    }

    doc.push(Block::StyledHeading(ACMG_RESULT.to_string()))
        .push(Block::Table {
            headers: TABLE_HEADERS.iter().map(ToString::to_string).collect(),
            widths_mm: TABLE_WIDTHS_MM.to_vec(),
            rows: vec![InterpretationRow::from_record(record).cells()],
        })
        .push(Block::Title(INTERPRETATION.to_string()))
        .push(Block::Paragraph(annotation::render(entries)))
        .section(RECOMMENDATION, record.recommendation_or_default())
        .section(COUNSELOR_NOTE, record.counselor_note_or_default())
        .section(CONCLUSION, record.conclusion_or_default());

    doc
}

/// Title of a variant list document
///
/// `List of All Variants` for the `all` tag, otherwise the tag lower-cased
/// with its first letter upper-cased.
pub fn variant_list_title(effect: &str) -> String {
    if is_all_effects(effect) {
        return "List of All Variants".to_string();
    }

    let lowered = effect.to_lowercase();
    let mut chars = lowered.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("List of Variant {capitalized}")
}

/// Builds the variant list layout
pub fn build_variant_list_document(
    listing: &EffectListing,
    effect: &str,
    version: &str,
) -> ReportDocument {
    let mut doc = ReportDocument::new();
    doc.push(Block::GeneratedVersion(version.to_string()))
        .push(Block::StyledHeading(variant_list_title(effect)))
        .push(Block::BulletList(listing.display_lines()));
    doc
}
