//! Report coordinator
//!
//! Ties the dataset, the annotation parser, the layout builders and the PDF
//! renderer together. One coordinator is shared by every request; it holds
//! no mutable state.

use crate::adapters::pdf::PdfRenderer;
use crate::adapters::storage::{report_file_name, variant_list_file_name, ReportStore};
use crate::config::ReportConfig;
use crate::core::annotation::{self, AnnotationEntry, ParseMode};
use crate::core::dataset::Dataset;
use crate::core::document::{self, ReportDocument};
use crate::core::report::{self, Report};
use crate::domain::patient::PatientInfo;
use crate::domain::result::Result;
use crate::domain::variant::VariantRecord;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// A rendered artifact and where it was stored
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    /// Download name offered to the client
    pub file_name: String,
    /// Location in the output directory
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Settings derived from [`ReportConfig`]
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub version_label: String,
    pub title: String,
    pub parse_mode: ParseMode,
}

impl ReportSettings {
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            version_label: config
                .version_label
                .clone()
                .unwrap_or_else(default_version_label),
            title: config.title.clone(),
            parse_mode: if config.strict_annotations {
                ParseMode::Strict
            } else {
                ParseMode::Lenient
            },
        }
    }
}

/// `v{crate version} ({Month Year})`
pub fn default_version_label() -> String {
    format!(
        "v{} ({})",
        env!("CARGO_PKG_VERSION"),
        Utc::now().format("%B %Y")
    )
}

/// Builds reports for variants in a shared dataset
#[derive(Debug, Clone)]
pub struct ReportCoordinator {
    dataset: Arc<Dataset>,
    settings: ReportSettings,
    patient: PatientInfo,
    renderer: PdfRenderer,
    store: ReportStore,
}

impl ReportCoordinator {
    /// Creates a coordinator over `dataset`
    ///
    /// `patient` is printed on every report that does not supply its own.
    pub fn new(dataset: Arc<Dataset>, config: &ReportConfig, patient: PatientInfo) -> Self {
        Self {
            dataset,
            settings: ReportSettings::from_config(config),
            patient,
            renderer: PdfRenderer::new(config.logo_path.as_ref().map(PathBuf::from)),
            store: ReportStore::new(&config.output_dir),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    pub fn default_patient(&self) -> &PatientInfo {
        &self.patient
    }

    fn interpret(&self, record: &VariantRecord) -> Result<Vec<AnnotationEntry>> {
        let entries = annotation::parse_with_mode(record.acmg_criteria(), self.settings.parse_mode)
            .map_err(|e| {
                tracing::error!(
                    variant = %record.uploaded_variation,
                    error = %e,
                    "Malformed ACMG criteria"
                );
                e
            })?;
        Ok(entries)
    }

    /// Builds the structured report for `variant`
    ///
    /// # Errors
    ///
    /// - [`ReportError::VariantNotFound`](crate::domain::ReportError::VariantNotFound)
    ///   when the variant is not in the dataset
    /// - [`ReportError::Annotation`](crate::domain::ReportError::Annotation)
    ///   in strict mode when the criteria are malformed
    pub fn json_report(&self, variant: &str, patient: Option<&PatientInfo>) -> Result<Report> {
        let record = self.dataset.lookup(variant)?;
        let entries = self.interpret(record)?;
        Ok(report::build_json(
            record,
            patient.unwrap_or(&self.patient),
            &entries,
        ))
    }

    /// Builds the report layout for `variant`
    pub fn report_document(
        &self,
        variant: &str,
        patient: Option<&PatientInfo>,
    ) -> Result<ReportDocument> {
        let record = self.dataset.lookup(variant)?;
        let entries = self.interpret(record)?;
        let mut doc = document::build_document(
            record,
            patient.unwrap_or(&self.patient),
            &entries,
            &self.settings.version_label,
        );
        doc.title = self.settings.title.clone();
        Ok(doc)
    }

    /// Renders and stores the PDF report for `variant`
    ///
    /// Blocking: call from a blocking context when running inside tokio.
    pub fn pdf_report(
        &self,
        variant: &str,
        patient: Option<&PatientInfo>,
    ) -> Result<GeneratedReport> {
        let started = Instant::now();
        let doc = self.report_document(variant, patient)?;
        let generated = self.render_and_store(&doc, report_file_name(variant))?;
        crate::log_report_generated!(variant, &generated.path, started.elapsed());
        Ok(generated)
    }

    /// Renders and stores the variant list PDF for `effect`
    ///
    /// `effect` is expected to be normalized (trimmed, lower-cased) by the
    /// caller; it names the output file.
    pub fn variant_list_pdf(&self, effect: &str) -> Result<GeneratedReport> {
        let started = Instant::now();
        let listing = self.dataset.list_by_effect(effect)?;
        let mut doc =
            document::build_variant_list_document(&listing, effect, &self.settings.version_label);
        doc.title = self.settings.title.clone();

        let generated = self.render_and_store(&doc, variant_list_file_name(effect))?;
        tracing::info!(
            effect = %effect,
            variants = listing.len(),
            path = %generated.path.display(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Variant list generated"
        );
        Ok(generated)
    }

    fn render_and_store(&self, doc: &ReportDocument, file_name: String) -> Result<GeneratedReport> {
        let bytes = self.renderer.render(doc)?;
        let path = self.store.write(&file_name, &bytes)?;
        Ok(GeneratedReport {
            file_name,
            path,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ReportError;
    use tempfile::TempDir;

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset::new(vec![
            VariantRecord::new("1_100_A/G")
                .with_effect_class("pathogenic")
                .with_acmg_criteria("PVS_score: Strong (De novo variant), broken token"),
            VariantRecord::new("2_200_C/T").with_effect_class("benign"),
        ]))
    }

    fn config(dir: &TempDir, strict: bool) -> ReportConfig {
        ReportConfig {
            output_dir: dir.path().to_string_lossy().to_string(),
            version_label: Some("v1.0.0 (January 2025)".to_string()),
            strict_annotations: strict,
            ..ReportConfig::default()
        }
    }

    fn coordinator(dir: &TempDir, strict: bool) -> ReportCoordinator {
        ReportCoordinator::new(dataset(), &config(dir, strict), PatientInfo::default())
    }

    #[test]
    fn test_json_report_lenient() {
        let dir = TempDir::new().unwrap();
        let coordinator = coordinator(&dir, false);

        let report = coordinator.json_report("1_100_A/G", None).unwrap();
        assert_eq!(report.variant, "1_100_A/G");
        assert_eq!(
            report.acmg_interpretation,
            "PVS_score: Strong (De novo variant)"
        );
        assert_eq!(report.patient_info, PatientInfo::default());
    }

    #[test]
    fn test_json_report_strict_rejects_malformed_criteria() {
        let dir = TempDir::new().unwrap();
        let coordinator = coordinator(&dir, true);

        let err = coordinator.json_report("1_100_A/G", None).unwrap_err();
        assert!(matches!(err, ReportError::Annotation(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_patient_override() {
        let dir = TempDir::new().unwrap();
        let coordinator = coordinator(&dir, false);
        let patient = PatientInfo {
            name: "Jane Roe".to_string(),
            ..PatientInfo::default()
        };

        let report = coordinator.json_report("2_200_C/T", Some(&patient)).unwrap();
        assert_eq!(report.patient_info.name, "Jane Roe");
    }

    #[test]
    fn test_unknown_variant() {
        let dir = TempDir::new().unwrap();
        let coordinator = coordinator(&dir, false);

        assert!(matches!(
            coordinator.json_report("9_999_T/T", None),
            Err(ReportError::VariantNotFound(_))
        ));
        assert!(matches!(
            coordinator.pdf_report("9_999_T/T", None),
            Err(ReportError::VariantNotFound(_))
        ));
    }

    #[test]
    fn test_pdf_report_written_to_output_dir() {
        let dir = TempDir::new().unwrap();
        let coordinator = coordinator(&dir, false);

        let generated = coordinator.pdf_report("1_100_A/G", None).unwrap();
        assert_eq!(generated.file_name, "1_100_A_G_report.pdf");
        assert_eq!(generated.path, dir.path().join("1_100_A_G_report.pdf"));
        assert!(generated.bytes.starts_with(b"%PDF"));
        assert_eq!(std::fs::read(&generated.path).unwrap(), generated.bytes);
    }

    #[test]
    fn test_variant_list_pdf() {
        let dir = TempDir::new().unwrap();
        let coordinator = coordinator(&dir, false);

        let generated = coordinator.variant_list_pdf("benign").unwrap();
        assert_eq!(generated.file_name, "benign_variants_report.pdf");
        assert!(generated.path.exists());

        assert!(matches!(
            coordinator.variant_list_pdf("uncertain"),
            Err(ReportError::EffectNotFound(_))
        ));
    }

    #[test]
    fn test_report_document_uses_configured_title() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, false);
        config.title = "Clinical Exome Report".to_string();
        let coordinator = ReportCoordinator::new(dataset(), &config, PatientInfo::default());

        let doc = coordinator.report_document("2_200_C/T", None).unwrap();
        assert_eq!(doc.title, "Clinical Exome Report");
    }

    #[test]
    fn test_default_version_label_mentions_crate_version() {
        let prefix = format!("v{} (", env!("CARGO_PKG_VERSION"));
        assert!(default_version_label().starts_with(&prefix));
    }
}
