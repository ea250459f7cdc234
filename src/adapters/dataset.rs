//! Variant dataset loading
//!
//! The dataset is the variant spreadsheet with the columns
//! `Uploaded_variation, Nomenclature, Zygosity, effectid_5cls, acmg_criteria,
//! Summary, method, recommendation, counselor's note, conclusion report`.
//! It is read either from the workbook itself (`.xlsx`, `.xlsm`, `.xls`,
//! `.ods`; first sheet) or from a CSV/TSV export. Extra columns are ignored
//! and missing optional columns read as empty.

use crate::config::DatasetConfig;
use crate::core::dataset::Dataset;
use crate::domain::errors::ReportError;
use crate::domain::result::Result;
use crate::domain::variant::VariantRecord;
use calamine::{open_workbook_auto, Data, Reader};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;

const KEY_COLUMN: &str = "Uploaded_variation";

/// Loads the dataset described by `config`
///
/// # Errors
///
/// Returns [`ReportError::Dataset`] if the file cannot be opened or a row
/// cannot be parsed.
pub fn load_dataset(config: &DatasetConfig) -> Result<Dataset> {
    let path = Path::new(&config.path);

    let dataset = if config.is_workbook() {
        read_workbook(path)?
    } else {
        let file = std::fs::File::open(path).map_err(|e| {
            ReportError::Dataset(format!("Failed to open dataset {}: {}", path.display(), e))
        })?;
        read_dataset(std::io::BufReader::new(file), config.delimiter_byte())?
    };

    tracing::info!(
        path = %path.display(),
        rows = dataset.len(),
        workbook = config.is_workbook(),
        "Dataset loaded"
    );

    Ok(dataset)
}

/// Loads the dataset, degrading to an empty one on failure
///
/// The service keeps running without data; every lookup then reports
/// not-found.
pub fn load_dataset_or_empty(config: &DatasetConfig) -> Dataset {
    match load_dataset(config) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::warn!(
                path = %config.path,
                error = %e,
                "Failed to load dataset, continuing with an empty dataset"
            );
            Dataset::empty()
        }
    }
}

/// Reads records from any delimited source with a header row
pub fn read_dataset<R: Read>(reader: R, delimiter: u8) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    collect_records(&headers, csv_reader.records())
}

/// Reads the first worksheet of a spreadsheet workbook
pub fn read_workbook(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        ReportError::Dataset(format!("Failed to open workbook {}: {}", path.display(), e))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            ReportError::Dataset(format!("Workbook {} has no worksheets", path.display()))
        })?
        .map_err(|e| {
            ReportError::Dataset(format!("Failed to read workbook {}: {}", path.display(), e))
        })?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()))
        .map(StringRecord::from_iter)
        .unwrap_or_default();

    collect_records(&headers, rows.map(|row| Ok(cells_to_record(row))))
}

/// Converts worksheet cells to the text a CSV export would hold
fn cells_to_record(row: &[Data]) -> StringRecord {
    row.iter()
        .map(|cell| match cell {
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect()
}

fn collect_records<I>(headers: &StringRecord, rows: I) -> Result<Dataset>
where
    I: Iterator<Item = std::result::Result<StringRecord, csv::Error>>,
{
    if !headers.iter().any(|h| h == KEY_COLUMN) {
        return Err(ReportError::Dataset(format!(
            "Dataset is missing the '{KEY_COLUMN}' column"
        )));
    }

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        // +2: one for the header row, one for 1-based numbering
        let line = index + 2;
        let record = row
            .and_then(|row| row.deserialize::<VariantRecord>(Some(headers)))
            .map_err(|e| ReportError::Dataset(format!("Invalid dataset row {line}: {e}")))?;
        records.push(record);
    }

    Ok(Dataset::new(records))
}
