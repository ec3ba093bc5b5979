//! Time-series record loading.

use std::io::Read;
use std::path::Path;

use cartogram_region_models::RegionRecord;
use serde::Deserialize;

use crate::IngestError;
use crate::parsing::{parse_date, parse_metric};

/// One CSV row as it appears on disk.
#[derive(Debug, Deserialize)]
struct RecordRow {
    #[serde(alias = "State", alias = "region", alias = "region_id")]
    state: String,
    #[serde(alias = "Date")]
    date: String,
    #[serde(alias = "proportionAffected", alias = "metric", alias = "metric_value")]
    proportion_affected: String,
}

impl RecordRow {
    fn into_record(self, row: usize) -> Result<RegionRecord, IngestError> {
        let invalid = |message: String| IngestError::InvalidRow {
            what: "record",
            row,
            message,
        };

        if self.state.is_empty() {
            return Err(invalid("empty region".to_string()));
        }
        let date = parse_date(&self.date).ok_or_else(|| invalid(format!("bad date '{}'", self.date)))?;
        let metric_value = parse_metric(&self.proportion_affected)
            .ok_or_else(|| invalid(format!("bad metric '{}'", self.proportion_affected)))?;

        Ok(RegionRecord {
            region_id: self.state,
            date,
            metric_value,
        })
    }
}

/// Parses records from any CSV source with a header row.
///
/// Rows keep their file order, which fixes the grouping order of the
/// aggregator.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] for malformed CSV and
/// [`IngestError::InvalidRow`] for rows with an empty region, an
/// unparseable date, or an unparseable metric.
pub fn parse_records(reader: impl Read) -> Result<Vec<RegionRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<RecordRow>().enumerate() {
        records.push(result?.into_record(i + 1)?);
    }

    log::debug!("Parsed {} records", records.len());
    Ok(records)
}

/// Loads records from a CSV file.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or parsed.
pub fn load_records(path: &Path) -> Result<Vec<RegionRecord>, IngestError> {
    let contents = crate::read_file(path)?;
    let records = parse_records(contents.as_bytes())?;
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
