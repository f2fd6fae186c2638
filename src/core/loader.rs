use crate::domain::model::EmployeeRecord;
use crate::utils::error::{ReportError, Result};
use serde::Deserialize;

pub const REQUIRED_COLUMNS: [&str; 3] = ["Name", "Department", "Score"];

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Score")]
    score: String,
}

/// Parses header-delimited CSV into employee records, in row order.
///
/// Any row that cannot be read aborts the whole load; there is no partial import.
pub fn load_records(data: &[u8]) -> Result<Vec<EmployeeRecord>> {
    let mut reader = csv::Reader::from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| csv_to_malformed(&e, 1))?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(ReportError::MalformedRecord {
                line: 1,
                reason: format!("missing required column '{}'", column),
            });
        }
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| csv_to_malformed(&e, 0))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let raw: RawRow = row
            .deserialize(Some(&headers))
            .map_err(|e| csv_to_malformed(&e, line))?;

        let score = raw
            .score
            .trim()
            .parse::<i64>()
            .map_err(|_| ReportError::MalformedRecord {
                line,
                reason: format!("Score '{}' is not an integer", raw.score),
            })?;

        records.push(EmployeeRecord {
            name: raw.name,
            department: raw.department,
            score,
        });
    }

    tracing::info!("CSV data read successfully ({} records)", records.len());
    Ok(records)
}

fn csv_to_malformed(error: &csv::Error, fallback_line: u64) -> ReportError {
    let line = error
        .position()
        .map(|p| p.line())
        .unwrap_or(fallback_line);
    ReportError::MalformedRecord {
        line,
        reason: error.to_string(),
    }
}
