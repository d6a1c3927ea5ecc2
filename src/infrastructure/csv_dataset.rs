//! CSV price dataset loader.
//!
//! Handles the layout of downloaded daily price files: the first line names the columns,
//! the next lines (ticker row, empty "Date" row) carry no data, and the date column is
//! headed `Price`. Everything here is hidden behind `DatasetLoader`.

use crate::config::DatasetConfig;
use crate::domain::errors::ScoringError;
use crate::domain::ports::DatasetLoader;
use crate::domain::types::{Dataset, Record};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use tracing::{debug, info};

pub const DATE_COLUMN: &str = "Date";
pub const CLOSE_COLUMN: &str = "Close";
pub const TARGET_COLUMN: &str = "target";

pub struct CsvDatasetLoader {
    config: DatasetConfig,
}

impl CsvDatasetLoader {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    /// Parses dataset contents from any reader; records come back sorted by date.
    pub fn read<R: Read>(&self, reader: R) -> Result<Dataset, ScoringError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = rdr.records();

        let header = match rows.next() {
            Some(row) => row.map_err(format_error)?,
            None => return Err(ScoringError::DataFormat("file is empty".to_string())),
        };
        let columns: Vec<String> = header
            .iter()
            .map(|name| {
                if name == self.config.date_source_column {
                    DATE_COLUMN.to_string()
                } else {
                    name.to_string()
                }
            })
            .collect();

        let date_idx = column_index(&columns, DATE_COLUMN)?;
        let close_idx = column_index(&columns, CLOSE_COLUMN)?;
        let target_idx = column_index(&columns, TARGET_COLUMN)?;

        // The header line is the first skipped line
        for _ in 1..self.config.skip_rows {
            match rows.next() {
                Some(row) => {
                    row.map_err(format_error)?;
                }
                None => break,
            }
        }

        let mut records = Vec::new();
        for (offset, row) in rows.enumerate() {
            let row = row.map_err(format_error)?;
            let line = row
                .position()
                .map(|p| p.line())
                .unwrap_or((self.config.skip_rows + offset + 1) as u64);

            if row.len() != columns.len() {
                return Err(ScoringError::DataFormat(format!(
                    "line {}: expected {} fields, found {}",
                    line,
                    columns.len(),
                    row.len()
                )));
            }

            let date = parse_date(&row[date_idx]).ok_or_else(|| {
                ScoringError::DataFormat(format!(
                    "line {}: invalid date '{}'",
                    line, &row[date_idx]
                ))
            })?;

            let mut values = HashMap::with_capacity(columns.len() - 1);
            for (idx, (name, raw)) in columns.iter().zip(row.iter()).enumerate() {
                if idx == date_idx {
                    continue;
                }
                values.insert(name.clone(), parse_number(raw, name, line)?);
            }

            let close = row_value(&values, CLOSE_COLUMN);
            if !close.is_finite() || close <= 0.0 {
                return Err(ScoringError::DataFormat(format!(
                    "line {}: Close must be a positive price, got '{}'",
                    line, &row[close_idx]
                )));
            }

            let target = match row_value(&values, TARGET_COLUMN) {
                t if t == 0.0 => 0,
                t if t == 1.0 => 1,
                _ => {
                    return Err(ScoringError::DataFormat(format!(
                        "line {}: target must be 0 or 1, got '{}'",
                        line, &row[target_idx]
                    )));
                }
            };

            records.push(Record::new(date, close, target, values));
        }

        records.sort_by_key(|r| r.date);
        debug!("Parsed {} records with columns {:?}", records.len(), columns);
        Ok(Dataset::new(columns, records))
    }
}

impl DatasetLoader for CsvDatasetLoader {
    fn load(&self) -> Result<Dataset, ScoringError> {
        let path = &self.config.path;
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ScoringError::DataSourceMissing { path: path.clone() },
            _ => ScoringError::DataSource {
                path: path.clone(),
                source: e,
            },
        })?;

        let dataset = self.read(BufReader::new(file))?;
        info!("Loaded {} records from {:?}", dataset.len(), path);
        Ok(dataset)
    }

    fn source(&self) -> String {
        self.config.path.display().to_string()
    }
}

fn format_error(e: csv::Error) -> ScoringError {
    ScoringError::DataFormat(e.to_string())
}

fn column_index(columns: &[String], name: &str) -> Result<usize, ScoringError> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| ScoringError::DataFormat(format!("missing required column '{}'", name)))
}

fn row_value(values: &HashMap<String, f64>, column: &str) -> f64 {
    values.get(column).copied().unwrap_or(f64::NAN)
}

/// Empty cells read as NaN; anything else must be a number.
fn parse_number(raw: &str, column: &str, line: u64) -> Result<f64, ScoringError> {
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>().map_err(|_| {
        ScoringError::DataFormat(format!(
            "line {}: column '{}' has non-numeric value '{}'",
            line, column, raw
        ))
    })
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time and UTC offset.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z")
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}
