// CSV sales data loading
use crate::domain::sales::{SalesRecord, SalesTable};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;

const REQUIRED_COLUMNS: [&str; 5] = ["date", "product", "region", "price", "quantity"];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("no sales data files found in {path}")]
    NoFiles { path: PathBuf },
    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },
    #[error("{path} row {row}: cannot parse {column} value '{value}'")]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },
    #[error("{path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load the sales table from a directory of `.csv` files, or from a single
/// file. Directory entries are read in file-name order so repeated loads
/// concatenate identically; the resulting table is sorted by date.
pub fn load_sales_data(path: &Path) -> Result<SalesTable, DataLoadError> {
    let files = if path.is_dir() {
        list_csv_files(path)?
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        Vec::new()
    };
    if files.is_empty() {
        return Err(DataLoadError::NoFiles {
            path: path.to_path_buf(),
        });
    }

    let mut records = Vec::new();
    for file in &files {
        load_file(file, &mut records)?;
        tracing::debug!("loaded {}", file.display());
    }
    Ok(SalesTable::from_records(records))
}

fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>, DataLoadError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DataLoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DataLoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_file(path: &Path, records: &mut Vec<SalesRecord>) -> Result<(), DataLoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| DataLoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| DataLoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut column_index = [0usize; REQUIRED_COLUMNS.len()];
    for (i, column) in REQUIRED_COLUMNS.iter().enumerate() {
        column_index[i] = headers.iter().position(|h| h == column).ok_or_else(|| {
            DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            }
        })?;
    }
    let [date_idx, product_idx, region_idx, price_idx, quantity_idx] = column_index;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|source| DataLoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let date = parse_date(field(date_idx)).ok_or_else(|| invalid(path, row_no, "date", field(date_idx)))?;
        let price = parse_price(field(price_idx)).ok_or_else(|| invalid(path, row_no, "price", field(price_idx)))?;
        let quantity: u32 = field(quantity_idx)
            .parse()
            .map_err(|_| invalid(path, row_no, "quantity", field(quantity_idx)))?;

        records.push(SalesRecord::new(
            date,
            field(product_idx).to_string(),
            field(region_idx).to_string(),
            price,
            quantity,
        ));
    }
    Ok(())
}

fn invalid(path: &Path, row: usize, column: &str, value: &str) -> DataLoadError {
    DataLoadError::InvalidValue {
        path: path.to_path_buf(),
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Strip currency symbols and digit separators ("$3.00", "1,200.50") before
/// parsing. An empty or all-symbol value is a parse failure, not zero.
fn parse_price(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
