//! Sales CSV → [`Dataset`].
//!
//! The header row is checked up front so that every missing column is
//! reported at once. Rows are then decoded one by one; `Date` and `Time` are
//! parsed into chrono values here so nothing downstream ever compares raw
//! strings.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, StringRecord};
use mart_core::{CustomerType, Dataset, Field, Gender, LoadError, Record};
use serde::Deserialize;
use tracing::{debug, info};

const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// One CSV row before categorical and temporal columns are validated.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Invoice ID")]
    invoice_id: String,
    #[serde(rename = "Branch")]
    branch: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Customer type")]
    customer_type: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Product line")]
    product_line: String,
    #[serde(rename = "Unit price")]
    unit_price: Option<f64>,
    #[serde(rename = "Quantity")]
    quantity: Option<u32>,
    #[serde(rename = "Tax 5%")]
    tax: Option<f64>,
    #[serde(rename = "Total")]
    total: Option<f64>,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Payment")]
    payment: String,
    #[serde(rename = "cogs")]
    cogs: Option<f64>,
    #[serde(rename = "gross margin percentage")]
    gross_margin_pct: Option<f64>,
    #[serde(rename = "gross income")]
    gross_income: Option<f64>,
    #[serde(rename = "Rating")]
    rating: Option<f64>,
}

/// Reads the sales CSV at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let start = Instant::now();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_from_reader(file)?;
    info!(
        rows = dataset.len(),
        path = %path.display(),
        "loaded sales dataset"
    );
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "dataset load finished");
    Ok(dataset)
}

/// Reads sales CSV text from any reader. The first row must be the header.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|err| LoadError::Malformed {
            line: 1,
            reason: err.to_string(),
        })?
        .clone();
    check_headers(&headers)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|err| LoadError::Malformed {
            line: err.position().map_or(0, |p| p.line()),
            reason: err.to_string(),
        })?;
        let line = row.position().map_or(0, |p| p.line());
        let raw: RawRecord =
            row.deserialize(Some(&headers))
                .map_err(|err| LoadError::Malformed {
                    line,
                    reason: err.to_string(),
                })?;
        records.push(convert(raw, line)?);
    }
    Ok(Dataset::new(records))
}

fn check_headers(headers: &StringRecord) -> Result<(), LoadError> {
    let missing: Vec<String> = Field::ALL
        .iter()
        .map(|field| field.label())
        .filter(|label| !headers.iter().any(|h| h == *label))
        .map(String::from)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}

fn convert(raw: RawRecord, line: u64) -> Result<Record, LoadError> {
    let invalid = |field: Field, value: &str| LoadError::InvalidValue {
        line,
        column: field.label().to_string(),
        value: value.to_string(),
    };

    let customer_type: CustomerType = raw
        .customer_type
        .parse()
        .map_err(|_| invalid(Field::CustomerType, &raw.customer_type))?;
    let gender: Gender = raw
        .gender
        .parse()
        .map_err(|_| invalid(Field::Gender, &raw.gender))?;
    let date = parse_date(&raw.date).ok_or_else(|| invalid(Field::Date, &raw.date))?;
    let time = parse_time(&raw.time).ok_or_else(|| invalid(Field::Time, &raw.time))?;
    let unit_price = finite(raw.unit_price);
    if let Some(price) = unit_price {
        if price < 0.0 {
            return Err(invalid(Field::UnitPrice, &price.to_string()));
        }
    }

    Ok(Record {
        invoice_id: raw.invoice_id,
        branch: raw.branch,
        city: raw.city,
        customer_type,
        gender,
        product_line: raw.product_line,
        unit_price,
        quantity: raw.quantity,
        tax: finite(raw.tax),
        total: finite(raw.total),
        date,
        time,
        payment: raw.payment,
        cogs: finite(raw.cogs),
        gross_margin_pct: finite(raw.gross_margin_pct),
        gross_income: finite(raw.gross_income),
        rating: finite(raw.rating),
    })
}

/// `NaN` and infinities parse as floats but carry no measurement; they load
/// as nulls, the same as a blank cell.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Accepts the dataset's `M/D/YYYY` form and ISO `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}
