//! Sales records and the immutable dataset that holds them.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::table::Cell;

/// Loyalty status of the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CustomerType {
    Member,
    Normal,
}

impl CustomerType {
    pub fn as_str(self) -> &'static str {
        match self {
            CustomerType::Member => "Member",
            CustomerType::Normal => "Normal",
        }
    }
}

impl FromStr for CustomerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Member" => Ok(CustomerType::Member),
            "Normal" => Ok(CustomerType::Normal),
            other => Err(format!("unknown customer type '{other}'")),
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Female" => Ok(Gender::Female),
            "Male" => Ok(Gender::Male),
            other => Err(format!("unknown gender '{other}'")),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage class of a column, as reported by the overview page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Date,
    Time,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
        }
    }
}

/// One column of the sales CSV. `label()` is the exact header name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    InvoiceId,
    Branch,
    City,
    CustomerType,
    Gender,
    ProductLine,
    UnitPrice,
    Quantity,
    Tax,
    Total,
    Date,
    Time,
    Payment,
    Cogs,
    GrossMarginPct,
    GrossIncome,
    Rating,
}

impl Field {
    /// Every column in file order.
    pub const ALL: [Field; 17] = [
        Field::InvoiceId,
        Field::Branch,
        Field::City,
        Field::CustomerType,
        Field::Gender,
        Field::ProductLine,
        Field::UnitPrice,
        Field::Quantity,
        Field::Tax,
        Field::Total,
        Field::Date,
        Field::Time,
        Field::Payment,
        Field::Cogs,
        Field::GrossMarginPct,
        Field::GrossIncome,
        Field::Rating,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::InvoiceId => "Invoice ID",
            Field::Branch => "Branch",
            Field::City => "City",
            Field::CustomerType => "Customer type",
            Field::Gender => "Gender",
            Field::ProductLine => "Product line",
            Field::UnitPrice => "Unit price",
            Field::Quantity => "Quantity",
            Field::Tax => "Tax 5%",
            Field::Total => "Total",
            Field::Date => "Date",
            Field::Time => "Time",
            Field::Payment => "Payment",
            Field::Cogs => "cogs",
            Field::GrossMarginPct => "gross margin percentage",
            Field::GrossIncome => "gross income",
            Field::Rating => "Rating",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::InvoiceId
            | Field::Branch
            | Field::City
            | Field::CustomerType
            | Field::Gender
            | Field::ProductLine
            | Field::Payment => FieldKind::Text,
            Field::Quantity => FieldKind::Integer,
            Field::UnitPrice
            | Field::Tax
            | Field::Total
            | Field::Cogs
            | Field::GrossMarginPct
            | Field::GrossIncome
            | Field::Rating => FieldKind::Decimal,
            Field::Date => FieldKind::Date,
            Field::Time => FieldKind::Time,
        }
    }

    pub fn from_label(label: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.label() == label)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One sales transaction.
///
/// Numeric measures are optional: a blank cell in the source file is a null
/// and is skipped by every aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub invoice_id: String,
    pub branch: String,
    pub city: String,
    pub customer_type: CustomerType,
    pub gender: Gender,
    pub product_line: String,
    pub unit_price: Option<f64>,
    pub quantity: Option<u32>,
    pub tax: Option<f64>,
    pub total: Option<f64>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub payment: String,
    pub cogs: Option<f64>,
    pub gross_margin_pct: Option<f64>,
    pub gross_income: Option<f64>,
    pub rating: Option<f64>,
}

impl Record {
    /// Value of `field` as a table cell.
    pub fn cell(&self, field: Field) -> Cell {
        match field {
            Field::InvoiceId => Cell::Text(self.invoice_id.clone()),
            Field::Branch => Cell::Text(self.branch.clone()),
            Field::City => Cell::Text(self.city.clone()),
            Field::CustomerType => Cell::Text(self.customer_type.to_string()),
            Field::Gender => Cell::Text(self.gender.to_string()),
            Field::ProductLine => Cell::Text(self.product_line.clone()),
            Field::Quantity => self.quantity.map_or(Cell::Null, |q| Cell::Int(i64::from(q))),
            Field::Date => Cell::Date(self.date),
            Field::Time => Cell::Time(self.time),
            Field::Payment => Cell::Text(self.payment.clone()),
            numeric => self.number(numeric).map_or(Cell::Null, Cell::Float),
        }
    }

    /// Numeric value of `field`, `None` for nulls and non-numeric columns.
    pub fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::UnitPrice => self.unit_price,
            Field::Quantity => self.quantity.map(f64::from),
            Field::Tax => self.tax,
            Field::Total => self.total,
            Field::Cogs => self.cogs,
            Field::GrossMarginPct => self.gross_margin_pct,
            Field::GrossIncome => self.gross_income,
            Field::Rating => self.rating,
            _ => None,
        }
    }

    /// Whether `field` holds a null in this record.
    pub fn is_null(&self, field: Field) -> bool {
        match field.kind() {
            FieldKind::Integer | FieldKind::Decimal => self.number(field).is_none(),
            FieldKind::Text => matches!(self.cell(field), Cell::Text(ref s) if s.is_empty()),
            FieldKind::Date | FieldKind::Time => false,
        }
    }
}

/// Ordered, immutable collection of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest transaction date, `None` when empty.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Distinct cities in first-seen order.
    pub fn cities(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.city) {
                seen.push(record.city.clone());
            }
        }
        seen
    }

    /// Non-null numeric values of `field`, in row order.
    pub fn numbers(&self, field: Field) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|r| r.number(field))
            .collect()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Dataset::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
