//! Record fixtures shared by the unit and integration tests of every mart crate.

use chrono::{NaiveDate, NaiveTime};

use crate::record::{CustomerType, Gender, Record};

/// Builds a record in `city` on `date` (`YYYY-MM-DD`) with the given total.
///
/// The remaining fields carry fixed, plausible values; tests override what
/// they care about with struct update syntax.
pub fn record(city: &str, date: &str, total: f64) -> Record {
    Record {
        invoice_id: format!("{city}-{date}-{total}"),
        branch: "A".to_string(),
        city: city.to_string(),
        customer_type: CustomerType::Member,
        gender: Gender::Female,
        product_line: "Health and beauty".to_string(),
        unit_price: Some(10.0),
        quantity: Some(1),
        tax: Some(total * 0.05 / 1.05),
        total: Some(total),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("fixture date"),
        time: NaiveTime::from_hms_opt(13, 8, 0).expect("fixture time"),
        payment: "Cash".to_string(),
        cogs: Some(total / 1.05),
        gross_margin_pct: Some(4.761904762),
        gross_income: Some(total * 0.05 / 1.05),
        rating: Some(7.0),
    }
}
