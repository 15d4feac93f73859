//! # mart-core: sales dataset model
//!
//! The shared vocabulary of the mart workspace:
//!
//! - [`Record`] / [`Dataset`]: one supermarket transaction and the immutable,
//!   ordered collection loaded from the sales CSV
//! - [`Field`]: the seventeen source columns with their exact header labels
//! - [`DerivedTable`] / [`Cell`]: the pure-data result every query returns
//! - [`stats`]: descriptive statistics (quartiles, Pearson r, OLS, Tukey fences)
//! - [`MartError`] / [`LoadError`]: the unified error types
//!
//! Loading lives in `mart-io`, the query catalog in `mart-query`, and chart
//! instructions in `mart-viz`.

pub mod error;
pub mod record;
pub mod stats;
pub mod table;
#[doc(hidden)]
pub mod testing;

pub use error::{LoadError, MartError, MartResult};
pub use record::{CustomerType, Dataset, Field, FieldKind, Gender, Record};
pub use table::{Cell, DerivedTable};
