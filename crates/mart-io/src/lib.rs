//! # mart-io: dataset loading and table export
//!
//! - [`loader`]: parses the sales CSV into a [`mart_core::Dataset`], checking
//!   the header and normalizing `Date` / `Time`
//! - [`handle::DatasetHandle`]: once-initialized shared dataset
//! - [`export`]: writes derived tables to CSV (via polars) or JSON
//!
//! ```rust,no_run
//! use mart_io::DatasetHandle;
//!
//! fn main() -> anyhow::Result<()> {
//!     let handle = DatasetHandle::new("supermarket_sales - Sheet1.csv");
//!     let dataset = handle.get()?;
//!     println!("{} transactions", dataset.len());
//!     Ok(())
//! }
//! ```

pub mod export;
pub mod handle;
pub mod loader;

pub use export::{to_dataframe, write_csv, write_table};
pub use handle::DatasetHandle;
pub use loader::{load, load_from_reader};
