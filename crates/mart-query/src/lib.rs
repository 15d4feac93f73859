//! # mart-query: query catalog and filter engine
//!
//! Maps a `(page, question)` selection to a [`mart_core::DerivedTable`] and a
//! [`mart_viz::ChartInstruction`].
//!
//! ```rust,no_run
//! use mart_io::DatasetHandle;
//! use mart_query::catalog;
//!
//! fn main() -> anyhow::Result<()> {
//!     let handle = DatasetHandle::new("supermarket_sales - Sheet1.csv");
//!     let dataset = handle.get()?;
//!     let question = catalog::resolve("Bivariate Analysis", "Correlation Between Unit Price and Quantity")?;
//!     let output = catalog::run(question, &dataset, None)?;
//!     println!("{}", output.notes.join("\n"));
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: pages, questions, label resolution and dispatch
//! - [`filter`]: the date-range / city filter of the last page
//! - [`aggregate`]: group-by, value counts and box summaries
//! - [`pages`]: one computation module per page

pub mod aggregate;
pub mod catalog;
pub mod filter;
pub mod pages;

pub use catalog::{pages as list_pages, resolve, run, Page, Question, QueryOutput};
pub use filter::DateCityFilter;
