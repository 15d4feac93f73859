//! Declarative chart instructions for an external renderer.
//!
//! Nothing here computes: [`chart::to_chart_spec`] only checks that every bound
//! field exists in the table and copies names and titles verbatim.

pub mod chart;

pub use chart::{to_chart_spec, BarMode, ChartBinding, ChartInstruction, ChartKind};
