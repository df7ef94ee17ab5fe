//! Export functionality for analysis and research
//!
//! Currently supports CSV export of per-epoch performance curves.

mod curves_csv;

pub use curves_csv::CurvesCsvExporter;
