//! CLI command implementations.

mod report;

pub use report::ReportCmd;
