//! Report generation module.
//!
//! Use [`ProfileReport`] for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use eda_profiler::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build_report("data/train.csv", profile);
//!
//! // Print as JSON
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! // Or write to file
//! let generator = ReportGenerator::new(PathBuf::from("output"));
//! generator.write_report_to_file(&report, "train")?;
//! ```

mod generator;

pub use generator::{
    ProfileReport, RelationEntry, ReportGenerator, ReportHighlights, TypePercentages,
};
