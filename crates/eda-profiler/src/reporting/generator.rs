use crate::error::Result;
use crate::types::{ColumnType, DatasetProfile, RelationResult};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Columns with more than this share of missing cells are flagged.
const HIGH_MISSING_PERCENTAGE: f64 = 50.0;

// ============================================================================
// Report Types
// ============================================================================

/// Profile report for CLI and library output.
///
/// Use this for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,

    pub highlights: ReportHighlights,

    /// Relations requested alongside the profile
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<RelationEntry>,

    pub profile: DatasetProfile,
}

/// Short findings derived from the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHighlights {
    pub duplicate_rows: usize,
    pub duplicate_percentage: String,
    pub missing_percentage: String,
    /// Columns with more than half of their cells missing
    pub high_missing_columns: Vec<String>,
    /// Columns whose every cell is missing
    pub empty_columns: Vec<String>,
    /// Share of columns per type, one decimal
    pub type_percentages: TypePercentages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypePercentages {
    pub numeric: String,
    pub categorical: String,
    pub text: String,
    pub unknown: String,
}

/// A relation computed for a named column pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationEntry {
    pub x: String,
    pub y: String,
    pub result: RelationResult,
}

// ============================================================================
// Report Generator
// ============================================================================

/// Builds profile reports and writes them to disk.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    /// Create a new ReportGenerator writing into `output_dir`.
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Build a report from a finished profile.
    pub fn build_report(input_file: &str, profile: DatasetProfile) -> ProfileReport {
        let highlights = Self::build_highlights(&profile);
        debug!(
            "Report highlights: {} high-missing columns, {} empty columns",
            highlights.high_missing_columns.len(),
            highlights.empty_columns.len()
        );

        ProfileReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            highlights,
            relations: Vec::new(),
            profile,
        }
    }

    fn build_highlights(profile: &DatasetProfile) -> ReportHighlights {
        let overview = &profile.overview;

        let high_missing_columns = profile
            .column_profiles
            .iter()
            .filter(|col| col.missing_percentage > HIGH_MISSING_PERCENTAGE)
            .map(|col| col.name.clone())
            .collect();

        let empty_columns = profile
            .column_profiles
            .iter()
            .filter(|col| col.column_type == ColumnType::Unknown)
            .map(|col| col.name.clone())
            .collect();

        let columns = overview.column_count.max(1) as f64;
        let share = |n: usize| format!("{:.1}", n as f64 / columns * 100.0);
        let dist = overview.type_distribution;

        let duplicate_percentage = if overview.row_count > 0 {
            overview.duplicate_rows as f64 / overview.row_count as f64 * 100.0
        } else {
            0.0
        };

        ReportHighlights {
            duplicate_rows: overview.duplicate_rows,
            duplicate_percentage: format!("{:.1}", duplicate_percentage),
            missing_percentage: overview.missing_percentage_display(),
            high_missing_columns,
            empty_columns,
            type_percentages: TypePercentages {
                numeric: share(dist.numeric),
                categorical: share(dist.categorical),
                text: share(dist.text),
                unknown: share(dist.unknown),
            },
        }
    }

    /// Write a report to a JSON file.
    ///
    /// The report is written to the output directory with the specified base name.
    /// For example, if `report_base_name` is "train", the file will be "train_report.json".
    pub fn write_report_to_file(
        &self,
        report: &ProfileReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfilerConfig;
    use crate::dataset::{Cell, Dataset};
    use crate::profiler::DataProfiler;
    use pretty_assertions::assert_eq;

    fn profile() -> DatasetProfile {
        let rows = vec![
            vec![Cell::from(1.0), Cell::Missing, Cell::from("x")],
            vec![Cell::from(2.0), Cell::Missing, Cell::from("y")],
            vec![Cell::from(2.0), Cell::Missing, Cell::from("y")],
            vec![Cell::from(3.0), Cell::Missing, Cell::Missing],
        ];
        let ds = Dataset::new(vec!["n".into(), "blank".into(), "c".into()], rows).unwrap();
        DataProfiler::profile_dataset(&ds, &ProfilerConfig::default()).unwrap()
    }

    #[test]
    fn test_build_report_highlights() {
        let report = ReportGenerator::build_report("data.csv", profile());
        let h = &report.highlights;

        assert_eq!(report.input_file, "data.csv");
        assert_eq!(h.duplicate_rows, 1);
        assert_eq!(h.duplicate_percentage, "25.0");
        assert_eq!(h.high_missing_columns, vec!["blank"]);
        assert_eq!(h.empty_columns, vec!["blank"]);
        assert_eq!(h.type_percentages.numeric, "33.3");
        assert_eq!(h.type_percentages.unknown, "33.3");
        assert_eq!(h.missing_percentage, "41.7");
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = std::env::temp_dir().join(format!("eda_profiler_report_{}", std::process::id()));
        let generator = ReportGenerator::new(dir.clone());
        let report = ReportGenerator::build_report("data.csv", profile());

        let path = generator.write_report_to_file(&report, "data").unwrap();
        assert_eq!(path, dir.join("data_report.json"));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["input_file"], "data.csv");
        assert_eq!(written["profile"]["overview"]["row_count"], 4);
        assert!(written.get("relations").is_none());

        fs::remove_dir_all(dir).unwrap();
    }
}
