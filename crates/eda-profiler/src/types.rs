use crate::binning::Histogram;
use crate::dataset::Row;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Column Types
// ============================================================================

/// Inferred semantic category of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Numeric,
    Categorical,
    Text,
    /// Every cell is missing.
    Unknown,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Text => "text",
            Self::Unknown => "unknown",
        }
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Column name to inferred type, in schema order.
///
/// Produced once per dataset and read by every downstream component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeMap {
    entries: Vec<(String, ColumnType)>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, column: impl Into<String>, column_type: ColumnType) {
        let column = column.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = column_type,
            None => self.entries.push((column, column_type)),
        }
    }

    pub fn get(&self, column: &str) -> Option<ColumnType> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, t)| *t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.entries.iter().map(|(name, t)| (name.as_str(), *t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ColumnType)> for TypeMap {
    fn from_iter<I: IntoIterator<Item = (String, ColumnType)>>(iter: I) -> Self {
        let mut map = TypeMap::new();
        for (column, column_type) in iter {
            map.insert(column, column_type);
        }
        map
    }
}

// ============================================================================
// Column Statistics
// ============================================================================

/// Descriptive statistics over the parseable values of a numeric column.
///
/// `std` is the population standard deviation. `q1`/`q3` are the sorted
/// elements at `floor(n * 0.25)` and `floor(n * 0.75)`, not interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
}

impl NumericStats {
    /// Stats for a column with no parseable values: zero count, zero fields.
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            std: 0.0,
            min: 0.0,
            max: 0.0,
            median: 0.0,
            q1: 0.0,
            q3: 0.0,
        }
    }

    /// Five-number summary for box plots.
    pub fn box_plot(&self) -> BoxPlotSummary {
        BoxPlotSummary {
            min: self.min,
            q1: self.q1,
            median: self.median,
            q3: self.q3,
            max: self.max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// One entry of a [`FrequencyTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

/// Occurrence counts of stringified values.
///
/// Entries are kept in first-encounter order, which is the tie-breaker when
/// ranking by count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FrequencyEntry>", into = "Vec<FrequencyEntry>")]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
    index: HashMap<String, usize>,
}

impl From<Vec<FrequencyEntry>> for FrequencyTable {
    fn from(entries: Vec<FrequencyEntry>) -> Self {
        let mut table = FrequencyTable::new();
        for entry in entries {
            match table.index.get(&entry.value) {
                Some(&pos) => table.entries[pos].count += entry.count,
                None => {
                    table.index.insert(entry.value.clone(), table.entries.len());
                    table.entries.push(entry);
                }
            }
        }
        table
    }
}

impl From<FrequencyTable> for Vec<FrequencyEntry> {
    fn from(table: FrequencyTable) -> Self {
        table.entries
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `value`.
    pub fn record(&mut self, value: impl Into<String>) {
        let value = value.into();
        match self.index.get(&value) {
            Some(&pos) => self.entries[pos].count += 1,
            None => {
                self.index.insert(value.clone(), self.entries.len());
                self.entries.push(FrequencyEntry { value, count: 1 });
            }
        }
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.index.get(value).map(|&pos| self.entries[pos].count)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Entries in first-encounter order.
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// The `k` most frequent entries, count descending.
    ///
    /// Ties keep first-encounter order.
    pub fn top(&self, k: usize) -> Vec<FrequencyEntry> {
        let mut ranked: Vec<(usize, &FrequencyEntry)> = self.entries.iter().enumerate().collect();
        ranked.sort_by(|(ia, a), (ib, b)| b.count.cmp(&a.count).then(ia.cmp(ib)));
        ranked
            .into_iter()
            .take(k)
            .map(|(_, entry)| entry.clone())
            .collect()
    }

    /// The most frequent entry, if any.
    pub fn mode(&self) -> Option<&FrequencyEntry> {
        // max_by_key keeps the last maximum; fold keeps the first.
        self.entries.iter().fold(None, |best, entry| match best {
            Some(b) if b.count >= entry.count => Some(b),
            _ => Some(entry),
        })
    }
}

/// Summary of a categorical or text column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    /// Number of non-missing values.
    pub count: usize,
    pub unique_count: usize,
    pub top_value: Option<FrequencyEntry>,
    pub frequencies: FrequencyTable,
}

/// Type-conditioned description of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnDescription {
    Numeric(NumericStats),
    Categorical(CategoricalSummary),
}

impl ColumnDescription {
    pub fn as_numeric(&self) -> Option<&NumericStats> {
        match self {
            Self::Numeric(stats) => Some(stats),
            Self::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalSummary> {
        match self {
            Self::Categorical(summary) => Some(summary),
            Self::Numeric(_) => None,
        }
    }
}

/// Everything shown for one selected column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub column_type: ColumnType,
    pub missing_count: usize,
    pub missing_percentage: f64,
    pub description: ColumnDescription,
    /// Present for numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Histogram>,
    /// Present for numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_plot: Option<BoxPlotSummary>,
    /// Most frequent values for non-numeric columns; empty otherwise.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub top_values: Vec<FrequencyEntry>,
}

// ============================================================================
// Dataset Overview
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub column: String,
    pub missing: usize,
}

/// Number of columns per inferred type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDistribution {
    pub numeric: usize,
    pub categorical: usize,
    pub text: usize,
    pub unknown: usize,
}

impl TypeDistribution {
    pub(crate) fn add(&mut self, column_type: ColumnType) {
        match column_type {
            ColumnType::Numeric => self.numeric += 1,
            ColumnType::Categorical => self.categorical += 1,
            ColumnType::Text => self.text += 1,
            ColumnType::Unknown => self.unknown += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.numeric + self.categorical + self.text + self.unknown
    }
}

/// Whole-dataset metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub row_count: usize,
    pub column_count: usize,
    pub total_cells: usize,
    pub total_missing: usize,
    /// Unrounded; see [`Overview::missing_percentage_display`].
    pub missing_percentage: f64,
    /// Schema order.
    pub missing_by_column: Vec<ColumnMissing>,
    pub duplicate_rows: usize,
    pub type_distribution: TypeDistribution,
}

impl Overview {
    /// Missing percentage rounded to one decimal.
    pub fn missing_percentage_display(&self) -> String {
        format!("{:.1}", self.missing_percentage)
    }

    pub fn missing_for(&self, column: &str) -> Option<usize> {
        self.missing_by_column
            .iter()
            .find(|m| m.column == column)
            .map(|m| m.missing)
    }
}

// ============================================================================
// Relations
// ============================================================================

/// Mean of a numeric column within one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub group: String,
    pub mean: f64,
    pub count: usize,
}

/// Co-occurrence counts between two categorical columns.
///
/// `counts[i][j]` is the number of valid rows with row category `i` and
/// column category `j`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossTab {
    pub row_categories: Vec<String>,
    pub column_categories: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    /// Count for a (row, column) category pair; 0 when either is absent.
    pub fn get(&self, row: &str, column: &str) -> usize {
        let r = self.row_categories.iter().position(|c| c == row);
        let c = self.column_categories.iter().position(|c| c == column);
        match (r, c) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_categories.is_empty()
    }
}

/// Outcome of comparing two columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelationResult {
    /// Pearson coefficient; 0 for degenerate input.
    Correlation { coefficient: f64, pair_count: usize },
    /// Numeric column averaged per category, in first-encounter order.
    GroupedMeans {
        numeric_column: String,
        group_column: String,
        groups: Vec<GroupMean>,
    },
    CrossTab(CrossTab),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

// ============================================================================
// Full Profile
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub schema: Vec<String>,
    pub type_map: TypeMap,
    pub overview: Overview,
    pub column_profiles: Vec<ColumnProfile>,
    pub head: Vec<Row>,
    pub tail: Vec<Row>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_frequency_table_counts() {
        let mut table = FrequencyTable::new();
        for v in ["NY", "LA", "NY", "NY", "SF"] {
            table.record(v);
        }
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 5);
        assert_eq!(table.get("NY"), Some(3));
        assert_eq!(table.get("SF"), Some(1));
        assert_eq!(table.get("DC"), None);
    }

    #[test]
    fn test_frequency_table_ties_keep_encounter_order() {
        let mut table = FrequencyTable::new();
        for v in ["b", "a", "c", "a", "b", "c"] {
            table.record(v);
        }
        let top: Vec<String> = table.top(3).into_iter().map(|e| e.value).collect();
        assert_eq!(top, vec!["b", "a", "c"]);
        assert_eq!(table.mode().unwrap().value, "b");
    }

    #[test]
    fn test_frequency_table_top_limits() {
        let mut table = FrequencyTable::new();
        for v in ["x", "y", "y", "z", "z", "z"] {
            table.record(v);
        }
        let top = table.top(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], FrequencyEntry { value: "z".into(), count: 3 });
        assert_eq!(top[1], FrequencyEntry { value: "y".into(), count: 2 });
    }

    #[test]
    fn test_frequency_table_json_restores_lookup() {
        let mut table = FrequencyTable::new();
        table.record("a");
        table.record("a");
        let json = serde_json::to_string(&table).unwrap();
        let restored: FrequencyTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.get("a"), Some(2));
    }

    #[test]
    fn test_empty_frequency_table_has_no_mode() {
        assert!(FrequencyTable::new().mode().is_none());
    }

    #[test]
    fn test_type_map_preserves_order_and_overwrites() {
        let mut map = TypeMap::new();
        map.insert("b", ColumnType::Text);
        map.insert("a", ColumnType::Numeric);
        map.insert("b", ColumnType::Categorical);

        let names: Vec<&str> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(map.get("b"), Some(ColumnType::Categorical));
        assert_eq!(map.get("c"), None);
    }

    #[test]
    fn test_crosstab_get() {
        let tab = CrossTab {
            row_categories: vec!["m".into(), "f".into()],
            column_categories: vec!["yes".into()],
            counts: vec![vec![2], vec![5]],
        };
        assert_eq!(tab.get("f", "yes"), 5);
        assert_eq!(tab.get("x", "yes"), 0);
    }

    #[test]
    fn test_relation_result_serialization_is_tagged() {
        let result = RelationResult::Correlation {
            coefficient: 1.0,
            pair_count: 4,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "correlation");
        assert_eq!(json["pair_count"], 4);
    }

    #[test]
    fn test_column_type_display() {
        assert_eq!(ColumnType::Categorical.to_string(), "categorical");
        assert_eq!(
            serde_json::to_string(&ColumnType::Unknown).unwrap(),
            "\"unknown\""
        );
    }
}
