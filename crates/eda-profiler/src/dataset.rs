//! In-memory tabular dataset consumed by every profiling component.
//!
//! A [`Dataset`] is an ordered schema of unique column names plus rows of
//! [`Cell`]s stored positionally against that schema, so a row can never
//! carry an extra or a missing key once constructed. Absent, null and
//! empty-string source values are all folded into [`Cell::Missing`].
//!
//! Datasets are immutable once built. To load a new file, build a new
//! dataset and hand it to the session, which recomputes everything.

use crate::error::{ProfilingError, Result, ResultExt};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A single value at a (row, column) position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Absent, null or empty-string source value.
    Missing,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    /// Returns `true` for the missing sentinel.
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Stringified value, as used for frequency tables and group labels.
    ///
    /// Whole numbers render without a fractional part (`25`, not `25.0`).
    pub fn display(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Number(v) => v.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Bool(b) => b.to_string(),
        }
    }

    /// Appends an unambiguous identity key for this cell to `out`.
    ///
    /// Keys distinguish `1` from `"1"`; text is length-prefixed so no
    /// concatenation of keys can collide.
    pub(crate) fn write_key(&self, out: &mut String) {
        match self {
            Cell::Missing => out.push_str("~|"),
            Cell::Number(v) => {
                out.push_str("n:");
                out.push_str(&v.to_string());
                out.push('|');
            }
            Cell::Text(s) => {
                out.push('s');
                out.push_str(&s.len().to_string());
                out.push(':');
                out.push_str(s);
            }
            Cell::Bool(b) => out.push_str(if *b { "b:1|" } else { "b:0|" }),
        }
    }

    pub(crate) fn key(&self) -> String {
        let mut key = String::new();
        self.write_key(&mut key);
        key
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(s)
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Number(v as f64)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Missing, Into::into)
    }
}

/// One row, positionally aligned with the dataset schema.
pub type Row = Vec<Cell>;

/// An ordered schema plus rows of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    schema: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from positional rows.
    ///
    /// Fails if the schema repeats a name or any row has the wrong width.
    pub fn new(schema: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        validate_schema(&schema)?;
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != schema.len() {
                return Err(ProfilingError::RowWidthMismatch {
                    row: idx,
                    expected: schema.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(Self { schema, rows })
    }

    /// Build a dataset from name-to-cell records.
    ///
    /// Every record must carry exactly the declared columns; an absent key
    /// is a [`ProfilingError::MissingField`], an extra one is a
    /// [`ProfilingError::UnexpectedField`].
    pub fn from_records(
        schema: Vec<String>,
        records: impl IntoIterator<Item = HashMap<String, Cell>>,
    ) -> Result<Self> {
        validate_schema(&schema)?;
        let mut rows = Vec::new();

        for (idx, mut record) in records.into_iter().enumerate() {
            let mut row = Vec::with_capacity(schema.len());
            for column in &schema {
                match record.remove(column) {
                    Some(cell) => row.push(cell),
                    None => {
                        return Err(ProfilingError::MissingField {
                            row: idx,
                            column: column.clone(),
                        });
                    }
                }
            }
            if let Some(extra) = record.into_keys().min() {
                return Err(ProfilingError::UnexpectedField {
                    row: idx,
                    column: extra,
                });
            }
            rows.push(row);
        }

        Ok(Self { schema, rows })
    }

    /// Convert a polars DataFrame into a dataset.
    ///
    /// Nulls and empty strings become [`Cell::Missing`], numeric dtypes
    /// become numbers, booleans stay booleans and everything else is
    /// rendered as text.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let schema: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        validate_schema(&schema)?;

        let height = df.height();
        let mut rows: Vec<Row> = (0..height)
            .map(|_| Vec::with_capacity(schema.len()))
            .collect();

        for column in df.get_columns() {
            let series = column.as_materialized_series();
            for (idx, row) in rows.iter_mut().enumerate() {
                let value = series
                    .get(idx)
                    .context(format!("Reading column '{}'", series.name()))?;
                row.push(cell_from_any_value(value));
            }
        }

        Ok(Self { schema, rows })
    }

    /// Column names in declaration order.
    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.schema.is_empty()
    }

    /// Position of a column in the schema.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.schema
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| ProfilingError::ColumnNotFound(name.to_string()))
    }

    /// All cells of one column, in row order.
    pub fn column_cells(&self, name: &str) -> Result<impl Iterator<Item = &Cell> + '_> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// The first `n` rows (or all of them, if fewer).
    pub fn head(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// The last `n` rows (or all of them, if fewer).
    pub fn tail(&self, n: usize) -> &[Row] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }
}

fn validate_schema(schema: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(schema.len());
    for name in schema {
        if !seen.insert(name.as_str()) {
            return Err(ProfilingError::DuplicateColumn(name.clone()));
        }
    }
    Ok(())
}

fn cell_from_any_value(value: AnyValue<'_>) -> Cell {
    match value {
        AnyValue::Null => Cell::Missing,
        AnyValue::Boolean(b) => Cell::Bool(b),
        AnyValue::String(s) => Cell::from(s),
        AnyValue::StringOwned(s) => Cell::from(s.as_str()),
        AnyValue::Int8(v) => Cell::Number(f64::from(v)),
        AnyValue::Int16(v) => Cell::Number(f64::from(v)),
        AnyValue::Int32(v) => Cell::Number(f64::from(v)),
        AnyValue::Int64(v) => Cell::Number(v as f64),
        AnyValue::UInt8(v) => Cell::Number(f64::from(v)),
        AnyValue::UInt16(v) => Cell::Number(f64::from(v)),
        AnyValue::UInt32(v) => Cell::Number(f64::from(v)),
        AnyValue::UInt64(v) => Cell::Number(v as f64),
        AnyValue::Float32(v) => Cell::Number(f64::from(v)),
        AnyValue::Float64(v) => Cell::Number(v),
        other => Cell::from(other.to_string()),
    }
}

static_assertions::assert_impl_all!(Dataset: Send, Sync);
static_assertions::assert_impl_all!(Cell: Send, Sync);
