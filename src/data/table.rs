//! In-memory tabular data with typed cells.
//!
//! A [`Table`] is the unit every pipeline stage consumes and produces. Cells are
//! inferred from CSV text on load so that format detection, normalization and
//! validation can reason about types without re-parsing strings.

use std::fmt;
use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{CanonicalRecord, CANONICAL_COLUMNS};
use crate::error::{Error, Result};

/// Output format for date cells
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single typed table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Calendar date
    Date(NaiveDate),
    /// Integral number
    Int(i64),
    /// Real number
    Float(f64),
    /// Free text that is not numeric
    Text(String),
    /// Empty cell
    Missing,
}

impl Value {
    /// Infer a cell type from raw CSV text.
    ///
    /// Dates are never inferred here; turning a column into dates is the
    /// normalizer's job since it knows which column is the temporal key.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Missing;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_nan() {
                return Value::Missing;
            }
            return Value::Float(f);
        }
        Value::Text(trimmed.to_string())
    }

    /// Numeric view of the cell, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Date view of the cell, if it has one
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Short type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Date(_) => "date",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Missing => "missing",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Missing => Ok(()),
        }
    }
}

/// Ordered columns over row-major typed cells
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table from column names and rows.
    ///
    /// Rows shorter than the header are padded with [`Value::Missing`];
    /// longer rows are truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Missing);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Parse CSV from any reader, inferring cell types
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(Value::infer).collect());
        }

        log::debug!("Loaded CSV with {} rows, columns: {:?}", rows.len(), columns);
        Ok(Self::new(columns, rows))
    }

    /// Load a CSV file from disk
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Io(format!("Failed to open {}: {e}", path.display())))?;
        Self::from_csv_reader(file)
    }

    /// Write the table as CSV
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(ToString::to_string))?;
        }
        wtr.flush()
            .map_err(|e| Error::Io(format!("Failed to flush CSV output: {e}")))?;
        Ok(())
    }

    /// Write the table to a CSV file
    pub fn to_csv_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .map_err(|e| Error::Io(format!("Failed to create {}: {e}", path.display())))?;
        self.to_csv_writer(file)
    }

    /// Build a canonical table from typed records
    pub fn from_records(records: &[CanonicalRecord]) -> Self {
        let columns = CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows = records.iter().map(CanonicalRecord::to_row).collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterate over the cells of a column
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Numeric cells of a column as f64, skipping non-numeric cells
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)
            .map(|cells| cells.filter_map(Value::as_f64).collect())
    }

    /// Return a new table with `name` set to `values`.
    ///
    /// Replaces the column if it already exists, otherwise appends it.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` differs from the row count.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Self {
        assert_eq!(
            values.len(),
            self.rows.len(),
            "column '{name}' length does not match table rows"
        );
        let mut table = self.clone();
        match table.column_index(name) {
            Some(idx) => {
                for (row, value) in table.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                table.columns.push(name.to_string());
                for (row, value) in table.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        table
    }

    /// Project onto the named columns, in the given order.
    ///
    /// Columns absent from the table are filled with [`Value::Missing`].
    pub fn select(&self, names: &[&str]) -> Self {
        let indices: Vec<Option<usize>> = names.iter().map(|n| self.column_index(n)).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|idx| idx.map_or(Value::Missing, |i| row[i].clone()))
                    .collect()
            })
            .collect();
        Self {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows,
        }
    }

    /// Reorder rows by index, producing a new table
    pub(crate) fn reorder(&self, order: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: order.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Apply a cell transformation to one column, producing a new table
    pub(crate) fn map_column(&self, idx: usize, f: impl Fn(&Value) -> Value) -> Self {
        let mut table = self.clone();
        for row in &mut table.rows {
            row[idx] = f(&row[idx]);
        }
        table
    }

    /// Keep only rows matching the predicate, producing a new table
    pub(crate) fn filter_rows(&self, keep: impl Fn(&[Value]) -> bool) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}
