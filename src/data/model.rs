use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{DataError, Result};

// ---------------------------------------------------------------------------
// Value – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as guessed from the CSV text.
/// Used as a key in `BTreeMap` / `BTreeSet` downstream so `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    /// Empty cell or unparsable date.
    Null,
}

// -- Manual Eq/Ord so we can put Value in BTreeSet --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                Date(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Date(d) => d.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Numeric view of the cell; `None` for non-numeric cells and NaN.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) if !v.is_nan() => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Rows are stored positionally; `rows[i][j]` is the value of `columns[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table, rejecting any row whose width differs from the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(DataError::Parse(format!(
                "row {i} has {} fields but the header has {}",
                row.len(),
                columns.len()
            )));
        }
        Ok(Table { columns, rows })
    }

    /// Table with a schema and no rows.
    pub fn empty(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from borrowed column names; each record lists its values
    /// in schema order.
    pub fn from_records<I, R>(columns: &[&str], records: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = Value>,
    {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        let rows = records
            .into_iter()
            .map(|r| r.into_iter().collect())
            .collect();
        Table::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterate the cells of one column in row order.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Look up a single cell.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// New table holding only the rows at `indices`, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }

    /// New table with `f` applied to every cell of `column`.
    pub fn map_column(&self, column: &str, f: impl Fn(&Value) -> Value) -> Option<Table> {
        let idx = self.column_index(column)?;
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row[idx] = f(&row[idx]);
                row
            })
            .collect();
        Some(Table {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// New table without the named columns; unknown names are ignored.
    pub fn without_columns(&self, names: &[String]) -> Table {
        let keep: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !names.contains(c))
            .map(|(i, _)| i)
            .collect();
        Table {
            columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }

    /// Promote columns mixing `Integer` and `Float` cells to `Float` so each
    /// column carries a single numeric type.
    pub fn unify_numeric_columns(mut self) -> Table {
        for idx in 0..self.columns.len() {
            let has_float = self
                .rows
                .iter()
                .any(|r| matches!(r[idx], Value::Float(_)));
            let has_int = self
                .rows
                .iter()
                .any(|r| matches!(r[idx], Value::Integer(_)));
            if has_float && has_int {
                for row in &mut self.rows {
                    if let Value::Integer(i) = row[idx] {
                        row[idx] = Value::Float(i as f64);
                    }
                }
            }
        }
        self
    }

    /// For each column the sorted set of unique values, skipping columns with
    /// more than `max_distinct` values.
    pub fn unique_values(&self, max_distinct: usize) -> BTreeMap<String, BTreeSet<Value>> {
        let mut out = BTreeMap::new();
        for (idx, col) in self.columns.iter().enumerate() {
            let mut set = BTreeSet::new();
            for row in &self.rows {
                set.insert(row[idx].clone());
                if set.len() > max_distinct {
                    break;
                }
            }
            if set.len() <= max_distinct {
                out.insert(col.clone(), set);
            }
        }
        out
    }

    pub fn details(&self) -> TableDetails {
        TableDetails {
            rows: self.len(),
            columns: self.columns.len(),
            column_names: self.columns.clone(),
        }
    }
}

/// Shape summary returned by the column projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDetails {
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
}

impl fmt::Display for TableDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {:?})",
            self.rows, self.columns, self.column_names
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_records(
            &["Name", "Orbit ID", "Miles per hour"],
            vec![
                vec![Value::String("A".into()), Value::Integer(1), Value::Integer(10)],
                vec![Value::String("B".into()), Value::Integer(1), Value::Float(12.5)],
                vec![Value::String("C".into()), Value::Integer(2), Value::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Table::from_records(
            &["a", "b"],
            vec![vec![Value::Integer(1)]],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn without_columns_ignores_unknown_names() {
        let t = sample().without_columns(&["Orbit ID".to_string(), "Equinox".to_string()]);
        assert_eq!(t.columns(), &["Name".to_string(), "Miles per hour".to_string()]);
        assert_eq!(t.len(), 3);
        assert_eq!(t.rows()[1][0], Value::String("B".into()));
    }

    #[test]
    fn unify_promotes_mixed_columns_only() {
        let t = sample().unify_numeric_columns();
        assert_eq!(t.value(0, "Miles per hour"), Some(&Value::Float(10.0)));
        assert_eq!(t.value(2, "Miles per hour"), Some(&Value::Null));
        assert_eq!(t.value(0, "Orbit ID"), Some(&Value::Integer(1)));
    }

    #[test]
    fn unique_values_skips_high_cardinality() {
        let uv = sample().unique_values(2);
        assert!(uv.contains_key("Orbit ID"));
        assert!(!uv.contains_key("Name"));
    }

    #[test]
    fn select_rows_keeps_schema() {
        let t = sample().select_rows(&[2, 0]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.value(0, "Name"), Some(&Value::String("C".into())));
        assert_eq!(t.columns().len(), 3);
    }

    #[test]
    fn as_f64_skips_nan_and_text() {
        assert_eq!(Value::Float(f64::NAN).as_f64(), None);
        assert_eq!(Value::String("3".into()).as_f64(), None);
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
    }
}
