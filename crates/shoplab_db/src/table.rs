//! Engine-agnostic tabular results.
//!
//! A `QueryTable` is what the catalog hands to printers and report writers:
//! named columns plus rows of loosely typed values.

use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};

use crate::error::{DbError, Result};

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DbValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl DbValue {
    /// Render for display; reals get two decimals.
    pub fn display(&self) -> String {
        match self {
            DbValue::Null => String::new(),
            DbValue::Integer(v) => v.to_string(),
            DbValue::Real(v) => format!("{:.2}", v),
            DbValue::Text(v) => v.clone(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DbValue::Real(v) => Some(*v),
            DbValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DbValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for DbValue {
    fn from(v: i64) -> Self {
        DbValue::Integer(v)
    }
}

impl From<f64> for DbValue {
    fn from(v: f64) -> Self {
        DbValue::Real(v)
    }
}

impl From<&str> for DbValue {
    fn from(v: &str) -> Self {
        DbValue::Text(v.to_string())
    }
}

impl<T: Into<DbValue>> From<Option<T>> for DbValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => DbValue::Null,
        }
    }
}

/// Ordered rows with named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<DbValue>>,
}

impl QueryTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column position by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&DbValue>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }

    /// Copy of the first `n` rows.
    pub fn head(&self, n: usize) -> QueryTable {
        QueryTable {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    pub(crate) fn from_rows(columns: &[&str], rows: &[SqliteRow]) -> Result<Self> {
        let mut values = Vec::with_capacity(rows.len());
        for row in rows {
            let mut cells = Vec::with_capacity(columns.len());
            for index in 0..row.len() {
                cells.push(sqlite_value(row, index)?);
            }
            values.push(cells);
        }
        Ok(Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: values,
        })
    }
}

fn sqlite_value(row: &SqliteRow, index: usize) -> Result<DbValue> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(DbValue::Null);
    }
    // Storage class of the value itself, not the declared column type.
    let value = match raw.type_info().name() {
        "INTEGER" | "BOOLEAN" => DbValue::Integer(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" => DbValue::Real(row.try_get_unchecked::<f64, _>(index)?),
        "TEXT" | "DATE" | "DATETIME" | "TIME" => {
            DbValue::Text(row.try_get_unchecked::<String, _>(index)?)
        }
        other => {
            return Err(DbError::invalid_state(format!(
                "Unsupported SQLite value type {} at column {}",
                other, index
            )))
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QueryTable {
        QueryTable {
            columns: vec!["ym".to_string(), "revenue".to_string()],
            rows: vec![
                vec![DbValue::from("2024-01"), DbValue::from(10.0)],
                vec![DbValue::from("2024-02"), DbValue::from(0.5)],
                vec![DbValue::from("2024-03"), DbValue::Null],
            ],
        }
    }

    #[test]
    fn test_column_lookup() {
        let table = sample();
        assert_eq!(table.column_index("revenue"), Some(1));
        assert_eq!(table.column_index("missing"), None);

        let months = table.column("ym").unwrap();
        assert_eq!(months[1].as_str(), Some("2024-02"));
    }

    #[test]
    fn test_head_truncates() {
        let table = sample();
        assert_eq!(table.head(2).len(), 2);
        assert_eq!(table.head(10).len(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(DbValue::from(10.0).display(), "10.00");
        assert_eq!(DbValue::from(7_i64).display(), "7");
        assert_eq!(DbValue::Null.display(), "");
        assert_eq!(DbValue::from(Some("x")).display(), "x");
    }
}
