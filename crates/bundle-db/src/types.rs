//! SQL parameter and row types for the SQLite-backed store.

use crate::StoreError;

/// A database value that can be used as a parameter or result.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Try to get the value as an i64.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get the value as a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Blob(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Integer(if v { 1 } else { 0 })
    }
}

/// A row from a query result.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Get a value by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
    }

    /// Text column, or a serialization error naming the column.
    pub fn text(&self, column: &str) -> Result<&str, StoreError> {
        self.get(column)
            .and_then(Value::as_text)
            .ok_or_else(|| StoreError::Serialization(format!("missing text column {}", column)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lookup() {
        let row = Row::new(
            vec!["id".to_string(), "payload".to_string()],
            vec![Value::from("grp_1"), Value::Blob(b"{}".to_vec())],
        );
        assert_eq!(row.text("id").unwrap(), "grp_1");
        assert_eq!(row.text("payload").unwrap(), "{}");
        assert!(row.text("missing").is_err());
    }

    #[test]
    fn test_bool_maps_to_integer() {
        assert_eq!(Value::from(true).as_integer(), Some(1));
        assert_eq!(Value::from(false).as_integer(), Some(0));
    }
}
