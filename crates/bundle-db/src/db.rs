//! Spin SQLite connection wrapper.

use crate::{Row, StoreError, Value};
use spin_sdk::sqlite;

/// SQLite database connection.
pub struct Db {
    conn: sqlite::Connection,
}

impl Db {
    /// Open the default SQLite database.
    pub fn open_default() -> Result<Self, StoreError> {
        let conn = sqlite::Connection::open_default()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Open a named SQLite database.
    pub fn open(name: &str) -> Result<Self, StoreError> {
        let conn =
            sqlite::Connection::open(name).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Execute a statement that doesn't return rows.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<(), StoreError> {
        self.query(sql, params).map(|_| ())
    }

    /// Execute a query and return its rows.
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, StoreError> {
        let spin_params: Vec<sqlite::Value> = params.iter().map(to_spin).collect();

        let result = self
            .conn
            .execute(sql, spin_params.as_slice())
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let columns: Vec<String> = result.columns.iter().map(|c| c.to_string()).collect();
        Ok(result
            .rows
            .iter()
            .map(|row| Row::new(columns.clone(), row.values.iter().map(from_spin).collect()))
            .collect())
    }
}

fn to_spin(value: &Value) -> sqlite::Value {
    match value {
        Value::Null => sqlite::Value::Null,
        Value::Integer(i) => sqlite::Value::Integer(*i),
        Value::Real(f) => sqlite::Value::Real(*f),
        Value::Text(s) => sqlite::Value::Text(s.clone()),
        Value::Blob(b) => sqlite::Value::Blob(b.clone()),
    }
}

fn from_spin(value: &sqlite::Value) -> Value {
    match value {
        sqlite::Value::Null => Value::Null,
        sqlite::Value::Integer(i) => Value::Integer(*i),
        sqlite::Value::Real(f) => Value::Real(*f),
        sqlite::Value::Text(s) => Value::Text(s.clone()),
        sqlite::Value::Blob(b) => Value::Blob(b.clone()),
    }
}
