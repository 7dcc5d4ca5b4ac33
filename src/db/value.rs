//! Field values and their SQL literal form
//!
//! [SqlValue] is what a [Record](super::Record) hands to the repository for each
//! column. [SqlValue::to_literal] renders it as a fragment that can be spliced
//! directly into an INSERT or UPDATE statement.

use chrono::NaiveDateTime;

/// A single column value supplied by a record.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(NaiveDateTime),
    Null,
}

impl SqlValue {
    /// Render this value as a PostgreSQL literal.
    ///
    /// Strings are single-quoted with embedded quotes doubled. That is only a
    /// complete escape while `standard_conforming_strings` is on (the PostgreSQL
    /// default, and pinned by `Config`); with it off, backslashes would start
    /// escape sequences. Null renders as `null`.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::String(s) => quote_literal(s),
            SqlValue::Int(i) => i.to_string(),
            SqlValue::Float(f) if f.is_nan() => "'NaN'".to_string(),
            SqlValue::Float(f) if f.is_infinite() => {
                if f.is_sign_positive() {
                    "'Infinity'".to_string()
                } else {
                    "'-Infinity'".to_string()
                }
            }
            SqlValue::Float(f) => f.to_string(),
            SqlValue::Bool(true) => "TRUE".to_string(),
            SqlValue::Bool(false) => "FALSE".to_string(),
            SqlValue::Timestamp(ts) => {
                quote_literal(&ts.format("%Y-%m-%d %H:%M:%S%.f").to_string())
            }
            SqlValue::Null => "null".to_string(),
        }
    }
}

fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Conversion of a Rust field value into a [SqlValue].
///
/// Used by `#[derive(Record)]`; implement it for any domain type (e.g. enums
/// stored as strings) that appears as a record field.
pub trait ToSqlValue {
    fn to_sql_value(&self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(&self) -> SqlValue {
        self.clone()
    }
}

impl ToSqlValue for String {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::String(self.clone())
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::String((*self).to_string())
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Int(i64::from(*self))
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Int(*self)
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Float(*self)
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Bool(*self)
    }
}

impl ToSqlValue for NaiveDateTime {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Timestamp(*self)
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(&self) -> SqlValue {
        match self {
            Some(value) => value.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}
