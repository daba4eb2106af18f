//! Dataset values as SQLite parameters.

use rusqlite::types::{ToSqlOutput, ValueRef};
use tableload_core::dataset::Value;

/// Borrow `value` as a bindable parameter.
///
/// Fails for values SQLite cannot hold without changing them: unsigned
/// integers above `i64::MAX` and non-finite reals (stored as NULL).
pub(crate) fn to_sql_output(value: &Value) -> Result<ToSqlOutput<'_>, String> {
    let value_ref = match value {
        Value::Null => ValueRef::Null,
        Value::Bool(b) => ValueRef::Integer(i64::from(*b)),
        Value::Integer(i) => ValueRef::Integer(*i),
        Value::UInteger(u) => match i64::try_from(*u) {
            Ok(i) => ValueRef::Integer(i),
            Err(_) => return Err(format!("{} {u} exceeds i64::MAX", value.type_name())),
        },
        Value::Real(f) if f.is_finite() => ValueRef::Real(*f),
        Value::Real(f) => return Err(format!("non-finite {} {f}", value.type_name())),
        Value::Text(s) => ValueRef::Text(s.as_bytes()),
        Value::Blob(b) => ValueRef::Blob(b.as_slice()),
    };
    Ok(ToSqlOutput::Borrowed(value_ref))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_binds_as_integer() {
        let out = to_sql_output(&Value::Bool(true)).unwrap();
        assert!(matches!(out, ToSqlOutput::Borrowed(ValueRef::Integer(1))));
    }

    #[test]
    fn test_large_unsigned_rejected() {
        assert!(to_sql_output(&Value::UInteger(i64::MAX as u64)).is_ok());
        let err = to_sql_output(&Value::UInteger(u64::MAX)).unwrap_err();
        assert_eq!(err, format!("unsigned integer {} exceeds i64::MAX", u64::MAX));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(to_sql_output(&Value::Real(f64::NAN)).unwrap_err(), "non-finite real NaN");
        assert_eq!(
            to_sql_output(&Value::Real(f64::NEG_INFINITY)).unwrap_err(),
            "non-finite real -inf"
        );
        assert!(to_sql_output(&Value::Real(-0.5)).is_ok());
    }
}
