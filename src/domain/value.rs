use serde_json::Value;

/// Largest magnitude printed as a plain integer.
const MAX_INTEGRAL_DISPLAY: f64 = 1e15;

/// String form of a value as it appears in error messages.
///
/// Strings are unquoted and integral numbers drop their fractional part,
/// so `2.0` reads as `2` and `"hi"` reads as `hi`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => display_f64(f),
            _ => n.to_string(),
        },
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn display_f64(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_INTEGRAL_DISPLAY {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

/// Build a JSON number from an `f64`, keeping integral results integral.
///
/// Returns `None` for NaN and infinities, which JSON cannot carry.
pub fn number_value(f: f64) -> Option<Value> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_INTEGRAL_DISPLAY {
        Some(Value::from(f as i64))
    } else {
        serde_json::Number::from_f64(f).map(Value::Number)
    }
}
