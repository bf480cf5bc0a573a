use model::core::value::Value;

/// Converts a literal to the JSON text bound for a `::jsonb` cast.
///
/// JSON values are always bound as strings, but the database compares them by
/// their dynamic type: `Fields->'a' = '40'::jsonb` matches the document
/// `{ "a": 40 }` while `'"40"'::jsonb` does not. Returns `None` for values
/// that have no JSON scalar form.
pub fn to_document_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Float(v) if v.is_finite() => v.to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Uint32(v) => v.to_string(),
        Value::Uint(v) => v.to_string(),
        Value::String(v) => serde_json::Value::String(v.clone()).to_string(),
        Value::Boolean(v) => v.to_string(),
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers() {
        assert_eq!(to_document_text(&Value::Int32(-3)).as_deref(), Some("-3"));
        assert_eq!(to_document_text(&Value::Int(i64::MIN)).as_deref(), Some("-9223372036854775808"));
        assert_eq!(to_document_text(&Value::Uint32(7)).as_deref(), Some("7"));
        assert_eq!(to_document_text(&Value::Uint(u64::MAX)).as_deref(), Some("18446744073709551615"));
    }

    #[test]
    fn test_floats_use_shortest_round_trip_form() {
        assert_eq!(to_document_text(&Value::Float(1.0)).as_deref(), Some("1"));
        assert_eq!(to_document_text(&Value::Float(0.1)).as_deref(), Some("0.1"));
        assert_eq!(to_document_text(&Value::Float(-2.5)).as_deref(), Some("-2.5"));
        assert_eq!(to_document_text(&Value::Float(1e-7)).as_deref(), Some("0.0000001"));
        assert_eq!(to_document_text(&Value::Float(f64::NAN)), None);
        assert_eq!(to_document_text(&Value::Float(f64::INFINITY)), None);
    }

    #[test]
    fn test_strings_become_json_strings() {
        assert_eq!(to_document_text(&Value::from("foo")).as_deref(), Some("\"foo\""));
        assert_eq!(to_document_text(&Value::from("")).as_deref(), Some("\"\""));
        assert_eq!(
            to_document_text(&Value::from(r#"say "hi""#)).as_deref(),
            Some(r#""say \"hi\"""#)
        );
        assert_eq!(to_document_text(&Value::from("it's")).as_deref(), Some("\"it's\""));
    }

    #[test]
    fn test_booleans() {
        assert_eq!(to_document_text(&Value::from(true)).as_deref(), Some("true"));
        assert_eq!(to_document_text(&Value::from(false)).as_deref(), Some("false"));
    }

    #[test]
    fn test_non_scalars_have_no_text() {
        assert_eq!(to_document_text(&Value::Null), None);
        assert_eq!(to_document_text(&Value::Json(json!({"a": 1}))), None);
        assert_eq!(to_document_text(&Value::Bytes(vec![1])), None);
    }
}
