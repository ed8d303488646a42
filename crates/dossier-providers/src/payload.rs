//! Shared helpers for reading loosely typed provider JSON.
//!
//! Providers disagree on how they spell "unknown": missing keys, `null`,
//! `""`, or a number where text was expected. The field deserializers here
//! fold all of those into the record's empty sentinels so that only
//! structurally required keys can fail a mapping.

use crate::error::{Provider, ProviderError, Result};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a provider payload into its typed form.
pub(crate) fn parse<T: DeserializeOwned>(provider: Provider, payload: &Value) -> Result<T> {
    T::deserialize(payload).map_err(|e| ProviderError::malformed(provider, e.to_string()))
}

/// Whether a collaborator answered with "nothing": `null`, `{}`, `[]` or `""`.
#[must_use]
pub fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Text field: `null` becomes `""`, numbers and booleans are stringified.
pub(crate) fn text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(D::Error::custom(format!("expected text, got {other}"))),
    }
}

/// Nullable text field: `null` stays `None`, anything else as in [`text`].
pub(crate) fn optional_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected text, got {other}"))),
    }
}

/// List of text values; a lone string is treated as a one-element list.
pub(crate) fn text_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(single) => vec![single],
    };

    let mut codes = Vec::with_capacity(items.len());
    for item in items {
        let code = match item {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Null => continue,
            other => return Err(D::Error::custom(format!("expected text, got {other}"))),
        };
        if !code.is_empty() {
            codes.push(code);
        }
    }
    Ok(codes)
}

/// Numeric field: `null`, `""` and unparseable text become `0`.
///
/// Accepts numbers and numeric strings, including a trailing `%`, a decimal
/// comma (`"12,5"`) and German digit grouping (`"25.000"`, `"1.234,56"`).
pub(crate) fn number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(0.0)),
        Some(Value::String(s)) => Ok(parse_number_text(&s)),
        Some(other) => Err(D::Error::custom(format!("expected number, got {other}"))),
    }
}

fn parse_number_text(raw: &str) -> f64 {
    let trimmed = raw.trim().trim_end_matches('%').trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let Some(normalized) = normalize_separators(trimmed) else {
        tracing::warn!(value = raw, "ambiguous digit grouping in provider payload, using 0");
        return 0.0;
    };

    normalized.parse().unwrap_or_else(|_| {
        tracing::warn!(value = raw, "unparseable number in provider payload, using 0");
        0.0
    })
}

/// Rewrite German or English digit grouping into a plain `1234.5` form.
///
/// When both `.` and `,` appear, the last one is the decimal separator. A
/// lone `,` is a decimal comma. A lone `.` followed by exactly three digits
/// after a short integer part is a thousands separator (`25.000`), otherwise
/// a decimal point (`12.5`, `0.125`). Returns `None` for malformed grouping.
fn normalize_separators(text: &str) -> Option<String> {
    let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    match (text.rfind('.'), text.rfind(',')) {
        (Some(dot), Some(comma)) => {
            let (split, group) = if comma > dot { (comma, '.') } else { (dot, ',') };
            let (int, frac) = (&text[..split], &text[split + 1..]);
            if !frac.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            Some(format!("{}.{frac}", ungroup(int, group)?))
        }
        (None, Some(_)) if text.matches(',').count() == 1 => Some(text.replace(',', ".")),
        (None, Some(_)) => ungroup(&text, ','),
        (Some(_), None) if text.matches('.').count() > 1 => ungroup(&text, '.'),
        (Some(dot), None) => {
            let (int, frac) = (&text[..dot], &text[dot + 1..]);
            if frac.len() == 3 && frac.chars().all(|c| c.is_ascii_digit()) && is_group_head(int) {
                Some(format!("{int}{frac}"))
            } else {
                Some(text)
            }
        }
        (None, None) => Some(text),
    }
}

/// Remove `group` separators, checking that every group has three digits.
fn ungroup(text: &str, group: char) -> Option<String> {
    let mut parts = text.split(group);
    let head = parts.next()?;
    if text.contains(group) && !is_group_head(head) {
        return None;
    }

    let mut digits = head.to_string();
    for part in parts {
        if part.len() != 3 || !part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.push_str(part);
    }
    Some(digits)
}

/// Leading group of a grouped number: one to three digits, no leading zero.
fn is_group_head(head: &str) -> bool {
    let digits = head.strip_prefix('-').unwrap_or(head);
    (1..=3).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0')
}

/// Clamp a provider number to be finite and non-negative.
pub(crate) fn non_negative(value: f64, field: &'static str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!(field, value, "negative or non-finite value clamped to 0");
        0.0
    }
}

/// Clamp a provider percentage into `0..=100`.
pub(crate) fn percentage(value: f64, field: &'static str) -> f64 {
    let value = non_negative(value, field);
    if value > 100.0 {
        tracing::warn!(field, value, "percentage above 100 clamped");
        100.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "text")]
        label: String,
        #[serde(default, deserialize_with = "optional_text")]
        status: Option<String>,
        #[serde(default, deserialize_with = "text_list")]
        codes: Vec<String>,
        #[serde(default, deserialize_with = "number")]
        amount: f64,
    }

    fn fields(value: &Value) -> Fields {
        parse(Provider::Extraction, value).expect("parse fields")
    }

    #[test]
    fn test_missing_and_null_are_sentinels() {
        let parsed = fields(&json!({}));
        assert_eq!(parsed.label, "");
        assert_eq!(parsed.status, None);
        assert!(parsed.codes.is_empty());
        assert_eq!(parsed.amount, 0.0);

        let parsed = fields(&json!({"label": null, "status": null, "codes": null, "amount": null}));
        assert_eq!(parsed.label, "");
        assert_eq!(parsed.status, None);
        assert_eq!(parsed.amount, 0.0);
    }

    #[test]
    fn test_lenient_values() {
        let parsed = fields(&json!({
            "label": 12345,
            "status": "",
            "codes": "62.01",
            "amount": "12,5 %"
        }));
        assert_eq!(parsed.label, "12345");
        assert_eq!(parsed.status, Some(String::new()));
        assert_eq!(parsed.codes, vec!["62.01".to_string()]);
        assert!((parsed.amount - 12.5).abs() < f64::EPSILON);

        let parsed = fields(&json!({"codes": ["62.01", "", null, 70], "amount": "n/a"}));
        assert_eq!(parsed.codes, vec!["62.01".to_string(), "70".to_string()]);
        assert_eq!(parsed.amount, 0.0);
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let result: Result<Fields> = parse(Provider::Extraction, &json!({"label": {"x": 1}}));
        assert!(matches!(
            result,
            Err(ProviderError::MalformedPayload {
                provider: Provider::Extraction,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_payload_detection() {
        assert!(is_empty_payload(&Value::Null));
        assert!(is_empty_payload(&json!({})));
        assert!(is_empty_payload(&json!([])));
        assert!(!is_empty_payload(&json!({"id": "x"})));
        assert!(!is_empty_payload(&json!([{}])));
    }

    #[test]
    fn test_clamping() {
        assert_eq!(non_negative(-3.0, "shares"), 0.0);
        assert_eq!(non_negative(f64::NAN, "shares"), 0.0);
        assert_eq!(non_negative(7.5, "shares"), 7.5);
        assert_eq!(percentage(140.0, "pct"), 100.0);
        assert_eq!(percentage(25.0, "pct"), 25.0);
    }

    #[test]
    fn test_german_digit_grouping() {
        assert_eq!(parse_number_text("25.000"), 25_000.0);
        assert_eq!(parse_number_text("12.500"), 12_500.0);
        assert_eq!(parse_number_text("1.234,56"), 1_234.56);
        assert_eq!(parse_number_text("1.234.567"), 1_234_567.0);
        assert_eq!(parse_number_text("25 000,00"), 25_000.0);
    }

    #[test]
    fn test_decimal_points_and_commas() {
        assert_eq!(parse_number_text("12.5"), 12.5);
        assert_eq!(parse_number_text("50.0"), 50.0);
        assert_eq!(parse_number_text("0.125"), 0.125);
        assert_eq!(parse_number_text("1234.567"), 1_234.567);
        assert_eq!(parse_number_text("12,5"), 12.5);
        assert_eq!(parse_number_text("1,234.5"), 1_234.5);
        assert_eq!(parse_number_text("-3"), -3.0);
    }

    #[test]
    fn test_malformed_grouping_is_zero() {
        assert_eq!(parse_number_text("12.34.5"), 0.0);
        assert_eq!(parse_number_text("1.23,4.5"), 0.0);
        assert_eq!(parse_number_text("1,2,3"), 0.0);
    }
}
