//! payload parsers for the device endpoints
//! every failure is a PayloadError so callers keep the last known value

use serde::de::DeserializeOwned;
use crate::common::error::SyncError;

/// tokens the firmware prints for unreadable floats, which are not json
const NON_FINITE_TOKENS: [&str; 5] = ["-nan", "nan", "-inf", "inf", "ovf"];

/// parse a json body into a dto
pub fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, SyncError> {
    let value = serde_json::from_str(sanitize_non_finite(body).as_str())?;
    Ok(value)
}

/// replace bare non-finite number tokens in value position with `null`,
/// text inside json strings is left alone
pub fn sanitize_non_finite(body: &str) -> String {
    let bytes = body.as_bytes();
    let mut out = String::with_capacity(body.len());
    let mut in_string = false;
    let mut escaped = false;
    // last non-whitespace byte seen outside a string
    let mut prev = 0u8;
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
                prev = b;
            }
            i += 1;
            continue;
        }
        if b == b'"' {
            in_string = true;
        } else if (b.is_ascii_alphabetic() || b == b'-') && matches!(prev, b':' | b',' | b'[') {
            if let Some(token) = non_finite_token(&body[i..]) {
                out.push_str(&body[copied..i]);
                out.push_str("null");
                i += token.len();
                copied = i;
                prev = b'l';
                continue;
            }
        }
        if !b.is_ascii_whitespace() {
            prev = b;
        }
        i += 1;
    }
    out.push_str(&body[copied..]);
    out
}

fn non_finite_token(rest: &str) -> Option<&'static str> {
    NON_FINITE_TOKENS
        .iter()
        .copied()
        .find(|t| rest.starts_with(t) && ends_token(&rest[t.len()..]))
}

/// "1" / "0" body
pub fn parse_bool_text(body: &str) -> Result<bool, SyncError> {
    match body.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(SyncError::payload(format!("expected 1 or 0, got '{}'", other))),
    }
}

/// non-negative integer body
pub fn parse_uint_text(body: &str) -> Result<u32, SyncError> {
    body.trim()
        .parse::<u32>()
        .map_err(|_| SyncError::payload(format!("expected a non-negative integer, got '{}'", body.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorCode;
    use crate::entity::dto::sensor_dto::SensorDto;

    #[test]
    fn test_sanitize_keeps_strings_and_numbers() {
        let body = r#"{"mode":"Station","ip":"10.0.0.2","rssi":-61}"#;
        assert_eq!(sanitize_non_finite(body), body);
    }

    #[test]
    fn test_sanitize_firmware_nan() {
        let body = r#"{"ready":false,"temperature":nan,"humidity": -nan}"#;
        assert_eq!(sanitize_non_finite(body), r#"{"ready":false,"temperature":null,"humidity": null}"#);
        let dto: SensorDto = parse_json(body).unwrap();
        assert!(!dto.ready);
        assert_eq!(dto.temperature, None);
    }

    #[test]
    fn test_sanitize_ignores_words_starting_with_token() {
        // not a bare token, stays invalid json
        let body = r#"{"temperature":infinite}"#;
        assert_eq!(sanitize_non_finite(body), body);
    }

    #[test]
    fn test_sanitize_leaves_string_values_alone() {
        let body = r#"{"ssid":"lab: nan net","rssi":-50}"#;
        assert_eq!(sanitize_non_finite(body), body);
        let body = r#"{"name":"say \": inf","value":inf}"#;
        assert_eq!(sanitize_non_finite(body), r#"{"name":"say \": inf","value":null}"#);
    }

    #[test]
    fn test_sanitize_array_elements() {
        assert_eq!(sanitize_non_finite("[nan, 1.5,ovf]"), "[null, 1.5,null]");
    }

    #[test]
    fn test_parse_json_malformed() {
        let err = parse_json::<SensorDto>("<html>").unwrap_err();
        assert_eq!(err.code, ErrorCode::PayloadError);
    }

    #[test]
    fn test_text_parsers() {
        assert!(parse_bool_text("1\n").unwrap());
        assert!(!parse_bool_text("0").unwrap());
        assert!(parse_bool_text("on").is_err());
        assert_eq!(parse_uint_text(" 3 ").unwrap(), 3);
        assert!(parse_uint_text("-1").is_err());
        assert!(parse_uint_text("").is_err());
    }
}
