//! Unwrapping of the FamilyMart `GetOrderDetail` response.
//!
//! The endpoint returns `{"d":"<escaped JSON>"}`. Dropping every backslash
//! and then the fixed `{"d":"` prefix and `"}` suffix leaves the inner JSON.

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

const WRAPPER_PREFIX_CHARS: usize = 6;
const WRAPPER_SUFFIX_CHARS: usize = 2;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderDetail {
    /// Status entries, latest first.
    #[serde(rename = "List", default)]
    pub list: Vec<StatusEntry>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusEntry {
    #[serde(rename = "ORDER_NO")]
    pub order_no: String,
    /// Minute-precision timestamp; the platform omits seconds.
    #[serde(rename = "ORDER_DATE_R")]
    pub order_date: String,
    #[serde(rename = "STATUS_D")]
    pub status: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Strips the double-encoding wrapper and returns the inner JSON text.
///
/// # Errors
///
/// Returns [`TrackerError::Parse`] if the body is shorter than the wrapper.
pub fn unwrap_payload(body: &str) -> Result<String, TrackerError> {
    let chars: Vec<char> = body.chars().filter(|c| *c != '\\').collect();
    if chars.len() < WRAPPER_PREFIX_CHARS + WRAPPER_SUFFIX_CHARS {
        return Err(TrackerError::Parse {
            context: "family_mart GetOrderDetail".to_owned(),
            reason: format!("response too short to unwrap ({} chars)", chars.len()),
        });
    }
    Ok(chars[WRAPPER_PREFIX_CHARS..chars.len() - WRAPPER_SUFFIX_CHARS]
        .iter()
        .collect())
}

/// Unwraps and deserializes a `GetOrderDetail` body.
///
/// # Errors
///
/// Returns [`TrackerError::Parse`] for a truncated body or
/// [`TrackerError::Deserialize`] when the inner JSON has the wrong shape.
pub fn parse_order_detail(body: &str) -> Result<OrderDetail, TrackerError> {
    let inner = unwrap_payload(body)?;
    serde_json::from_str(&inner).map_err(|e| TrackerError::Deserialize {
        context: "family_mart GetOrderDetail".to_owned(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRAPPED: &str = r#"{"d":"{\"List\":[{\"ORDER_NO\":\"F12345678\",\"ORDER_DATE_R\":\"2024/05/01 12:30\",\"STATUS_D\":\"貨件配達取件店舖\"}],\"ErrorCode\":\"000\"}"}"#;

    #[test]
    fn unwrap_yields_inner_json() {
        let inner = unwrap_payload(WRAPPED).unwrap();
        assert_eq!(
            inner,
            r#"{"List":[{"ORDER_NO":"F12345678","ORDER_DATE_R":"2024/05/01 12:30","STATUS_D":"貨件配達取件店舖"}],"ErrorCode":"000"}"#
        );
    }

    #[test]
    fn unwrap_rejects_truncated_body() {
        assert!(matches!(
            unwrap_payload("{\"d\""),
            Err(TrackerError::Parse { .. })
        ));
    }

    #[test]
    fn parses_entries_and_keeps_extra_fields() {
        let detail = parse_order_detail(WRAPPED).unwrap();
        assert_eq!(detail.list.len(), 1);
        assert_eq!(detail.list[0].order_no, "F12345678");
        assert_eq!(detail.list[0].order_date, "2024/05/01 12:30");
        assert_eq!(detail.extra.get("ErrorCode"), Some(&serde_json::json!("000")));
    }

    #[test]
    fn empty_list_parses() {
        let detail = parse_order_detail(r#"{"d":"{\"List\":[]}"}"#).unwrap();
        assert!(detail.list.is_empty());
    }

    #[test]
    fn unrelated_json_is_a_deserialize_error() {
        let result = parse_order_detail(r#"{"d":"[1,2,3]"}"#);
        assert!(matches!(result, Err(TrackerError::Deserialize { .. })));
    }
}
