//! JSON rendering for command output on stdout.

use parcel_core::TrackingInfo;
use serde::Serialize;

/// One line of `batch` output. `result` is `null` when nothing was found.
#[derive(Debug, Serialize)]
pub(crate) struct BatchLine<'a> {
    pub platform: &'a str,
    pub order_id: &'a str,
    pub result: serde_json::Value,
}

/// Renders a lookup result.
///
/// The default view is the `{platform, order_id, status, time}` summary;
/// `full` adds `is_delivered` and `raw_data`. A missing parcel renders as
/// `null`.
pub(crate) fn to_json(info: Option<&TrackingInfo>, full: bool) -> serde_json::Value {
    let Some(info) = info else {
        return serde_json::Value::Null;
    };
    if !full {
        return serde_json::to_value(info.summary()).unwrap_or_default();
    }

    let mut value = serde_json::to_value(info).unwrap_or_default();
    if let Some(map) = value.as_object_mut() {
        map.insert("raw_data".to_owned(), info.raw_data.clone());
    }
    value
}

pub(crate) fn render(info: Option<&TrackingInfo>, full: bool) -> String {
    to_json(info, full).to_string()
}
