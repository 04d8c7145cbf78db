use super::*;

// -----------------------------------------------------------------------
// normalize_timestamp
// -----------------------------------------------------------------------

#[test]
fn normalize_timestamp_rewrites_slashes() {
    assert_eq!(
        normalize_timestamp("2024/05/01 12:30:45"),
        "2024-05-01 12:30:45"
    );
}

#[test]
fn normalize_timestamp_keeps_canonical_form() {
    assert_eq!(
        normalize_timestamp("2024-05-01 12:30:45"),
        "2024-05-01 12:30:45"
    );
}

#[test]
fn normalize_timestamp_trims_whitespace() {
    assert_eq!(
        normalize_timestamp("  2024/05/01 08:00:00\n"),
        "2024-05-01 08:00:00"
    );
}

#[test]
fn normalize_timestamp_fills_missing_seconds() {
    assert_eq!(normalize_timestamp("2024/05/01 08:15"), "2024-05-01 08:15:00");
}

#[test]
fn normalize_timestamp_passes_unknown_text_through() {
    assert_eq!(normalize_timestamp("昨天下午"), "昨天下午");
}

// -----------------------------------------------------------------------
// format_unix_local
// -----------------------------------------------------------------------

#[test]
fn format_unix_local_matches_chrono_local() {
    let expected = Local
        .timestamp_opt(1_700_000_000, 0)
        .unwrap()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    assert_eq!(format_unix_local(1_700_000_000), Some(expected));
}

#[test]
fn format_unix_local_has_fixed_width() {
    let formatted = format_unix_local(0).unwrap();
    assert_eq!(formatted.len(), 19);
}

// -----------------------------------------------------------------------
// contains_any
// -----------------------------------------------------------------------

#[test]
fn contains_any_matches_substring() {
    assert!(contains_any("您的包裹已完成取件，謝謝", &["已完成取件"]));
}

#[test]
fn contains_any_rejects_other_text() {
    assert!(!contains_any("包裹運送中", &["已完成取件", "貨件配達取件店舖"]));
}

#[test]
fn contains_any_with_no_phrases_is_false() {
    assert!(!contains_any("anything", &[]));
}
