//! Small readers for loosely typed raw records.

use marketplaces::RawProduct;

/// Reads the string at `pointer`, empty when absent or not a string.
pub(crate) fn string_at(raw: &RawProduct, pointer: &str) -> String {
    raw.pointer(pointer)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Reads the string at `pointer`, `None` when absent or not a string.
pub(crate) fn opt_string_at(raw: &RawProduct, pointer: &str) -> Option<String> {
    raw.pointer(pointer)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Reads a string-or-number identifier at `pointer` as a string.
///
/// Providers are inconsistent here: the same id field can arrive as
/// `"9200000"` or `9200000` depending on the endpoint.
pub(crate) fn id_at(raw: &RawProduct, pointer: &str) -> String {
    match raw.pointer(pointer) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Reads the f64 at `pointer`.
pub(crate) fn f64_at(raw: &RawProduct, pointer: &str) -> Option<f64> {
    raw.pointer(pointer).and_then(|v| v.as_f64())
}

/// Reads the u64 at `pointer`.
pub(crate) fn u64_at(raw: &RawProduct, pointer: &str) -> Option<u64> {
    raw.pointer(pointer).and_then(|v| v.as_u64())
}

// ============================================================================
// Tests
// ============================================================================
