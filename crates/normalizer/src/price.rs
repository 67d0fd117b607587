//! Price coercion for loosely typed provider payloads.
//!
//! Providers deliver prices as JSON numbers, plain numeric strings or
//! localized currency strings like `"€1.299,00"`. Everything funnels
//! through [`coerce_price`], which never fails: a price that cannot be
//! read becomes `0.0` so the record still takes part in comparison.

use serde_json::Value;

/// Coerces a raw price value into a finite, non-negative `f64`.
///
/// `None`, nulls, unparseable strings, negative and non-finite numbers
/// all collapse to `0.0`.
pub fn coerce_price(raw: Option<&Value>) -> f64 {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_price_str(s),
        _ => None,
    };

    match parsed {
        Some(price) if price.is_finite() && price >= 0.0 => price,
        _ => 0.0,
    }
}

/// Parses a human-formatted price string.
///
/// Currency symbols and whitespace are stripped first. When both `.`
/// and `,` appear, whichever comes last is the decimal separator; a
/// lone `,` is treated as the decimal separator, matching European
/// formatting.
fn parse_price_str(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind('.'), cleaned.rfind(',')) {
        (Some(dot), Some(comma)) => {
            if dot > comma {
                cleaned.replace(',', "")
            } else {
                cleaned.replace('.', "").replace(',', ".")
            }
        }
        (None, Some(_)) => cleaned.replace(',', "."),
        _ => cleaned,
    };

    normalized.parse::<f64>().ok()
}

// ============================================================================
// Tests
// ============================================================================
