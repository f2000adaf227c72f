//! Vietnamese text normalization for cross-platform product matching.
//!
//! The two platforms list the same physical items under independently
//! maintained names, so matching works on a normalized form: lowercase,
//! diacritics folded to ASCII, punctuation stripped, whitespace
//! collapsed. Quantities and pack-size units are extracted separately
//! because "Gạo ST25 5kg" and "Gạo ST25 10kg" are
//! different items no matter how similar the names are.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

/// Quantity followed by a unit token, over folded lowercase text.
/// The quantity must not sit inside a word ("ST25 túi" is a model
/// number, not 25 bags). Longer alternatives first so `lit` wins over `l`.
static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^a-z0-9])\d+(?:[.,]\d+)?\s*(kg|gr|g|ml|lit|lon|chai|hop|goi|tui|thung|vi|cai|vien|kien|cay|l)\b",
    )
    .expect("unit pattern is valid")
});

/// Number tokens, decimal comma or point.
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?").expect("number pattern is valid"));

/// Fold Vietnamese diacritics to their ASCII base letters.
///
/// Only covers the Vietnamese alphabet; other scripts pass through
/// unchanged.
#[must_use]
pub fn fold_diacritics(input: &str) -> String {
    input.chars().map(fold_char).collect()
}

#[allow(clippy::too_many_lines)]
const fn fold_char(c: char) -> char {
    match c {
        'à' | 'á' | 'ả' | 'ã' | 'ạ' | 'ă' | 'ằ' | 'ắ' | 'ẳ' | 'ẵ' | 'ặ' | 'â' | 'ầ' | 'ấ' | 'ẩ'
        | 'ẫ' | 'ậ' => 'a',
        'À' | 'Á' | 'Ả' | 'Ã' | 'Ạ' | 'Ă' | 'Ằ' | 'Ắ' | 'Ẳ' | 'Ẵ' | 'Ặ' | 'Â' | 'Ầ' | 'Ấ' | 'Ẩ'
        | 'Ẫ' | 'Ậ' => 'A',
        'đ' => 'd',
        'Đ' => 'D',
        'è' | 'é' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ề' | 'ế' | 'ể' | 'ễ' | 'ệ' => 'e',
        'È' | 'É' | 'Ẻ' | 'Ẽ' | 'Ẹ' | 'Ê' | 'Ề' | 'Ế' | 'Ể' | 'Ễ' | 'Ệ' => 'E',
        'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' => 'i',
        'Ì' | 'Í' | 'Ỉ' | 'Ĩ' | 'Ị' => 'I',
        'ò' | 'ó' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ồ' | 'ố' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ờ' | 'ớ' | 'ở'
        | 'ỡ' | 'ợ' => 'o',
        'Ò' | 'Ó' | 'Ỏ' | 'Õ' | 'Ọ' | 'Ô' | 'Ồ' | 'Ố' | 'Ổ' | 'Ỗ' | 'Ộ' | 'Ơ' | 'Ờ' | 'Ớ' | 'Ở'
        | 'Ỡ' | 'Ợ' => 'O',
        'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ừ' | 'ứ' | 'ử' | 'ữ' | 'ự' => 'u',
        'Ù' | 'Ú' | 'Ủ' | 'Ũ' | 'Ụ' | 'Ư' | 'Ừ' | 'Ứ' | 'Ử' | 'Ữ' | 'Ự' => 'U',
        'ỳ' | 'ý' | 'ỷ' | 'ỹ' | 'ỵ' => 'y',
        'Ỳ' | 'Ý' | 'Ỷ' | 'Ỹ' | 'Ỵ' => 'Y',
        other => other,
    }
}

/// Normalize a product name for similarity comparison: lowercase,
/// diacritics folded, punctuation mapped to spaces, whitespace
/// collapsed.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let folded = fold_diacritics(&name.to_lowercase());
    folded
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The ordered list of numbers appearing in a name, decimal commas
/// unified with points. Unparseable tokens are skipped.
#[must_use]
pub fn numeric_signature(name: &str) -> Vec<Decimal> {
    NUMBER_RE
        .find_iter(name)
        .filter_map(|m| m.as_str().replace(',', ".").parse::<Decimal>().ok())
        .collect()
}

/// Extract the canonical unit token from a product name: the first
/// quantity+unit occurrence, with aliases folded (`gr` to `g`, `lit`
/// to `l`). Returns an empty string when no unit is found.
#[must_use]
pub fn parse_unit(name: &str) -> String {
    let folded = fold_diacritics(&name.to_lowercase());
    UNIT_RE
        .captures(&folded)
        .and_then(|caps| caps.get(1))
        .map(|m| canonical_unit(m.as_str()))
        .unwrap_or_default()
}

fn canonical_unit(unit: &str) -> String {
    match unit {
        "gr" => "g",
        "lit" => "l",
        other => other,
    }
    .to_string()
}

/// Whether two canonical unit tokens refer to the same or a convertible
/// quantity. Mass units (kg/g) and volume units (l/ml) are mutually
/// convertible; count-like units (lon, chai, ...) must be identical; an
/// empty unit is compatible with anything.
#[must_use]
pub fn units_compatible(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() || a == b {
        return true;
    }
    matches!(
        (unit_class(a), unit_class(b)),
        (Some(left), Some(right)) if left == right
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitClass {
    Mass,
    Volume,
}

const fn unit_class(unit: &str) -> Option<UnitClass> {
    match unit.as_bytes() {
        b"kg" | b"g" => Some(UnitClass::Mass),
        b"l" | b"ml" => Some(UnitClass::Volume),
        _ => None,
    }
}
