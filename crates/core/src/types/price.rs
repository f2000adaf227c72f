//! Price representation using decimal arithmetic.
//!
//! Both platforms quote in VND; amounts are kept in the currency's
//! standard unit with two fractional digits of precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Convenience constructor for whole-dong VND amounts.
    #[must_use]
    pub fn vnd(amount: i64) -> Self {
        Self::new(Decimal::from(amount), CurrencyCode::Vnd)
    }

    /// True when the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl std::fmt::Display for Price {
    /// Format with Vietnamese-style thousands separators, e.g. `125.000 ₫`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let formatted = group_thousands(&self.amount.trunc().abs().to_string());
        let sign = if self.amount.is_sign_negative() { "-" } else { "" };
        let fraction = self.amount.fract();
        match self.currency_code {
            CurrencyCode::Vnd => write!(f, "{sign}{formatted} \u{20ab}"),
            CurrencyCode::Usd if !fraction.is_zero() => {
                write!(f, "{sign}${formatted}{}", fraction.abs().to_string().trim_start_matches('0'))
            }
            CurrencyCode::Usd => write!(f, "{sign}${formatted}"),
        }
    }
}

/// ISO 4217 currency codes seen on the Mega Market platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    #[default]
    Vnd,
    Usd,
}

impl CurrencyCode {
    /// Uppercase wire code (`VND` / `USD`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vnd => "VND",
            Self::Usd => "USD",
        }
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VND" => Ok(Self::Vnd),
            "USD" => Ok(Self::Usd),
            _ => Err(format!("unknown currency code: {s}")),
        }
    }
}

/// Insert `.` separators every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
