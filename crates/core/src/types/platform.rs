//! Platform identifier for the two Mega Market backends.

use serde::{Deserialize, Serialize};

/// The upstream platform a product was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Public retail storefront (online.mmvietnam.com), no authentication.
    #[default]
    B2c,
    /// Wholesale storefront (mmpro.vn), requires a customer token.
    B2b,
}

impl Platform {
    /// Lowercase wire name (`b2c` / `b2b`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::B2c => "b2c",
            Self::B2b => "b2b",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b2c" => Ok(Self::B2c),
            "b2b" => Ok(Self::B2b),
            _ => Err(format!("invalid platform: {s} (expected b2c or b2b)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_round_trip() {
        assert_eq!("b2c".parse::<Platform>(), Ok(Platform::B2c));
        assert_eq!("b2b".parse::<Platform>(), Ok(Platform::B2b));
        assert_eq!(Platform::B2b.to_string(), "b2b");
    }

    #[test]
    fn test_platform_rejects_unknown() {
        assert!("both".parse::<Platform>().is_err());
        assert!("B2C".parse::<Platform>().is_err());
    }
}
