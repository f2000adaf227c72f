//! Store locations and store-code derivations.
//!
//! Each physical store is addressed by a numeric code (e.g. `10010`).
//! The platforms scope queries with derived codes: `b2c_10010_vi` on
//! retail and `mm_10010_vi` on wholesale. All three forms are accepted
//! as input and reduced to the numeric form.

use serde::{Deserialize, Serialize};

/// Geographic region of Vietnam a store belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreRegion {
    North,
    Central,
    South,
}

impl std::fmt::Display for StoreRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::North => "north",
            Self::Central => "central",
            Self::South => "south",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for StoreRegion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Self::North),
            "central" => Ok(Self::Central),
            "south" => Ok(Self::South),
            _ => Err(format!(
                "invalid region: {s} (expected north, central or south)"
            )),
        }
    }
}

/// A physical Mega Market store location. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Stable numeric identifier, e.g. `10010`.
    pub code: String,
    pub name: String,
    pub region: StoreRegion,
    pub address: String,
}

impl Store {
    /// Reduce any accepted store-code form to the numeric form.
    ///
    /// `10010`, `b2c_10010_vi` and `mm_10010_vi` all yield `10010`.
    #[must_use]
    pub fn numeric_code(code: &str) -> &str {
        code.trim_start_matches("b2c_")
            .trim_start_matches("mm_")
            .trim_end_matches("_vi")
    }

    /// Store code for retail-platform requests.
    #[must_use]
    pub fn b2c_store_code(&self) -> String {
        format!("b2c_{}_vi", self.code)
    }

    /// Store code for wholesale-platform requests.
    #[must_use]
    pub fn b2b_store_code(&self) -> String {
        format!("mm_{}_vi", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn an_phu() -> Store {
        Store {
            code: "10010".to_string(),
            name: "MM Mega Market An Ph\u{fa}".to_string(),
            region: StoreRegion::South,
            address: String::new(),
        }
    }

    #[test]
    fn test_numeric_code_accepts_all_forms() {
        assert_eq!(Store::numeric_code("10010"), "10010");
        assert_eq!(Store::numeric_code("b2c_10010_vi"), "10010");
        assert_eq!(Store::numeric_code("mm_10015_vi"), "10015");
    }

    #[test]
    fn test_platform_store_codes() {
        let store = an_phu();
        assert_eq!(store.b2c_store_code(), "b2c_10010_vi");
        assert_eq!(store.b2b_store_code(), "mm_10010_vi");
    }

    #[test]
    fn test_region_parsing() {
        assert_eq!("south".parse::<StoreRegion>(), Ok(StoreRegion::South));
        assert!("east".parse::<StoreRegion>().is_err());
        assert_eq!(StoreRegion::North.to_string(), "north");
    }
}
