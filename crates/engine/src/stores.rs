//! Known store locations and lookup helpers.
//!
//! Reference data taken from the Mega Market store directory. The
//! session validates store selections against this table; queries carry
//! the derived platform-specific codes.

use std::sync::LazyLock;

use mm_catalog_core::{Store, StoreRegion};

/// Retail store code used when no store has been selected.
pub const DEFAULT_B2C_STORE: &str = "b2c_10010_vi";
/// Wholesale store code used when no store has been selected.
pub const DEFAULT_B2B_STORE: &str = "mm_10010_vi";

static KNOWN_STORES: LazyLock<Vec<Store>> = LazyLock::new(|| {
    vec![
        Store {
            code: "10010".to_string(),
            name: "MM Mega Market An Ph\u{fa}".to_string(),
            region: StoreRegion::South,
            address: "Song H\u{e0}nh, Xa l\u{1ed9} H\u{e0} N\u{1ed9}i, P. An Ph\u{fa}, \
                      TP. Th\u{1ee7} \u{110}\u{1ee9}c, TP.HCM"
                .to_string(),
        },
        Store {
            code: "10015".to_string(),
            name: "MM Mega Market B\u{ec}nh Ph\u{fa}".to_string(),
            region: StoreRegion::South,
            address: "S\u{1ed1} 1 \u{110}\u{1ed3}ng Di\u{1ec1}u, P. B\u{ec}nh Ph\u{fa}, \
                      Qu\u{1ead}n 6, TP.HCM"
                .to_string(),
        },
        Store {
            code: "10020".to_string(),
            name: "MM Mega Market B\u{ec}nh T\u{e2}n".to_string(),
            region: StoreRegion::South,
            address: "S\u{1ed1} 1 \u{110}\u{1ea1}i l\u{1ed9} V\u{f5} V\u{103}n Ki\u{1ec7}t, \
                      P. An L\u{1ea1}c, Q. B\u{ec}nh T\u{e2}n, TP.HCM"
                .to_string(),
        },
        Store {
            code: "10035".to_string(),
            name: "MM Mega Market Th\u{1ee7} \u{110}\u{1ee9}c".to_string(),
            region: StoreRegion::South,
            address: "Khu ph\u{1ed1} 6, P. Hi\u{1ec7}p Ph\u{fa}, TP. Th\u{1ee7} \u{110}\u{1ee9}c, \
                      TP.HCM"
                .to_string(),
        },
    ]
});

/// All known stores, ordered by code.
#[must_use]
pub fn all() -> &'static [Store] {
    &KNOWN_STORES
}

/// Look up a store by code in any accepted form (`10010`,
/// `b2c_10010_vi`, `mm_10010_vi`).
#[must_use]
pub fn find(code: &str) -> Option<&'static Store> {
    let numeric = Store::numeric_code(code);
    all().iter().find(|store| store.code == numeric)
}

/// Region filter for store listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Only(StoreRegion),
}

impl std::str::FromStr for RegionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse::<StoreRegion>().map(Self::Only)
        }
    }
}

/// Stores matching the filter, ordered by code.
#[must_use]
pub fn by_region(filter: RegionFilter) -> Vec<Store> {
    all()
        .iter()
        .filter(|store| match filter {
            RegionFilter::All => true,
            RegionFilter::Only(region) => store.region == region,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_accepts_all_code_forms() {
        let direct = find("10015").expect("known store");
        let wholesale = find("mm_10015_vi").expect("known store");
        let retail = find("b2c_10015_vi").expect("known store");
        assert_eq!(direct.code, "10015");
        assert_eq!(direct, wholesale);
        assert_eq!(direct, retail);
    }

    #[test]
    fn test_find_unknown_code() {
        assert!(find("99999").is_none());
        assert!(find("mm_99999_vi").is_none());
    }

    #[test]
    fn test_by_region() {
        assert_eq!(by_region(RegionFilter::All).len(), all().len());
        assert_eq!(
            by_region(RegionFilter::Only(StoreRegion::South)).len(),
            all().len()
        );
        assert!(by_region(RegionFilter::Only(StoreRegion::North)).is_empty());
    }

    #[test]
    fn test_region_filter_parsing() {
        assert_eq!("all".parse::<RegionFilter>(), Ok(RegionFilter::All));
        assert_eq!(
            "south".parse::<RegionFilter>(),
            Ok(RegionFilter::Only(StoreRegion::South))
        );
        assert!("west".parse::<RegionFilter>().is_err());
    }

    #[test]
    fn test_stores_ordered_by_code() {
        let codes: Vec<&str> = all().iter().map(|s| s.code.as_str()).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }
}
