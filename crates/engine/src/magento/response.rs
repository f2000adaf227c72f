//! Raw wire shapes for Magento GraphQL responses.
//!
//! Everything here is permissive: fields the platforms sometimes omit
//! are `Option`, and price values are kept as raw JSON (the backends
//! emit them as numbers or as decimal strings depending on the
//! endpoint). The normalizer decides what is mandatory.

use serde::Deserialize;

/// `data` payload of a product-search query.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchData {
    pub products: RawSearchPage,
}

/// One page of raw search results.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSearchPage {
    #[serde(default)]
    pub items: Vec<RawProduct>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub page_info: RawPageInfo,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct RawPageInfo {
    #[serde(default)]
    pub total_pages: u32,
}

/// A product exactly as one of the platforms returned it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: Option<i64>,
    pub uid: Option<String>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price_range: Option<RawPriceRange>,
    pub small_image: Option<RawImage>,
    pub stock_status: Option<String>,
    pub url_key: Option<String>,
    pub categories: Option<Vec<RawCategory>>,
    pub rating_summary: Option<f64>,
    pub short_description: Option<RawHtml>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPriceRange {
    pub maximum_price: Option<RawPriceSet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPriceSet {
    pub final_price: Option<RawMoney>,
    pub regular_price: Option<RawMoney>,
}

/// A money value; `value` may be a JSON number or a decimal string.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMoney {
    pub currency: Option<String>,
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    pub uid: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHtml {
    pub html: Option<String>,
}

/// `data` payload of the `generateCustomerToken` mutation.
#[derive(Debug, Deserialize)]
pub struct TokenData {
    #[serde(rename = "generateCustomerToken")]
    pub generate_customer_token: Option<RawToken>,
}

#[derive(Debug, Deserialize)]
pub struct RawToken {
    pub token: Option<String>,
}

/// `data` payload of the `revokeCustomerToken` mutation.
#[derive(Debug, Deserialize)]
pub struct RevokeData {
    #[serde(rename = "revokeCustomerToken")]
    pub revoke_customer_token: Option<RawRevokeResult>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawRevokeResult {
    #[serde(default)]
    pub result: bool,
}

/// `data` payload of the customer-profile query.
#[derive(Debug, Deserialize)]
pub struct CustomerData {
    pub customer: Option<RawCustomer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCustomer {
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_page_tolerates_missing_fields() {
        let page: RawSearchPage = serde_json::from_str(
            r#"{"items": [{"sku": "2001", "name": "Gạo"}]}"#,
        )
        .expect("valid page json");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_count, 0);
        assert_eq!(page.page_info.total_pages, 0);
        let item = page.items.first().expect("one item");
        assert_eq!(item.sku.as_deref(), Some("2001"));
        assert!(item.price_range.is_none());
    }

    #[test]
    fn test_money_value_accepts_number_and_string() {
        let money: RawMoney =
            serde_json::from_str(r#"{"currency": "VND", "value": 125000}"#).expect("number value");
        assert!(money.value.is_some_and(|v| v.is_number()));

        let money: RawMoney = serde_json::from_str(r#"{"currency": "VND", "value": "125000.50"}"#)
            .expect("string value");
        assert!(money.value.is_some_and(|v| v.is_string()));
    }

    #[test]
    fn test_token_data_field_rename() {
        let data: TokenData =
            serde_json::from_str(r#"{"generateCustomerToken": {"token": "abc123"}}"#)
                .expect("valid token json");
        let token = data.generate_customer_token.expect("token present");
        assert_eq!(token.token.as_deref(), Some("abc123"));
    }
}
