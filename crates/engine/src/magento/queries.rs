//! GraphQL documents sent to the Magento endpoints.
//!
//! Kept deliberately close to the documents observed in production
//! traffic; both platforms accept the same product-search shape.

/// Operation name for [`PRODUCT_SEARCH`].
pub const PRODUCT_SEARCH_OP: &str = "ProductSearch";

/// Keyword product search with pricing, stock and category data.
pub const PRODUCT_SEARCH: &str = r"
query ProductSearch($currentPage: Int, $inputText: String!, $pageSize: Int) {
  products(currentPage: $currentPage, pageSize: $pageSize, search: $inputText) {
    items {
      id
      uid
      name
      sku
      price_range {
        maximum_price {
          final_price { currency value }
          regular_price { currency value }
        }
      }
      small_image { url }
      stock_status
      url_key
      categories { uid name }
      rating_summary
      short_description { html }
    }
    total_count
    page_info { total_pages }
  }
}
";

/// Operation name for [`GENERATE_CUSTOMER_TOKEN`].
pub const GENERATE_CUSTOMER_TOKEN_OP: &str = "generateCustomerToken";

/// Issue a wholesale customer token from email/password credentials.
pub const GENERATE_CUSTOMER_TOKEN: &str = r"
mutation generateCustomerToken($email: String!, $password: String!) {
  generateCustomerToken(email: $email, password: $password) {
    token
  }
}
";

/// Operation name for [`REVOKE_CUSTOMER_TOKEN`].
pub const REVOKE_CUSTOMER_TOKEN_OP: &str = "revokeCustomerToken";

/// Revoke the bearer token carried on the request.
pub const REVOKE_CUSTOMER_TOKEN: &str = r"
mutation revokeCustomerToken {
  revokeCustomerToken {
    result
  }
}
";

/// Operation name for [`CUSTOMER_PROFILE`].
pub const CUSTOMER_PROFILE_OP: &str = "CustomerProfile";

/// Fetch the authenticated customer's profile; doubles as a token check.
pub const CUSTOMER_PROFILE: &str = r"
query CustomerProfile {
  customer {
    email
    firstname
    lastname
  }
}
";
