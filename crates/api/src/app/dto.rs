use serde::{Deserialize, Serialize};

use catalog_auth::User;
use catalog_infra::{ListQuery, SortOrder};
use catalog_products::Product;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;

// -------------------------
// Request DTOs
// -------------------------

// Missing fields fall through to entity validation instead of a decode error.

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct GetJwtRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Raw `/products` query string. Unparseable numbers fall back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

impl ListProductsParams {
    pub fn to_query(&self) -> ListQuery {
        let page = self
            .page
            .as_deref()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(0);
        let limit = self
            .limit
            .as_deref()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_PAGE_LIMIT);

        ListQuery::new(page, limit, SortOrder::from_param(self.sort.as_deref()))
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct GetJwtResponse {
    pub access_token: String,
}

pub fn product_to_json(p: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": p.id_typed().to_string(),
        "name": p.name(),
        "price": p.price(),
        "created_at": p.created_at().to_rfc3339(),
    })
}

/// Public view of an account. The password digest never leaves the service.
pub fn user_to_json(u: &User) -> serde_json::Value {
    serde_json::json!({
        "id": u.id_typed().to_string(),
        "name": u.name(),
        "email": u.email(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, limit: Option<&str>, sort: Option<&str>) -> ListProductsParams {
        ListProductsParams {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
            sort: sort.map(str::to_string),
        }
    }

    #[test]
    fn list_params_default_to_unpaged_ascending() {
        let q = ListProductsParams::default().to_query();
        assert_eq!(q.page, 0);
        assert_eq!(q.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(q.sort, SortOrder::Asc);
        assert_eq!(q.window(), None);
    }

    #[test]
    fn garbage_numbers_fall_back() {
        let q = params(Some("two"), Some("-5"), Some("sideways")).to_query();
        assert_eq!(q.page, 0);
        assert_eq!(q.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(q.sort, SortOrder::Asc);
    }

    #[test]
    fn explicit_paging_is_kept() {
        let q = params(Some("3"), Some("25"), Some("DESC")).to_query();
        assert_eq!(q.window(), Some((50, 25)));
        assert_eq!(q.sort, SortOrder::Desc);
    }

    #[test]
    fn missing_body_fields_decode_to_empty_values() {
        let req: ProductRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.name, "");
        assert_eq!(req.price, 0.0);
    }
}
