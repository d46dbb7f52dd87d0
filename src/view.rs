//! Client-side state of the product table.
//!
//! Holds what the rendering surface needs: whether the catalog has loaded,
//! the current filter/sort selection, and the rows that selection yields.
//! Rows are always recomputed with [`product_queries::query`] from the loaded
//! catalog, so there is no cached view to fall out of date.

use std::fmt;

use crate::{
    models::{Product, QuerySpec, Sort, SortDirection, SortField},
    queries::product_queries,
};

/// Failure between the HTTP endpoint and the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TransportError {}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(Vec<Product>),
    Failed(String),
}

/// What the status line shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Loading,
    Loaded { shown: usize, total: usize },
    Failed(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Loading => write!(f, "Loading products..."),
            Status::Loaded { shown, total } => write!(f, "Showing {} of {} products", shown, total),
            Status::Failed(reason) => write!(f, "Failed to load products: {}", reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    state: LoadState,
    spec: QuerySpec,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogView {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            spec: QuerySpec::default(),
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    pub fn on_loaded(&mut self, result: Result<Vec<Product>, TransportError>) {
        self.state = match result {
            Ok(products) => LoadState::Loaded(products),
            Err(e) => {
                tracing::error!("Error fetching products: {}", e);
                LoadState::Failed(e.to_string())
            }
        };
    }

    /// Feeds a raw response from `GET /api/products` into the view.
    pub fn on_response(&mut self, status: u16, body: &[u8]) {
        self.on_loaded(parse_response(status, body));
    }

    /// `None` or an empty string selects all categories.
    pub fn set_category(&mut self, category: Option<String>) {
        self.spec.category = category.filter(|c| !c.is_empty());
    }

    pub fn set_search(&mut self, term: &str) {
        self.spec.search = Some(term.to_string()).filter(|t| !t.is_empty());
    }

    /// Column header click: ascending, then descending, then unsorted.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.spec.sort = match self.spec.sort {
            Some(Sort {
                field: current,
                direction: SortDirection::Asc,
            }) if current == field => Some(Sort {
                field,
                direction: SortDirection::Desc,
            }),
            Some(Sort {
                field: current,
                direction: SortDirection::Desc,
            }) if current == field => None,
            _ => Some(Sort {
                field,
                direction: SortDirection::Asc,
            }),
        };
    }

    /// Options for the category selector, excluding the implicit "all".
    pub fn categories(&self) -> Vec<&str> {
        match &self.state {
            LoadState::Loaded(products) => product_queries::categories(products),
            _ => Vec::new(),
        }
    }

    pub fn rows(&self) -> Vec<&Product> {
        match &self.state {
            LoadState::Loaded(products) => product_queries::query(products, &self.spec),
            _ => Vec::new(),
        }
    }

    pub fn status(&self) -> Status {
        match &self.state {
            LoadState::Loading => Status::Loading,
            LoadState::Loaded(products) => Status::Loaded {
                shown: product_queries::query(products, &self.spec).len(),
                total: products.len(),
            },
            LoadState::Failed(reason) => Status::Failed(reason.clone()),
        }
    }
}

fn parse_response(status: u16, body: &[u8]) -> Result<Vec<Product>, TransportError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Err(TransportError(message));
    }

    serde_json::from_slice(body).map_err(|e| TransportError(format!("unexpected response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> Vec<u8> {
        json!([
            { "title": "Camera Lens", "price": 129.99, "total_reviews": 12, "search_query": "camera" },
            { "title": "Tripod", "price": null, "total_reviews": null, "search_query": "camera" },
            { "title": "Action Cam", "price": 89.0, "total_reviews": 3, "search_query": "action" }
        ])
        .to_string()
        .into_bytes()
    }

    fn titles(view: &CatalogView) -> Vec<&str> {
        view.rows().iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn starts_loading() {
        let view = CatalogView::new();
        assert_eq!(view.status(), Status::Loading);
        assert!(view.rows().is_empty());
    }

    #[test]
    fn empty_catalog_is_not_a_failure() {
        let mut view = CatalogView::new();
        view.on_response(200, b"[]");
        assert_eq!(view.status(), Status::Loaded { shown: 0, total: 0 });
        assert_eq!(view.status().to_string(), "Showing 0 of 0 products");
    }

    #[test]
    fn server_error_is_failed_state() {
        let mut view = CatalogView::new();
        view.on_response(500, br#"{"message": "Failed to fetch products"}"#);
        assert_eq!(
            view.status(),
            Status::Failed("Failed to fetch products".to_string())
        );
        assert!(view.categories().is_empty());
    }

    #[test]
    fn non_list_body_is_failed_state() {
        let mut view = CatalogView::new();
        view.on_response(200, br#"{"message": "nope"}"#);
        assert!(matches!(view.status(), Status::Failed(_)));
    }

    #[test]
    fn filters_recompute_rows() {
        let mut view = CatalogView::new();
        view.on_response(200, &body());
        assert_eq!(view.categories(), vec!["camera", "action"]);

        view.set_category(Some("camera".to_string()));
        assert_eq!(titles(&view), vec!["Camera Lens", "Tripod"]);

        view.set_search("cam");
        assert_eq!(titles(&view), vec!["Camera Lens"]);
        assert_eq!(view.status().to_string(), "Showing 1 of 3 products");

        view.set_category(Some(String::new()));
        assert_eq!(titles(&view), vec!["Camera Lens", "Action Cam"]);

        view.set_search("");
        assert_eq!(titles(&view).len(), 3);
    }

    #[test]
    fn header_clicks_cycle_sort() {
        let mut view = CatalogView::new();
        view.on_response(200, &body());

        view.toggle_sort(SortField::Price);
        assert_eq!(titles(&view), vec!["Action Cam", "Camera Lens", "Tripod"]);

        view.toggle_sort(SortField::Price);
        assert_eq!(titles(&view), vec!["Camera Lens", "Action Cam", "Tripod"]);

        view.toggle_sort(SortField::Price);
        assert!(view.spec().sort.is_none());
        assert_eq!(titles(&view), vec!["Camera Lens", "Tripod", "Action Cam"]);

        view.toggle_sort(SortField::Price);
        view.toggle_sort(SortField::TotalReviews);
        assert_eq!(
            view.spec().sort,
            Some(Sort {
                field: SortField::TotalReviews,
                direction: SortDirection::Asc,
            })
        );
    }
}
