use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Price,
    TotalReviews,
    SearchQuery,
    ScrapeDate,
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "price" => Ok(SortField::Price),
            "total_reviews" | "reviews" => Ok(SortField::TotalReviews),
            "search_query" | "category" => Ok(SortField::SearchQuery),
            "scrape_date" => Ok(SortField::ScrapeDate),
            other => Err(AppError::BadRequest(format!("Unknown sort field: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(AppError::BadRequest(format!("Unknown sort order: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Filter and sort parameters for one query over the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<Sort>,
}

impl QuerySpec {
    pub fn is_empty(&self) -> bool {
        self.category().is_none() && self.search().is_none() && self.sort.is_none()
    }

    /// Category filter; an empty selection means "all".
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

/// Raw query-string parameters of the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub category: Option<String>,
    pub q: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl TryFrom<SearchParams> for QuerySpec {
    type Error = AppError;

    fn try_from(params: SearchParams) -> Result<Self, Self::Error> {
        let direction = match params.order.as_deref() {
            Some(order) if !order.is_empty() => order.parse()?,
            _ => SortDirection::default(),
        };

        let sort = match params.sort_by.as_deref() {
            Some(field) if !field.is_empty() => Some(Sort {
                field: field.parse()?,
                direction,
            }),
            _ => None,
        };

        Ok(QuerySpec {
            category: params.category,
            search: params.q,
            sort,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse<'a> {
    pub products: Vec<&'a Product>,
    pub shown: usize,
    pub total: usize,
}
