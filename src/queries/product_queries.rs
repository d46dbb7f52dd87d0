use std::cmp::Ordering;

use crate::models::{Product, QuerySpec, Sort, SortDirection, SortField};

/// Filters and sorts `products` according to `spec`.
///
/// The result borrows from `products`, which is never reordered. Sorting is
/// stable, and records with no value for the sort field always come last,
/// whichever direction was asked for.
pub fn query<'a>(products: &'a [Product], spec: &QuerySpec) -> Vec<&'a Product> {
    let category = spec.category();
    let needle = spec.search().map(str::to_lowercase);

    let mut rows: Vec<&Product> = products
        .iter()
        .filter(|p| category.is_none_or(|c| p.search_query == c))
        .filter(|p| {
            needle
                .as_deref()
                .is_none_or(|n| p.title.to_lowercase().contains(n))
        })
        .collect();

    if let Some(sort) = spec.sort {
        sort_rows(&mut rows, sort);
    }

    rows
}

/// Distinct non-empty categories in the order they first appear.
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut seen = Vec::new();
    for product in products {
        let category = product.search_query.as_str();
        if !category.is_empty() && !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

fn sort_rows(rows: &mut [&Product], sort: Sort) {
    match sort.field {
        SortField::Title => {
            rows.sort_by_cached_key(|p| directed(p.title.to_lowercase(), sort.direction))
        }
        SortField::SearchQuery => rows.sort_by_cached_key(|p| {
            // Uncategorised records decode to "" and count as absent.
            (
                p.search_query.is_empty(),
                directed(p.search_query.to_lowercase(), sort.direction),
            )
        }),
        SortField::Price => rows.sort_by(|a, b| {
            absent_last(a.price, b.price, sort.direction, |x, y| x.total_cmp(y))
        }),
        SortField::TotalReviews => rows.sort_by(|a, b| {
            absent_last(a.total_reviews, b.total_reviews, sort.direction, Ord::cmp)
        }),
        SortField::ScrapeDate => rows.sort_by_cached_key(|p| {
            let at = p.scraped_at();
            (at.is_none(), at.map(|t| directed(t, sort.direction)))
        }),
    }
}

fn absent_last<T>(
    a: Option<T>,
    b: Option<T>,
    direction: SortDirection,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => match direction {
            SortDirection::Asc => cmp(&x, &y),
            SortDirection::Desc => cmp(&y, &x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort key wrapper that flips ordering for descending sorts.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum Directed<T> {
    Asc(T),
    Desc(std::cmp::Reverse<T>),
}

fn directed<T: Ord>(value: T, direction: SortDirection) -> Directed<T> {
    match direction {
        SortDirection::Asc => Directed::Asc(value),
        SortDirection::Desc => Directed::Desc(std::cmp::Reverse(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, price: Option<f64>, category: &str) -> Product {
        Product {
            title: title.to_string(),
            price,
            total_reviews: None,
            image_url: String::new(),
            search_query: category.to_string(),
            product_url: format!("https://shop.example/{}", title),
            scrape_date: String::new(),
        }
    }

    fn titles(rows: &[&Product]) -> Vec<String> {
        rows.iter().map(|p| p.title.clone()).collect()
    }

    fn sorted(field: SortField, direction: SortDirection) -> QuerySpec {
        QuerySpec {
            sort: Some(Sort { field, direction }),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("Camera Lens", Some(129.99), "camera"),
            product("Tripod", Some(9.99), "camera"),
            product("Action Cam", None, "action"),
            product("Memory Card", Some(9.99), "storage"),
            product("Lens Cap", Some(4.5), "camera"),
        ]
    }

    #[test]
    fn empty_spec_is_identity() {
        let products = sample();
        let rows = query(&products, &QuerySpec::default());
        let owned: Vec<Product> = rows.into_iter().cloned().collect();
        assert_eq!(owned, products);
    }

    #[test]
    fn category_filter_is_exact_and_ordered() {
        let products = sample();
        let spec = QuerySpec {
            category: Some("camera".to_string()),
            ..Default::default()
        };
        assert_eq!(
            titles(&query(&products, &spec)),
            vec!["Camera Lens", "Tripod", "Lens Cap"]
        );

        let spec = QuerySpec {
            category: Some("Camera".to_string()),
            ..Default::default()
        };
        assert!(query(&products, &spec).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let products = sample();
        let spec = QuerySpec {
            search: Some("cam".to_string()),
            ..Default::default()
        };
        assert_eq!(
            titles(&query(&products, &spec)),
            vec!["Camera Lens", "Action Cam"]
        );
    }

    #[test]
    fn filters_compose() {
        let products = sample();
        let spec = QuerySpec {
            category: Some("camera".to_string()),
            search: Some("LENS".to_string()),
            sort: None,
        };
        assert_eq!(
            titles(&query(&products, &spec)),
            vec!["Camera Lens", "Lens Cap"]
        );
    }

    #[test]
    fn price_sort_keeps_absent_last_and_ties_stable() {
        let products = sample();

        let asc = query(&products, &sorted(SortField::Price, SortDirection::Asc));
        assert_eq!(
            titles(&asc),
            vec!["Lens Cap", "Tripod", "Memory Card", "Camera Lens", "Action Cam"]
        );

        let desc = query(&products, &sorted(SortField::Price, SortDirection::Desc));
        assert_eq!(
            titles(&desc),
            vec!["Camera Lens", "Tripod", "Memory Card", "Lens Cap", "Action Cam"]
        );
    }

    #[test]
    fn review_sort_keeps_absent_last() {
        let mut products = sample();
        products[0].total_reviews = Some(10);
        products[1].total_reviews = Some(250);
        products[3].total_reviews = Some(10);

        let desc = query(
            &products,
            &sorted(SortField::TotalReviews, SortDirection::Desc),
        );
        assert_eq!(
            titles(&desc),
            vec!["Tripod", "Camera Lens", "Memory Card", "Action Cam", "Lens Cap"]
        );
    }

    #[test]
    fn title_sort_ignores_case_and_keeps_ties_in_order() {
        let products = vec![
            product("tripod", None, "a"),
            product("Action Cam", None, "b"),
            product("Tripod", None, "c"),
        ];

        let asc = query(&products, &sorted(SortField::Title, SortDirection::Asc));
        assert_eq!(
            asc.iter().map(|p| p.search_query.as_str()).collect::<Vec<_>>(),
            vec!["b", "a", "c"]
        );

        let desc = query(&products, &sorted(SortField::Title, SortDirection::Desc));
        assert_eq!(
            desc.iter().map(|p| p.search_query.as_str()).collect::<Vec<_>>(),
            vec!["a", "c", "b"]
        );
    }

    #[test]
    fn date_sort_puts_unparseable_last() {
        let mut products = sample();
        products[0].scrape_date = "2025-01-02T10:00:00".to_string();
        products[1].scrape_date = "not a date".to_string();
        products[2].scrape_date = "2025-01-01T10:00:00.5".to_string();
        products[3].scrape_date = "2025-01-03".to_string();

        let asc = query(&products, &sorted(SortField::ScrapeDate, SortDirection::Asc));
        assert_eq!(
            titles(&asc),
            vec!["Action Cam", "Camera Lens", "Memory Card", "Tripod", "Lens Cap"]
        );

        let desc = query(&products, &sorted(SortField::ScrapeDate, SortDirection::Desc));
        assert_eq!(
            titles(&desc),
            vec!["Memory Card", "Camera Lens", "Action Cam", "Tripod", "Lens Cap"]
        );
    }

    #[test]
    fn category_sort_puts_uncategorised_last() {
        let products = vec![
            product("NoCat", None, ""),
            product("B", None, "b"),
            product("A", None, "a"),
        ];

        let asc = query(&products, &sorted(SortField::SearchQuery, SortDirection::Asc));
        assert_eq!(titles(&asc), vec!["A", "B", "NoCat"]);

        let desc = query(&products, &sorted(SortField::SearchQuery, SortDirection::Desc));
        assert_eq!(titles(&desc), vec!["B", "A", "NoCat"]);
    }

    #[test]
    fn query_does_not_touch_input() {
        let products = sample();
        let before = products.clone();
        let _ = query(&products, &sorted(SortField::Price, SortDirection::Desc));
        assert_eq!(products, before);
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let mut products = sample();
        products.push(product("Untagged", None, ""));
        assert_eq!(categories(&products), vec!["camera", "action", "storage"]);
    }
}
