use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One scraped listing, as decoded from a source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub price: Option<f64>,
    pub total_reviews: Option<u64>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub product_url: String,
    #[serde(default)]
    pub scrape_date: String,
}

impl Product {
    /// Collection time parsed from `scrape_date`.
    ///
    /// Accepts RFC 3339, naive ISO datetimes (with or without fractional
    /// seconds) and bare dates. Offsets are normalised to UTC so values
    /// written by different scrapers compare on the same clock.
    pub fn scraped_at(&self) -> Option<NaiveDateTime> {
        let raw = self.scrape_date.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }

        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt);
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_date(raw: &str) -> Product {
        Product {
            title: "Tripod".to_string(),
            price: None,
            total_reviews: None,
            image_url: String::new(),
            search_query: String::new(),
            product_url: String::new(),
            scrape_date: raw.to_string(),
        }
    }

    #[test]
    fn parses_python_isoformat() {
        let at = with_date("2025-01-14T09:30:12.345678").scraped_at().unwrap();
        assert_eq!(at.to_string(), "2025-01-14 09:30:12.345678");
    }

    #[test]
    fn normalises_offsets() {
        let at = with_date("2025-01-14T11:30:00+02:00").scraped_at().unwrap();
        assert_eq!(at.to_string(), "2025-01-14 09:30:00");
    }

    #[test]
    fn bare_date_is_midnight() {
        let at = with_date("2025-01-14").scraped_at().unwrap();
        assert_eq!(at.to_string(), "2025-01-14 00:00:00");
    }

    #[test]
    fn garbage_is_absent() {
        assert!(with_date("yesterday").scraped_at().is_none());
        assert!(with_date("").scraped_at().is_none());
    }
}
