use std::fmt;

use serde_json::{Map, Value};

use crate::models::Product;

/// Why a whole file was rejected.
#[derive(Debug)]
pub enum DecodeError {
    Malformed(serde_json::Error),
    NotAList(&'static str),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Malformed(e) => write!(f, "invalid JSON: {}", e),
            DecodeError::NotAList(kind) => write!(f, "expected a list of products, found {}", kind),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Malformed(err)
    }
}

/// Validation outcome for a single list element.
#[derive(Debug, PartialEq)]
pub enum RecordOutcome {
    Ok(Product),
    Skip(String),
}

#[derive(Debug, Default)]
pub struct Decoded {
    pub products: Vec<Product>,
    /// One reason per skipped element, in file order.
    pub skipped: Vec<String>,
}

pub fn decode(bytes: &[u8]) -> Result<Decoded, DecodeError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let root: Value = serde_json::from_slice(bytes)?;

    let items = match root {
        Value::Array(items) => items,
        other => return Err(DecodeError::NotAList(kind_of(&other))),
    };

    let mut decoded = Decoded {
        products: Vec::with_capacity(items.len()),
        skipped: Vec::new(),
    };

    for (index, item) in items.iter().enumerate() {
        match validate_record(item) {
            RecordOutcome::Ok(product) => decoded.products.push(product),
            RecordOutcome::Skip(reason) => decoded.skipped.push(format!("#{}: {}", index, reason)),
        }
    }

    Ok(decoded)
}

/// Maps one element onto a [`Product`].
///
/// Only `title` is load-bearing. Bad optional numbers become absent and
/// missing text fields become empty.
pub fn validate_record(item: &Value) -> RecordOutcome {
    let Value::Object(fields) = item else {
        return RecordOutcome::Skip(format!("expected an object, found {}", kind_of(item)));
    };

    let title = match fields.get("title") {
        Some(Value::String(t)) if !t.trim().is_empty() => t.clone(),
        Some(Value::String(_)) => return RecordOutcome::Skip("empty title".to_string()),
        Some(Value::Null) | None => return RecordOutcome::Skip("missing title".to_string()),
        Some(other) => {
            return RecordOutcome::Skip(format!("title is {}, not a string", kind_of(other)));
        }
    };

    RecordOutcome::Ok(Product {
        title,
        price: price(fields.get("price")),
        total_reviews: review_count(fields.get("total_reviews")),
        image_url: text(fields, "image_url"),
        search_query: text(fields, "search_query"),
        product_url: text(fields, "product_url"),
        scrape_date: text(fields, "scrape_date"),
    })
}

fn price(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|p| p.is_finite() && *p >= 0.0)
        // -0.0 would otherwise serialise with its sign and sort below 0.0.
        .map(|p| if p == 0.0 { 0.0 } else { p })
}

fn review_count(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    if let Some(n) = value.as_u64() {
        return Some(n);
    }

    // Whole floats (`1234.0`) show up when a scraper round-trips through f64.
    value
        .as_f64()
        .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n < u64::MAX as f64)
        .map(|n| n as u64)
}

fn text(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
