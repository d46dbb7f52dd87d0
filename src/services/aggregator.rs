use crate::{
    error::Result,
    models::AggregateResult,
    services::decoder,
    source::ProductSource,
};

/// Runs one aggregation pass over `source`.
///
/// Only entries whose name ends with `suffix` are read. Files that cannot be
/// read or decoded are reported in `file_errors` and contribute nothing; the
/// rest are concatenated in listing order. Failing to list the source at all
/// is the only error returned.
pub fn aggregate(source: &dyn ProductSource, suffix: &str) -> Result<AggregateResult> {
    let names = source.list()?;
    let mut result = AggregateResult::default();

    for name in names.into_iter().filter(|n| n.ends_with(suffix)) {
        let bytes = match source.read(&name) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", name, e);
                result.file_errors.insert(name, format!("read failed: {}", e));
                continue;
            }
        };

        match decoder::decode(&bytes) {
            Ok(decoded) => {
                for reason in &decoded.skipped {
                    tracing::warn!("Skipped record in {} {}", name, reason);
                }
                tracing::debug!(
                    "Decoded {} products from {} ({} skipped)",
                    decoded.products.len(),
                    name,
                    decoded.skipped.len()
                );
                result.skipped_records += decoded.skipped.len();
                result.products.extend(decoded.products);
            }
            Err(e) => {
                tracing::warn!("Failed to decode {}: {}", name, e);
                result.file_errors.insert(name, e.to_string());
            }
        }
    }

    tracing::info!(
        "Aggregated {} products from {} ({} file errors, {} skipped records)",
        result.products.len(),
        source.describe(),
        result.file_errors.len(),
        result.skipped_records
    );

    Ok(result)
}
