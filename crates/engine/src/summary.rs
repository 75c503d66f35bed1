//! Per-symbol value totals and the external summarizer port.

use crate::error::Result;
use crate::schema::TransactionRecord;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Serialize;

/// Aggregate of all transactions sharing a symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub symbol: String,
    pub total_value: f64,
}

/// What the external summarizer returns: a markdown narrative plus
/// the symbols it chose to highlight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub text: String,
    pub top_symbols: Vec<String>,
}

/// Port for the hosted summarization call. The engine never inlines
/// an implementation; a failure here is isolated and must not clear
/// records or views already computed.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, entries: &[SummaryEntry]) -> Result<SummaryReport>;
}

/// Total value per symbol, accumulated in encounter order, then
/// sorted by total descending (stable, so ties keep encounter order),
/// truncated to `top_n`.
#[must_use]
pub fn summary_entries(records: &[TransactionRecord], top_n: usize) -> Vec<SummaryEntry> {
    let mut totals: IndexMap<&str, f64> = IndexMap::new();
    for record in records {
        *totals.entry(record.symbol.as_str()).or_insert(0.0) += record.value;
    }

    let mut entries: Vec<SummaryEntry> = totals
        .into_iter()
        .map(|(symbol, total_value)| SummaryEntry {
            symbol: symbol.to_string(),
            total_value,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_value
            .partial_cmp(&a.total_value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries.truncate(top_n);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str, value: f64) -> TransactionRecord {
        TransactionRecord {
            symbol: symbol.to_string(),
            value,
            ..Default::default()
        }
    }

    #[test]
    fn test_totals_sorted_descending() {
        let records = vec![record("A", 100.0), record("A", 50.0), record("B", 200.0)];
        let entries = summary_entries(&records, 10);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].symbol, "B");
        assert_eq!(entries[0].total_value, 200.0);
        assert_eq!(entries[1].symbol, "A");
        assert_eq!(entries[1].total_value, 150.0);
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let records = vec![record("Z", 10.0), record("A", 10.0)];
        let entries = summary_entries(&records, 10);

        assert_eq!(entries[0].symbol, "Z");
        assert_eq!(entries[1].symbol, "A");
    }

    #[test]
    fn test_top_n_truncation() {
        let records = vec![record("A", 1.0), record("B", 2.0), record("C", 3.0)];
        let entries = summary_entries(&records, 2);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].symbol, "C");
        assert_eq!(entries[1].symbol, "B");
    }

    #[test]
    fn test_no_records() {
        assert!(summary_entries(&[], 5).is_empty());
    }
}
