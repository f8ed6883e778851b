use std::collections::BTreeSet;

use super::model::{CoverageBand, Record};

// ---------------------------------------------------------------------------
// Query state: what the user is currently filtering on
// ---------------------------------------------------------------------------

/// Search text, active classification chips and coverage band.
///
/// An empty search term or an empty classification set means "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    /// Lower-cased search term.
    pub search: String,
    /// Active classification chips.
    pub classifications: BTreeSet<String>,
    pub coverage: CoverageBand,
}

impl QueryState {
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_lowercase();
    }

    /// Add the value to the active chips, or remove it if already active.
    pub fn toggle_classification(&mut self, value: &str) {
        if !self.classifications.remove(value) {
            self.classifications.insert(value.to_string());
        }
    }

    /// Back to "show everything".
    pub fn clear(&mut self) {
        *self = QueryState::default();
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.classifications.is_empty()
            && self.coverage == CoverageBand::All
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Whether a record passes every active filter.
///
/// * search: term is a substring of `codigo`, `clave` or `desc_prod`
///   (case-insensitive)
/// * classification: record's `clasificacion` is one of the active chips
/// * coverage: `cobertura_mes` falls in the selected band
pub fn matches(record: &Record, query: &QueryState) -> bool {
    matches_search(record, &query.search)
        && matches_classification(record, &query.classifications)
        && query.coverage.contains(record.cobertura_mes)
}

fn matches_search(record: &Record, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    [&record.codigo, &record.clave, &record.desc_prod]
        .into_iter()
        .any(|field| field.to_lowercase().contains(&term))
}

fn matches_classification(record: &Record, active: &BTreeSet<String>) -> bool {
    active.is_empty() || active.contains(&record.clasificacion)
}

/// Return indices of records that pass all active filters, in source order.
pub fn filtered_indices(records: &[Record], query: &QueryState) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| matches(rec, query))
        .map(|(i, _)| i)
        .collect()
}

/// Owned copy of the records that pass all active filters, in source order.
pub fn filter_records(records: &[Record], query: &QueryState) -> Vec<Record> {
    records
        .iter()
        .filter(|rec| matches(rec, query))
        .cloned()
        .collect()
}
