use std::collections::BTreeMap;
use std::str::FromStr;

use super::model::Record;

// ---------------------------------------------------------------------------
// Filter predicate: free-text search plus exact-match selections
// ---------------------------------------------------------------------------

/// Sentinel spelling of [`Selection::All`] used by dropdowns and config.
pub const ALL: &str = "all";

/// Exact-match constraint on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No constraint.
    #[default]
    All,
    /// The field's textual value must equal this exactly (case-sensitive).
    Only(String),
}

impl Selection {
    pub fn only(value: impl Into<String>) -> Self {
        Selection::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    fn accepts(&self, record: &Record, field: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => record
                .text(field)
                .is_some_and(|actual| actual == expected.as_str()),
        }
    }
}

impl FromStr for Selection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL {
            Selection::All
        } else {
            Selection::Only(s.to_string())
        })
    }
}

/// Combined free-text and exact-match constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search_text: String,
    /// Fields the search text is matched against, OR-ed together.
    pub search_fields: Vec<String>,
    /// Per-field exact-match selections, AND-ed together.
    pub exact_match: BTreeMap<String, Selection>,
}

impl FilterCriteria {
    pub fn new<I, S>(search_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterCriteria {
            search_fields: search_fields.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_exact(mut self, field: impl Into<String>, selection: Selection) -> Self {
        self.exact_match.insert(field.into(), selection);
        self
    }

    /// Reset search text and every selection to "no constraint".
    pub fn clear(&mut self) {
        self.search_text.clear();
        for selection in self.exact_match.values_mut() {
            *selection = Selection::All;
        }
    }

    /// Whether the criteria constrain anything at all.
    pub fn is_noop(&self) -> bool {
        self.search_text.is_empty() && self.exact_match.values().all(Selection::is_all)
    }

    /// Return whether `record` passes every active constraint.
    ///
    /// * Free text: empty search passes; otherwise at least one search
    ///   field must contain it verbatim, case-insensitively. With no search
    ///   fields configured a non-empty search matches nothing.
    /// * Exact match: every selection must be `All` or equal the field's text.
    ///   A missing field never equals anything.
    pub fn matches(&self, record: &Record) -> bool {
        self.passes(record, &self.needle())
    }

    fn needle(&self) -> String {
        self.search_text.to_lowercase()
    }

    fn passes(&self, record: &Record, needle: &str) -> bool {
        self.matches_text(record, needle)
            && self
                .exact_match
                .iter()
                .all(|(field, selection)| selection.accepts(record, field))
    }

    fn matches_text(&self, record: &Record, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.search_fields.iter().any(|field| {
            record
                .text(field)
                .is_some_and(|value| value.to_lowercase().contains(needle))
        })
    }
}

/// Return indices of records that pass `criteria`, in input order.
pub fn filtered_indices(records: &[Record], criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.is_noop() {
        return (0..records.len()).collect();
    }
    let needle = criteria.needle();
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.passes(rec, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// Return the records that pass `criteria`, preserving their relative order.
pub fn filter_records(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    filtered_indices(records, criteria)
        .into_iter()
        .map(|i| records[i].clone())
        .collect()
}
