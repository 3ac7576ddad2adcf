//! Canonical query-string encoding of a [`FilterState`].

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::listing::filter::{FilterState, FilterValue};

/// Calendar format the backend parses for date filters (`M/D/YYYY`).
pub const QUERY_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Serialized filter, ready to be appended to a list URL.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EncodedQuery(String);

impl EncodedQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joins this query after `prefix` (itself already encoded) with `&`.
    pub fn after(&self, prefix: &str) -> String {
        match (prefix.is_empty(), self.0.is_empty()) {
            (true, _) => self.0.clone(),
            (false, true) => prefix.to_string(),
            (false, false) => format!("{prefix}&{}", self.0),
        }
    }
}

impl Display for EncodedQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire representation of a single filter value.
fn wire_value(value: &FilterValue) -> String {
    match value {
        FilterValue::Text(text) => text.trim().to_string(),
        FilterValue::Choice(option) => option.value.trim().to_string(),
        FilterValue::Date(date) => date.format(QUERY_DATE_FORMAT).to_string(),
    }
}

/// Encodes the non-empty fields of `filter` as `key=value` pairs joined by `&`.
///
/// Option values contribute their `value`, dates use [`QUERY_DATE_FORMAT`] and
/// every value is percent-encoded.
pub fn encode(filter: &FilterState) -> EncodedQuery {
    let pairs: Vec<(&str, String)> = filter
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key, wire_value(value)))
        .collect();

    encode_pairs(&pairs)
}

/// Percent-encodes an already flattened list of pairs.
pub fn encode_pairs(pairs: &[(&str, String)]) -> EncodedQuery {
    match serde_html_form::to_string(pairs) {
        Ok(encoded) => EncodedQuery(encoded),
        Err(err) => {
            log::error!("Failed to encode filter query: {err}");
            EncodedQuery::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::SelectOption;

    #[test]
    fn skips_empty_and_uses_option_value() {
        let mut filter = FilterState::new();
        filter.set("search", "");
        filter.set("type", SelectOption::new("Monitor", "MON"));

        assert_eq!(encode(&filter).as_str(), "type=MON");
    }

    #[test]
    fn never_emits_a_bare_key() {
        let mut filter = FilterState::new();
        filter.set("search", "  ");
        filter.set("brand", SelectOption::new("Dell", ""));
        filter.set("model", "");

        let encoded = encode(&filter);

        assert!(encoded.is_empty());
        assert!(!encoded.as_str().contains('='));
    }

    #[test]
    fn never_leaks_the_label() {
        let mut filter = FilterState::new();
        filter.set("unit", SelectOption::new("Head Office", "7"));

        let encoded = encode(&filter);

        assert_eq!(encoded.as_str(), "unit=7");
        assert!(!encoded.as_str().contains("Head"));
    }

    #[test]
    fn formats_dates_without_padding() {
        let mut filter = FilterState::new();
        filter.set("initialDate", NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

        assert_eq!(encode(&filter).as_str(), "initialDate=1%2F5%2F2024");
    }

    #[test]
    fn keeps_insertion_order_and_escapes_values() {
        let mut filter = FilterState::new();
        filter.set("search", "a&b c");
        filter.set("type", SelectOption::same("MON"));

        assert_eq!(encode(&filter).as_str(), "search=a%26b+c&type=MON");
    }

    #[test]
    fn after_joins_with_prefix() {
        let mut filter = FilterState::new();
        filter.set("type", SelectOption::same("MON"));
        let encoded = encode(&filter);

        assert_eq!(encoded.after("page=2"), "page=2&type=MON");
        assert_eq!(EncodedQuery::default().after("page=2"), "page=2");
        assert_eq!(encoded.after(""), "type=MON");
    }
}
