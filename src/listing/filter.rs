//! Filter state and the per-resource filter schema.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::types::SelectOption;

/// Format used by HTML date inputs.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Kind of input backing a filter field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Select,
    Date,
}

/// One entry of a resource's filter schema.
///
/// `name` is the key sent to the backend, `label` is shown next to the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FilterField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FilterField {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
        }
    }

    pub const fn select(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Select,
        }
    }

    pub const fn date(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Date,
        }
    }
}

/// Raw value chosen by the user for a single filter field.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Text(String),
    Choice(SelectOption),
    Date(NaiveDate),
}

impl FilterValue {
    /// Empty values are treated as absent and never reach the backend.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(text) => text.trim().is_empty(),
            FilterValue::Choice(option) => option.value.trim().is_empty(),
            FilterValue::Date(_) => false,
        }
    }

    /// Value to echo back into the form input that produced it.
    pub fn input_value(&self) -> String {
        match self {
            FilterValue::Text(text) => text.clone(),
            FilterValue::Choice(option) => option.value.clone(),
            FilterValue::Date(date) => date.format(INPUT_DATE_FORMAT).to_string(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<SelectOption> for FilterValue {
    fn from(value: SelectOption) -> Self {
        FilterValue::Choice(value)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        FilterValue::Date(value)
    }
}

/// Insertion-ordered mapping from field name to the user's current choice.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    entries: Vec<(String, FilterValue)>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, keeping its original position when it already exists.
    ///
    /// Returns `true` when the stored value changed.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> bool {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) if *existing == value => false,
            Some((_, existing)) => {
                *existing = value;
                true
            }
            None => {
                self.entries.push((name, value));
                true
            }
        }
    }

    /// Removes a field. Returns `true` when something was removed.
    pub fn unset(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(key, _)| key != name);
        before != self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Resets every field, as the "clear filters" button does.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// `true` when no field carries a non-empty value.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, value)| value.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Builds the state from request parameters, in schema order.
    ///
    /// Unknown parameters are ignored. Dates that do not parse are dropped.
    pub fn from_params(schema: &[FilterField], params: &HashMap<String, String>) -> Self {
        let mut state = Self::new();
        for field in schema {
            let Some(raw) = params.get(field.name) else {
                continue;
            };
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            match field.kind {
                FieldKind::Text => {
                    state.set(field.name, raw);
                }
                FieldKind::Select => {
                    state.set(field.name, SelectOption::same(raw));
                }
                FieldKind::Date => match NaiveDate::parse_from_str(raw, INPUT_DATE_FORMAT) {
                    Ok(date) => {
                        state.set(field.name, date);
                    }
                    Err(err) => {
                        log::warn!("Ignoring invalid date for filter {}: {err}", field.name);
                    }
                },
            }
        }
        state
    }

    /// Non-empty values keyed by field, ready to pre-fill the filter form.
    pub fn input_values(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.clone(), value.input_value()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &[FilterField] = &[
        FilterField::text("search", "Search"),
        FilterField::select("type", "Type"),
        FilterField::date("initialDate", "From"),
    ];

    #[test]
    fn set_replaces_in_place_and_reports_changes() {
        let mut state = FilterState::new();
        assert!(state.set("a", "1"));
        assert!(state.set("b", "2"));
        assert!(!state.set("a", "1"));
        assert!(state.set("a", "3"));

        let keys: Vec<_> = state.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(state.get("a"), Some(&FilterValue::Text("3".into())));
    }

    #[test]
    fn empty_values_do_not_count() {
        let mut state = FilterState::new();
        state.set("search", "   ");
        state.set("type", SelectOption::new("Any", ""));
        assert!(state.is_empty());

        state.set("type", SelectOption::new("Monitor", "MON"));
        assert!(!state.is_empty());
    }

    #[test]
    fn from_params_follows_schema_order_and_kinds() {
        let params = HashMap::from([
            ("initialDate".to_string(), "2024-03-05".to_string()),
            ("type".to_string(), "MON".to_string()),
            ("search".to_string(), "  dell ".to_string()),
            ("unknown".to_string(), "x".to_string()),
        ]);

        let state = FilterState::from_params(SCHEMA, &params);
        let entries: Vec<_> = state.iter().collect();

        assert_eq!(
            entries,
            vec![
                ("search", &FilterValue::Text("dell".into())),
                ("type", &FilterValue::Choice(SelectOption::same("MON"))),
                (
                    "initialDate",
                    &FilterValue::Date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
                ),
            ]
        );
    }

    #[test]
    fn from_params_drops_invalid_dates_and_blanks() {
        let params = HashMap::from([
            ("initialDate".to_string(), "05/03/2024".to_string()),
            ("search".to_string(), "".to_string()),
        ]);

        let state = FilterState::from_params(SCHEMA, &params);

        assert_eq!(state.iter().count(), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = FilterState::new();
        state.set("search", "x");
        state.clear();
        assert!(state.is_empty());
        assert!(state.input_values().is_empty());
    }
}
