//! Reference data used to populate filter selects and forms.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::types::SelectOption;

/// Nested `{ name }` object the backend embeds in records.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedRef {
    #[serde(default)]
    pub name: String,
}

/// Workstation or unit where equipment is installed.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Unit {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub localization: String,
}

/// Identifier as sent by the lookup endpoints, which mix numeric and string ids.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LookupId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for LookupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupId::Number(id) => write!(f, "{id}"),
            LookupId::Text(id) => f.write_str(id),
        }
    }
}

/// Entry of the scheduling backend's workstation list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workstation {
    pub id: LookupId,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Brand {
    pub id: LookupId,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquipmentType {
    pub id: LookupId,
    pub name: String,
}

/// Workstations selectable by name, as the equipment `unit` filter expects.
pub fn workstation_names(workstations: &[Workstation]) -> Vec<SelectOption> {
    workstations
        .iter()
        .map(|w| SelectOption::same(w.name.clone()))
        .collect()
}

/// Workstations selectable by id, as movement destinations expect.
pub fn workstation_ids(workstations: &[Workstation]) -> Vec<SelectOption> {
    workstations
        .iter()
        .map(|w| SelectOption::new(w.name.clone(), w.id.to_string()))
        .collect()
}

pub fn brand_options(brands: &[Brand]) -> Vec<SelectOption> {
    brands
        .iter()
        .map(|b| SelectOption::new(b.name.clone(), b.id.to_string()))
        .collect()
}

pub fn type_options(types: &[EquipmentType]) -> Vec<SelectOption> {
    types
        .iter()
        .map(|t| SelectOption::new(t.name.clone(), t.id.to_string()))
        .collect()
}

/// Types selectable by name, as the register form sends them.
pub fn type_names(types: &[EquipmentType]) -> Vec<SelectOption> {
    types
        .iter()
        .map(|t| SelectOption::same(t.name.clone()))
        .collect()
}

/// Distinct non-empty values, in first-seen order, as select options.
pub fn distinct_options<'a, I>(values: I) -> Vec<SelectOption>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .filter(|value| seen.insert(*value))
        .map(SelectOption::same)
        .collect()
}
