//! DTOs shaped for the list page templates.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::types::SelectOption;
use crate::listing::Notice;
use crate::listing::filter::FieldKind;
use crate::listing::view::Row;
use crate::pagination::Paginated;

/// Select options per filter field name.
pub type FilterOptions = HashMap<&'static str, Vec<SelectOption>>;

/// One input of the filter form, pre-filled with the active value.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilterInput {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub options: Vec<SelectOption>,
}

/// Everything a list page renders.
#[derive(Debug, Serialize)]
pub struct ListPageData<T> {
    pub resource: &'static str,
    pub rows: Paginated<Row<T>>,
    /// Active filter as form parameters, appended to paging, edit and export
    /// links.
    pub query: String,
    pub filters: Vec<FilterInput>,
    pub filtered: bool,
    pub selected: usize,
    pub notices: Vec<Notice>,
}
