//! Rendering contract between list pages and templates.

use serde::Serialize;

use crate::domain::Record;
use crate::domain::types::RecordId;
use crate::listing::selection::Selection;

/// Per-row action exposed by a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    View,
    Edit,
    Delete,
    Print,
    ToggleSelection,
}

/// One rendered table row.
#[derive(Clone, Debug, Serialize)]
pub struct Row<T> {
    pub id: RecordId,
    pub selected: bool,
    pub record: T,
    pub actions: &'static [RowAction],
}

/// Builds the rows of a page, flagging the ones in `selection`.
pub fn build_rows<T>(records: &[T], selection: &Selection, actions: &'static [RowAction]) -> Vec<Row<T>>
where
    T: Record + Clone,
{
    records
        .iter()
        .map(|record| Row {
            id: record.record_id().clone(),
            selected: selection.contains(record.record_id()),
            record: record.clone(),
            actions,
        })
        .collect()
}
