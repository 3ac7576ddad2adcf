//! The list-with-filter core shared by every record list.
//!
//! A [`Resource`] describes one backend record type: where its list lives, how
//! that endpoint pages, which filters it accepts and which row actions the
//! table offers. Everything else (filter state, query encoding, debounced
//! search, paging with lookahead, selection, rows) is written once here.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::Record;
use crate::listing::filter::FilterField;
use crate::listing::pager::PagingStyle;
use crate::listing::view::RowAction;

pub mod controller;
pub mod debounce;
pub mod filter;
pub mod pager;
pub mod query;
pub mod selection;
pub mod view;

/// Static description of a listable backend record type.
pub trait Resource {
    type Record: Record + DeserializeOwned + Serialize + Clone;

    /// Short name used in routes and templates.
    const NAME: &'static str;
    /// Backend list endpoint, relative to the backend base URL.
    const LIST_ENDPOINT: &'static str;
    /// Backend report endpoint for the filtered set.
    const EXPORT_ENDPOINT: &'static str;
    const PAGING: PagingStyle;
    /// Filter key that carries the free-text search.
    const SEARCH_FIELD: &'static str;
    const FILTERS: &'static [FilterField];
    const ROW_ACTIONS: &'static [RowAction];
    /// Shown when a list fetch fails.
    const FETCH_FAILED: &'static str;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient user-facing notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }
}
