//! Access to the asset-management REST backend.
//!
//! The traits are split by capability like the services that consume them:
//! list pages only need [`RecordReader`], forms add [`RecordWriter`] and
//! [`LookupReader`]. [`http::HttpRepository`] is the production
//! implementation.

use serde::Serialize;

use crate::domain::equipment::Equipment;
use crate::domain::lookup::{Brand, EquipmentType, Workstation};
use crate::domain::types::{ExportFormat, RecordId};
use crate::listing::Resource;
use crate::listing::pager::{PagingStyle, Window};
use crate::listing::query::{EncodedQuery, encode_pairs};
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(feature = "server")]
pub mod http;
#[cfg(test)]
pub mod test;

/// Filtered, optionally windowed request against a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: EncodedQuery,
    pub window: Option<Window>,
}

impl ListQuery {
    pub fn new(filter: EncodedQuery, window: Window) -> Self {
        Self {
            filter,
            window: Some(window),
        }
    }

    /// Every record matching `filter`, used to build filter option lists.
    pub fn unpaged(filter: EncodedQuery) -> Self {
        Self {
            filter,
            window: None,
        }
    }

    /// Paging parameters first, then the encoded filter.
    pub fn to_query_string(&self, paging: PagingStyle) -> String {
        let prefix = match self.window {
            Some(window) => encode_pairs(&paging.params(window)).to_string(),
            None => String::new(),
        };
        self.filter.after(&prefix)
    }
}

/// A resource the backend can create records for.
pub trait Creatable: Resource {
    type New: Serialize;
    const CREATE_ENDPOINT: &'static str;
}

/// A resource whose records can be edited.
pub trait Updatable: Resource {
    type Update: Serialize;
    const UPDATE_ENDPOINT: &'static str;
}

/// A resource whose records can be deleted by id.
pub trait Deletable: Resource {
    const DELETE_ENDPOINT: &'static str;
}

#[allow(async_fn_in_trait)]
pub trait RecordReader {
    async fn list_records<R: Resource>(&self, query: &ListQuery)
    -> RepositoryResult<Vec<R::Record>>;
    async fn export_records<R: Resource>(
        &self,
        filter: &EncodedQuery,
        format: ExportFormat,
    ) -> RepositoryResult<Vec<u8>>;
}

#[allow(async_fn_in_trait)]
pub trait RecordWriter {
    async fn create_record<R: Creatable>(&self, payload: &R::New) -> RepositoryResult<()>;
    async fn update_record<R: Updatable>(&self, payload: &R::Update) -> RepositoryResult<()>;
    async fn delete_record<R: Deletable>(&self, id: &RecordId) -> RepositoryResult<()>;
}

#[allow(async_fn_in_trait)]
pub trait LookupReader {
    async fn list_brands(&self) -> RepositoryResult<Vec<Brand>>;
    async fn list_equipment_types(&self) -> RepositoryResult<Vec<EquipmentType>>;
    async fn list_workstations(&self) -> RepositoryResult<Vec<Workstation>>;
    async fn find_equipment_by_tipping(
        &self,
        tipping_number: &str,
        take: usize,
    ) -> RepositoryResult<Vec<Equipment>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SelectOption;
    use crate::listing::filter::FilterState;
    use crate::listing::query::encode;

    #[test]
    fn query_string_puts_paging_before_filter() {
        let mut filter = FilterState::new();
        filter.set("type", SelectOption::same("MON"));
        let query = ListQuery::new(
            encode(&filter),
            Window {
                offset: 10,
                limit: 10,
            },
        );

        assert_eq!(
            query.to_query_string(PagingStyle::TAKE_SKIP),
            "take=10&skip=10&type=MON"
        );
        assert_eq!(
            query.to_query_string(PagingStyle::RESULT_QUANTITY),
            "resultquantity=10&page=1&type=MON"
        );
    }

    #[test]
    fn unpaged_query_is_filter_only() {
        let query = ListQuery::unpaged(EncodedQuery::default());
        assert_eq!(query.to_query_string(PagingStyle::TAKE_SKIP), "");
    }
}
