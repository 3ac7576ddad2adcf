//! In-memory backend for isolating services and the listing core in tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde_json::Value;

use crate::domain::equipment::Equipment;
use crate::domain::lookup::{Brand, EquipmentType, Workstation};
use crate::domain::types::{ExportFormat, RecordId};
use crate::listing::Resource;
use crate::listing::query::EncodedQuery;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    Creatable, Deletable, ListQuery, LookupReader, RecordReader, RecordWriter, Updatable,
};
use crate::resources::Equipments;

/// Stores raw JSON per endpoint and deserializes on the way out, so one
/// backend serves every resource type.
#[derive(Default)]
pub struct InMemoryBackend {
    records: RefCell<HashMap<String, Vec<Value>>>,
    failing: Cell<bool>,
    list_calls: RefCell<Vec<(String, ListQuery)>>,
    writes: RefCell<Vec<(String, Value)>>,
    pub workstations: RefCell<Vec<Workstation>>,
    pub brands: RefCell<Vec<Brand>>,
    pub types: RefCell<Vec<EquipmentType>>,
}

impl InMemoryBackend {
    pub fn seed(&self, endpoint: &str, records: impl IntoIterator<Item = Value>) {
        self.records
            .borrow_mut()
            .entry(endpoint.to_string())
            .or_default()
            .extend(records);
    }

    /// Makes every following call fail with a 500.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn list_calls(&self) -> Vec<(String, ListQuery)> {
        self.list_calls.borrow().clone()
    }

    /// `(endpoint, payload)` of every create, update and delete, in order.
    pub fn writes(&self) -> Vec<(String, Value)> {
        self.writes.borrow().clone()
    }

    fn check(&self) -> RepositoryResult<()> {
        if self.failing.get() {
            Err(RepositoryError::Status(500))
        } else {
            Ok(())
        }
    }

    fn record_write(&self, endpoint: &str, payload: Value) -> RepositoryResult<()> {
        self.check()?;
        self.writes
            .borrow_mut()
            .push((endpoint.to_string(), payload));
        Ok(())
    }
}

impl RecordReader for InMemoryBackend {
    async fn list_records<R: Resource>(
        &self,
        query: &ListQuery,
    ) -> RepositoryResult<Vec<R::Record>> {
        self.list_calls
            .borrow_mut()
            .push((R::LIST_ENDPOINT.to_string(), query.clone()));
        self.check()?;

        let records = self.records.borrow();
        let all = records
            .get(R::LIST_ENDPOINT)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let slice: Vec<Value> = match query.window {
            Some(window) => all
                .iter()
                .skip(window.offset)
                .take(window.limit)
                .cloned()
                .collect(),
            None => all.to_vec(),
        };

        slice
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(RepositoryError::from))
            .collect()
    }

    async fn export_records<R: Resource>(
        &self,
        filter: &EncodedQuery,
        format: ExportFormat,
    ) -> RepositoryResult<Vec<u8>> {
        self.check()?;
        Ok(format!("{}:{format}:{filter}", R::NAME).into_bytes())
    }
}

impl RecordWriter for InMemoryBackend {
    async fn create_record<R: Creatable>(&self, payload: &R::New) -> RepositoryResult<()> {
        self.record_write(R::CREATE_ENDPOINT, serde_json::to_value(payload)?)
    }

    async fn update_record<R: Updatable>(&self, payload: &R::Update) -> RepositoryResult<()> {
        self.record_write(R::UPDATE_ENDPOINT, serde_json::to_value(payload)?)
    }

    async fn delete_record<R: Deletable>(&self, id: &RecordId) -> RepositoryResult<()> {
        self.record_write(R::DELETE_ENDPOINT, Value::String(id.to_string()))
    }
}

impl LookupReader for InMemoryBackend {
    async fn list_brands(&self) -> RepositoryResult<Vec<Brand>> {
        self.check()?;
        Ok(self.brands.borrow().clone())
    }

    async fn list_equipment_types(&self) -> RepositoryResult<Vec<EquipmentType>> {
        self.check()?;
        Ok(self.types.borrow().clone())
    }

    async fn list_workstations(&self) -> RepositoryResult<Vec<Workstation>> {
        self.check()?;
        Ok(self.workstations.borrow().clone())
    }

    async fn find_equipment_by_tipping(
        &self,
        tipping_number: &str,
        take: usize,
    ) -> RepositoryResult<Vec<Equipment>> {
        self.check()?;
        let records = self.records.borrow();
        records
            .get(Equipments::LIST_ENDPOINT)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter(|value| {
                value["tippingNumber"]
                    .as_str()
                    .is_some_and(|tipping| tipping.contains(tipping_number))
            })
            .take(take)
            .map(|value| serde_json::from_value(value.clone()).map_err(RepositoryError::from))
            .collect()
    }
}
