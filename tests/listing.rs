use std::cell::RefCell;

use serde_json::{Value, json};

use asset_control::domain::types::{ExportFormat, SelectOption};
use asset_control::listing::Resource;
use asset_control::listing::controller::ListController;
use asset_control::listing::query::EncodedQuery;
use asset_control::repository::errors::{RepositoryError, RepositoryResult};
use asset_control::repository::{ListQuery, RecordReader};
use asset_control::resources::{Equipments, Movements};

/// Serves `records` for every list endpoint and remembers the query strings
/// it was asked for.
#[derive(Default)]
struct RecordingBackend {
    records: Vec<Value>,
    requests: RefCell<Vec<String>>,
}

impl RecordingBackend {
    fn with(count: usize) -> Self {
        Self {
            records: (1..=count)
                .map(|n| json!({ "id": format!("r{n}"), "tippingNumber": n.to_string() }))
                .collect(),
            requests: RefCell::default(),
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl RecordReader for RecordingBackend {
    async fn list_records<R: Resource>(
        &self,
        query: &ListQuery,
    ) -> RepositoryResult<Vec<R::Record>> {
        self.requests
            .borrow_mut()
            .push(query.to_query_string(R::PAGING));

        let window = query.window.ok_or(RepositoryError::InvalidRequest(
            "list pages are always windowed".into(),
        ))?;
        self.records
            .iter()
            .skip(window.offset)
            .take(window.limit)
            .map(|value| serde_json::from_value(value.clone()).map_err(RepositoryError::from))
            .collect()
    }

    async fn export_records<R: Resource>(
        &self,
        _filter: &EncodedQuery,
        _format: ExportFormat,
    ) -> RepositoryResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn equipment_pages_use_take_and_skip_with_lookahead() {
    let backend = RecordingBackend::with(25);
    let mut controller = ListController::<Equipments>::new(10);

    controller.go_to_page(2);
    controller.refresh(&backend).await;

    assert_eq!(
        backend.requests(),
        vec!["take=10&skip=10", "take=10&skip=20"]
    );
    assert_eq!(controller.records().len(), 10);
    assert!(controller.has_previous());
    assert!(controller.has_next());

    controller.next_page();
    controller.refresh_if_needed(&backend).await;

    assert_eq!(controller.records().len(), 5);
    assert!(!controller.has_next());
}

#[tokio::test]
async fn movement_pages_use_result_quantity_and_page_index() {
    let backend = RecordingBackend::with(4);
    let mut controller = ListController::<Movements>::new(5);

    controller.set_filter("type", SelectOption::same("Monitor"));
    controller.refresh(&backend).await;

    assert_eq!(
        backend.requests(),
        vec![
            "resultquantity=5&page=0&type=Monitor",
            "resultquantity=5&page=1&type=Monitor"
        ]
    );
    assert!(!controller.has_next());
}

#[tokio::test]
async fn filter_change_on_a_later_page_starts_over() {
    let backend = RecordingBackend::with(40);
    let mut controller = ListController::<Equipments>::new(10);
    controller.go_to_page(3);
    controller.refresh(&backend).await;

    controller.commit_search("dell 24");
    controller.refresh_if_needed(&backend).await;

    assert_eq!(controller.page(), 1);
    assert_eq!(
        backend.requests().last().map(String::as_str),
        Some("take=10&skip=10&search=dell+24")
    );
}

#[tokio::test(start_paused = true)]
async fn only_the_last_keystroke_is_searched() {
    let mut controller = ListController::<Equipments>::new(10);

    controller.search_input("d");
    controller.search_input("de");
    controller.search_input("dell");

    assert_eq!(
        controller.next_committed_search().await.as_deref(),
        Some("dell")
    );
}
