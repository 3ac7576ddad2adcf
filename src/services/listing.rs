//! Generic list page, record lookup and export over any [`Resource`].

use std::collections::HashMap;

use crate::domain::Record;
use crate::domain::types::{ExportFormat, RecordId};
use crate::dto::listing::{FilterInput, FilterOptions, ListPageData};
use crate::listing::Resource;
use crate::listing::controller::ListController;
use crate::listing::filter::FilterState;
use crate::listing::pager::Window;
use crate::listing::query::{encode, encode_pairs};
use crate::listing::selection::Selection;
use crate::pagination::Paginated;
use crate::repository::{ListQuery, RecordReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameter carrying the 1-based page index.
pub const PAGE_PARAM: &str = "page";

/// Highest page index accepted from a request.
pub const MAX_PAGE: usize = 1_000_000;

/// Page index from the request, defaulting to the first page and capped at
/// [`MAX_PAGE`].
pub fn parse_page(params: &HashMap<String, String>) -> usize {
    params
        .get(PAGE_PARAM)
        .and_then(|page| page.trim().parse::<usize>().ok())
        .filter(|page| *page > 0)
        .map_or(1, |page| page.min(MAX_PAGE))
}

fn controller_for<R: Resource>(
    params: &HashMap<String, String>,
    page_size: usize,
) -> ListController<R> {
    let filter = FilterState::from_params(R::FILTERS, params);
    ListController::with_filter(filter, parse_page(params), page_size)
}

/// Runs one fetch cycle for the requested filter and page.
///
/// Never fails: a backend failure yields an empty page carrying an error
/// notice.
pub async fn load_list_page<R, B>(
    backend: &B,
    params: &HashMap<String, String>,
    page_size: usize,
    selection: Selection,
    mut options: FilterOptions,
) -> ListPageData<R::Record>
where
    R: Resource,
    B: RecordReader + ?Sized,
{
    let mut controller = controller_for::<R>(params, page_size).with_selection(selection);
    controller.refresh(backend).await;

    let values = controller.filter().input_values();
    // Links back to this page carry the form values, not the backend encoding.
    let pairs: Vec<(&str, String)> = R::FILTERS
        .iter()
        .filter_map(|field| values.get(field.name).map(|v| (field.name, v.clone())))
        .collect();
    let filters = R::FILTERS
        .iter()
        .map(|field| FilterInput {
            name: field.name,
            label: field.label,
            kind: field.kind,
            value: values.get(field.name).cloned().unwrap_or_default(),
            options: options.remove(field.name).unwrap_or_default(),
        })
        .collect();

    ListPageData {
        resource: R::NAME,
        rows: Paginated::new(controller.rows(), controller.page(), controller.has_next()),
        query: encode_pairs(&pairs).to_string(),
        filters,
        filtered: !controller.filter().is_empty(),
        selected: controller.selection().len(),
        notices: controller.take_notices(),
    }
}

/// Finds `id` within the page the user was looking at.
///
/// The backend has no fetch-by-id endpoint; edit links carry the list's
/// filter and page so the same window can be fetched again.
pub async fn find_listed<R, B>(
    backend: &B,
    params: &HashMap<String, String>,
    page_size: usize,
    id: &RecordId,
) -> ServiceResult<R::Record>
where
    R: Resource,
    B: RecordReader + ?Sized,
{
    let controller = controller_for::<R>(params, page_size);
    let window = Window::page(controller.page(), controller.page_size());
    let query = ListQuery::new(controller.query().clone(), window);

    let records = backend.list_records::<R>(&query).await.map_err(|err| {
        log::error!("Failed to load {} {id}: {err}", R::NAME);
        err
    })?;

    records
        .into_iter()
        .find(|record| record.record_id() == id)
        .ok_or(ServiceError::NotFound)
}

/// Downloads the backend report for the filtered record set.
pub async fn export_report<R, B>(
    backend: &B,
    params: &HashMap<String, String>,
    format: ExportFormat,
) -> ServiceResult<Vec<u8>>
where
    R: Resource,
    B: RecordReader + ?Sized,
{
    let filter = FilterState::from_params(R::FILTERS, params);
    backend
        .export_records::<R>(&encode(&filter), format)
        .await
        .map_err(|err| {
            log::error!("Failed to export {} report: {err}", R::NAME);
            ServiceError::from(err)
        })
}
