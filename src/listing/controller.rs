//! Event-driven state of one list screen.
//!
//! The controller owns the filter, its encoded form, the pager, the selection
//! and the pending notices. Every mutation goes through a method so the
//! encoded query never lags behind the filter. A fetch is needed whenever the
//! `(query, page, data version)` triple differs from the one last requested.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::domain::types::RecordId;
use crate::listing::debounce::{DEFAULT_QUIET_PERIOD, Debouncer};
use crate::listing::filter::{FilterState, FilterValue};
use crate::listing::pager::{Applied, FetchRequest, PageWindow, Pager, fetch_window};
use crate::listing::query::{EncodedQuery, encode};
use crate::listing::selection::{Selection, SelectionError};
use crate::listing::view::{Row, build_rows};
use crate::listing::{Notice, Resource};
use crate::repository::RecordReader;
use crate::repository::errors::RepositoryResult;

/// Shown when a batch action is attempted with nothing selected.
pub const EMPTY_SELECTION_MESSAGE: &str = "Select at least one record first.";

#[derive(Clone, Debug, PartialEq, Eq)]
struct FetchKey {
    query: EncodedQuery,
    page: usize,
    data_version: u64,
}

struct SearchBox {
    debouncer: Debouncer<String>,
    committed: mpsc::UnboundedReceiver<String>,
}

impl SearchBox {
    fn new(quiet_period: Duration) -> Self {
        let (tx, committed) = mpsc::unbounded_channel();
        let debouncer = Debouncer::new(quiet_period, move |value: String| {
            // The receiver lives in the same controller; a send error only
            // means the controller is being torn down.
            let _ = tx.send(value);
        });
        Self {
            debouncer,
            committed,
        }
    }
}

pub struct ListController<R: Resource> {
    filter: FilterState,
    query: EncodedQuery,
    pager: Pager<R::Record>,
    selection: Selection,
    data_version: u64,
    requested: Option<FetchKey>,
    notices: Vec<Notice>,
    search_quiet_period: Duration,
    search: Option<SearchBox>,
}

impl<R: Resource> ListController<R> {
    pub fn new(page_size: usize) -> Self {
        Self::with_filter(FilterState::new(), 1, page_size)
    }

    /// Restores a controller from an existing filter and page, as a list
    /// request does.
    pub fn with_filter(filter: FilterState, page: usize, page_size: usize) -> Self {
        let query = encode(&filter);
        let mut pager = Pager::new(page_size);
        pager.go_to(page);
        Self {
            filter,
            query,
            pager,
            selection: Selection::new(),
            data_version: 0,
            requested: None,
            notices: Vec::new(),
            search_quiet_period: DEFAULT_QUIET_PERIOD,
            search: None,
        }
    }

    pub fn with_search_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.search_quiet_period = quiet_period;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn query(&self) -> &EncodedQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn page_size(&self) -> usize {
        self.pager.page_size()
    }

    pub fn records(&self) -> &[R::Record] {
        self.pager.items()
    }

    pub fn has_previous(&self) -> bool {
        self.pager.has_previous()
    }

    pub fn has_next(&self) -> bool {
        self.pager.has_next()
    }

    pub fn data_version(&self) -> u64 {
        self.data_version
    }

    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        if self.filter.set(name, value) {
            self.filter_changed();
        }
    }

    pub fn unset_filter(&mut self, name: &str) {
        if self.filter.unset(name) {
            self.filter_changed();
        }
    }

    /// Empties every filter and drops a search still waiting to commit.
    pub fn clear_filters(&mut self) {
        if let Some(search) = self.search.as_mut() {
            search.debouncer.cancel();
        }
        self.filter.clear();
        self.filter_changed();
    }

    fn filter_changed(&mut self) {
        let query = encode(&self.filter);
        if query != self.query {
            self.query = query;
            self.pager.go_to(1);
        }
    }

    /// Feeds a keystroke of the search box; commits after the quiet period.
    pub fn search_input(&mut self, text: impl Into<String>) {
        let quiet_period = self.search_quiet_period;
        self.search
            .get_or_insert_with(|| SearchBox::new(quiet_period))
            .debouncer
            .push(text.into());
    }

    /// Waits for the next search value that survived its quiet period.
    ///
    /// Returns `None` when no search input was ever given.
    pub async fn next_committed_search(&mut self) -> Option<String> {
        self.search.as_mut()?.committed.recv().await
    }

    pub fn commit_search(&mut self, text: impl Into<String>) {
        self.set_filter(R::SEARCH_FIELD, text.into());
    }

    /// Signals that records changed elsewhere; the next refresh refetches.
    pub fn notify_mutated(&mut self) {
        self.data_version += 1;
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next_page()
    }

    pub fn previous_page(&mut self) -> bool {
        self.pager.previous_page()
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.pager.go_to(page)
    }

    fn fetch_key(&self) -> FetchKey {
        FetchKey {
            query: self.query.clone(),
            page: self.pager.page(),
            data_version: self.data_version,
        }
    }

    pub fn needs_fetch(&self) -> bool {
        self.requested.as_ref() != Some(&self.fetch_key())
    }

    /// Starts a fetch cycle. Any cycle still in flight becomes stale.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.requested = Some(self.fetch_key());
        self.pager.request(&self.query)
    }

    /// Applies the outcome of a cycle. Returns `false` for stale cycles.
    ///
    /// Failures leave an empty list and an error notice behind; they never
    /// propagate further.
    pub fn complete_fetch(
        &mut self,
        generation: u64,
        result: RepositoryResult<PageWindow<R::Record>>,
    ) -> bool {
        match self.pager.apply(generation, result) {
            Applied::Stored => true,
            Applied::Failed(err) => {
                log::error!("Failed to fetch {} list: {err}", R::NAME);
                self.notices.push(Notice::error(R::FETCH_FAILED));
                true
            }
            Applied::Stale => {
                log::debug!("Dropping stale {} page (generation {generation})", R::NAME);
                false
            }
        }
    }

    /// Runs a full fetch cycle against `backend`.
    pub async fn refresh<B>(&mut self, backend: &B) -> bool
    where
        B: RecordReader + ?Sized,
    {
        let request = self.begin_fetch();
        let result = fetch_window::<R, B>(backend, &request).await;
        self.complete_fetch(request.generation, result)
    }

    /// Refreshes only when page, query or data version moved.
    pub async fn refresh_if_needed<B>(&mut self, backend: &B) -> bool
    where
        B: RecordReader + ?Sized,
    {
        if !self.needs_fetch() {
            return false;
        }
        self.refresh(backend).await
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggle_selection(&mut self, id: RecordId) -> bool {
        self.selection.toggle(id)
    }

    /// Hands out the selected ids for a batch action, or records a notice and
    /// refuses when nothing is selected.
    pub fn begin_batch(&mut self) -> Result<Vec<RecordId>, SelectionError> {
        self.selection.require_non_empty().inspect_err(|_| {
            self.notices.push(Notice::error(EMPTY_SELECTION_MESSAGE));
        })
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn rows(&self) -> Vec<Row<R::Record>> {
        build_rows(self.pager.items(), &self.selection, R::ROW_ACTIONS)
    }
}
