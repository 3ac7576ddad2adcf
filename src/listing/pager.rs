//! Current page plus one-page lookahead, fetched per cycle.
//!
//! A cycle starts with [`Pager::request`], which hands out a generation number,
//! and ends with [`Pager::apply`]. Only the newest generation may overwrite the
//! stored window; responses of superseded cycles are reported as
//! [`Applied::Stale`] and dropped.

use crate::listing::Resource;
use crate::listing::query::EncodedQuery;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ListQuery, RecordReader};

/// Records per page on every list screen.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How a backend list endpoint expects the page window to be expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagingStyle {
    /// `limit_key=<limit>&offset_key=<offset>`.
    OffsetLimit {
        limit_key: &'static str,
        offset_key: &'static str,
    },
    /// `size_key=<limit>&page_key=<offset / limit>` with zero-based pages.
    PageNumber {
        size_key: &'static str,
        page_key: &'static str,
    },
}

impl PagingStyle {
    pub const TAKE_SKIP: PagingStyle = PagingStyle::OffsetLimit {
        limit_key: "take",
        offset_key: "skip",
    };

    pub const RESULT_QUANTITY: PagingStyle = PagingStyle::PageNumber {
        size_key: "resultquantity",
        page_key: "page",
    };

    /// Query parameters selecting `window`.
    pub fn params(self, window: Window) -> [(&'static str, String); 2] {
        match self {
            PagingStyle::OffsetLimit {
                limit_key,
                offset_key,
            } => [
                (limit_key, window.limit.to_string()),
                (offset_key, window.offset.to_string()),
            ],
            PagingStyle::PageNumber { size_key, page_key } => [
                (size_key, window.limit.to_string()),
                (page_key, (window.offset / window.limit.max(1)).to_string()),
            ],
        }
    }
}

/// Offset/limit slice of a record list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub limit: usize,
}

impl Window {
    /// Window of the 1-based `page`. Offsets past `usize::MAX` saturate, which
    /// the backend answers with an empty slice.
    pub fn page(page: usize, page_size: usize) -> Self {
        Window {
            offset: page.saturating_sub(1).saturating_mul(page_size),
            limit: page_size,
        }
    }
}

/// Everything needed to run one fetch cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub query: EncodedQuery,
    /// 1-based page index.
    pub page: usize,
    pub page_size: usize,
}

impl FetchRequest {
    pub fn current(&self) -> Window {
        Window::page(self.page, self.page_size)
    }

    pub fn lookahead(&self) -> Window {
        Window::page(self.page.saturating_add(1), self.page_size)
    }
}

/// Records of the current page and of the page right after it.
#[derive(Clone, Debug, PartialEq)]
pub struct PageWindow<T> {
    pub current: Vec<T>,
    pub lookahead: Vec<T>,
}

impl<T> Default for PageWindow<T> {
    fn default() -> Self {
        Self {
            current: Vec::new(),
            lookahead: Vec::new(),
        }
    }
}

/// Outcome of [`Pager::apply`].
#[derive(Debug, PartialEq, Eq)]
pub enum Applied<E> {
    /// The window was stored.
    Stored,
    /// The cycle failed; both slots were cleared.
    Failed(E),
    /// A newer cycle was started in the meantime; nothing changed.
    Stale,
}

#[derive(Debug)]
pub struct Pager<T> {
    page: usize,
    page_size: usize,
    generation: u64,
    window: PageWindow<T>,
}

impl<T> Pager<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            generation: 0,
            window: PageWindow::default(),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn items(&self) -> &[T] {
        &self.window.current
    }

    pub fn lookahead(&self) -> &[T] {
        &self.window.lookahead
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        !self.window.lookahead.is_empty()
    }

    /// Jumps to `page` (clamped to 1). Returns `true` when the index changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        let page = page.max(1);
        let changed = page != self.page;
        self.page = page;
        changed
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page = self.page.saturating_add(1);
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Starts a new fetch cycle, superseding any cycle still in flight.
    pub fn request(&mut self, query: &EncodedQuery) -> FetchRequest {
        self.generation += 1;
        FetchRequest {
            generation: self.generation,
            query: query.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Stores the outcome of cycle `generation` unless a newer one exists.
    pub fn apply<E>(&mut self, generation: u64, result: Result<PageWindow<T>, E>) -> Applied<E> {
        if generation != self.generation {
            return Applied::Stale;
        }
        match result {
            Ok(window) => {
                self.window = window;
                Applied::Stored
            }
            Err(err) => {
                self.window = PageWindow::default();
                Applied::Failed(err)
            }
        }
    }
}

/// Fetches the current and lookahead pages of `request` concurrently.
///
/// A failure of either request fails the whole cycle.
pub async fn fetch_window<R, B>(
    backend: &B,
    request: &FetchRequest,
) -> RepositoryResult<PageWindow<R::Record>>
where
    R: Resource,
    B: RecordReader + ?Sized,
{
    let current = ListQuery::new(request.query.clone(), request.current());
    let lookahead = ListQuery::new(request.query.clone(), request.lookahead());

    let (current, lookahead) = tokio::join!(
        backend.list_records::<R>(&current),
        backend.list_records::<R>(&lookahead),
    );

    Ok(PageWindow {
        current: current?,
        lookahead: lookahead?,
    })
}
