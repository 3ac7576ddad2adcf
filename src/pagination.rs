use serde::Serialize;

/// One page of items plus the neighbouring page numbers that exist.
///
/// The backend never reports totals, so only the previous and next page are
/// known.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, has_next: bool) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        Self {
            items,
            page: current_page,
            previous: (current_page > 1).then(|| current_page - 1),
            next: has_next.then(|| current_page.saturating_add(1)),
        }
    }
}
