use serde::Serialize;

/// Page size used when the caller does not request one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;
/// Largest page a caller may request.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Page of results together with the metadata needed to request the others.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: usize, current_page: usize, page_size: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };
        let page_size = page_size.max(1);

        Self {
            items,
            total,
            page: current_page,
            page_size,
            total_pages: total.div_ceil(page_size),
        }
    }

    /// Converts the items while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}
