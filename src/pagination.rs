use serde::Serialize;

/// Default number of tools requested per page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// One fetched batch of a paginated listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based index of this batch.
    pub page: usize,
    pub per_page: usize,
    pub total_count: usize,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(
        items: Vec<T>,
        current_page: usize,
        per_page: usize,
        total_count: usize,
        has_next: bool,
    ) -> Self {
        let page = if current_page == 0 { 1 } else { current_page };

        Self {
            items,
            page,
            per_page,
            total_count,
            has_next,
        }
    }

    /// Builds a page from a slice of a larger ordered collection, deriving
    /// `has_next` from the total.
    pub fn slice(all: &[T], current_page: usize, per_page: usize) -> Self
    where
        T: Clone,
    {
        let page = current_page.max(1);
        let start = (page - 1).saturating_mul(per_page).min(all.len());
        let end = start.saturating_add(per_page).min(all.len());

        Self::new(all[start..end].to_vec(), page, per_page, all.len(), end < all.len())
    }
}
