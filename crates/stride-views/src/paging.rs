//! Paging and free-text search over listings.

/// One page of a listing.
///
/// Pages are 1-based, like the page buttons under every table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<'a, T> Page<'a, T> {
    /// Athletes listing page size.
    pub const ATHLETES_PER_PAGE: usize = 9;

    /// Assessments listing page size.
    pub const ASSESSMENTS_PER_PAGE: usize = 6;

    /// Slices page `number` out of `items`.
    ///
    /// `total_pages` is `ceil(len / per_page)`. A page past the end (or
    /// page 0) comes back empty rather than clamped, so the caller can tell
    /// the user's filter shrank the list under them. A `per_page` of 0 is
    /// treated as 1.
    pub fn of(items: &'a [T], number: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page);

        let slice = match number.checked_sub(1) {
            Some(index) if index < total_pages => {
                let start = index * per_page;
                let end = (start + per_page).min(total_items);
                &items[start..end]
            }
            _ => &items[..0],
        };

        Self {
            items: slice,
            number,
            total_pages,
            total_items,
        }
    }

    /// Returns `true` if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Keeps the items where any of the fields returned by `fields` contains
/// `query`, ignoring case. An empty (or all-whitespace) query keeps
/// everything.
pub fn filter_by_query<'a, T, F>(items: &'a [T], query: &str, fields: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<Option<&str>>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            fields(item)
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
