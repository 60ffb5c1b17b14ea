//! Search, filter, sort and paginate over in-memory lists.

use std::cmp::Ordering;

use serde::Serialize;

use crate::config::DeriverConfig;
use crate::models::{CollectionCenter, HospitalNetwork, Order, QrLog, Subscription};

/// Fields matched by free-text search
pub trait Searchable {
    /// `None` is treated as an empty string
    fn search_fields(&self) -> Vec<Option<&str>>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_fields(&self) -> Vec<Option<&str>> {
        (**self).search_fields()
    }
}

impl Searchable for Subscription {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.network_name.as_deref(),
            self.admin_name.as_deref(),
            self.admin_email.as_deref(),
        ]
    }
}

impl Searchable for HospitalNetwork {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            self.admin_name.as_deref(),
            self.admin_email.as_deref(),
        ]
    }
}

impl Searchable for CollectionCenter {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            self.contact_person.as_deref(),
            self.email.as_deref(),
            self.city.as_deref(),
        ]
    }
}

impl Searchable for Order {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.order_number.as_str()),
            self.center_name.as_deref(),
            self.hospital_name.as_deref(),
            self.rider_name.as_deref(),
            self.sample_type.as_deref(),
        ]
    }
}

impl Searchable for QrLog {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.qr_code_id.as_str()),
            self.order_id.as_deref(),
            self.sample_id.as_deref(),
        ]
    }
}

/// Case-insensitive substring match over [`Searchable::search_fields`].
/// An empty term matches everything.
pub fn matches_search<T: Searchable + ?Sized>(item: &T, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    item.search_fields()
        .into_iter()
        .any(|field| field.unwrap_or_default().to_lowercase().contains(&needle))
}

/// Exact-match filter; `All` passes everything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter<V> {
    All,
    Only(V),
}

impl<V> Default for Filter<V> {
    fn default() -> Self {
        Self::All
    }
}

impl<V: PartialEq> Filter<V> {
    pub fn accepts(&self, value: &V) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// One page of a filtered list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed, always within `1..=total_pages`
    pub current_page: usize,
    pub total_pages: usize,
    /// Items matching the filters, across all pages
    pub total_count: usize,
    pub items_per_page: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// 0-based offset of the first item on this page
    pub fn start_index(&self) -> usize {
        (self.current_page - 1) * self.items_per_page
    }
}

/// `ceil(count / per_page)`, never less than one page
pub fn total_pages(count: usize, items_per_page: usize) -> usize {
    count.div_ceil(items_per_page.max(1)).max(1)
}

/// Slice one page out of an already filtered list.
///
/// `page` is clamped into `1..=total_pages`.
pub fn paginate<T>(items: Vec<T>, page: usize, items_per_page: usize) -> Page<T> {
    let items_per_page = items_per_page.max(1);
    let total_count = items.len();
    let total_pages = total_pages(total_count, items_per_page);
    let current_page = page.clamp(1, total_pages);
    let start = (current_page - 1) * items_per_page;

    let items = items
        .into_iter()
        .skip(start)
        .take(items_per_page)
        .collect();

    Page {
        items,
        current_page,
        total_pages,
        total_count,
        items_per_page,
    }
}

/// Filter and page state of one list screen.
///
/// `S` is the status type the status filter compares against (usually a
/// derived status); `V` is the type of the secondary filter. Every filter
/// setter moves back to page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<S, V = String> {
    search_term: String,
    status: Filter<S>,
    secondary: Filter<V>,
    current_page: usize,
    items_per_page: usize,
    sort_direction: SortDirection,
}

impl<S, V> ListState<S, V> {
    /// Unfiltered state on page 1
    pub fn new(items_per_page: usize) -> Self {
        Self {
            search_term: String::new(),
            status: Filter::All,
            secondary: Filter::All,
            current_page: 1,
            items_per_page: items_per_page.max(1),
            sort_direction: SortDirection::Ascending,
        }
    }

    /// Unfiltered state using the configured page size
    pub fn from_config(config: &DeriverConfig) -> Self {
        Self::new(config.items_per_page)
    }

    /// Current search text, possibly empty
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Filter applied to each item's status
    pub fn status_filter(&self) -> &Filter<S> {
        &self.status
    }

    /// Filter applied to each item's secondary key
    pub fn secondary_filter(&self) -> &Filter<V> {
        &self.secondary
    }

    /// Page to show; clamped to the last page on every `apply`
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Page size, at least 1
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Direction used by [`apply_sorted`](Self::apply_sorted)
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Replace the search text and go back to page 1
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    /// Replace the status filter and go back to page 1
    pub fn set_status_filter(&mut self, filter: Filter<S>) {
        self.status = filter;
        self.current_page = 1;
    }

    /// Replace the secondary filter and go back to page 1
    pub fn set_secondary_filter(&mut self, filter: Filter<V>) {
        self.secondary = filter;
        self.current_page = 1;
    }

    /// Change the page size and go back to page 1
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }

    /// Change the sort direction; the page is kept
    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort_direction = direction;
    }

    /// Jump to `page`; values past the end are clamped by the next `apply`
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Advance one page, stopping at `total_pages`
    pub fn next_page(&mut self, total_pages: usize) {
        self.current_page = (self.current_page + 1).min(total_pages.max(1));
    }

    /// Go back one page, stopping at page 1
    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }
}

impl<S: PartialEq, V: PartialEq> ListState<S, V> {
    /// Search, filter and page `items`, keeping their order.
    ///
    /// A requested page past the end is clamped to the last page and stored
    /// back, so paging backwards starts from what was shown.
    pub fn apply<T, I>(
        &mut self,
        items: I,
        status_of: impl Fn(&T) -> S,
        secondary_of: impl Fn(&T) -> V,
    ) -> Page<T>
    where
        T: Searchable,
        I: IntoIterator<Item = T>,
    {
        let filtered = self.filter(items, status_of, secondary_of);
        self.page_of(filtered)
    }

    /// Like [`apply`](Self::apply), sorting the filtered items before paging.
    ///
    /// The sort is stable; `compare` defines ascending order and the state's
    /// direction reverses it.
    pub fn apply_sorted<T, I>(
        &mut self,
        items: I,
        status_of: impl Fn(&T) -> S,
        secondary_of: impl Fn(&T) -> V,
        compare: impl Fn(&T, &T) -> Ordering,
    ) -> Page<T>
    where
        T: Searchable,
        I: IntoIterator<Item = T>,
    {
        let mut filtered = self.filter(items, status_of, secondary_of);
        match self.sort_direction {
            SortDirection::Ascending => filtered.sort_by(|a, b| compare(a, b)),
            SortDirection::Descending => filtered.sort_by(|a, b| compare(b, a)),
        }
        self.page_of(filtered)
    }

    fn page_of<T>(&mut self, filtered: Vec<T>) -> Page<T> {
        let page = paginate(filtered, self.current_page, self.items_per_page);
        self.current_page = page.current_page;
        page
    }

    fn filter<T, I>(
        &self,
        items: I,
        status_of: impl Fn(&T) -> S,
        secondary_of: impl Fn(&T) -> V,
    ) -> Vec<T>
    where
        T: Searchable,
        I: IntoIterator<Item = T>,
    {
        items
            .into_iter()
            .filter(|item| {
                matches_search(item, &self.search_term)
                    && self.status.accepts(&status_of(item))
                    && self.secondary.accepts(&secondary_of(item))
            })
            .collect()
    }
}
