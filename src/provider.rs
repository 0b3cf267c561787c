//! Data-provider seam.
//!
//! The renderer never owns the row data; it asks the host for a fresh
//! snapshot at resolve time. How the host stores or indexes its items is
//! its own business.

/// Capability the host supplies for addressing row data by ordinal.
pub trait DataProvider<T> {
    /// All items in the provider's current ordering.
    fn items(&self) -> Vec<T>;

    /// Item at `ordinal` in the current ordering, if in range.
    fn get(&self, ordinal: usize) -> Option<T> {
        self.items().into_iter().nth(ordinal)
    }
}

/// In-memory provider backed by a `Vec`, for tests and simple hosts.
#[derive(Debug, Clone, Default)]
pub struct ListProvider<T> {
    items: Vec<T>,
}

impl<T> ListProvider<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> DataProvider<T> for ListProvider<T> {
    fn items(&self) -> Vec<T> {
        self.items.clone()
    }

    fn get(&self, ordinal: usize) -> Option<T> {
        self.items.get(ordinal).cloned()
    }
}
