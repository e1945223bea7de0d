use shared::{domain::BlogPost, record::Record};
use tracing::debug;

/// Single-level detail selection. Opening replaces whatever is open.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailOverlayController<T> {
    selected: Option<T>,
}

pub type BlogPostOverlay = DetailOverlayController<BlogPost>;

impl<T> Default for DetailOverlayController<T> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<T> DetailOverlayController<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, item: T) {
        self.selected = Some(item);
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }
}

impl<T: Record> DetailOverlayController<T> {
    /// Opens the item with `id` from a fetched collection. Leaves the
    /// selection untouched and returns `false` when nothing matches.
    pub fn open_by_id(&mut self, items: &[T], id: T::Id) -> bool {
        match items.iter().find(|item| item.id() == id) {
            Some(item) => {
                debug!(collection = T::COLLECTION, %id, "opening detail overlay");
                self.open(item.clone());
                true
            }
            None => {
                debug!(collection = T::COLLECTION, %id, "no record to open");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/overlay_tests.rs"]
mod tests;
