//! Page completion registry.

use std::collections::BTreeSet;

/// Which pages have satisfied their gating condition this session.
///
/// Entries are only ever added. Absent pages read as incomplete.
#[derive(Debug, Clone, Default)]
pub struct CompletionRegistry {
    completed: BTreeSet<usize>,
}

impl CompletionRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a page complete. Returns `true` only the first time.
    pub fn mark_complete(&mut self, page: usize) -> bool {
        self.completed.insert(page)
    }

    /// Whether a page has been marked complete.
    #[must_use]
    pub fn is_complete(&self, page: usize) -> bool {
        self.completed.contains(&page)
    }

    /// Completed pages in ascending order.
    pub fn completed(&self) -> impl Iterator<Item = usize> + '_ {
        self.completed.iter().copied()
    }

    /// Number of completed pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    /// Whether no page is complete.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}
