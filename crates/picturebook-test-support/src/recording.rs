//! Recording sink that captures values pushed by listeners under test.

use std::sync::{Arc, Mutex};

/// A shared, cloneable log of recorded values.
#[derive(Debug)]
pub struct RecordingSink<T> {
    items: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for RecordingSink<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for RecordingSink<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Clone> RecordingSink<T> {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn push(&self, item: T) {
        self.items.lock().expect("sink mutex poisoned").push(item);
    }

    /// Returns a copy of every recorded value.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.items.lock().expect("sink mutex poisoned").clone()
    }

    /// Removes and returns every recorded value.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn drain(&self) -> Vec<T> {
        std::mem::take(&mut *self.items.lock().expect("sink mutex poisoned"))
    }
}
