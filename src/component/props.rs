//! Reactive props - the shallow-reactive attribute/property store.
//!
//! Each component instance owns one [`ReactiveProps`]: a mapping from
//! observed attribute name to its current value, backed by one signal per
//! name. Reads inside a tracked scope (the render effect) register a
//! dependency; writes notify dependents synchronously. The backing signal
//! for a name is created on first touch, so a read of a never-written name
//! still registers a dependency and the eventual first write re-triggers
//! the reader.
//!
//! Dependency tracking itself lives entirely in spark-signals; this type
//! only shapes it into a string-keyed mapping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use spark_signals::{signal, Signal};

// =============================================================================
// Reactive Props
// =============================================================================

/// Reactive name -> value mapping owned by one component instance.
///
/// Clones are handles onto the same mapping; the factory keeps one and
/// moves clones into its template producer and lifecycle callbacks.
#[derive(Clone)]
pub struct ReactiveProps {
    entries: Rc<RefCell<HashMap<String, Signal<Option<String>>>>>,
}

impl ReactiveProps {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// The backing signal for `name`, created on first touch.
    fn entry(&self, name: &str) -> Signal<Option<String>> {
        let mut entries = self.entries.borrow_mut();
        match entries.get(name) {
            Some(existing) => existing.clone(),
            None => {
                let created = signal(None);
                entries.insert(name.to_string(), created.clone());
                created
            }
        }
    }

    /// Current value of `name`. Tracked: reading inside an effect makes
    /// the effect re-run when the value changes, even if `name` has never
    /// been written yet.
    pub fn get(&self, name: &str) -> Option<String> {
        self.entry(name).get()
    }

    /// True if `name` currently holds a value. Tracked like [`get`](Self::get).
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set `name` to `value`, notifying dependents. Writing the value the
    /// signal already holds is not re-notified.
    pub fn set(&self, name: &str, value: impl Into<String>) {
        self.entry(name).set(Some(value.into()));
    }

    /// Clear `name` back to unset, notifying dependents.
    pub fn remove(&self, name: &str) {
        self.entry(name).set(None);
    }

    /// Set or clear in one call; the attribute-changed bridge uses this.
    pub(crate) fn write(&self, name: &str, value: Option<String>) {
        self.entry(name).set(value);
    }
}

impl Default for ReactiveProps {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReactiveProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.borrow();
        f.debug_struct("ReactiveProps")
            .field("names", &entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
