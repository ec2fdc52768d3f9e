//! Lifecycle registry and registration context.
//!
//! Components register lifecycle callbacks by calling the free hook
//! functions ([`on_mounted`] and friends) during factory execution. A
//! thread-local single slot holds the callback registry of the instance
//! currently being constructed; the construction code opens a
//! [`RegistrationScope`] around the factory call so every synchronous hook
//! call lands on exactly that instance.
//!
//! A hook call outside any construction window registers nothing. It is
//! not an error, but it is almost always a mistake (typically a factory
//! that deferred part of its setup), so it logs a warning instead of
//! staying silent.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::Phase;

// =============================================================================
// Lifecycle Callbacks
// =============================================================================

pub(crate) type LifecycleCallback = Rc<dyn Fn()>;

/// Per-instance ordered callback lists, one per phase. Append-only: every
/// registration call appends, and all callbacks in a list fire in
/// registration order each time the phase occurs.
pub(crate) struct LifecycleCallbacks {
    lists: RefCell<[Vec<LifecycleCallback>; 5]>,
}

impl LifecycleCallbacks {
    pub(crate) fn new() -> Self {
        Self {
            lists: RefCell::new(Default::default()),
        }
    }

    pub(crate) fn push(&self, phase: Phase, callback: LifecycleCallback) {
        self.lists.borrow_mut()[phase.index()].push(callback);
    }

    /// Fire all callbacks for `phase`, in registration order. The list is
    /// snapshotted first so a callback may write props (re-entering the
    /// render effect) without holding the borrow.
    pub(crate) fn fire(&self, phase: Phase) {
        let callbacks = self.lists.borrow()[phase.index()].clone();
        for callback in callbacks {
            callback();
        }
    }

    #[cfg(test)]
    pub(crate) fn count(&self, phase: Phase) -> usize {
        self.lists.borrow()[phase.index()].len()
    }
}

// =============================================================================
// Registration Context
// =============================================================================

thread_local! {
    /// The callback registry of the instance currently running its
    /// factory, if any.
    static CURRENT: RefCell<Option<Rc<LifecycleCallbacks>>> = const { RefCell::new(None) };
}

/// Window during which hook calls attach to one instance's registry.
///
/// Restores the previous occupant on drop, so a factory that constructs
/// another component mid-flight gets its own registrations back afterward.
/// Dropping on unwind also clears the slot if the factory panics.
pub(crate) struct RegistrationScope {
    previous: Option<Rc<LifecycleCallbacks>>,
}

impl RegistrationScope {
    pub(crate) fn enter(callbacks: Rc<LifecycleCallbacks>) -> Self {
        let previous = CURRENT.with(|slot| slot.borrow_mut().replace(callbacks));
        Self { previous }
    }
}

impl Drop for RegistrationScope {
    fn drop(&mut self) {
        CURRENT.with(|slot| {
            *slot.borrow_mut() = self.previous.take();
        });
    }
}

// =============================================================================
// Hook Functions
// =============================================================================

fn register(phase: Phase, callback: impl Fn() + 'static) {
    CURRENT.with(|slot| match &*slot.borrow() {
        Some(callbacks) => callbacks.push(phase, Rc::new(callback)),
        None => {
            tracing::warn!(
                phase = phase.label(),
                "lifecycle hook called while no component is constructing; callback dropped"
            );
        }
    });
}

/// Register a callback that fires once, before the first render pass.
pub fn on_before_mount(callback: impl Fn() + 'static) {
    register(Phase::BeforeMount, callback);
}

/// Register a callback that fires each time the element is connected.
pub fn on_mounted(callback: impl Fn() + 'static) {
    register(Phase::Mounted, callback);
}

/// Register a callback that fires before the render pass of every
/// re-render.
pub fn on_before_update(callback: impl Fn() + 'static) {
    register(Phase::BeforeUpdate, callback);
}

/// Register a callback that fires after the render pass of every
/// re-render.
pub fn on_updated(callback: impl Fn() + 'static) {
    register(Phase::Updated, callback);
}

/// Register a callback that fires each time the element is disconnected.
pub fn on_unmounted(callback: impl Fn() + 'static) {
    register(Phase::Unmounted, callback);
}

// =============================================================================
// Tests
// =============================================================================
