//! Core types for spark-elements.
//!
//! Shared vocabulary for the component layer and the host document:
//! lifecycle phase tags, element state flags, and the error types
//! surfaced by definition and host operations.

use thiserror::Error;

// =============================================================================
// Lifecycle Phase
// =============================================================================

/// A lifecycle phase a component can register callbacks for.
///
/// Callbacks registered for a phase fire in registration order every time
/// that phase occurs. Mounted and unmounted recur on every connect and
/// disconnect; before-update and updated recur on every re-render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Fires once, before the first render pass.
    BeforeMount,
    /// Fires each time the element is connected to a document.
    Mounted,
    /// Fires before the render pass on every re-render.
    BeforeUpdate,
    /// Fires after the render pass on every re-render.
    Updated,
    /// Fires each time the element is disconnected from a document.
    Unmounted,
}

impl Phase {
    /// All phases, in lifecycle order.
    pub const ALL: [Phase; 5] = [
        Phase::BeforeMount,
        Phase::Mounted,
        Phase::BeforeUpdate,
        Phase::Updated,
        Phase::Unmounted,
    ];

    /// Stable index for per-phase storage.
    pub(crate) const fn index(self) -> usize {
        match self {
            Phase::BeforeMount => 0,
            Phase::Mounted => 1,
            Phase::BeforeUpdate => 2,
            Phase::Updated => 3,
            Phase::Unmounted => 4,
        }
    }

    /// Human-readable tag, used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Phase::BeforeMount => "before-mount",
            Phase::Mounted => "mounted",
            Phase::BeforeUpdate => "before-update",
            Phase::Updated => "updated",
            Phase::Unmounted => "unmounted",
        }
    }
}

// =============================================================================
// Element State Flags
// =============================================================================

bitflags::bitflags! {
    /// Element state as a bitfield.
    ///
    /// Combine with bitwise OR: `ElementFlags::UPGRADED | ElementFlags::CONNECTED`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ElementFlags: u8 {
        const NONE = 0;
        /// A component definition has been constructed for this element.
        const UPGRADED = 1 << 0;
        /// The element is currently connected to a document.
        const CONNECTED = 1 << 1;
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by the host document layer.
#[derive(Debug, Error)]
pub enum DomError {
    /// A custom element with this name is already registered.
    #[error("custom element `{0}` is already defined")]
    DuplicateDefinition(String),

    /// The element already carries a shadow root.
    #[error("element `{0}` already has a shadow root attached")]
    ShadowAlreadyAttached(String),
}

/// Errors raised by [`define`](crate::component::define).
///
/// Configuration mistakes fail fast here instead of surfacing as a
/// confusing downstream failure at upgrade time.
#[derive(Debug, Error)]
pub enum DefineError {
    /// Component names must not be empty.
    #[error("component name must not be empty")]
    EmptyName,

    /// Custom element names require a hyphen, like `x-counter`.
    #[error("component name `{0}` must contain a hyphen")]
    InvalidName(String),

    /// Observed attribute names must not be empty.
    #[error("observed attribute name must not be empty")]
    EmptyAttributeName,

    /// Each observed attribute may be declared only once.
    #[error("duplicate observed attribute `{0}`")]
    DuplicateAttribute(String),

    /// Registration failed at the host registry (duplicate name).
    #[error(transparent)]
    Dom(#[from] DomError),
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_indices_are_distinct() {
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }

    #[test]
    fn test_element_flags() {
        let mut flags = ElementFlags::NONE;
        assert!(!flags.contains(ElementFlags::UPGRADED));

        flags |= ElementFlags::UPGRADED;
        assert!(flags.contains(ElementFlags::UPGRADED));
        assert!(!flags.contains(ElementFlags::CONNECTED));

        flags |= ElementFlags::CONNECTED;
        flags.remove(ElementFlags::CONNECTED);
        assert!(flags.contains(ElementFlags::UPGRADED));
    }

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = DomError::DuplicateDefinition("x-counter".to_string());
        assert!(err.to_string().contains("x-counter"));

        let err = DefineError::DuplicateAttribute("count".to_string());
        assert!(err.to_string().contains("count"));
    }
}
