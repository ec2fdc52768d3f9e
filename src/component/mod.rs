//! Component layer - definitions, lifecycle, reactive props.
//!
//! The reactive lifecycle bridge:
//!
//! - [`define`] turns a factory function into a registered custom element
//! - lifecycle hooks ([`on_mounted`] and friends) attach callbacks to the
//!   instance currently running its factory
//! - [`ReactiveProps`] keeps observed attributes, property accessors, and
//!   component state in one reactive source of truth
//!
//! # Lifecycle
//!
//! ```text
//! upgrade ─ factory ─ before-mount ─ render ──────────────┐ mounted flag set
//!                                                         │
//! connect ──────── mounted callbacks                      │
//! prop/attr write ─ before-update ─ render ─ updated   <──┘ (every re-run)
//! disconnect ───── unmounted callbacks
//! ```

mod define;
mod lifecycle;
mod props;

pub use define::{define, TemplateProducer};
pub use lifecycle::{on_before_mount, on_before_update, on_mounted, on_unmounted, on_updated};
pub use props::ReactiveProps;
