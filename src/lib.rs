//! # spark-elements
//!
//! Reactive custom element components for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity: a component is a factory function that returns
//! a template producer, and one render effect per instance re-invokes that
//! producer exactly when a reactive value it read has changed.
//!
//! ## Architecture
//!
//! ```text
//! define(name, attrs, factory)
//!        │
//!        ▼                      per element
//! Registry definition ──────► factory runs once ──► template producer
//!                               │    (hooks attach here)     │
//!                               ▼                            ▼
//!                         ReactiveProps  ──reads──►  render effect ──► shadow root
//!                               ▲                         diff render
//!          attributes / properties writes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use spark_elements::{define, on_mounted, Document, Template};
//!
//! define("x-counter", &["count"], |_el, props| {
//!     let mounted_props = props.clone();
//!     on_mounted(move || {
//!         if !mounted_props.is_set("count") {
//!             mounted_props.set("count", "0");
//!         }
//!     });
//!     Box::new(move || Template::text(format!(
//!         "count={}",
//!         props.get("count").unwrap_or_default()
//!     )))
//! })?;
//!
//! let document = Document::new();
//! let counter = document.create_element("x-counter")?;
//! document.append(&counter)?;
//! counter.set_property("count", "5"); // re-renders
//! ```
//!
//! ## Modules
//!
//! - [`component`] - `define`, lifecycle hooks, reactive props
//! - [`dom`] - the host document: registry, elements, shadow roots
//! - [`template`] - template descriptions and the diff renderer
//! - [`types`] - phase tags, element flags, errors

pub mod component;
pub mod dom;
pub mod template;
pub mod types;

// Re-export commonly used items
pub use types::{DefineError, DomError, ElementFlags, Phase};

pub use component::{
    define, on_before_mount, on_before_update, on_mounted, on_unmounted, on_updated,
    ReactiveProps, TemplateProducer,
};

pub use dom::{
    define_element, get_definition, is_defined, reset_registry, upgrade, Definition, Document,
    Element, ElementReactions, Node, ShadowRoot, ShadowRootMode,
};

pub use template::{render, Template, TemplateElement};

// Reactive primitives, for component-local state beyond observed props.
pub use spark_signals::{effect, signal, Signal};
