//! Host document layer - registry, elements, shadow roots, documents.
//!
//! The minimal custom-element host the component layer runs against:
//!
//! - Registry: name -> definition, duplicate rejection, element upgrade
//! - Element: attributes, state flags, property routing, shadow root
//! - ShadowRoot/Node: the encapsulation boundary and its rendered tree
//! - Document: connect/disconnect notifications
//!
//! The component layer talks to elements only through the
//! [`ElementReactions`] seam; nothing in this module depends on it.

mod document;
mod element;
mod node;
mod registry;
mod shadow;

pub use document::Document;
pub use element::{Element, ElementReactions};
pub use node::Node;
pub use registry::{
    define_element, get_definition, is_defined, reset_registry, upgrade, Constructor, Definition,
};
pub use shadow::{ShadowRoot, ShadowRootMode};

pub(crate) use node::NodeKind;
