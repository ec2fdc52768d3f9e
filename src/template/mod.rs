//! Template description - what a template producer yields.
//!
//! A [`Template`] is a plain-data description of the desired contents of a
//! shadow root. Component template producers return one on every render
//! pass; the [`render`] reconciler diffs it against what the root already
//! holds.
//!
//! # Example
//!
//! ```
//! use spark_elements::template::Template;
//!
//! let greeting = Template::element("div")
//!     .attr("class", "greeting")
//!     .child(Template::text("hello"));
//! ```

mod render;

pub use render::render;

// =============================================================================
// Template
// =============================================================================

/// A description of desired shadow-root contents.
///
/// Templates are cheap plain data, rebuilt from scratch on every render
/// pass. Reconciliation against the previous output happens in [`render`],
/// not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// A text node with the given data.
    Text(String),
    /// An element node with a tag, attributes, and child templates.
    Element(TemplateElement),
    /// A sequence of siblings, flattened into the parent's child list.
    Fragment(Vec<Template>),
}

impl Template {
    /// Create a text node description.
    pub fn text(data: impl Into<String>) -> Self {
        Template::Text(data.into())
    }

    /// Start an element description. Finish it with [`TemplateElement::attr`]
    /// and [`TemplateElement::child`].
    pub fn element(tag: impl Into<String>) -> TemplateElement {
        TemplateElement {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a fragment from a list of sibling templates.
    pub fn fragment(items: impl IntoIterator<Item = Template>) -> Self {
        Template::Fragment(items.into_iter().collect())
    }
}

impl From<TemplateElement> for Template {
    fn from(element: TemplateElement) -> Self {
        Template::Element(element)
    }
}

impl From<&str> for Template {
    fn from(data: &str) -> Self {
        Template::text(data)
    }
}

impl From<String> for Template {
    fn from(data: String) -> Self {
        Template::Text(data)
    }
}

// =============================================================================
// Template Element
// =============================================================================

/// An element node description: tag, attributes, children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateElement {
    /// Tag name, compared exactly during reconciliation.
    pub tag: String,
    /// Attribute name/value pairs, in order.
    pub attributes: Vec<(String, String)>,
    /// Child templates. Fragments flatten into this list when rendered.
    pub children: Vec<Template>,
}

impl TemplateElement {
    /// Add an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add a child template.
    pub fn child(mut self, child: impl Into<Template>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Add several child templates at once.
    pub fn children(mut self, children: impl IntoIterator<Item = Template>) -> Self {
        self.children.extend(children);
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
