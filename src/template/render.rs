//! Diff-based reconciliation of a template against a shadow root.
//!
//! `render` walks the root's existing children against the description and
//! only touches what changed: text data and attributes are patched in
//! place, a node is replaced only when its kind or tag no longer matches,
//! trailing nodes are appended or truncated. Rendering the same
//! description twice leaves the tree untouched, with identical node
//! identities.

use crate::dom::{Node, NodeKind, ShadowRoot};

use super::Template;

// =============================================================================
// Render
// =============================================================================

/// Reconcile the shadow root's contents to match `template`.
pub fn render(template: &Template, root: &ShadowRoot) {
    let mut desired = Vec::new();
    collect(template, &mut desired);
    reconcile_children(&mut root.children().borrow_mut(), &desired);
}

/// Flatten fragments into a sibling list.
fn collect<'a>(template: &'a Template, out: &mut Vec<&'a Template>) {
    match template {
        Template::Fragment(items) => {
            for item in items {
                collect(item, out);
            }
        }
        other => out.push(other),
    }
}

fn reconcile_children(current: &mut Vec<Node>, desired: &[&Template]) {
    for (index, template) in desired.iter().copied().enumerate() {
        if index < current.len() {
            let keep = patch_node(&current[index], template);
            if !keep {
                current[index] = create_node(template);
            }
        } else {
            current.push(create_node(template));
        }
    }
    current.truncate(desired.len());
}

/// Patch `node` in place to match `template`. Returns false when the node
/// is incompatible (kind or tag mismatch) and must be replaced.
fn patch_node(node: &Node, template: &Template) -> bool {
    match (node.kind(), template) {
        (NodeKind::Text(data), Template::Text(next)) => {
            if *data.borrow() != *next {
                *data.borrow_mut() = next.clone();
            }
            true
        }
        (NodeKind::Element(element), Template::Element(next)) if element.tag == next.tag => {
            if *element.attributes.borrow() != next.attributes {
                *element.attributes.borrow_mut() = next.attributes.clone();
            }
            let mut desired = Vec::new();
            for child in &next.children {
                collect(child, &mut desired);
            }
            reconcile_children(&mut element.children.borrow_mut(), &desired);
            true
        }
        _ => false,
    }
}

fn create_node(template: &Template) -> Node {
    match template {
        Template::Text(data) => Node::new_text(data.clone()),
        Template::Element(element) => {
            let mut desired = Vec::new();
            for child in &element.children {
                collect(child, &mut desired);
            }
            let children = desired.into_iter().map(create_node).collect();
            Node::new_element(element.tag.clone(), element.attributes.clone(), children)
        }
        Template::Fragment(_) => unreachable!("fragments are flattened before node creation"),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ShadowRootMode;

    fn root() -> ShadowRoot {
        ShadowRoot::new(ShadowRootMode::Closed)
    }

    #[test]
    fn test_initial_render_creates_tree() {
        let root = root();
        let template: Template = Template::element("div")
            .attr("id", "greeting")
            .child("hello")
            .into();

        render(&template, &root);

        let children = root.child_nodes();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].tag(), Some("div".to_string()));
        assert_eq!(children[0].attribute("id"), Some("greeting".to_string()));
        assert_eq!(root.text_content(), "hello");
    }

    #[test]
    fn test_rerender_same_description_is_idempotent() {
        let root = root();
        let template = Template::text("stable");

        render(&template, &root);
        let before = root.child_nodes();

        render(&template, &root);
        let after = root.child_nodes();

        assert_eq!(after.len(), 1);
        assert!(before[0].same_node(&after[0]));
        assert_eq!(root.text_content(), "stable");
    }

    #[test]
    fn test_text_change_patches_in_place() {
        let root = root();

        render(&Template::text("count=0"), &root);
        let original = root.child_nodes()[0].clone();

        render(&Template::text("count=1"), &root);
        let patched = root.child_nodes()[0].clone();

        assert!(original.same_node(&patched));
        assert_eq!(root.text_content(), "count=1");
    }

    #[test]
    fn test_tag_mismatch_replaces_node() {
        let root = root();

        render(&Template::element("div").into(), &root);
        let original = root.child_nodes()[0].clone();

        render(&Template::element("span").into(), &root);
        let replaced = root.child_nodes()[0].clone();

        assert!(!original.same_node(&replaced));
        assert_eq!(replaced.tag(), Some("span".to_string()));
    }

    #[test]
    fn test_kind_mismatch_replaces_node() {
        let root = root();

        render(&Template::text("x"), &root);
        render(&Template::element("div").into(), &root);

        let children = root.child_nodes();
        assert_eq!(children.len(), 1);
        assert!(children[0].is_element());
    }

    #[test]
    fn test_child_list_grows_and_shrinks() {
        let root = root();

        render(
            &Template::fragment([Template::text("a"), Template::text("b")]),
            &root,
        );
        assert_eq!(root.child_nodes().len(), 2);
        let kept = root.child_nodes()[0].clone();

        render(
            &Template::fragment([
                Template::text("a"),
                Template::text("b"),
                Template::text("c"),
            ]),
            &root,
        );
        assert_eq!(root.child_nodes().len(), 3);
        assert!(kept.same_node(&root.child_nodes()[0]));

        render(&Template::fragment([Template::text("a")]), &root);
        assert_eq!(root.child_nodes().len(), 1);
        assert!(kept.same_node(&root.child_nodes()[0]));
    }

    #[test]
    fn test_nested_children_reconcile() {
        let root = root();
        let make = |label: &str| -> Template {
            Template::element("ul")
                .child(Template::element("li").child(Template::text(label)))
                .into()
        };

        render(&make("first"), &root);
        let list = root.child_nodes()[0].clone();
        let item = list.child_nodes()[0].clone();

        render(&make("second"), &root);
        assert!(list.same_node(&root.child_nodes()[0]));
        assert!(item.same_node(&root.child_nodes()[0].child_nodes()[0]));
        assert_eq!(root.text_content(), "second");
    }

    #[test]
    fn test_attribute_update_preserves_node() {
        let root = root();

        render(&Template::element("div").attr("class", "a").into(), &root);
        let node = root.child_nodes()[0].clone();

        render(&Template::element("div").attr("class", "b").into(), &root);
        assert!(node.same_node(&root.child_nodes()[0]));
        assert_eq!(root.child_nodes()[0].attribute("class"), Some("b".to_string()));
    }

    #[test]
    fn test_nested_fragments_flatten() {
        let root = root();
        let template = Template::fragment([
            Template::text("a"),
            Template::fragment([Template::text("b"), Template::text("c")]),
        ]);

        render(&template, &root);
        assert_eq!(root.child_nodes().len(), 3);
        assert_eq!(root.text_content(), "abc");
    }
}
