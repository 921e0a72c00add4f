use figport_document::{DesignNode, NodeKind, TextContent};

/// Visitor pattern for traversing the design tree immutably
///
/// The default implementation walks the entire subtree in pre-order and hands
/// every node its parent. Override specific visit_* methods to act on nodes;
/// an overridden `visit_node` must call [`walk_node`] to keep descending.
pub trait Visitor<'a>: Sized {
    fn visit_node(&mut self, node: &'a DesignNode, parent: Option<&'a DesignNode>) {
        let _ = parent;
        if let NodeKind::Text(text) = &node.kind {
            self.visit_text(node, text);
        }
        walk_node(self, node);
    }

    fn visit_text(&mut self, _node: &'a DesignNode, _text: &'a TextContent) {
        // Leaf node, no children to walk
    }
}

pub fn walk_node<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a DesignNode) {
    for child in &node.children {
        visitor.visit_node(child, Some(node));
    }
}

/// Visit `root` and everything beneath it
pub fn walk_tree<'a, V: Visitor<'a>>(visitor: &mut V, root: &'a DesignNode) {
    visitor.visit_node(root, None);
}
