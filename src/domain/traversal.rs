//! Lazy depth-first walks over a built tree.
//!
//! All walks use an explicit stack instead of recursion and borrow the tree,
//! so every call starts a fresh, independent sequence. Children are visited
//! in insertion order, which makes the output order reproducible.

use tracing::instrument;

use crate::domain::arena::{NodeId, NodeRef, Tree};

/// Pre-order walk over the subtree below a node, excluding the node itself.
pub struct Descendants<'a, M> {
    tree: &'a Tree<M>,
    stack: Vec<NodeId>,
}

impl<'a, M> Descendants<'a, M> {
    fn new(start: NodeRef<'a, M>) -> Self {
        // Push children in reverse order for left-to-right traversal
        let stack = start.child_ids().iter().rev().copied().collect();
        Self {
            tree: start.tree(),
            stack,
        }
    }
}

impl<'a, M> Iterator for Descendants<'a, M> {
    type Item = NodeRef<'a, M>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.tree.node(id) {
                self.stack.extend(node.child_ids().iter().rev().copied());
                return Some(node);
            }
        }
        None
    }
}

/// Descendants that have at least one child.
pub struct NonLeafNodes<'a, M> {
    inner: Descendants<'a, M>,
}

impl<'a, M> Iterator for NonLeafNodes<'a, M> {
    type Item = NodeRef<'a, M>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find(|node| !node.is_leaf())
    }
}

/// Descendants without children.
pub struct LeafNodes<'a, M> {
    inner: Descendants<'a, M>,
}

impl<'a, M> Iterator for LeafNodes<'a, M> {
    type Item = NodeRef<'a, M>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find(|node| node.is_leaf())
    }
}

/// Pre-order walk that starts with the node itself.
pub struct PreOrder<'a, M> {
    inner: Descendants<'a, M>,
}

impl<'a, M> Iterator for PreOrder<'a, M> {
    type Item = NodeRef<'a, M>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Children before parents, ending with the node the walk started from.
pub struct PostOrder<'a, M> {
    tree: &'a Tree<M>,
    stack: Vec<(NodeId, bool)>,
}

impl<'a, M> Iterator for PostOrder<'a, M> {
    type Item = NodeRef<'a, M>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.node(id) {
                if visited {
                    return Some(node);
                }
                self.stack.push((id, true));
                self.stack
                    .extend(node.child_ids().iter().rev().map(|&child| (child, false)));
            }
        }
        None
    }
}

/// Walk from a node's parent up to the root.
pub struct Ancestors<'a, M> {
    next: Option<NodeRef<'a, M>>,
}

impl<'a, M> Iterator for Ancestors<'a, M> {
    type Item = NodeRef<'a, M>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

impl<'a, M> NodeRef<'a, M> {
    pub fn descendants(&self) -> Descendants<'a, M> {
        Descendants::new(*self)
    }

    pub fn non_leaf_nodes(&self) -> NonLeafNodes<'a, M> {
        NonLeafNodes {
            inner: self.descendants(),
        }
    }

    pub fn leaf_nodes(&self) -> LeafNodes<'a, M> {
        LeafNodes {
            inner: self.descendants(),
        }
    }

    pub fn pre_order(&self) -> PreOrder<'a, M> {
        PreOrder {
            inner: Descendants {
                tree: self.tree(),
                stack: vec![self.id()],
            },
        }
    }

    pub fn post_order(&self) -> PostOrder<'a, M> {
        PostOrder {
            tree: self.tree(),
            stack: vec![(self.id(), false)],
        }
    }

    pub fn ancestors(&self) -> Ancestors<'a, M> {
        Ancestors {
            next: self.parent(),
        }
    }
}

impl<M> Tree<M> {
    /// Every node below the root in depth-first pre-order. The root itself is
    /// never yielded.
    #[instrument(level = "trace", skip(self))]
    pub fn descendants(&self) -> Descendants<'_, M> {
        self.root_ref().descendants()
    }

    /// Descendants with at least one child, in the same order as
    /// [`Tree::descendants`].
    #[instrument(level = "trace", skip(self))]
    pub fn non_leaf_nodes(&self) -> NonLeafNodes<'_, M> {
        self.root_ref().non_leaf_nodes()
    }

    /// Descendants without children, in the same order as
    /// [`Tree::descendants`].
    #[instrument(level = "trace", skip(self))]
    pub fn leaf_nodes(&self) -> LeafNodes<'_, M> {
        self.root_ref().leaf_nodes()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> PreOrder<'_, M> {
        self.root_ref().pre_order()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrder<'_, M> {
        self.root_ref().post_order()
    }

    /// Ancestors of `id`, nearest first. Empty for the root or unknown ids.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, M> {
        Ancestors {
            next: self.node(id).and_then(|node| node.parent()),
        }
    }
}

impl<'a, M> IntoIterator for &'a Tree<M> {
    type Item = NodeRef<'a, M>;
    type IntoIter = PreOrder<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
