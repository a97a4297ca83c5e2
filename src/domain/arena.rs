//! Arena-backed tree storage.
//!
//! Every node of a [`Tree`] lives in one generational arena. Children are
//! owned through the arena and listed in insertion order; the parent link is
//! a plain [`NodeId`] and never keeps anything alive.

use std::fmt;
use std::ops::Index;

use generational_arena::{Arena, Index as ArenaIndex};
use tracing::instrument;

use crate::domain::error::{DomainError, TreeResult};

/// Ordered sequence of independently rooted trees.
pub type Forest<M> = Vec<Tree<M>>;

/// Identity of a node inside the tree that issued it.
///
/// Ids are only meaningful for that tree; two structurally equal models
/// always get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(ArenaIndex);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "{}v{}", slot, generation)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub struct TreeNode<M> {
    /// Caller-supplied record wrapped by this node
    pub model: M,
    /// Id of the parent node, None for the root
    pub parent: Option<NodeId>,
    /// Ids of child nodes, in insertion order
    pub children: Vec<NodeId>,
}

/// One tree: a root plus every node reachable from it.
///
/// Models are fixed once attached; nodes can be added but their models are
/// only readable.
///
/// ```compile_fail
/// let mut tree = rsforest::Tree::new(1);
/// let root = tree.root();
/// tree[root] = 2;
/// ```
#[derive(Debug, Clone)]
pub struct Tree<M> {
    arena: Arena<TreeNode<M>>,
    root: NodeId,
}

impl<M> Tree<M> {
    /// Creates a single-node tree wrapping `model`.
    pub fn new(model: M) -> Self {
        let mut arena = Arena::new();
        let root = NodeId(arena.insert(TreeNode {
            model,
            parent: None,
            children: Vec::new(),
        }));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_ref(&self) -> NodeRef<'_, M> {
        NodeRef {
            tree: self,
            id: self.root,
            node: &self.arena[self.root.0],
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode<M>> {
        self.arena.get(id.0)
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, M>> {
        self.arena.get(id.0).map(|node| NodeRef {
            tree: self,
            id,
            node,
        })
    }

    pub fn model(&self, id: NodeId) -> Option<&M> {
        self.arena.get(id.0).map(|node| &node.model)
    }

    /// Number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Wraps `model` in a new node and attaches it under `parent`.
    ///
    /// Calling this twice with equal models yields two distinct children.
    #[instrument(level = "trace", skip(self, model))]
    pub fn add_child(&mut self, parent: NodeId, model: M) -> TreeResult<NodeId> {
        if !self.contains(parent) {
            return Err(DomainError::NodeNotFound(parent));
        }
        Ok(self.attach(parent, model))
    }

    /// Attaches every model under `parent` in iteration order.
    ///
    /// The returned ids are in the same order, which is also the order the
    /// children are enumerated in afterwards.
    #[instrument(level = "trace", skip(self, models))]
    pub fn add_children<I>(&mut self, parent: NodeId, models: I) -> TreeResult<Vec<NodeId>>
    where
        I: IntoIterator<Item = M>,
    {
        if !self.contains(parent) {
            return Err(DomainError::NodeNotFound(parent));
        }
        Ok(models
            .into_iter()
            .map(|model| self.attach(parent, model))
            .collect())
    }

    /// Inserts a node under a parent that is known to exist.
    pub(crate) fn attach(&mut self, parent: NodeId, model: M) -> NodeId {
        let id = NodeId(self.arena.insert(TreeNode {
            model,
            parent: Some(parent),
            children: Vec::new(),
        }));
        self.arena[parent.0].children.push(id);
        id
    }

    /// Number of levels in the tree; a lone root has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 1)];

        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get_node(id) {
                stack.extend(node.children.iter().map(|&child| (child, depth + 1)));
            }
        }

        max_depth
    }

    /// Leaf-to-root id paths, one per leaf.
    ///
    /// A tree without children yields a single branch holding only the root.
    #[instrument(level = "debug", skip(self))]
    pub fn branches(&self) -> Vec<Vec<NodeId>> {
        let root = self.root_ref();
        if root.is_leaf() {
            return vec![vec![self.root]];
        }
        self.leaf_nodes()
            .map(|leaf| {
                std::iter::once(leaf.id())
                    .chain(leaf.ancestors().map(|node| node.id()))
                    .collect()
            })
            .collect()
    }
}

impl<M> Index<NodeId> for Tree<M> {
    type Output = M;

    fn index(&self, id: NodeId) -> &M {
        &self.arena[id.0].model
    }
}

/// Borrowed view of one node together with the tree it lives in.
pub struct NodeRef<'a, M> {
    tree: &'a Tree<M>,
    id: NodeId,
    node: &'a TreeNode<M>,
}

impl<M> Clone for NodeRef<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for NodeRef<'_, M> {}

impl<M: fmt::Debug> fmt::Debug for NodeRef<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("model", &self.node.model)
            .field("children", &self.node.children.len())
            .finish()
    }
}

impl<'a, M> NodeRef<'a, M> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a Tree<M> {
        self.tree
    }

    pub fn model(&self) -> &'a M {
        &self.node.model
    }

    pub fn parent(&self) -> Option<NodeRef<'a, M>> {
        self.node.parent.and_then(|id| self.tree.node(id))
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeRef<'a, M>> + 'a {
        let tree = self.tree;
        self.node
            .children
            .iter()
            .filter_map(move |&id| tree.node(id))
    }

    pub fn child_ids(&self) -> &'a [NodeId] {
        &self.node.children
    }

    pub fn child_count(&self) -> usize {
        self.node.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.node.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    /// Number of ancestors; the root sits at level 0.
    pub fn level(&self) -> usize {
        self.ancestors().count()
    }
}
