//! Rendering trees as `termtree` diagrams.

use std::collections::HashMap;
use std::fmt::Display;

use termtree::Tree as Diagram;
use tracing::instrument;

use crate::domain::arena::{NodeId, Tree};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Diagram<String>;
}

impl<M: Display> TreeNodeConvert for Tree<M> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Diagram<String> {
        self.render_with(|model| model.to_string())
    }
}

impl<M> Tree<M> {
    /// Builds a diagram using `label` for every node.
    ///
    /// Assembled bottom-up from a post-order walk, so deep trees do not
    /// recurse.
    pub fn render_with<F>(&self, mut label: F) -> Diagram<String>
    where
        F: FnMut(&M) -> String,
    {
        let mut rendered: HashMap<NodeId, Diagram<String>> =
            HashMap::with_capacity(self.node_count());
        for node in self.iter_postorder() {
            let leaves: Vec<Diagram<String>> = node
                .child_ids()
                .iter()
                .filter_map(|child| rendered.remove(child))
                .collect();
            rendered.insert(node.id(), Diagram::new(label(node.model())).with_leaves(leaves));
        }
        rendered
            .remove(&self.root())
            .unwrap_or_else(|| Diagram::new(label(&self[self.root()])))
    }
}
