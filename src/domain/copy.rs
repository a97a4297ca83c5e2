//! Predicate-filtered structural copy.

use tracing::{instrument, trace};

use crate::domain::arena::{NodeId, NodeRef, Tree};
use crate::domain::error::{DomainError, TreeResult};

impl<M: Clone> Tree<M> {
    /// Copies the tree, keeping only descendants accepted by `predicate`.
    ///
    /// The root is always copied and never passed to the predicate. A child
    /// that fails the predicate is dropped together with its whole subtree,
    /// even if deeper nodes would pass. Retained children keep their source
    /// order.
    #[instrument(level = "debug", skip_all)]
    pub fn copy_filtered<P>(&self, predicate: P) -> Tree<M>
    where
        P: FnMut(NodeRef<'_, M>) -> bool,
    {
        copy_from(self.root_ref(), predicate)
    }

    /// Same as [`Tree::copy_filtered`] but rooted at `id`.
    #[instrument(level = "debug", skip(self, predicate))]
    pub fn copy_subtree<P>(&self, id: NodeId, predicate: P) -> TreeResult<Tree<M>>
    where
        P: FnMut(NodeRef<'_, M>) -> bool,
    {
        let start = self.node(id).ok_or(DomainError::NodeNotFound(id))?;
        Ok(copy_from(start, predicate))
    }
}

fn copy_from<M, P>(source: NodeRef<'_, M>, mut predicate: P) -> Tree<M>
where
    M: Clone,
    P: FnMut(NodeRef<'_, M>) -> bool,
{
    let mut copy = Tree::new(source.model().clone());
    // Each entry pairs a source node with the copy created for it.
    let mut stack = vec![(source, copy.root())];

    while let Some((from, to)) = stack.pop() {
        for child in from.children() {
            if !predicate(child) {
                trace!(node = %child.id(), "pruned");
                continue;
            }
            let copied = copy.attach(to, child.model().clone());
            stack.push((child, copied));
        }
    }

    copy
}
