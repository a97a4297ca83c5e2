//! Tree builder for root-plus-children rules and flat key/parent-key records.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, instrument, trace};

use crate::domain::arena::{Forest, Tree};
use crate::domain::error::{DomainError, TreeResult};

/// Deepest tree the builder produces unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 4096;

/// Limits applied while building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Maximum number of levels, root included
    pub max_depth: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Value returned by a parent-key extractor.
///
/// Only types that can express "no parent" may drive
/// [`TreeBuilder::build_from_flat_relation`]; `Option<K>` is the nullable
/// form, bare key types are rejected before any input is read.
pub trait ParentKey<K> {
    const NULLABLE: bool;

    fn into_parent(self) -> Option<K>;
}

impl<K> ParentKey<K> for Option<K> {
    const NULLABLE: bool = true;

    fn into_parent(self) -> Option<K> {
        self
    }
}

macro_rules! non_nullable_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParentKey<$ty> for $ty {
                const NULLABLE: bool = false;

                fn into_parent(self) -> Option<$ty> {
                    Some(self)
                }
            }
        )*
    };
}

non_nullable_key!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool, String,
);

impl<'a> ParentKey<&'a str> for &'a str {
    const NULLABLE: bool = false;

    fn into_parent(self) -> Option<&'a str> {
        Some(self)
    }
}

/// Constructs trees and forests from caller-supplied models.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    options: BuildOptions,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Build one tree by asking `children_of` for the children of every
    /// discovered model until it returns nothing.
    ///
    /// A `children_of` that keeps re-deriving ancestors fails with
    /// [`DomainError::DepthExceeded`] once the configured depth is passed.
    #[instrument(level = "debug", skip_all, fields(max_depth = self.options.max_depth))]
    pub fn build_from_root<M, F, I>(&self, model: M, mut children_of: F) -> TreeResult<Tree<M>>
    where
        F: FnMut(&M) -> I,
        I: IntoIterator<Item = M>,
    {
        let mut tree = Tree::new(model);
        let mut stack = vec![(tree.root(), 1)];

        while let Some((id, depth)) = stack.pop() {
            let children: Vec<M> = children_of(&tree[id]).into_iter().collect();
            if children.is_empty() {
                continue;
            }
            if depth >= self.options.max_depth {
                return Err(DomainError::DepthExceeded {
                    limit: self.options.max_depth,
                });
            }

            let ids: Vec<_> = children
                .into_iter()
                .map(|child| tree.attach(id, child))
                .collect();
            trace!(parent = %id, count = ids.len(), "attached children");
            stack.extend(ids.into_iter().rev().map(|child| (child, depth + 1)));
        }

        debug!(nodes = tree.node_count(), "built tree from root");
        Ok(tree)
    }

    /// Build one tree per input model, in input order.
    #[instrument(level = "debug", skip_all)]
    pub fn build_forest<M, F, I, S>(&self, models: S, mut children_of: F) -> TreeResult<Forest<M>>
    where
        S: IntoIterator<Item = M>,
        F: FnMut(&M) -> I,
        I: IntoIterator<Item = M>,
    {
        models
            .into_iter()
            .map(|model| self.build_from_root(model, &mut children_of))
            .collect()
    }

    /// Build a forest from records linked by key and parent key.
    ///
    /// Roots are the models whose parent key is absent or matches no key,
    /// in input order; children follow input order as well. Every model ends
    /// up in exactly one node.
    ///
    /// # Errors
    ///
    /// * [`DomainError::InvalidArgument`] if `P` cannot represent a missing
    ///   parent. Checked before `models` is iterated.
    /// * [`DomainError::DuplicateKey`] if a parent key matches more than one
    ///   model. Repeated keys nobody points at are allowed.
    /// * [`DomainError::CycleDetected`] if some models are not reachable from
    ///   any root (their parent chain loops).
    /// * [`DomainError::DepthExceeded`] past the configured depth.
    #[instrument(level = "debug", skip_all, fields(max_depth = self.options.max_depth))]
    pub fn build_from_flat_relation<M, K, P, S, KF, PF>(
        &self,
        models: S,
        key_of: KF,
        parent_key_of: PF,
    ) -> TreeResult<Forest<M>>
    where
        S: IntoIterator<Item = M>,
        K: Eq + Hash + Debug,
        P: ParentKey<K>,
        KF: Fn(&M) -> K,
        PF: Fn(&M) -> P,
    {
        if !P::NULLABLE {
            return Err(DomainError::InvalidArgument(format!(
                "parent key type `{}` cannot represent a missing parent, use Option<_>",
                std::any::type_name::<P>()
            )));
        }

        let models: Vec<M> = models.into_iter().collect();
        let keys: Vec<K> = models.iter().map(&key_of).collect();

        let mut positions: HashMap<&K, usize> = HashMap::with_capacity(keys.len());
        let mut repeated: HashSet<&K> = HashSet::new();
        for (pos, key) in keys.iter().enumerate() {
            if positions.insert(key, pos).is_some() {
                repeated.insert(key);
            }
        }

        let mut roots = Vec::new();
        let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
        for (pos, model) in models.iter().enumerate() {
            let parent_key = parent_key_of(model).into_parent();
            if let Some(parent_key) = &parent_key {
                if repeated.contains(parent_key) {
                    return Err(DomainError::DuplicateKey(format!("{:?}", parent_key)));
                }
            }
            let parent_pos = parent_key.and_then(|parent_key| positions.get(&parent_key).copied());
            match parent_pos {
                Some(parent) => children.entry(parent).or_default().push(pos),
                None => roots.push(pos),
            }
        }
        debug!(
            models = models.len(),
            roots = roots.len(),
            "indexed flat relation"
        );

        let mut slots: Vec<Option<M>> = models.into_iter().map(Some).collect();
        let mut take = |pos: usize| {
            slots[pos]
                .take()
                .ok_or_else(|| DomainError::CycleDetected(format!("{:?}", keys[pos])))
        };

        let mut forest = Vec::with_capacity(roots.len());
        for root in roots {
            let mut tree = Tree::new(take(root)?);
            let mut stack = vec![(root, tree.root(), 1)];

            while let Some((pos, id, depth)) = stack.pop() {
                let Some(child_positions) = children.get(&pos) else {
                    continue;
                };
                if depth >= self.options.max_depth {
                    return Err(DomainError::DepthExceeded {
                        limit: self.options.max_depth,
                    });
                }
                let mut attached = Vec::with_capacity(child_positions.len());
                for &child in child_positions {
                    attached.push((child, tree.attach(id, take(child)?), depth + 1));
                }
                stack.extend(attached.into_iter().rev());
            }
            forest.push(tree);
        }

        // Whatever was not placed sits on a parent chain that never reaches a root
        if let Some(pos) = slots.iter().position(Option::is_some) {
            return Err(DomainError::CycleDetected(format!("{:?}", keys[pos])));
        }

        Ok(forest)
    }
}
