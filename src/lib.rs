//! Hierarchical tree construction and traversal.
//!
//! Trees are built from a root model plus a children rule
//! ([`TreeBuilder::build_from_root`], [`TreeBuilder::build_forest`]) or from
//! flat records linked by key and parent key
//! ([`TreeBuilder::build_from_flat_relation`]). Built trees support lazy
//! depth-first walks ([`Tree::descendants`], [`Tree::non_leaf_nodes`],
//! [`Tree::leaf_nodes`]) and predicate-filtered copies
//! ([`Tree::copy_filtered`]).
//!
//! ```
//! use rsforest::TreeBuilder;
//!
//! let tree = TreeBuilder::new()
//!     .build_from_root(1, |&n| if n < 3 { vec![n + 1] } else { vec![] })
//!     .unwrap();
//!
//! let internal: Vec<_> = tree.non_leaf_nodes().map(|n| *n.model()).collect();
//! assert_eq!(internal, vec![2]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    BuildOptions, DomainError, Forest, NodeId, NodeRef, ParentKey, Tree, TreeBuilder,
    TreeNodeConvert, TreeResult,
};
