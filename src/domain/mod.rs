//! Domain layer: the tree engine
//!
//! Construction, traversal and structural copy of arena-backed trees.
//! No I/O, no CLI, no config loading.

pub mod arena;
pub mod builder;
pub mod copy;
pub mod error;
pub mod render;
pub mod traversal;

pub use arena::{Forest, NodeId, NodeRef, Tree, TreeNode};
pub use builder::{BuildOptions, ParentKey, TreeBuilder, DEFAULT_MAX_DEPTH};
pub use error::{DomainError, TreeResult};
pub use render::TreeNodeConvert;
pub use traversal::{Ancestors, Descendants, LeafNodes, NonLeafNodes, PostOrder, PreOrder};
