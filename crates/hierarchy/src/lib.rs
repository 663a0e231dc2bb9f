//! # SSR Hierarchy
//!
//! In-memory model of an `instancesHierarchy.xml` database export.
//!
//! ## Architecture
//!
//! ```text
//! xml_DB_<SOURCE>/instancesHierarchy.xml
//!     │
//!     ├──> HierarchyStore::load (one read + parse per call)
//!     │
//!     └──> HierarchyTree (arena, document order)
//!          ├─> find_subtree(location, system)
//!          ├─> descendants(root)
//!          └─> parent_of_alias(alias)   one-pass alias index, O(1)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ssr_hierarchy::HierarchyTree;
//!
//! let xml = r#"
//! <HierarchyItem name="BNK" alias="BNK">
//!   <HierarchyItem name="BMF" alias="BNK_BMF">
//!     <HierarchyItem name="aii0001" alias="BNK_AII0001"/>
//!   </HierarchyItem>
//! </HierarchyItem>"#;
//!
//! let tree = HierarchyTree::parse(xml).unwrap();
//! let bmf = tree.find_subtree("BNK", "BMF").unwrap();
//! let point = tree.descendants(bmf).next().unwrap();
//! let parent = tree.parent_of_alias("BNK_AII0001").unique().unwrap();
//! assert_eq!(tree.node(point).name(), Some("aii0001"));
//! assert_eq!(tree.node(parent).alias(), Some("BNK_BMF"));
//! ```

mod error;
mod node;
mod store;
mod tree;

pub use error::{HierarchyError, Result};
pub use node::{HierarchyNode, NodeId, ParentLink, ITEM_TAG};
pub use store::{HierarchyStore, SourceLayout};
pub use tree::HierarchyTree;
