//! In-memory fake filesystem for tests.
//!
//! This crate simulates a hierarchical filesystem entirely in memory so
//! code under test can perform directory and file operations without
//! touching real storage:
//! - Arena-backed directory tree with parent back-references by index
//! - Unix-style metadata (mode, ownership, timestamps) on every node
//! - Glob matching with `*`, `?`, `**`, and nested brace alternation
//!
//! Everything is synchronous and single-threaded; callers needing shared
//! access serialize it externally.
//!
//! ```
//! use fakefs::{glob, FakeTree};
//!
//! let mut tree = FakeTree::new();
//! let root = tree.root();
//! let src = tree.create_dir(root, "src").unwrap();
//! tree.create_file(src, "main.rs", "fn main() {}").unwrap();
//! tree.create_file(src, "lib.rs", "").unwrap();
//!
//! let found = glob(&tree, root, "src/*.rs").unwrap();
//! assert_eq!(found.len(), 2);
//! ```

pub mod error;
pub mod glob;
pub mod tree;

// Re-export main types
pub use error::{FakeFsError, Result};
pub use glob::{build_matcher, glob, GlobPattern, Matcher};
pub use tree::{EntryKind, FakeNode, FakeTree, FileMode, FsContext, NodeId, NodeMetadata};
