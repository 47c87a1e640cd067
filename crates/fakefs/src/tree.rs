//! In-memory directory tree.
//!
//! This module provides the tree half of the fake filesystem:
//! - Arena node storage with freelist slot reuse
//! - Typed node ids with a compact optional form
//! - Node payloads (directory / file / symlink) and Unix-style metadata
//! - The `FakeTree` entry operations: lookup, insert, remove, clone, paths

mod arena;
mod dir;
mod id;
mod node;

pub use arena::NodeArena;
pub use dir::FakeTree;
pub use id::{NodeId, OptionNodeId};
pub use node::{EntryKind, FakeNode, FileMode, FsContext, NodeMetadata};
