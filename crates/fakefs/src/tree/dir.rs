//! The fake directory tree and its entry operations.

use crate::glob::GlobPattern;

use super::arena::NodeArena;
use super::id::NodeId;
use super::node::{EntryKind, FakeNode, FsContext, NodeMetadata};
use crate::error::{FakeFsError, Result};

/// An in-memory filesystem tree.
///
/// Nodes live in an arena and refer to their parent by id, so
/// "delete myself" is expressed as asking the tree to unlink the entry
/// whose parent slot matches, without any reference-identity comparison.
/// Ownership flows strictly downward through child lists; symlink targets
/// are plain references and never walked as ownership edges.
///
/// Single-threaded by design: callers needing shared access wrap the tree
/// in their own synchronization.
pub struct FakeTree {
    arena: NodeArena,
    root: NodeId,
    context: FsContext,
}

impl FakeTree {
    /// Creates a tree holding only a root directory named `/`.
    pub fn new() -> Self {
        Self::with_context(FsContext::default())
    }

    /// Creates a tree whose nodes capture ownership metadata from `context`.
    pub fn with_context(context: FsContext) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.insert(FakeNode::directory("/", NodeMetadata::directory(&context)));
        Self {
            arena,
            root,
            context,
        }
    }

    /// Returns the root directory id.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn context(&self) -> &FsContext {
        &self.context
    }

    /// Returns the number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Borrows the node at `id`.
    ///
    /// # Panics
    /// Panics on a stale id; holding ids across removal of their subtree is
    /// a caller bug.
    #[inline]
    pub fn node(&self, id: NodeId) -> &FakeNode {
        &self.arena[id]
    }

    /// Mutably borrows the node at `id`.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut FakeNode {
        &mut self.arena[id]
    }

    #[inline]
    pub fn name(&self, id: NodeId) -> &str {
        self.arena[id].name()
    }

    /// Returns true if `id` is a live directory node.
    pub fn is_directory(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some_and(FakeNode::is_dir)
    }

    /// Returns true if `id` is a symlink whose target is a live directory.
    pub fn is_symlink_to_directory(&self, id: NodeId) -> bool {
        let Some(node) = self.arena.get(id) else {
            return false;
        };
        node.symlink_target()
            .and_then(|target| self.arena.get(target))
            .is_some_and(FakeNode::is_dir)
    }

    /// Resolves `id` to a traversable directory: the node itself when it is
    /// a directory, or the link target when it is a symlink to one.
    /// Symlink chains are not followed past the first hop.
    pub fn resolve_dir(&self, id: NodeId) -> Option<NodeId> {
        let node = self.arena.get(id)?;
        match node.kind() {
            EntryKind::Directory => Some(id),
            EntryKind::Symlink { target } => {
                let resolved = *target;
                self.arena.get(resolved)?.is_dir().then_some(resolved)
            }
            EntryKind::File { .. } => None,
        }
    }

    // -----------------------------------------------------------------------
    // Entry map operations
    // -----------------------------------------------------------------------

    /// Returns the child of `dir` with exactly `name`, if present.
    /// No wildcard semantics; `matching_names` handles patterns.
    pub fn lookup(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.arena[dir]
            .children
            .iter()
            .copied()
            .find(|&child| self.arena[child].name() == name)
    }

    /// Creates a directory named `name` under `dir`.
    pub fn create_dir(&mut self, dir: NodeId, name: &str) -> Result<NodeId> {
        let metadata = NodeMetadata::directory(&self.context);
        self.create_node(dir, FakeNode::directory(name, metadata))
    }

    /// Creates a regular file named `name` under `dir`.
    pub fn create_file(&mut self, dir: NodeId, name: &str, content: &str) -> Result<NodeId> {
        let metadata = NodeMetadata::file(&self.context);
        self.create_node(dir, FakeNode::file(name, content, metadata))
    }

    /// Creates a symlink named `name` under `dir`, pointing at `target`.
    pub fn create_symlink(&mut self, dir: NodeId, name: &str, target: NodeId) -> Result<NodeId> {
        let metadata = NodeMetadata::symlink(&self.context);
        self.create_node(dir, FakeNode::symlink(name, target, metadata))
    }

    fn create_node(&mut self, dir: NodeId, node: FakeNode) -> Result<NodeId> {
        let dir = self
            .resolve_dir(dir)
            .ok_or_else(|| FakeFsError::NotADirectory(self.to_path(dir)))?;
        let id = self.arena.insert(node);
        self.link_child(dir, id);
        Ok(id)
    }

    /// Links `child` into `dir`'s entry map under the child's own name,
    /// replacing (and freeing) any existing same-named entry in place.
    fn link_child(&mut self, dir: NodeId, child: NodeId) {
        let position = {
            let name = self.arena[child].name();
            self.arena[dir]
                .children
                .iter()
                .position(|&existing| self.arena[existing].name() == name)
        };
        match position {
            Some(slot) => {
                let replaced = self.arena[dir].children[slot];
                self.arena[dir].children[slot] = child;
                self.free_subtree(replaced);
            }
            None => self.arena[dir].children.push(child),
        }
        self.arena[child].set_parent(Some(dir));
    }

    /// Removes `node` from its parent's entry map and frees its subtree.
    /// Removing the root is a no-op: the root has no owning parent.
    pub fn remove(&mut self, node: NodeId) {
        let Some(parent) = self.arena[node].parent() else {
            return;
        };
        let name = self.arena[node].name().to_string();
        self.remove_child(parent, &name);
    }

    /// Removes the child of `dir` named `name`, freeing its subtree.
    /// Returns false (a silent no-op) when no such child exists.
    pub fn remove_child(&mut self, dir: NodeId, name: &str) -> bool {
        let position = self.arena[dir]
            .children
            .iter()
            .position(|&child| self.arena[child].name() == name);
        let Some(slot) = position else {
            return false;
        };
        let child = self.arena[dir].children.remove(slot);
        self.free_subtree(child);
        true
    }

    fn free_subtree(&mut self, node: NodeId) {
        let children: Vec<NodeId> = self.arena[node].children.iter().copied().collect();
        for child in children {
            self.free_subtree(child);
        }
        self.arena.remove(node);
    }

    /// All children of `dir` in stable insertion order.
    pub fn entries(&self, dir: NodeId) -> &[NodeId] {
        &self.arena[dir].children
    }

    /// Children of `dir` whose names satisfy `pattern`, in entry order.
    pub fn matching_names(&self, dir: NodeId, pattern: &GlobPattern) -> Vec<NodeId> {
        self.arena[dir]
            .children
            .iter()
            .copied()
            .filter(|&child| pattern.is_match(self.arena[child].name()))
            .collect()
    }

    /// Returns true if `dir` has no entries.
    pub fn is_empty(&self, dir: NodeId) -> bool {
        self.arena[dir].children.is_empty()
    }

    /// Updates modification and access times to now.
    pub fn touch(&mut self, id: NodeId) {
        let now = super::node::unix_now();
        let metadata = &mut self.arena[id].metadata;
        metadata.mtime = now;
        metadata.atime = now;
    }

    // -----------------------------------------------------------------------
    // Cloning and paths
    // -----------------------------------------------------------------------

    /// Deep-copies `node` and its entire subtree.
    ///
    /// Every copied child's parent is rebound to its copied parent, so the
    /// clone is fully independent of the original. With `new_parent` the
    /// clone top is linked into that directory; without it the clone top
    /// keeps the original's parent reference without being owned by that
    /// directory, and the caller is expected to link the clone somewhere.
    pub fn clone_subtree(&mut self, node: NodeId, new_parent: Option<NodeId>) -> NodeId {
        let copy = self.copy_recursive(node);
        if let Some(parent) = new_parent {
            self.link_child(parent, copy);
        }
        copy
    }

    fn copy_recursive(&mut self, node: NodeId) -> NodeId {
        let template = self.arena[node].subtree_template();
        let copy = self.arena.insert(template);
        let children: Vec<NodeId> = self.arena[node].children.iter().copied().collect();
        for child in children {
            let child_copy = self.copy_recursive(child);
            self.arena[copy].children.push(child_copy);
            self.arena[child_copy].set_parent(Some(copy));
        }
        copy
    }

    /// Reconstructs the absolute path of `id` by walking parent references.
    pub fn to_path(&self, id: NodeId) -> String {
        let node = &self.arena[id];
        match node.parent() {
            None => node.name().to_string(),
            Some(parent) => {
                let base = self.to_path(parent);
                if base.ends_with('/') {
                    format!("{base}{}", node.name())
                } else {
                    format!("{base}/{}", node.name())
                }
            }
        }
    }
}

impl Default for FakeTree {
    fn default() -> Self {
        Self::new()
    }
}
