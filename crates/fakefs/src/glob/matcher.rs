//! Matcher chain nodes and tree walking.

use fnv::FnvHashSet;

use crate::tree::{FakeTree, NodeId};

use super::pattern::GlobPattern;

/// One node of a compiled matcher chain.
///
/// A chain is immutable once built; matching borrows the tree and carries
/// all traversal state on the stack, so one chain can serve any number of
/// `find` calls against any number of trees.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Matches entry names of the current directory against one compiled
    /// component. Without a descendant this is a leaf and its matches are
    /// final results.
    Name {
        pattern: GlobPattern,
        descendant: Option<Box<Matcher>>,
    },
    /// `**`: applies the descendant to the current directory and, depth
    /// first, to every directory reachable below it.
    Recurse { descendant: Box<Matcher> },
    /// Ordered alternation; branch results concatenate without
    /// deduplication.
    Alternate { branches: Vec<Matcher> },
}

impl Matcher {
    /// Runs the remaining chain from `start`, returning matched entries in
    /// traversal order. An empty result is an ordinary outcome, not an
    /// error. Duplicates are possible when alternation branches overlap.
    pub fn find(&self, tree: &FakeTree, start: NodeId) -> Vec<NodeId> {
        match self {
            Matcher::Name {
                descendant: None, ..
            }
            | Matcher::Alternate { .. } => self.matches(tree, start),
            Matcher::Name {
                descendant: Some(inner),
                ..
            } => self
                .matches(tree, start)
                .into_iter()
                .flat_map(|matched| inner.find(tree, matched))
                .collect(),
            Matcher::Recurse { descendant } => self
                .matches(tree, start)
                .into_iter()
                .flat_map(|dir| descendant.find(tree, dir))
                .collect(),
        }
    }

    /// Entries of `entry` matched by this node alone.
    ///
    /// Anything that is not a directory or a symlink to one cannot be
    /// traversed and yields nothing; non-matching branches are pruned, not
    /// errors.
    pub fn matches(&self, tree: &FakeTree, entry: NodeId) -> Vec<NodeId> {
        let Some(dir) = tree.resolve_dir(entry) else {
            return Vec::new();
        };
        match self {
            Matcher::Name { pattern, .. } => tree.matching_names(dir, pattern),
            Matcher::Recurse { .. } => {
                let mut seen = FnvHashSet::default();
                let mut found = Vec::new();
                collect_dirs(tree, dir, &mut seen, &mut found);
                found
            }
            Matcher::Alternate { branches } => branches
                .iter()
                .flat_map(|branch| branch.find(tree, entry))
                .collect(),
        }
    }
}

/// Depth-first directory collection for `**`: the directory itself first,
/// then every non-hidden child directory (or symlink to one) in entry
/// order. The visited set breaks symlink-introduced cycles.
fn collect_dirs(
    tree: &FakeTree,
    dir: NodeId,
    seen: &mut FnvHashSet<NodeId>,
    found: &mut Vec<NodeId>,
) {
    if !seen.insert(dir) {
        return;
    }
    found.push(dir);
    for &child in tree.entries(dir) {
        if tree.node(child).is_hidden() {
            continue;
        }
        if let Some(subdir) = tree.resolve_dir(child) {
            collect_dirs(tree, subdir, seen, found);
        }
    }
}
