//! Node payloads: entry kinds, metadata, and mode bits.

use std::time::{SystemTime, UNIX_EPOCH};

use bitflags::bitflags;
use thin_vec::ThinVec;

use super::id::{NodeId, OptionNodeId};

bitflags! {
    /// Unix-style mode word: file type bits plus permission bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FileMode: u32 {
        const TYPE_MASK    = 0o170000;
        const TYPE_DIR     = 0o040000;
        const TYPE_FILE    = 0o100000;
        const TYPE_SYMLINK = 0o120000;
        const PERM_MASK    = 0o777;
    }
}

impl FileMode {
    /// Directory mode derived from a umask (0o777 base).
    #[inline]
    pub fn directory(umask: u32) -> Self {
        Self::from_bits_retain(Self::TYPE_DIR.bits() | (0o777 & !umask))
    }

    /// Regular-file mode derived from a umask (0o666 base).
    #[inline]
    pub fn file(umask: u32) -> Self {
        Self::from_bits_retain(Self::TYPE_FILE.bits() | (0o666 & !umask))
    }

    /// Symlink mode; links are conventionally 0o777 regardless of umask.
    #[inline]
    pub fn symlink() -> Self {
        Self::from_bits_retain(Self::TYPE_SYMLINK.bits() | 0o777)
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.bits() & Self::TYPE_MASK.bits() == Self::TYPE_DIR.bits()
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        self.bits() & Self::TYPE_MASK.bits() == Self::TYPE_FILE.bits()
    }

    /// Returns the permission bits only.
    #[inline]
    pub fn permissions(&self) -> u32 {
        self.bits() & Self::PERM_MASK.bits()
    }
}

/// Identity of the simulated creating process.
///
/// New nodes capture uid, gid, and a umask-derived mode from this context.
/// Defaults model a root-owned process with the conventional 0o022 umask;
/// tests that care about ownership metadata supply their own.
#[derive(Debug, Clone, Copy)]
pub struct FsContext {
    pub umask: u32,
    pub uid: u32,
    pub gid: u32,
}

impl Default for FsContext {
    fn default() -> Self {
        Self {
            umask: 0o022,
            uid: 0,
            gid: 0,
        }
    }
}

/// Per-node metadata.
///
/// Timestamps are Unix seconds. Creation time is fixed at construction;
/// modification and access times are freely mutable by callers.
#[derive(Debug, Clone, Copy)]
pub struct NodeMetadata {
    ctime: u64,
    pub mtime: u64,
    pub atime: u64,
    pub mode: FileMode,
    pub uid: u32,
    pub gid: u32,
}

impl NodeMetadata {
    fn with_mode(mode: FileMode, context: &FsContext) -> Self {
        let now = unix_now();
        Self {
            ctime: now,
            mtime: now,
            atime: now,
            mode,
            uid: context.uid,
            gid: context.gid,
        }
    }

    /// Metadata for a new directory created under `context`.
    pub fn directory(context: &FsContext) -> Self {
        Self::with_mode(FileMode::directory(context.umask), context)
    }

    /// Metadata for a new regular file created under `context`.
    pub fn file(context: &FsContext) -> Self {
        Self::with_mode(FileMode::file(context.umask), context)
    }

    /// Metadata for a new symlink created under `context`.
    pub fn symlink(context: &FsContext) -> Self {
        Self::with_mode(FileMode::symlink(), context)
    }

    /// Returns the creation time (immutable after construction).
    #[inline]
    pub fn ctime(&self) -> u64 {
        self.ctime
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// What a node is: directory, regular file, or symlink.
#[derive(Debug, Clone)]
pub enum EntryKind {
    Directory,
    File { content: String },
    /// Symlink to another node. The target slot is a plain reference, never
    /// an ownership edge; subtree walks must not follow it.
    Symlink { target: NodeId },
}

/// A node in the fake filesystem tree.
pub struct FakeNode {
    name: String,
    parent: OptionNodeId,
    /// Child node ids in insertion order (empty for files and symlinks).
    pub(crate) children: ThinVec<NodeId>,
    kind: EntryKind,
    pub metadata: NodeMetadata,
}

impl FakeNode {
    /// Creates a directory node.
    pub fn directory(name: impl Into<String>, metadata: NodeMetadata) -> Self {
        Self::with_kind(name, EntryKind::Directory, metadata)
    }

    /// Creates a regular-file node.
    pub fn file(name: impl Into<String>, content: impl Into<String>, metadata: NodeMetadata) -> Self {
        Self::with_kind(
            name,
            EntryKind::File {
                content: content.into(),
            },
            metadata,
        )
    }

    /// Creates a symlink node pointing at `target`.
    pub fn symlink(name: impl Into<String>, target: NodeId, metadata: NodeMetadata) -> Self {
        Self::with_kind(name, EntryKind::Symlink { target }, metadata)
    }

    fn with_kind(name: impl Into<String>, kind: EntryKind, metadata: NodeMetadata) -> Self {
        Self {
            name: name.into(),
            parent: OptionNodeId::none(),
            children: ThinVec::new(),
            kind,
            metadata,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent.to_option()
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = OptionNodeId::from_option(parent);
    }

    #[inline]
    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        matches!(self.kind, EntryKind::Symlink { .. })
    }

    /// Returns true if the node name starts with a dot.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// Returns the symlink target, if this node is a symlink.
    #[inline]
    pub fn symlink_target(&self) -> Option<NodeId> {
        match &self.kind {
            EntryKind::Symlink { target } => Some(*target),
            _ => None,
        }
    }

    /// Returns the file content; directories and symlinks have none and
    /// render as the empty string.
    pub fn content(&self) -> &str {
        match &self.kind {
            EntryKind::File { content } => content,
            _ => "",
        }
    }

    /// Replaces the content of a file node. No-op for other kinds.
    pub fn set_content(&mut self, new_content: impl Into<String>) {
        if let EntryKind::File { content } = &mut self.kind {
            *content = new_content.into();
        }
    }

    /// Copies name, kind, metadata, and parent reference, leaving the child
    /// list empty. Used as the per-node step of subtree cloning.
    pub(crate) fn subtree_template(&self) -> FakeNode {
        FakeNode {
            name: self.name.clone(),
            parent: self.parent,
            children: ThinVec::new(),
            kind: self.kind.clone(),
            metadata: self.metadata,
        }
    }
}
