//! Node index types for type-safe arena access.

/// A compact 32-bit index into the node arena.
///
/// Using u32 limits the tree to ~4 billion nodes, far more than any fake
/// filesystem needs. The u32::MAX value is reserved as the `OptionNodeId`
/// sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a new NodeId from a usize.
    ///
    /// # Panics
    /// Panics if `index >= u32::MAX` (reserved for the None sentinel).
    #[inline]
    pub fn new(index: usize) -> Self {
        assert!(
            index < u32::MAX as usize,
            "node id must be less than u32::MAX"
        );
        Self(index as u32)
    }

    /// Returns the index as a usize.
    #[inline]
    pub fn get(&self) -> usize {
        self.0 as usize
    }
}

/// An optional node id using u32::MAX as the None sentinel.
///
/// This keeps the parent slot of every node at 4 bytes instead of 8
/// (Option's discriminant would double it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct OptionNodeId(u32);

impl OptionNodeId {
    /// Creates a None value.
    #[inline]
    pub fn none() -> Self {
        Self(u32::MAX)
    }

    /// Creates a Some value from a NodeId.
    #[inline]
    pub fn some(id: NodeId) -> Self {
        Self(id.0)
    }

    /// Creates from an Option<NodeId>.
    #[inline]
    pub fn from_option(id: Option<NodeId>) -> Self {
        id.map_or(Self::none(), Self::some)
    }

    /// Converts to an Option<NodeId>.
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        if self.0 == u32::MAX {
            None
        } else {
            Some(NodeId(self.0))
        }
    }

    /// Returns true if this is the None sentinel.
    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

impl From<NodeId> for OptionNodeId {
    fn from(id: NodeId) -> Self {
        Self::some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_roundtrip() {
        let id = NodeId::new(42);
        assert_eq!(id.get(), 42);
    }

    #[test]
    #[should_panic(expected = "node id must be less than u32::MAX")]
    fn node_id_rejects_sentinel() {
        let _ = NodeId::new(u32::MAX as usize);
    }

    #[test]
    fn option_node_id_sentinel() {
        assert!(OptionNodeId::none().is_none());
        assert_eq!(OptionNodeId::none().to_option(), None);

        let id = NodeId::new(7);
        let some = OptionNodeId::some(id);
        assert!(!some.is_none());
        assert_eq!(some.to_option(), Some(id));
    }

    #[test]
    fn option_node_id_from_option() {
        assert_eq!(OptionNodeId::from_option(None).to_option(), None);
        let id = NodeId::new(3);
        assert_eq!(OptionNodeId::from_option(Some(id)).to_option(), Some(id));
    }
}
