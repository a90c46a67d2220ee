use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};

use bitflags::bitflags;
use slotmap::new_key_type;

use crate::Px;
use crate::content::ItemContent;
use crate::event::{Listener, ListenerId};

new_key_type! {
    /// Handle into the node arena. Stable until the node is disposed.
    pub struct NodeId;
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// Children are visible. Always set on the root.
        const EXPANDED = 1 << 0;
        /// Content was pushed by the data source (vs. a synthesized placeholder).
        const MATERIALIZED = 1 << 1;
    }
}

/// One tree item. Owned by the [`Tree`](crate::Tree) arena; read it through
/// [`Tree::node`](crate::Tree::node) and mutate it through `Tree` methods.
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) level: i32,
    /// Length is the declared child count; `None` slots are not materialized.
    pub(crate) children: Vec<Option<NodeId>>,
    pub(crate) flags: NodeFlags,
    /// Only the root carries a row height.
    pub(crate) default_height: Option<Px>,

    // Derived indexes. Cleared by structural updates bubbling through this node.
    pub(crate) visible_count: Cell<Option<usize>>,
    pub(crate) index_cache: RefCell<HashMap<NodeId, usize>>,
    pub(crate) expanded_children: BTreeSet<NodeId>,

    pub(crate) listeners: Vec<(ListenerId, Listener)>,
    pub(crate) content: ItemContent,
}

impl Node {
    pub(crate) fn root(row_height: Px) -> Self {
        let mut node = Self::new(None, -1, false);
        node.flags.insert(NodeFlags::EXPANDED);
        node.default_height = Some(row_height);
        node
    }

    pub(crate) fn new(parent: Option<NodeId>, level: i32, placeholder: bool) -> Self {
        let (flags, content) = if placeholder {
            (NodeFlags::empty(), ItemContent::placeholder())
        } else {
            (NodeFlags::MATERIALIZED, ItemContent::default())
        };
        Self {
            parent,
            level,
            children: Vec::new(),
            flags,
            default_height: None,
            visible_count: Cell::new(None),
            index_cache: RefCell::new(HashMap::new()),
            expanded_children: BTreeSet::new(),
            listeners: Vec::new(),
            content,
        }
    }

    pub(crate) fn invalidate(&self) {
        self.visible_count.set(None);
        self.index_cache.borrow_mut().clear();
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Depth below the root; the root itself is `-1`.
    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn is_root(&self) -> bool {
        self.level < 0
    }

    pub fn is_expanded(&self) -> bool {
        self.flags.contains(NodeFlags::EXPANDED)
    }

    pub fn is_materialized(&self) -> bool {
        self.flags.contains(NodeFlags::MATERIALIZED)
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn children(&self) -> &[Option<NodeId>] {
        &self.children
    }

    pub fn children_len(&self) -> usize {
        self.children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn content(&self) -> &ItemContent {
        &self.content
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("level", &self.level)
            .field("flags", &self.flags)
            .field("children", &self.children.len())
            .field("text", &self.content.text(0))
            .finish()
    }
}
