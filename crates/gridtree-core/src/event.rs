use crate::NodeId;

/// What a mutation did. Everything except `Content` changes tree shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    Add,
    Remove,
    Expanded,
    Collapsed,
    Content,
}

impl UpdateKind {
    /// Structural updates invalidate visible-count and index caches on the
    /// way up; content updates leave them alone.
    pub fn is_structural(self) -> bool {
        !matches!(self, UpdateKind::Content)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UpdateKind::Add => "add",
            UpdateKind::Remove => "remove",
            UpdateKind::Expanded => "expanded",
            UpdateKind::Collapsed => "collapsed",
            UpdateKind::Content => "content",
        }
    }
}

/// Delivered to every listener on the path from `target` up to the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateEvent {
    pub kind: UpdateKind,
    /// The node whose state changed (for add/remove: the parent).
    pub target: NodeId,
    /// The child that was added or removed, if any.
    pub related: Option<NodeId>,
}

pub type ListenerId = u64;

pub type Listener = Box<dyn Fn(&UpdateEvent)>;
