pub use crate::{
    Color, ItemContent, NodeId, Px, Tree, TreeConfig, TreeError, UpdateEvent, UpdateKind,
    Viewport, VisibleRows,
};
