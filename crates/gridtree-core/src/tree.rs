use slotmap::SlotMap;

use crate::content::{Cells, ItemContent};
use crate::event::{ListenerId, UpdateEvent, UpdateKind};
use crate::node::{Node, NodeFlags, NodeId};
use crate::{Color, Px, TreeConfig, TreeError};

/// Arena holding the root and every node created under it.
///
/// Nodes exist only for slots that were explicitly created or dereferenced
/// by a query; the rest are `None` slots counted by their parent.
pub struct Tree {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    pub(crate) root: NodeId,
    next_listener: ListenerId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self::from_valid_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Result<Self, TreeError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TreeConfig) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::root(config.default_row_height));
        Self {
            nodes,
            root,
            next_listener: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Panics if `id` was disposed.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Every live node, root included, in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn level(&self, id: NodeId) -> i32 {
        self.nodes[id].level
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.nodes[id].is_expanded()
    }

    pub fn is_materialized(&self, id: NodeId) -> bool {
        self.nodes[id].is_materialized()
    }

    pub fn content(&self, id: NodeId) -> &ItemContent {
        &self.nodes[id].content
    }

    pub fn children_len(&self, id: NodeId) -> usize {
        self.nodes[id].children.len()
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.nodes[id].has_children()
    }

    pub fn is_child_created(&self, parent: NodeId, index: usize) -> bool {
        matches!(self.nodes[parent].children.get(index), Some(Some(_)))
    }

    pub fn is_child_materialized(&self, parent: NodeId, index: usize) -> bool {
        match self.nodes[parent].children.get(index) {
            Some(Some(child)) => self.nodes[*child].is_materialized(),
            _ => false,
        }
    }

    pub fn default_height(&self) -> Px {
        // Only the root stores it; Tree construction guarantees it is set.
        self.nodes[self.root].default_height.unwrap_or(crate::config::DEFAULT_ROW_HEIGHT)
    }

    pub fn set_default_height(&mut self, id: NodeId, height: Px) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode)?;
        if !node.is_root() {
            return Err(TreeError::NotRoot);
        }
        if height <= 0 {
            return Err(TreeError::InvalidRowHeight(height));
        }
        node.default_height = Some(height);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Slot management
    // ---------------------------------------------------------------------

    /// Declares `count` children on `id`. Shrinking disposes whatever was
    /// materialized in the dropped slots.
    pub fn set_item_count(&mut self, id: NodeId, count: usize) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode)?;
        let kind = if node.children.len() > count {
            UpdateKind::Remove
        } else {
            UpdateKind::Add
        };
        let mut dropped = Vec::new();
        if count < node.children.len() {
            dropped.extend(node.children.drain(count..).flatten());
            for child in &dropped {
                node.expanded_children.remove(child);
            }
        } else {
            node.children.resize(count, None);
        }
        log::trace!(
            "set_item_count: {:?} -> {} ({} materialized dropped)",
            id,
            count,
            dropped.len()
        );
        for child in dropped {
            self.free_subtree(child);
        }
        self.dispatch(id, kind, None);
        Ok(())
    }

    /// Node for the data source's item at `parent[index]`.
    ///
    /// Reuses a materialized child, upgrades a placeholder in place, or
    /// creates a materialized node in the empty slot.
    pub fn create_child(&mut self, parent: NodeId, index: usize) -> Result<NodeId, TreeError> {
        let slot = self.slot(parent, index)?;
        match slot {
            Some(child) => {
                if !self.nodes[child].is_materialized() {
                    self.mark_materialized(child)?;
                }
                Ok(child)
            }
            None => self.insert_child(parent, index),
        }
    }

    /// Creates a materialized node at `parent[index]`.
    ///
    /// An occupied slot shifts right and the trailing slot falls off, keeping
    /// the declared count; that fires `Add`. Filling an empty slot fires
    /// nothing since the slot was already counted.
    pub fn insert_child(&mut self, parent: NodeId, index: usize) -> Result<NodeId, TreeError> {
        self.slot(parent, index)?;
        let child = self.alloc(parent, false);
        self.attach(parent, index, child);
        Ok(child)
    }

    /// Disposes `item`, which must be a direct child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, item: NodeId) -> Result<(), TreeError> {
        let actual = self
            .nodes
            .get(item)
            .ok_or(TreeError::UnknownNode)?
            .parent
            .ok_or(TreeError::RootHasNoParent)?;
        if actual != parent {
            return Err(TreeError::NotAChild);
        }
        self.dispose(item)
    }

    /// Destroys `id` and its subtree. The parent's slot is spliced out and an
    /// empty slot is appended, so the declared count is unchanged.
    pub fn dispose(&mut self, id: NodeId) -> Result<(), TreeError> {
        let parent = self
            .nodes
            .get(id)
            .ok_or(TreeError::UnknownNode)?
            .parent
            .ok_or(TreeError::RootHasNoParent)?;
        let p = &mut self.nodes[parent];
        p.expanded_children.remove(&id);
        match p.children.iter().position(|c| *c == Some(id)) {
            Some(index) => {
                p.children.remove(index);
                p.children.push(None);
            }
            None => log::warn!("dispose: {id:?} not found in its parent's slots"),
        }
        log::debug!("dispose: {id:?}");
        self.free_subtree(id);
        self.dispatch(parent, UpdateKind::Remove, Some(id));
        Ok(())
    }

    /// Resets `id` to placeholder content. Children are kept.
    pub fn clear(&mut self, id: NodeId) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode)?;
        node.flags.remove(NodeFlags::MATERIALIZED);
        node.content = ItemContent::placeholder();
        Ok(())
    }

    pub fn mark_materialized(&mut self, id: NodeId) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode)?;
        node.flags.insert(NodeFlags::MATERIALIZED);
        node.content.texts.clear();
        Ok(())
    }

    /// Current occupant of `parent[index]`; errors if the slot is not declared.
    fn slot(&self, parent: NodeId, index: usize) -> Result<Option<NodeId>, TreeError> {
        let node = self.nodes.get(parent).ok_or(TreeError::UnknownNode)?;
        node.children
            .get(index)
            .copied()
            .ok_or(TreeError::SlotOutOfRange {
                index,
                len: node.children.len(),
            })
    }

    pub(crate) fn alloc(&mut self, parent: NodeId, placeholder: bool) -> NodeId {
        let level = self.nodes[parent].level + 1;
        self.nodes.insert(Node::new(Some(parent), level, placeholder))
    }

    /// `index` must be a declared slot of `parent`.
    pub(crate) fn attach(&mut self, parent: NodeId, index: usize, child: NodeId) {
        let children = &mut self.nodes[parent].children;
        if children[index].is_some() {
            children.insert(index, Some(child));
            let overflow = children.pop().flatten();
            if let Some(overflow) = overflow {
                self.nodes[parent].expanded_children.remove(&overflow);
                self.free_subtree(overflow);
            }
            self.dispatch(parent, UpdateKind::Add, Some(child));
        } else {
            children[index] = Some(child);
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children.into_iter().flatten());
            }
        }
    }

    // ---------------------------------------------------------------------
    // Expand / collapse
    // ---------------------------------------------------------------------

    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode)?;
        if node.is_expanded() == expanded {
            return Ok(());
        }
        let parent = node.parent.ok_or(TreeError::RootHasNoParent)?;
        node.flags.set(NodeFlags::EXPANDED, expanded);
        let waypoints = &mut self.nodes[parent].expanded_children;
        let kind = if expanded {
            waypoints.insert(id);
            UpdateKind::Expanded
        } else {
            waypoints.remove(&id);
            UpdateKind::Collapsed
        };
        self.dispatch(id, kind, None);
        Ok(())
    }

    /// True if every ancestor strictly between `id` and the root is expanded.
    pub fn is_displayable(&self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        match node.parent {
            None => true,
            Some(parent) if parent == self.root => true,
            Some(parent) => self.nodes[parent].is_expanded() && self.is_displayable(parent),
        }
    }

    /// True if `ancestor` is somewhere on the parent chain of `id`.
    pub fn is_child_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        match self.nodes[id].parent {
            None => false,
            Some(parent) if parent == ancestor => true,
            Some(parent) => parent != self.root && self.is_child_of(parent, ancestor),
        }
    }

    // ---------------------------------------------------------------------
    // Content
    // ---------------------------------------------------------------------

    fn update_content(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut ItemContent),
    ) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode)?;
        f(&mut node.content);
        self.dispatch(id, UpdateKind::Content, None);
        Ok(())
    }

    pub fn set_texts(&mut self, id: NodeId, texts: Cells<String>) -> Result<(), TreeError> {
        self.update_content(id, |c| c.texts = texts)
    }

    pub fn set_images(&mut self, id: NodeId, images: Cells<String>) -> Result<(), TreeError> {
        self.update_content(id, |c| c.images = images)
    }

    pub fn set_font(&mut self, id: NodeId, font: Option<String>) -> Result<(), TreeError> {
        self.update_content(id, |c| c.font = font)
    }

    pub fn set_cell_fonts(&mut self, id: NodeId, fonts: Cells<String>) -> Result<(), TreeError> {
        self.update_content(id, |c| c.cell_fonts = fonts)
    }

    pub fn set_foreground(&mut self, id: NodeId, color: Option<Color>) -> Result<(), TreeError> {
        self.update_content(id, |c| c.foreground = color)
    }

    pub fn set_cell_foregrounds(
        &mut self,
        id: NodeId,
        colors: Cells<Color>,
    ) -> Result<(), TreeError> {
        self.update_content(id, |c| c.cell_foregrounds = colors)
    }

    pub fn set_background(&mut self, id: NodeId, color: Option<Color>) -> Result<(), TreeError> {
        self.update_content(id, |c| c.background = color)
    }

    pub fn set_cell_backgrounds(
        &mut self,
        id: NodeId,
        colors: Cells<Color>,
    ) -> Result<(), TreeError> {
        self.update_content(id, |c| c.cell_backgrounds = colors)
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<(), TreeError> {
        self.update_content(id, |c| c.checked = checked)
    }

    pub fn set_grayed(&mut self, id: NodeId, grayed: bool) -> Result<(), TreeError> {
        self.update_content(id, |c| c.grayed = grayed)
    }

    pub fn set_cell_checked(&mut self, id: NodeId, checked: Vec<bool>) -> Result<(), TreeError> {
        self.update_content(id, |c| c.cell_checked = checked)
    }

    pub fn toggle_cell_checked(&mut self, id: NodeId, column: usize) -> Result<(), TreeError> {
        self.update_content(id, |c| c.toggle_cell_checked(column))
    }

    pub fn set_cell_grayed(&mut self, id: NodeId, grayed: Vec<bool>) -> Result<(), TreeError> {
        self.update_content(id, |c| c.cell_grayed = grayed)
    }

    /// Style variant tag. Not a rendering change by itself, so no update fires.
    pub fn set_variant(&mut self, id: NodeId, variant: Option<String>) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode)?;
        node.content.variant = variant;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Update notifications
    // ---------------------------------------------------------------------

    /// Registers `f` on `id`. It sees updates originating at `id` or any
    /// descendant, synchronously, during the mutating call.
    pub fn add_listener(
        &mut self,
        id: NodeId,
        f: impl Fn(&UpdateEvent) + 'static,
    ) -> Result<ListenerId, TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode)?;
        let listener = self.next_listener;
        self.next_listener += 1;
        node.listeners.push((listener, Box::new(f)));
        Ok(listener)
    }

    /// Returns false if the listener was not registered on `id`.
    pub fn remove_listener(&mut self, id: NodeId, listener: ListenerId) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        let before = node.listeners.len();
        node.listeners.retain(|(l, _)| *l != listener);
        node.listeners.len() != before
    }

    /// Bubbles from `target` to the root. Each node drops its caches (for
    /// structural kinds) before its own listeners run.
    pub(crate) fn dispatch(&self, target: NodeId, kind: UpdateKind, related: Option<NodeId>) {
        let event = UpdateEvent {
            kind,
            target,
            related,
        };
        let mut current = Some(target);
        while let Some(id) = current {
            let Some(node) = self.nodes.get(id) else {
                break;
            };
            if kind.is_structural() {
                node.invalidate();
            }
            for (_, listener) in &node.listeners {
                listener(&event);
            }
            current = node.parent;
        }
    }
}
