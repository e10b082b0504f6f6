//! Container tree stored in a SlotMap.
//!
//! Containers form a tree where:
//! - leaf nodes wrap client windows,
//! - internal nodes arrange their children with a [`Layout`],
//! - every node with children remembers which children were focused most recently, so a focus
//!   chain runs from the root down to the active node.
//!
//! Floating windows are leaves hanging directly off the root. They are skipped when walking
//! tiled siblings and are placed by the host rather than by the layout.
//!
//! Nodes are addressed by versioned [`NodeKey`]s, so a key held across the removal of its node is
//! detected as stale instead of silently pointing at a new node.

use std::fmt::{Display, Write as _};
use std::rc::Rc;

use glam::Vec2;
use slotmap::{new_key_type, SlotMap};
use thiserror::Error;
use tracing::trace;
use trellis_ipc::{LayoutTreeLayout, LayoutTreeNode};

use super::geometry::Rect;
use super::{LayoutElement, Options};

// ============================================================================
// SlotMap Key Types
// ============================================================================

new_key_type! {
    /// Key to reference a node in the container tree
    pub struct NodeKey;
}

// ============================================================================
// Container Types and Enums
// ============================================================================

/// Arrangement of a container's children.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Horizontal split - children arranged left to right
    #[default]
    SplitH,
    /// Vertical split - children arranged top to bottom
    SplitV,
}

/// Direction for navigation and resizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Where a moved node is linked into its new parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Right after the parent's focused child, or last if no child was focused yet.
    Focus,
    /// Right after this child. Falls back to [`Anchor::Focus`] if it isn't a child.
    After(NodeKey),
    /// After the last child.
    End,
}

/// Reasons a node can't be moved.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("node is no longer in the tree")]
    StaleNode,
    #[error("the root can't be moved")]
    Root,
    #[error("a node can't be moved into its own subtree")]
    IntoDescendant,
    #[error("floating windows can't be split")]
    Floating,
}

/// One node of the tree: a container, or a leaf holding a client.
#[derive(Debug)]
pub struct ContainerNode<W: LayoutElement> {
    pub(super) parent: Option<NodeKey>,
    pub(super) children: Vec<NodeKey>,
    /// Children in the order they were focused, most recent last.
    pub(super) focus_queue: Vec<NodeKey>,
    pub(super) layout: Layout,
    pub(super) canvas_offset: Vec2,
    pub(super) canvas_extent: Vec2,
    pub(super) floating: bool,
    /// Next window opens as a split of this node.
    pub(super) split_armed: bool,
    pub(super) client: Option<W>,
    /// Rectangle assigned by the parent's layout.
    pub(super) slot: Rect,
    /// Rectangle after canvas adjustments.
    pub(super) geometry: Rect,
}

/// Tree of containers for one output.
#[derive(Debug)]
pub struct ContainerTree<W: LayoutElement> {
    /// SlotMap storing all nodes in the tree
    pub(super) nodes: SlotMap<NodeKey, ContainerNode<W>>,
    /// Root container; it is never a client and never floats.
    pub(super) root: NodeKey,
    /// Current focus, always a live node.
    pub(super) active: NodeKey,
    /// Most recently focused floating window.
    pub(super) last_float: Option<NodeKey>,
    pub(super) options: Rc<Options>,
}

// ============================================================================
// ContainerNode Implementation
// ============================================================================

impl<W: LayoutElement> ContainerNode<W> {
    fn new(layout: Layout, client: Option<W>) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            focus_queue: Vec::new(),
            layout,
            canvas_offset: Vec2::ZERO,
            canvas_extent: Vec2::ZERO,
            floating: false,
            split_armed: false,
            client,
            slot: Rect::default(),
            geometry: Rect::default(),
        }
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn client(&self) -> Option<&W> {
        self.client.as_ref()
    }

    pub fn is_floating(&self) -> bool {
        self.floating
    }

    pub fn split_armed(&self) -> bool {
        self.split_armed
    }

    pub fn canvas_offset(&self) -> Vec2 {
        self.canvas_offset
    }

    pub fn canvas_extent(&self) -> Vec2 {
        self.canvas_extent
    }

    pub fn slot(&self) -> Rect {
        self.slot
    }

    /// Rectangle the node occupies, in normalized output coordinates.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }
}

// ============================================================================
// ContainerTree Implementation
// ============================================================================

impl<W: LayoutElement> ContainerTree<W> {
    pub fn new(options: Rc<Options>) -> Self {
        let mut nodes = SlotMap::with_key();

        let mut root = ContainerNode::new(options.default_layout, None);
        root.slot = Rect::UNIT;
        root.geometry = Rect::UNIT;
        let root = nodes.insert(root);

        Self {
            nodes,
            root,
            active: root,
            last_float: None,
            options,
        }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// The current focus.
    pub fn active(&self) -> NodeKey {
        self.active
    }

    pub fn options(&self) -> &Rc<Options> {
        &self.options
    }

    pub fn update_options(&mut self, options: Rc<Options>) {
        self.options = options;
        self.layout();
    }

    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    pub fn node(&self, key: NodeKey) -> Option<&ContainerNode<W>> {
        self.nodes.get(key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key)?.parent
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes
            .get(key)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// The focused child of a node: the most recently focused one, or the first child if none
    /// was focused yet. Leaves have no focus.
    pub fn focus_of(&self, key: NodeKey) -> Option<NodeKey> {
        let node = self.nodes.get(key)?;
        node.focus_queue.last().or(node.children.first()).copied()
    }

    /// Like [`Self::focus_of`], but ignores floating children.
    pub(super) fn tiled_focus_of(&self, key: NodeKey) -> Option<NodeKey> {
        let node = self.nodes.get(key)?;
        node.focus_queue
            .iter()
            .rev()
            .chain(node.children.iter())
            .copied()
            .find(|child| !self.is_floating(*child))
    }

    pub fn is_floating(&self, key: NodeKey) -> bool {
        self.nodes.get(key).is_some_and(|node| node.floating)
    }

    pub fn client(&self, key: NodeKey) -> Option<&W> {
        self.nodes.get(key)?.client.as_ref()
    }

    pub fn client_mut(&mut self, key: NodeKey) -> Option<&mut W> {
        self.nodes.get_mut(key)?.client.as_mut()
    }

    /// Whether `ancestor` lies on the path from `key` to the root, excluding `key` itself.
    pub fn is_ancestor(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut current = self.parent(key);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Keys of a subtree in depth-first order, starting with `key`.
    pub fn subtree(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack = vec![key];
        while let Some(key) = stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            out.push(key);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    pub fn find_window(&self, window_id: &W::Id) -> Option<NodeKey> {
        self.nodes
            .iter()
            .find(|(_, node)| node.client.as_ref().is_some_and(|c| c.id() == window_id))
            .map(|(key, _)| key)
    }

    /// All windows in tree order.
    pub fn windows(&self) -> Vec<&W> {
        self.subtree(self.root)
            .into_iter()
            .filter_map(|key| self.client(key))
            .collect()
    }

    pub fn window_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|node| node.client.is_some())
            .count()
    }

    // ========================================================================
    // Siblings
    // ========================================================================

    /// Siblings of a node in its own layer (tiled or floating), and the node's index among them.
    fn peers(&self, key: NodeKey) -> Option<(Vec<NodeKey>, usize)> {
        let node = self.nodes.get(key)?;
        let parent = self.nodes.get(node.parent?)?;

        let peers: Vec<NodeKey> = parent
            .children
            .iter()
            .copied()
            .filter(|child| self.is_floating(*child) == node.floating)
            .collect();
        let idx = peers.iter().position(|child| *child == key)?;
        Some((peers, idx))
    }

    /// Next sibling in the same layer, without wrapping around.
    pub fn next_sibling(&self, key: NodeKey) -> Option<NodeKey> {
        let (peers, idx) = self.peers(key)?;
        peers.get(idx + 1).copied()
    }

    /// Previous sibling in the same layer, without wrapping around.
    pub fn prev_sibling(&self, key: NodeKey) -> Option<NodeKey> {
        let (peers, idx) = self.peers(key)?;
        idx.checked_sub(1).and_then(|idx| peers.get(idx).copied())
    }

    /// Next sibling in the same layer, wrapping around to the first one.
    ///
    /// Returns `key` itself for the root and for an only child.
    pub fn next_cyclic(&self, key: NodeKey) -> NodeKey {
        match self.peers(key) {
            Some((peers, idx)) => peers[(idx + 1) % peers.len()],
            None => key,
        }
    }

    /// Previous sibling in the same layer, wrapping around to the last one.
    ///
    /// Returns `key` itself for the root and for an only child.
    pub fn prev_cyclic(&self, key: NodeKey) -> NodeKey {
        match self.peers(key) {
            Some((peers, idx)) => peers[(idx + peers.len() - 1) % peers.len()],
            None => key,
        }
    }

    /// Swaps a node with its cyclic next sibling.
    pub fn swap_with_next(&mut self, key: NodeKey) -> bool {
        let other = self.next_cyclic(key);
        self.swap_siblings(key, other)
    }

    /// Swaps a node with its cyclic previous sibling.
    pub fn swap_with_prev(&mut self, key: NodeKey) -> bool {
        let other = self.prev_cyclic(key);
        self.swap_siblings(key, other)
    }

    fn swap_siblings(&mut self, a: NodeKey, b: NodeKey) -> bool {
        if a == b {
            return false;
        }
        let Some(parent) = self.parent(a) else {
            return false;
        };
        let Some(node) = self.nodes.get_mut(parent) else {
            return false;
        };

        let a_idx = node.children.iter().position(|child| *child == a);
        let b_idx = node.children.iter().position(|child| *child == b);
        let (Some(a_idx), Some(b_idx)) = (a_idx, b_idx) else {
            return false;
        };

        node.children.swap(a_idx, b_idx);
        trace!("swapped {a:?} with {b:?}");
        self.layout();
        true
    }

    // ========================================================================
    // Focus
    // ========================================================================

    /// Makes `key` the current focus, updating the focus chain of every ancestor.
    pub fn focus(&mut self, key: NodeKey) -> bool {
        if !self.contains(key) {
            return false;
        }

        let mut child = key;
        while let Some(parent) = self.parent(child) {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.focus_queue.retain(|k| *k != child);
                node.focus_queue.push(child);
            }
            child = parent;
        }

        if self.is_floating(key) {
            self.last_float = Some(key);
        }
        self.active = key;
        trace!("focused {key:?}");
        true
    }

    /// Follows the focus chain from the root, stopping at the current focus or at a leaf.
    pub fn deep_focus(&self) -> NodeKey {
        let mut current = self.root;
        while current != self.active {
            match self.focus_of(current) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// Deepest focused node of the tiled layer.
    pub fn tiled_focus(&self) -> NodeKey {
        let mut current = self.root;
        while let Some(next) = self.tiled_focus_of(current) {
            current = next;
        }
        current
    }

    /// Geometric neighbour of a node in a direction.
    ///
    /// Climbs until an ancestor laid out along the direction has a sibling of the path node on
    /// that side, then descends: along the axis into the child closest to where we came from,
    /// across it into the remembered focus.
    pub fn adjacent(&self, key: NodeKey, direction: Direction) -> Option<NodeKey> {
        if key == self.root || self.is_floating(key) {
            return None;
        }

        let axis = direction.axis();

        let mut path = key;
        let base = loop {
            let parent = self.parent(path)?;
            if self.nodes.get(parent)?.layout.axis() == axis {
                let sibling = if direction.is_backward() {
                    self.prev_sibling(path)
                } else {
                    self.next_sibling(path)
                };
                if let Some(sibling) = sibling {
                    break sibling;
                }
            }
            path = parent;
        };

        let mut current = base;
        while let Some(node) = self.nodes.get(current) {
            let next = if node.layout.axis() == axis || node.focus_queue.is_empty() {
                if direction.is_backward() {
                    node.children.last()
                } else {
                    node.children.first()
                }
            } else {
                node.focus_queue.last()
            };

            match next {
                Some(next) => current = *next,
                None => break,
            }
        }

        Some(current)
    }

    // ========================================================================
    // Structural primitives
    // ========================================================================

    fn alloc(&mut self, client: Option<W>) -> NodeKey {
        self.nodes
            .insert(ContainerNode::new(self.options.default_layout, client))
    }

    /// Unlinks a node from its parent, returning the parent.
    fn detach(&mut self, key: NodeKey) -> Option<NodeKey> {
        let parent = self.nodes.get_mut(key)?.parent.take()?;
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|child| *child != key);
            node.focus_queue.retain(|child| *child != key);
        }
        Some(parent)
    }

    /// Links a node into `parent` at `anchor`.
    fn attach(&mut self, key: NodeKey, parent: NodeKey, anchor: Anchor) {
        let Some(node) = self.nodes.get_mut(parent) else {
            return;
        };

        let position = |child: &NodeKey| node.children.iter().position(|c| c == child);
        let idx = match anchor {
            Anchor::After(after) => position(&after)
                .or_else(|| node.focus_queue.last().and_then(position)),
            Anchor::Focus => node.focus_queue.last().and_then(position),
            Anchor::End => None,
        }
        .map_or(node.children.len(), |idx| idx + 1);
        node.children.insert(idx, key);

        if let Some(child) = self.nodes.get_mut(key) {
            child.parent = Some(parent);
        }
    }

    /// Puts a new container in place of a leaf, with the leaf as its only child.
    fn wrap(&mut self, leaf: NodeKey) -> Option<NodeKey> {
        let parent = self.parent(leaf)?;
        let slot = self.nodes.get(leaf)?.slot;

        let wrapper = self.alloc(None);
        let parent_node = self.nodes.get_mut(parent)?;
        for key in parent_node
            .children
            .iter_mut()
            .chain(parent_node.focus_queue.iter_mut())
        {
            if *key == leaf {
                *key = wrapper;
            }
        }

        if let Some(node) = self.nodes.get_mut(wrapper) {
            node.parent = Some(parent);
            node.children.push(leaf);
            node.slot = slot;
        }
        if let Some(node) = self.nodes.get_mut(leaf) {
            node.parent = Some(wrapper);
        }

        trace!("wrapped {leaf:?} in {wrapper:?}");
        Some(wrapper)
    }

    /// Frees `key` and its ancestors while they are empty containers. Returns the first
    /// ancestor that survives.
    fn prune(&mut self, mut key: NodeKey) -> NodeKey {
        while key != self.root
            && self
                .nodes
                .get(key)
                .is_some_and(|node| node.children.is_empty() && node.client.is_none())
        {
            let Some(parent) = self.detach(key) else {
                break;
            };
            self.nodes.remove(key);
            trace!("pruned empty container {key:?}");
            key = parent;
        }
        key
    }

    /// Re-threads the focus chain after a structural change. If the focused node was freed, the
    /// focus moves into `survivor` instead.
    fn repair_active(&mut self, survivor: NodeKey) {
        let mut target = self.active;
        if !self.contains(target) {
            target = if self.contains(survivor) {
                survivor
            } else {
                self.root
            };
            while let Some(next) = self.focus_of(target) {
                target = next;
            }
        }
        self.focus(target);
    }

    /// Moves a node under `dest`.
    ///
    /// If `dest` is a client leaf, it is first wrapped in a new container which takes its place,
    /// and the node becomes the leaf's sibling. A moved floating window becomes tiled. Containers
    /// left empty are freed.
    ///
    /// Returns the node's new parent. The tree is left untouched on error.
    pub fn move_to(&mut self, key: NodeKey, dest: NodeKey) -> Result<NodeKey, MoveError> {
        self.move_with(key, dest, Anchor::Focus)
    }

    /// Like [`Self::move_to`], linking the node at `anchor` inside its new parent.
    pub fn move_with(
        &mut self,
        key: NodeKey,
        dest: NodeKey,
        anchor: Anchor,
    ) -> Result<NodeKey, MoveError> {
        if !self.contains(key) || !self.contains(dest) {
            return Err(MoveError::StaleNode);
        }
        if key == self.root {
            return Err(MoveError::Root);
        }
        if key == dest || self.is_ancestor(key, dest) {
            return Err(MoveError::IntoDescendant);
        }

        let dest_is_leaf = self.client(dest).is_some();
        if dest_is_leaf && self.is_floating(dest) {
            return Err(MoveError::Floating);
        }

        let parent = if dest_is_leaf {
            self.wrap(dest).ok_or(MoveError::StaleNode)?
        } else {
            dest
        };

        let old_parent = self.detach(key);
        if let Some(node) = self.nodes.get_mut(key) {
            node.floating = false;
        }
        if self.last_float == Some(key) {
            self.last_float = None;
        }
        self.attach(key, parent, anchor);
        trace!("moved {key:?} under {parent:?}");

        let survivor = old_parent.map_or(self.root, |old_parent| self.prune(old_parent));
        self.repair_active(survivor);

        self.layout();
        Ok(parent)
    }

    // ========================================================================
    // Management methods
    // ========================================================================

    /// Adds a tiled window under `parent` and returns its node. The window is not focused.
    ///
    /// A client leaf `parent` is split: it is wrapped in a new container together with the new
    /// window. Floating windows are never split, their windows open in the root instead.
    pub fn insert_window(&mut self, parent: NodeKey, client: W) -> NodeKey {
        let mut parent = if self.contains(parent) {
            parent
        } else {
            self.root
        };

        if self.client(parent).is_some() {
            parent = if self.is_floating(parent) {
                self.root
            } else {
                self.wrap(parent).unwrap_or(self.root)
            };
        }

        let key = self.alloc(Some(client));
        self.attach(key, parent, Anchor::Focus);
        self.layout();
        key
    }

    /// Adds a floating window at a host-chosen rectangle and returns its node. The window is not
    /// focused.
    pub fn insert_floating(&mut self, client: W, rect: Rect) -> NodeKey {
        let key = self.alloc(Some(client));
        let root = self.root;

        if let Some(node) = self.nodes.get_mut(key) {
            node.floating = true;
            node.parent = Some(root);
            node.slot = rect;
        }
        if let Some(node) = self.nodes.get_mut(root) {
            node.children.push(key);
        }

        self.layout();
        key
    }

    /// Remove a window by ID, returns the removed client
    pub fn remove_window(&mut self, window_id: &W::Id) -> Option<W> {
        let key = self.find_window(window_id)?;

        let parent = self.detach(key);
        let node = self.nodes.remove(key)?;
        if self.last_float == Some(key) {
            self.last_float = None;
        }

        let survivor = parent.map_or(self.root, |parent| self.prune(parent));
        self.repair_active(survivor);

        self.layout();
        node.client
    }

    /// Asks every client under `key` to close.
    pub fn close(&mut self, key: NodeKey) {
        for key in self.subtree(key) {
            if let Some(client) = self.client_mut(key) {
                client.request_close();
            }
        }
    }

    pub fn toggle_split_armed(&mut self, key: NodeKey) -> bool {
        let Some(node) = self.nodes.get_mut(key) else {
            return false;
        };
        node.split_armed = !node.split_armed;
        node.split_armed
    }

    /// Clears the split flag of a node, returning whether it was set.
    pub fn take_split_armed(&mut self, key: NodeKey) -> bool {
        self.nodes
            .get_mut(key)
            .is_some_and(|node| std::mem::take(&mut node.split_armed))
    }

    /// Toggles fullscreen on the client of a leaf.
    pub fn toggle_fullscreen(&mut self, key: NodeKey) -> bool {
        let Some(client) = self.client_mut(key) else {
            return false;
        };
        let fullscreen = !client.is_fullscreen();
        client.set_fullscreen(fullscreen);
        self.layout();
        true
    }

    // ========================================================================
    // Debugging
    // ========================================================================

    #[cfg(test)]
    pub fn verify_invariants(&self) {
        use std::collections::HashSet;

        let root = &self.nodes[self.root];
        assert!(root.parent.is_none(), "root must not have a parent");
        assert!(!root.floating, "root must not float");
        assert!(root.client.is_none(), "root must not hold a client");
        assert!(self.contains(self.active), "active node must be live");

        let mut seen = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            assert!(seen.insert(key), "{key:?} is reachable twice");

            let node = &self.nodes[key];
            if node.client.is_some() {
                assert!(node.children.is_empty(), "client leaf {key:?} has children");
            } else if key != self.root {
                assert!(!node.children.is_empty(), "empty container {key:?}");
            }

            if node.floating {
                assert_eq!(node.parent, Some(self.root), "floating {key:?} not under root");
                assert!(node.client.is_some(), "floating {key:?} is not a window");
            }

            let queue: HashSet<_> = node.focus_queue.iter().collect();
            assert_eq!(queue.len(), node.focus_queue.len(), "duplicate focus entries");
            for focus in &node.focus_queue {
                assert!(node.children.contains(focus), "focus of {key:?} is not a child");
            }

            for child in &node.children {
                assert_eq!(
                    self.nodes.get(*child).and_then(|child| child.parent),
                    Some(key),
                    "bad parent link of {child:?}"
                );
                stack.push(*child);
            }
        }

        assert_eq!(seen.len(), self.nodes.len(), "unreachable nodes in storage");
    }
}

impl<W> ContainerTree<W>
where
    W: LayoutElement,
    W::Id: Display,
{
    /// Text dump of the tree: one node per line, `*` marks the current focus.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        self.debug_tree_node(self.root, 0, &mut out);
        out
    }

    fn debug_tree_node(&self, key: NodeKey, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };

        let indent = "  ".repeat(depth);
        let _ = match &node.client {
            Some(client) => write!(out, "{indent}Window {}", client.id()),
            None => write!(out, "{indent}{}", layout_label(node.layout)),
        };
        if node.floating {
            out.push_str(" floating");
        }
        if key == self.active {
            out.push_str(" *");
        }
        out.push('\n');

        for child in &node.children {
            self.debug_tree_node(*child, depth + 1, out);
        }
    }
}

impl<W> ContainerTree<W>
where
    W: LayoutElement,
    W::Id: Copy + Into<u64>,
{
    /// Snapshot of the tree for the host.
    pub fn layout_tree(&self) -> LayoutTreeNode {
        self.build_layout_tree_node(self.root)
    }

    fn build_layout_tree_node(&self, key: NodeKey) -> LayoutTreeNode {
        let Some(node) = self.nodes.get(key) else {
            return LayoutTreeNode {
                layout: LayoutTreeLayout::SplitH,
                window_id: None,
                title: None,
                focused: false,
                floating: false,
                split_armed: false,
                canvas_offset: (0., 0.),
                canvas_extent: (0., 0.),
                geometry: (0., 0., 0., 0.),
                children: Vec::new(),
            };
        };

        let geometry = node.geometry;
        LayoutTreeNode {
            layout: layout_to_ipc(node.layout),
            window_id: node.client.as_ref().map(|client| (*client.id()).into()),
            title: node.client.as_ref().and_then(|client| client.title()),
            focused: key == self.active,
            floating: node.floating,
            split_armed: node.split_armed,
            canvas_offset: node.canvas_offset.into(),
            canvas_extent: node.canvas_extent.into(),
            geometry: (
                geometry.loc.x,
                geometry.loc.y,
                geometry.size.x,
                geometry.size.y,
            ),
            children: node
                .children
                .iter()
                .map(|child| self.build_layout_tree_node(*child))
                .collect(),
        }
    }
}

fn layout_to_ipc(layout: Layout) -> LayoutTreeLayout {
    match layout {
        Layout::SplitH => LayoutTreeLayout::SplitH,
        Layout::SplitV => LayoutTreeLayout::SplitV,
    }
}

fn layout_label(layout: Layout) -> &'static str {
    match layout {
        Layout::SplitH => "SplitH",
        Layout::SplitV => "SplitV",
    }
}

// ============================================================================
// Additional helper implementations
// ============================================================================

impl Layout {
    pub fn opposite(self) -> Self {
        match self {
            Layout::SplitH => Layout::SplitV,
            Layout::SplitV => Layout::SplitH,
        }
    }

    /// Index of the axis children are arranged along.
    pub fn axis(self) -> usize {
        match self {
            Layout::SplitH => 0,
            Layout::SplitV => 1,
        }
    }
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Check if direction is horizontal
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Index of the geometry component the direction moves along.
    pub fn axis(self) -> usize {
        if self.is_horizontal() {
            0
        } else {
            1
        }
    }

    /// Whether the direction points towards the origin of its axis.
    pub fn is_backward(self) -> bool {
        matches!(self, Direction::Left | Direction::Up)
    }
}
