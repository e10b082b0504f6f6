//! Floating layer: windows that hang off the root above the tiled layer.

use super::container::{ContainerTree, NodeKey};
use super::geometry::Rect;
use super::LayoutElement;

impl<W: LayoutElement> ContainerTree<W> {
    /// Floating windows in stacking order.
    pub fn floating_windows(&self) -> Vec<NodeKey> {
        self.children(self.root)
            .iter()
            .copied()
            .filter(|key| self.is_floating(*key))
            .collect()
    }

    /// Most recently focused floating window that still floats.
    pub fn last_float(&self) -> Option<NodeKey> {
        self.last_float.filter(|key| self.is_floating(*key))
    }

    /// Floating window to focus next.
    ///
    /// From the tiled layer this enters the floating layer at the last focused floating window,
    /// or at the first one. From a floating window it cycles through the floating windows.
    pub fn float_focus(&self, forward: bool) -> Option<NodeKey> {
        let floats = self.floating_windows();
        if floats.is_empty() {
            return None;
        }

        if let Some(idx) = floats.iter().position(|key| *key == self.active) {
            let len = floats.len();
            let idx = if forward {
                (idx + 1) % len
            } else {
                (idx + len - 1) % len
            };
            return Some(floats[idx]);
        }

        self.last_float().or(floats.first().copied())
    }

    /// Moves a floating window to a new host-chosen rectangle.
    pub fn set_floating_rect(&mut self, key: NodeKey, rect: Rect) -> bool {
        match self.nodes.get_mut(key) {
            Some(node) if node.floating => node.slot = rect,
            _ => return false,
        }
        self.layout();
        true
    }
}
