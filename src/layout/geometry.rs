//! Placement of nodes inside their parents.
//!
//! Every node gets a slot from its parent's layout. Its canvas offset and extent then move and
//! shrink the slot into the node's effective rectangle, which is split between its tiled
//! children in turn. Children never get less than their minimum size; when the minimums don't
//! fit, the children overlap evenly instead.

use glam::Vec2;
use tracing::trace;

use super::container::{ContainerTree, Direction, Layout, NodeKey};
use super::LayoutElement;

/// Axis-aligned rectangle in normalized output coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    pub loc: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// The whole output.
    pub const UNIT: Self = Self {
        loc: Vec2::ZERO,
        size: Vec2::ONE,
    };

    pub const fn new(loc: Vec2, size: Vec2) -> Self {
        Self { loc, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    pub fn end(&self) -> Vec2 {
        self.loc + self.size
    }

    /// Applies canvas adjustments: `offset` moves the origin, `extent` is taken off the size.
    pub fn adjusted(self, offset: Vec2, extent: Vec2) -> Self {
        Self {
            loc: self.loc + offset,
            size: (self.size - extent).max(Vec2::ZERO),
        }
    }
}

impl<W: LayoutElement> ContainerTree<W> {
    /// Pulls one edge of a node inwards by the canvas step.
    pub fn contract(&mut self, key: NodeKey, direction: Direction) -> bool {
        self.adjust_canvas(key, direction, self.options.canvas_step)
    }

    /// Pushes one edge of a node outwards by the canvas step.
    pub fn expand(&mut self, key: NodeKey, direction: Direction) -> bool {
        self.adjust_canvas(key, direction, -self.options.canvas_step)
    }

    fn adjust_canvas(&mut self, key: NodeKey, direction: Direction, step: f32) -> bool {
        let Some(node) = self.nodes.get_mut(key) else {
            return false;
        };

        let axis = direction.axis();
        // Moving the near edge shifts the origin as well as shrinking the size.
        if direction.is_backward() {
            node.canvas_offset[axis] += step;
        }
        node.canvas_extent[axis] += step;

        let layout = node.layout;
        self.shift_layout(key, layout)
    }

    /// Drops all canvas adjustments of a node.
    pub fn reset_canvas(&mut self, key: NodeKey) -> bool {
        let Some(node) = self.nodes.get_mut(key) else {
            return false;
        };
        node.canvas_offset = Vec2::ZERO;
        node.canvas_extent = Vec2::ZERO;

        let layout = node.layout;
        self.shift_layout(key, layout)
    }

    /// Sets the layout of a node and re-flows the tree.
    pub fn shift_layout(&mut self, key: NodeKey, layout: Layout) -> bool {
        let Some(node) = self.nodes.get_mut(key) else {
            return false;
        };
        node.layout = layout;
        trace!("{key:?} layout is now {layout:?}");

        self.layout();
        true
    }

    /// Minimum size of a node: the configured minimum, raised by its client and its tiled
    /// children.
    pub fn min_size(&self, key: NodeKey) -> Vec2 {
        let Some(node) = self.nodes.get(key) else {
            return Vec2::ZERO;
        };

        let mut size = self.options.min_size;
        if let Some(client) = &node.client {
            size = size.max(client.min_size());
        }
        for child in &node.children {
            if !self.is_floating(*child) {
                size = size.max(self.min_size(*child));
            }
        }
        size
    }

    /// Re-flows the whole tree, starting from the full output.
    pub fn layout(&mut self) {
        let root = self.root;
        self.layout_node(root, Rect::UNIT);
    }

    fn layout_node(&mut self, key: NodeKey, slot: Rect) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };

        node.slot = slot;
        let mut geometry = slot.adjusted(node.canvas_offset, node.canvas_extent);
        if let Some(client) = &mut node.client {
            if client.is_fullscreen() {
                geometry = Rect::UNIT;
            }
            client.request_size(geometry);
        }
        node.geometry = geometry;

        let axis = node.layout.axis();
        let children = node.children.clone();

        let mut tiled = Vec::with_capacity(children.len());
        for child in children {
            if self.is_floating(child) {
                // Floating windows keep the rectangle the host gave them.
                let slot = self.nodes.get(child).map_or(slot, |node| node.slot);
                self.layout_node(child, slot);
            } else {
                tiled.push(child);
            }
        }

        let mins: Vec<Vec2> = tiled.iter().map(|child| self.min_size(*child)).collect();
        let slots = distribute(geometry, axis, &mins);
        for (child, slot) in tiled.into_iter().zip(slots) {
            self.layout_node(child, slot);
        }
    }
}

/// Splits `area` along `axis` between children with the given minimum sizes.
///
/// Space left over after the minimums is shared equally. When the minimums don't fit, every
/// child keeps its minimum (capped at the area) and the children overlap evenly.
fn distribute(area: Rect, axis: usize, mins: &[Vec2]) -> Vec<Rect> {
    let count = mins.len();
    if count == 0 {
        return Vec::new();
    }

    let available = area.size[axis];
    let total: f32 = mins.iter().map(|min| min[axis]).sum();

    let mut cursor = area.loc[axis];
    let mut slots = Vec::with_capacity(count);
    for min in mins {
        let (extent, advance) = if count == 1 {
            (available, available)
        } else if total <= available {
            let extent = min[axis] + (available - total) / count as f32;
            (extent, extent)
        } else {
            let overlap = (total - available) / (count - 1) as f32;
            (min[axis].min(available), (min[axis] - overlap).max(0.))
        };

        let mut slot = area;
        slot.loc[axis] = cursor;
        slot.size[axis] = extent;
        slots.push(slot);

        cursor += advance;
    }
    slots
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn distribute_shares_leftover_space() {
        let mins = [Vec2::new(0.2, 0.3), Vec2::new(0.4, 0.3)];
        let slots = distribute(Rect::UNIT, 0, &mins);

        assert_abs_diff_eq!(slots[0].loc.x, 0.);
        assert_abs_diff_eq!(slots[0].size.x, 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(slots[1].loc.x, 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(slots[1].size.x, 0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(slots[1].size.y, 1.);
    }

    #[test]
    fn distribute_overlaps_when_minimums_dont_fit() {
        let mins = [Vec2::splat(0.4); 3];
        let slots = distribute(Rect::UNIT, 1, &mins);

        // 1.2 of minimums in 1.0 of space: each child keeps 0.4 and overlaps its neighbour
        // by 0.1.
        for (i, slot) in slots.iter().enumerate() {
            assert_abs_diff_eq!(slot.size.y, 0.4, epsilon = 1e-6);
            assert_abs_diff_eq!(slot.loc.y, 0.3 * i as f32, epsilon = 1e-6);
        }
        assert_abs_diff_eq!(slots[2].end().y, 1., epsilon = 1e-6);
    }

    #[test]
    fn distribute_single_child_fills_area() {
        let area = Rect::from_xywh(0.1, 0., 0.2, 1.);
        let slots = distribute(area, 0, &[Vec2::splat(0.4)]);
        assert_eq!(slots, vec![area]);
    }

    #[test]
    fn adjusted_never_goes_negative() {
        let rect = Rect::UNIT.adjusted(Vec2::new(0.5, 0.), Vec2::new(1.5, 0.));
        assert_eq!(rect, Rect::from_xywh(0.5, 0., 0., 1.));
    }
}
