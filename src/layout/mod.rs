//! Layout of client windows in a tree of containers.
//!
//! The tree itself lives in [`container`]. The remaining submodules extend [`ContainerTree`] with
//! the engines that restructure it:
//!
//! - [`geometry`] places nodes inside their parents and applies manual canvas adjustments,
//! - [`floating`] navigates the floating layer,
//! - [`selection`] moves yanked nodes around,
//! - [`lift`] regroups the siblings of a node.
//!
//! All coordinates are normalized: the output is the unit square.

use std::fmt::Debug;

use glam::Vec2;
use trellis_config::{Config, SplitOrientation};

pub mod container;
pub mod floating;
pub mod geometry;
pub mod lift;
pub mod selection;


pub use self::container::{
    Anchor, ContainerTree, Direction, Layout as ContainerLayout, MoveError, NodeKey,
};
pub use self::geometry::Rect;
pub use self::selection::{PasteError, PasteReport, Selection};

/// Client window as seen by the layout.
pub trait LayoutElement {
    /// Type that can be used as a unique ID of this element.
    type Id: PartialEq + Debug + Clone;

    /// Unique ID of this element.
    fn id(&self) -> &Self::Id;

    /// Title to show in tree dumps.
    fn title(&self) -> Option<String> {
        None
    }

    /// Smallest normalized size the client accepts.
    fn min_size(&self) -> Vec2;

    /// Tells the client the rectangle it occupies now.
    fn request_size(&mut self, rect: Rect);

    /// Asks the client to close. The host removes it once it is gone.
    fn request_close(&mut self);

    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&mut self, fullscreen: bool);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Layout of containers created around a client when it is split.
    pub default_layout: ContainerLayout,
    /// Smallest size any node is squeezed to.
    pub min_size: Vec2,
    /// Increment of contract and expand actions.
    pub canvas_step: f32,
    pub clear_selection_after_paste: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        let layout = &config.layout;

        Self {
            default_layout: match layout.default_split {
                SplitOrientation::SplitH => ContainerLayout::SplitH,
                SplitOrientation::SplitV => ContainerLayout::SplitV,
            },
            min_size: Vec2::new(layout.min_size.width as f32, layout.min_size.height as f32),
            canvas_step: layout.canvas_step as f32,
            clear_selection_after_paste: config.selection.clear_after_paste,
        }
    }
}
