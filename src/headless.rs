//! Window stand-in for driving the layout without a compositor.

use glam::Vec2;

use crate::layout::{LayoutElement, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<WindowId> for u64 {
    fn from(id: WindowId) -> Self {
        id.0
    }
}

/// Window that records what the layout asked of it.
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    id: WindowId,
    title: String,
    min_size: Vec2,
    rect: Option<Rect>,
    fullscreen: bool,
    close_requested: bool,
}

impl HeadlessWindow {
    pub fn new(id: u64) -> Self {
        Self {
            id: WindowId(id),
            title: format!("window {id}"),
            min_size: Vec2::ZERO,
            rect: None,
            fullscreen: false,
            close_requested: false,
        }
    }

    pub fn with_min_size(mut self, min_size: Vec2) -> Self {
        self.min_size = min_size;
        self
    }

    /// Last rectangle the layout gave this window.
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}

impl LayoutElement for HeadlessWindow {
    type Id = WindowId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn title(&self) -> Option<String> {
        Some(self.title.clone())
    }

    fn min_size(&self) -> Vec2 {
        self.min_size
    }

    fn request_size(&mut self, rect: Rect) {
        self.rect = Some(rect);
    }

    fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }
}
