use trellis_config::{Config, Key};

use crate::headless::{HeadlessWindow, WindowId};
use crate::input::{DispatchOutcome, Dispatcher};
use crate::layout::{ContainerTree, LayoutElement as _, NodeKey, Rect};

pub struct Fixture {
    pub dispatcher: Dispatcher<HeadlessWindow>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            dispatcher: Dispatcher::new(&config),
        }
    }

    pub fn parse_config(text: &str) -> Config {
        Config::parse("test.kdl", text).unwrap()
    }

    /// Opens tiled windows with the given ids, each focused in turn.
    pub fn with_windows(ids: impl IntoIterator<Item = u64>) -> Self {
        let mut f = Self::new();
        for id in ids {
            f.add_window(id);
        }
        f
    }

    pub fn add_window(&mut self, id: u64) -> NodeKey {
        self.dispatcher.add_window(HeadlessWindow::new(id))
    }

    pub fn add_floating(&mut self, id: u64) -> NodeKey {
        let rect = Rect::from_xywh(0.1, 0.1, 0.4, 0.4);
        self.dispatcher
            .add_floating_window(HeadlessWindow::new(id), rect)
    }

    pub fn tree(&self) -> &ContainerTree<HeadlessWindow> {
        self.dispatcher.tree()
    }

    pub fn key(&self, id: u64) -> NodeKey {
        self.tree().find_window(&WindowId(id)).unwrap()
    }

    pub fn window(&self, id: u64) -> &HeadlessWindow {
        self.tree().client(self.key(id)).unwrap()
    }

    pub fn focus(&mut self, key: NodeKey) {
        assert!(self.dispatcher.tree_mut().focus(key));
    }

    pub fn press(&mut self, key: &str) -> DispatchOutcome {
        let key: Key = key.parse().unwrap();
        self.dispatcher.handle_key(&key, false)
    }

    pub fn repeat(&mut self, key: &str) -> DispatchOutcome {
        let key: Key = key.parse().unwrap();
        self.dispatcher.handle_key(&key, true)
    }

    pub fn action(&mut self, name: &str) -> DispatchOutcome {
        self.dispatcher.dispatch_name(name)
    }

    /// Removes every window that was asked to close.
    pub fn reap(&mut self) {
        let closed: Vec<WindowId> = self
            .tree()
            .windows()
            .into_iter()
            .filter(|window| window.close_requested())
            .map(|window| *window.id())
            .collect();
        for id in closed {
            self.dispatcher.remove_window(&id);
        }
    }

    pub fn debug_tree(&self) -> String {
        self.tree().debug_tree()
    }
}
