//! Turning bound keys and actions into tree operations.

use std::rc::Rc;

use tracing::{debug, trace, warn};
use trellis_config::{Action, Binds, Config, Key};

use crate::layout::{
    ContainerTree, Direction, LayoutElement, NodeKey, Options, Rect, Selection,
};

/// What the host has to do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Nothing changed.
    Noop,
    /// Focus moved to this node.
    Focus(NodeKey),
    /// The tree, its geometry or the selection changed and should be re-rendered.
    Changed,
    /// Spawn a command. Trellis never runs it itself.
    Spawn(Vec<String>),
    /// Spawn a command through the shell.
    SpawnSh(String),
}

/// Owns the tree and the selection, and applies actions to them.
#[derive(Debug)]
pub struct Dispatcher<W: LayoutElement> {
    tree: ContainerTree<W>,
    selection: Selection,
    binds: Binds,
    options: Rc<Options>,
}

impl<W: LayoutElement> Dispatcher<W> {
    pub fn new(config: &Config) -> Self {
        let options = Rc::new(Options::from_config(config));
        Self {
            tree: ContainerTree::new(options.clone()),
            selection: Selection::new(),
            binds: config.binds.clone(),
            options,
        }
    }

    pub fn tree(&self) -> &ContainerTree<W> {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ContainerTree<W> {
        &mut self.tree
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn binds(&self) -> &Binds {
        &self.binds
    }

    pub fn options(&self) -> &Rc<Options> {
        &self.options
    }

    pub fn reload_config(&mut self, config: &Config) {
        let options = Rc::new(Options::from_config(config));
        if options != self.options {
            self.options = options.clone();
            self.tree.update_options(options);
        }
        self.binds = config.binds.clone();
    }

    // ========================================================================
    // Window lifecycle
    // ========================================================================

    /// Parent for a new window.
    ///
    /// A focused node with its split flag set takes the window itself, which clears the flag.
    /// Otherwise the window goes next to the focused node.
    pub fn resolve_parent(&mut self) -> NodeKey {
        let focus = self.tree.active();
        if self.tree.take_split_armed(focus) && !self.tree.is_floating(focus) {
            return focus;
        }
        self.tree.parent(focus).unwrap_or(focus)
    }

    /// Adds a tiled window and focuses it.
    pub fn add_window(&mut self, client: W) -> NodeKey {
        let parent = self.resolve_parent();
        let key = self.tree.insert_window(parent, client);
        self.tree.focus(key);
        debug!("added window {key:?} under {parent:?}");
        key
    }

    /// Adds a floating window and focuses it.
    pub fn add_floating_window(&mut self, client: W, rect: Rect) -> NodeKey {
        let key = self.tree.insert_floating(client, rect);
        self.tree.focus(key);
        debug!("added floating window {key:?}");
        key
    }

    pub fn remove_window(&mut self, window_id: &W::Id) -> Option<W> {
        let key = self.tree.find_window(window_id)?;
        self.selection.remove(key);
        self.tree.remove_window(window_id)
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Runs the action bound to a key, if any.
    pub fn handle_key(&mut self, key: &Key, repeat: bool) -> DispatchOutcome {
        let Some(bind) = self.binds.find(key) else {
            trace!("no bind for {key:?}");
            return DispatchOutcome::Noop;
        };
        if repeat && !bind.repeat {
            return DispatchOutcome::Noop;
        }

        let action = bind.action.clone();
        self.handle_action(action)
    }

    /// Runs an action given by its name, such as `focus-next`.
    pub fn dispatch_name(&mut self, name: &str) -> DispatchOutcome {
        match name.parse::<trellis_ipc::Action>() {
            Ok(action) => self.handle_action(action.into()),
            Err(err) => {
                debug!("ignoring unknown action {name:?}: {err}");
                DispatchOutcome::Noop
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) -> DispatchOutcome {
        let focus = self.tree.active();
        let root = self.tree.root();
        trace!("handling {action:?} with focus {focus:?}");

        match action {
            Action::FocusNext | Action::FocusPrev => {
                let target = if self.tree.is_floating(focus) {
                    Some(self.tree.tiled_focus())
                } else if action == Action::FocusNext {
                    self.tree.next_sibling(focus)
                } else {
                    self.tree.prev_sibling(focus)
                };
                self.focus_outcome(target)
            }
            Action::FocusParent => {
                let target = self.tree.parent(focus);
                self.focus_outcome(target)
            }
            Action::FocusChild => {
                let target = self.tree.focus_of(focus);
                self.focus_outcome(target)
            }
            Action::FocusFloat => {
                let target = self.tree.float_focus(true);
                self.focus_outcome(target)
            }
            Action::FocusFloatPrev => {
                let target = self.tree.float_focus(false);
                self.focus_outcome(target)
            }
            Action::FocusParentNext | Action::FocusParentPrev => {
                let target = self
                    .tree
                    .parent(focus)
                    .filter(|parent| *parent != root)
                    .and_then(|parent| {
                        if action == Action::FocusParentNext {
                            self.tree.next_sibling(parent)
                        } else {
                            self.tree.prev_sibling(parent)
                        }
                    })
                    .and_then(|sibling| self.tree.focus_of(sibling));
                self.focus_outcome(target)
            }
            Action::FocusLeft => self.focus_adjacent(Direction::Left),
            Action::FocusRight => self.focus_adjacent(Direction::Right),
            Action::FocusUp => self.focus_adjacent(Direction::Up),
            Action::FocusDown => self.focus_adjacent(Direction::Down),
            Action::MoveNext => changed(self.tree.swap_with_next(focus)),
            Action::MovePrev => changed(self.tree.swap_with_prev(focus)),
            Action::Yank => {
                if focus == root {
                    return DispatchOutcome::Noop;
                }
                debug!("yanking {focus:?}");
                self.selection.replace(focus);
                DispatchOutcome::Changed
            }
            Action::YankAppend => {
                if focus == root {
                    return DispatchOutcome::Noop;
                }
                debug!("yanking {focus:?} (append)");
                self.selection.extend(focus);
                DispatchOutcome::Changed
            }
            Action::Paste => match self.tree.paste(&mut self.selection, focus) {
                Ok(report) => {
                    debug!("pasted onto {focus:?}: {report:?}");
                    DispatchOutcome::Changed
                }
                Err(err) => {
                    warn!("error pasting onto {focus:?}: {err}");
                    DispatchOutcome::Noop
                }
            },
            Action::ClearSelection => {
                let was_empty = self.selection.is_empty();
                self.selection.clear();
                changed(!was_empty)
            }
            Action::Lift => changed(self.tree.lift(focus)),
            Action::ToggleLayout => {
                let Some(parent) = self.tree.parent(focus) else {
                    return DispatchOutcome::Noop;
                };
                let Some(layout) = self.tree.node(parent).map(|node| node.layout()) else {
                    return DispatchOutcome::Noop;
                };
                changed(self.tree.shift_layout(parent, layout.opposite()))
            }
            Action::ToggleSplit => {
                let armed = self.tree.toggle_split_armed(focus);
                debug!("split armed on {focus:?}: {armed}");
                DispatchOutcome::Changed
            }
            Action::ToggleFullscreen => changed(self.tree.toggle_fullscreen(focus)),
            Action::ContractRootReset => changed(self.tree.reset_canvas(root)),
            Action::ContractRootLeft => changed(self.tree.contract(root, Direction::Left)),
            Action::ContractRootRight => changed(self.tree.contract(root, Direction::Right)),
            Action::ContractRootUp => changed(self.tree.contract(root, Direction::Up)),
            Action::ContractRootDown => changed(self.tree.contract(root, Direction::Down)),
            Action::ExpandRootLeft => changed(self.tree.expand(root, Direction::Left)),
            Action::ExpandRootRight => changed(self.tree.expand(root, Direction::Right)),
            Action::ExpandRootUp => changed(self.tree.expand(root, Direction::Up)),
            Action::ExpandRootDown => changed(self.tree.expand(root, Direction::Down)),
            Action::ContractReset => changed(self.tree.reset_canvas(focus)),
            Action::ContractLeft => changed(self.tree.contract(focus, Direction::Left)),
            Action::ContractRight => changed(self.tree.contract(focus, Direction::Right)),
            Action::ContractUp => changed(self.tree.contract(focus, Direction::Up)),
            Action::ContractDown => changed(self.tree.contract(focus, Direction::Down)),
            Action::ExpandLeft => changed(self.tree.expand(focus, Direction::Left)),
            Action::ExpandRight => changed(self.tree.expand(focus, Direction::Right)),
            Action::ExpandUp => changed(self.tree.expand(focus, Direction::Up)),
            Action::ExpandDown => changed(self.tree.expand(focus, Direction::Down)),
            Action::CloseWindow => {
                // Windows go away once the host removes them.
                if focus != root {
                    self.tree.close(focus);
                }
                DispatchOutcome::Noop
            }
            Action::Spawn(command) => DispatchOutcome::Spawn(command),
            Action::SpawnSh(command) => DispatchOutcome::SpawnSh(command),
        }
    }

    fn focus_adjacent(&mut self, direction: Direction) -> DispatchOutcome {
        let target = self.tree.adjacent(self.tree.active(), direction);
        self.focus_outcome(target)
    }

    fn focus_outcome(&mut self, target: Option<NodeKey>) -> DispatchOutcome {
        if let Some(target) = target.filter(|target| *target != self.tree.active()) {
            if self.tree.focus(target) {
                return DispatchOutcome::Focus(target);
            }
        }

        trace!("focus unchanged");
        DispatchOutcome::Noop
    }
}

fn changed(changed: bool) -> DispatchOutcome {
    if changed {
        DispatchOutcome::Changed
    } else {
        DispatchOutcome::Noop
    }
}
