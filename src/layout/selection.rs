//! Yank and paste: moving a set of nodes onto a target in one action.

use thiserror::Error;
use tracing::warn;

use super::container::{Anchor, ContainerTree, MoveError, NodeKey};
use super::LayoutElement;

/// Insertion-ordered set of yanked nodes.
///
/// Keys of nodes destroyed since they were yanked stay in the set and are dropped when pasting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    nodes: Vec<NodeKey>,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PasteError {
    #[error("no containers to paste")]
    NothingToPaste,
    #[error("couldn't move the first selected node: {0}")]
    Move(#[from] MoveError),
}

/// What a successful paste did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PasteReport {
    /// Nodes moved, in selection order.
    pub moved: Vec<NodeKey>,
    /// Nodes left in place, with the reason.
    pub skipped: Vec<(NodeKey, MoveError)>,
    /// Nodes dropped from the selection because they no longer exist.
    pub stale: Vec<NodeKey>,
    /// The paste target was itself selected and got dropped from the selection.
    pub self_targeted: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection with a single node.
    pub fn replace(&mut self, key: NodeKey) {
        self.nodes.clear();
        self.nodes.push(key);
    }

    /// Adds a node to the selection, keeping it unique.
    pub fn extend(&mut self, key: NodeKey) {
        if !self.contains(key) {
            self.nodes.push(key);
        }
    }

    pub fn remove(&mut self, key: NodeKey) -> bool {
        let len = self.nodes.len();
        self.nodes.retain(|node| *node != key);
        self.nodes.len() != len
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.nodes.iter().copied()
    }
}

impl<W: LayoutElement> ContainerTree<W> {
    /// Moves the selected nodes onto `target`.
    ///
    /// The first node goes under `target`; a leaf target gets wrapped in a split container
    /// first. The rest go under `target` if it had children, or into the target's new parent
    /// otherwise, so that all of them end up side by side in selection order.
    ///
    /// Fails without touching the tree when nothing is left to paste or the first node can't
    /// move. Later nodes that can't move are skipped.
    pub fn paste(
        &mut self,
        selection: &mut Selection,
        target: NodeKey,
    ) -> Result<PasteReport, PasteError> {
        let mut report = PasteReport::default();

        if selection.remove(target) {
            warn!("cannot paste on selection (one of the yanked containers)");
            report.self_targeted = true;
        }

        let (live, stale): (Vec<_>, Vec<_>) = selection.iter().partition(|key| self.contains(*key));
        for key in &stale {
            warn!("dropping {key:?} from the selection, it no longer exists");
            selection.remove(*key);
        }
        report.stale = stale;

        let Some((first, rest)) = live.split_first() else {
            return Err(PasteError::NothingToPaste);
        };

        let had_children = self.focus_of(target).is_some();

        self.move_to(*first, target)?;
        report.moved.push(*first);

        let dest = if had_children {
            target
        } else {
            self.parent(target).unwrap_or(target)
        };

        // Each node goes right after the previous one to keep the selection order.
        let mut anchor = *first;
        for key in rest {
            match self.move_with(*key, dest, Anchor::After(anchor)) {
                Ok(_) => {
                    report.moved.push(*key);
                    anchor = *key;
                }
                Err(err) => {
                    warn!("skipping {key:?} while pasting: {err}");
                    report.skipped.push((*key, err));
                }
            }
        }

        if self.options.clear_selection_after_paste {
            selection.clear();
        }

        Ok(report)
    }
}
