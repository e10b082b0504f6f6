//! Lift: grouping the siblings of a node into a container of their own.
//!
//! Lifting `A` in `[A, B, C, D, E]` gives `[A, S[B, C, D, E]]`, where `S` is the container that
//! took the place of `B`. Relative order is preserved and no node is lost.

use tracing::{trace, warn};

use super::container::{Anchor, ContainerTree, MoveError, NodeKey};
use super::LayoutElement;

impl<W: LayoutElement> ContainerTree<W> {
    /// Groups every sibling of `key` into one container. Needs at least three siblings
    /// including `key`; does nothing for floating windows and the root.
    pub fn lift(&mut self, key: NodeKey) -> bool {
        if key == self.root || self.is_floating(key) || !self.contains(key) {
            return false;
        }

        let sibling = self.next_cyclic(key);
        let peer = self.next_cyclic(sibling);
        if peer == key {
            trace!("not lifting {key:?}, fewer than three siblings");
            return false;
        }

        let group = match self.place(peer, sibling) {
            Ok(group) => group,
            Err(err) => {
                warn!("error lifting {key:?}: {err}");
                return false;
            }
        };

        let mut peer = self.next_cyclic(group);
        while peer != key && peer != group {
            let next = self.next_cyclic(peer);
            if let Err(err) = self.move_with(peer, group, Anchor::End) {
                warn!("error lifting {key:?}: {err}");
                break;
            }
            peer = next;
        }

        true
    }

    /// Moves `key` under `target` while keeping the existing structure of `target` intact.
    ///
    /// If `target` has children, they are grouped together first, starting from the child after
    /// its focus, so that `key` ends up next to that group rather than among the children.
    /// Returns the container that now stands where `target` stood: `target` itself, or the split
    /// container created around it when it was a leaf.
    pub fn place(&mut self, key: NodeKey, target: NodeKey) -> Result<NodeKey, MoveError> {
        let peers = match self.focus_of(target) {
            Some(focus) => {
                let mut peers = vec![self.next_cyclic(focus)];
                while let Some(&last) = peers.last() {
                    if last == focus {
                        break;
                    }
                    peers.push(self.next_cyclic(last));
                }
                peers.retain(|peer| *peer != key);
                Some(peers)
            }
            None => None,
        };

        let parent = self.move_to(key, target)?;

        let Some(peers) = peers else {
            return Ok(parent);
        };

        if let [first, second, rest @ ..] = peers.as_slice() {
            let group = self.place(*second, *first)?;
            for peer in rest {
                self.move_with(*peer, group, Anchor::End)?;
            }
        }

        Ok(target)
    }
}
