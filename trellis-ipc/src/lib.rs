//! Types for communicating with trellis from a host compositor.
//!
//! The host owns input handling and rendering. It hands trellis semantic actions, either as
//! [`Action`] values or as their kebab-case names, and reads back the layout tree as a
//! [`LayoutTreeNode`] snapshot.
//!
//! Action names use the same spelling as the `binds` section of the config:
//!
//! ```
//! use trellis_ipc::Action;
//!
//! let action: Action = "focus-next".parse().unwrap();
//! assert_eq!(action, Action::FocusNext {});
//!
//! let spawn: Action = serde_json::from_str(r#"{"spawn":{"command":["foot"]}}"#).unwrap();
//! assert_eq!(spawn, Action::Spawn { command: vec![String::from("foot")] });
//! ```
#![warn(missing_docs)]

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Actions that the host can ask trellis to perform.
// Remember to add new actions to the config enum too.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Focus the next sibling, or go back to the tiled focus from a floating window.
    FocusNext {},
    /// Focus the previous sibling, or go back to the tiled focus from a floating window.
    FocusPrev {},
    /// Focus the parent container.
    FocusParent {},
    /// Focus the remembered child of the focused container.
    FocusChild {},
    /// Switch to the floating layer, or to the next floating window.
    FocusFloat {},
    /// Switch to the floating layer, or to the previous floating window.
    FocusFloatPrev {},
    /// Focus into the container after the parent of the focused node.
    FocusParentNext {},
    /// Focus into the container before the parent of the focused node.
    FocusParentPrev {},
    /// Focus the node to the left.
    FocusLeft {},
    /// Focus the node to the right.
    FocusRight {},
    /// Focus the node above.
    FocusUp {},
    /// Focus the node below.
    FocusDown {},
    /// Swap the focused node with its next sibling.
    MoveNext {},
    /// Swap the focused node with its previous sibling.
    MovePrev {},
    /// Replace the selection with the focused node.
    Yank {},
    /// Add the focused node to the selection.
    YankAppend {},
    /// Move the selection onto the focused node.
    Paste {},
    /// Empty the selection.
    ClearSelection {},
    /// Group the siblings of the focused node into one container.
    Lift {},
    /// Flip the layout of the focused node's parent between horizontal and vertical.
    ToggleLayout {},
    /// Make the next window open as a split of the focused node.
    ToggleSplit {},
    /// Toggle fullscreen on the focused window.
    ToggleFullscreen {},
    /// Reset the canvas adjustments of the root.
    ContractRootReset {},
    /// Shrink the root from the left.
    ContractRootLeft {},
    /// Shrink the root from the right.
    ContractRootRight {},
    /// Shrink the root from the top.
    ContractRootUp {},
    /// Shrink the root from the bottom.
    ContractRootDown {},
    /// Grow the root to the left.
    ExpandRootLeft {},
    /// Grow the root to the right.
    ExpandRootRight {},
    /// Grow the root upwards.
    ExpandRootUp {},
    /// Grow the root downwards.
    ExpandRootDown {},
    /// Reset the canvas adjustments of the focused node.
    ContractReset {},
    /// Shrink the focused node from the left.
    ContractLeft {},
    /// Shrink the focused node from the right.
    ContractRight {},
    /// Shrink the focused node from the top.
    ContractUp {},
    /// Shrink the focused node from the bottom.
    ContractDown {},
    /// Grow the focused node to the left.
    ExpandLeft {},
    /// Grow the focused node to the right.
    ExpandRight {},
    /// Grow the focused node upwards.
    ExpandUp {},
    /// Grow the focused node downwards.
    ExpandDown {},
    /// Ask every window under the focused node to close.
    CloseWindow {},
    /// Ask the host to spawn a command.
    Spawn {
        /// Command and its arguments.
        command: Vec<String>,
    },
    /// Ask the host to spawn a command through the shell.
    SpawnSh {
        /// Shell command line.
        command: String,
    },
}

impl FromStr for Action {
    type Err = serde_json::Error;

    /// Parses a bare action name such as `focus-next`.
    ///
    /// Actions with arguments have to go through their JSON form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        serde_json::from_value(serde_json::json!({ name: {} }))
    }
}

/// Layout of a container in the tree snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutTreeLayout {
    /// Children arranged left to right.
    SplitH,
    /// Children arranged top to bottom.
    SplitV,
}

/// Snapshot of one node of the layout tree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LayoutTreeNode {
    /// Layout of the node's children.
    pub layout: LayoutTreeLayout,
    /// Id of the window held by this node, if it is a leaf.
    pub window_id: Option<u64>,
    /// Title of the window held by this node, if it has one.
    pub title: Option<String>,
    /// Whether this node is the focused node.
    pub focused: bool,
    /// Whether this node floats above the tiled layer.
    pub floating: bool,
    /// Whether the next window will open as a split of this node.
    pub split_armed: bool,
    /// Manual position adjustment, in normalized output units.
    pub canvas_offset: (f32, f32),
    /// Manual size adjustment, in normalized output units.
    pub canvas_extent: (f32, f32),
    /// Effective rectangle as `(x, y, w, h)`, in normalized output units.
    pub geometry: (f32, f32, f32, f32),
    /// Child nodes in order.
    pub children: Vec<LayoutTreeNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_action_names() {
        assert_eq!("paste".parse::<Action>().unwrap(), Action::Paste {});
        assert_eq!(
            " contract-root-left ".parse::<Action>().unwrap(),
            Action::ContractRootLeft {}
        );
        assert!("no-such-action".parse::<Action>().is_err());
    }

    #[test]
    fn spawn_needs_arguments() {
        assert!("spawn".parse::<Action>().is_err());

        let action: Action = serde_json::from_str(r#"{"spawn-sh":{"command":"xbacklight -inc 20"}}"#)
            .unwrap();
        assert_eq!(
            action,
            Action::SpawnSh {
                command: String::from("xbacklight -inc 20")
            }
        );
    }

    #[test]
    fn layout_tree_round_trips_through_json() {
        let node = LayoutTreeNode {
            layout: LayoutTreeLayout::SplitV,
            window_id: Some(3),
            title: Some(String::from("htop")),
            focused: true,
            floating: false,
            split_armed: false,
            canvas_offset: (0.5, 0.),
            canvas_extent: (0.5, 0.),
            geometry: (0.5, 0., 0.5, 1.),
            children: Vec::new(),
        };

        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains(r#""layout":"split-v""#));
        assert_eq!(serde_json::from_str::<LayoutTreeNode>(&json).unwrap(), node);
    }
}
