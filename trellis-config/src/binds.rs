use std::collections::HashSet;
use std::str::FromStr;

use bitflags::bitflags;
use knuffel::errors::DecodeError;
use miette::miette;

use crate::utils::expect_only_children;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Binds(pub Vec<Bind>);

#[derive(Debug, Clone, PartialEq)]
pub struct Bind {
    pub key: Key,
    pub action: Action,
    pub repeat: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Key {
    pub trigger: Trigger,
    pub modifiers: Modifiers,
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum Trigger {
    /// Keysym name, lowercased.
    ///
    /// Resolving the name to a physical key is up to the host.
    Keysym(String),
    MouseLeft,
    MouseRight,
    MouseMiddle,
    MouseBack,
    MouseForward,
    WheelScrollDown,
    WheelScrollUp,
    WheelScrollLeft,
    WheelScrollRight,
    TouchpadScrollDown,
    TouchpadScrollUp,
    TouchpadScrollLeft,
    TouchpadScrollRight,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers : u8 {
        const CTRL = 1;
        const SHIFT = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
        const ISO_LEVEL3_SHIFT = 1 << 4;
        const ISO_LEVEL5_SHIFT = 1 << 5;
        const COMPOSITOR = 1 << 6;
    }
}

// Remember to add new actions to the IPC enum too.
#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub enum Action {
    FocusNext,
    FocusPrev,
    FocusParent,
    FocusChild,
    FocusFloat,
    FocusFloatPrev,
    FocusParentNext,
    FocusParentPrev,
    FocusLeft,
    FocusRight,
    FocusUp,
    FocusDown,
    MoveNext,
    MovePrev,
    Yank,
    YankAppend,
    Paste,
    ClearSelection,
    Lift,
    ToggleLayout,
    ToggleSplit,
    ToggleFullscreen,
    ContractRootReset,
    ContractRootLeft,
    ContractRootRight,
    ContractRootUp,
    ContractRootDown,
    ExpandRootLeft,
    ExpandRootRight,
    ExpandRootUp,
    ExpandRootDown,
    ContractReset,
    ContractLeft,
    ContractRight,
    ContractUp,
    ContractDown,
    ExpandLeft,
    ExpandRight,
    ExpandUp,
    ExpandDown,
    CloseWindow,
    Spawn(#[knuffel(arguments)] Vec<String>),
    SpawnSh(#[knuffel(argument)] String),
}

impl From<trellis_ipc::Action> for Action {
    fn from(value: trellis_ipc::Action) -> Self {
        match value {
            trellis_ipc::Action::FocusNext {} => Self::FocusNext,
            trellis_ipc::Action::FocusPrev {} => Self::FocusPrev,
            trellis_ipc::Action::FocusParent {} => Self::FocusParent,
            trellis_ipc::Action::FocusChild {} => Self::FocusChild,
            trellis_ipc::Action::FocusFloat {} => Self::FocusFloat,
            trellis_ipc::Action::FocusFloatPrev {} => Self::FocusFloatPrev,
            trellis_ipc::Action::FocusParentNext {} => Self::FocusParentNext,
            trellis_ipc::Action::FocusParentPrev {} => Self::FocusParentPrev,
            trellis_ipc::Action::FocusLeft {} => Self::FocusLeft,
            trellis_ipc::Action::FocusRight {} => Self::FocusRight,
            trellis_ipc::Action::FocusUp {} => Self::FocusUp,
            trellis_ipc::Action::FocusDown {} => Self::FocusDown,
            trellis_ipc::Action::MoveNext {} => Self::MoveNext,
            trellis_ipc::Action::MovePrev {} => Self::MovePrev,
            trellis_ipc::Action::Yank {} => Self::Yank,
            trellis_ipc::Action::YankAppend {} => Self::YankAppend,
            trellis_ipc::Action::Paste {} => Self::Paste,
            trellis_ipc::Action::ClearSelection {} => Self::ClearSelection,
            trellis_ipc::Action::Lift {} => Self::Lift,
            trellis_ipc::Action::ToggleLayout {} => Self::ToggleLayout,
            trellis_ipc::Action::ToggleSplit {} => Self::ToggleSplit,
            trellis_ipc::Action::ToggleFullscreen {} => Self::ToggleFullscreen,
            trellis_ipc::Action::ContractRootReset {} => Self::ContractRootReset,
            trellis_ipc::Action::ContractRootLeft {} => Self::ContractRootLeft,
            trellis_ipc::Action::ContractRootRight {} => Self::ContractRootRight,
            trellis_ipc::Action::ContractRootUp {} => Self::ContractRootUp,
            trellis_ipc::Action::ContractRootDown {} => Self::ContractRootDown,
            trellis_ipc::Action::ExpandRootLeft {} => Self::ExpandRootLeft,
            trellis_ipc::Action::ExpandRootRight {} => Self::ExpandRootRight,
            trellis_ipc::Action::ExpandRootUp {} => Self::ExpandRootUp,
            trellis_ipc::Action::ExpandRootDown {} => Self::ExpandRootDown,
            trellis_ipc::Action::ContractReset {} => Self::ContractReset,
            trellis_ipc::Action::ContractLeft {} => Self::ContractLeft,
            trellis_ipc::Action::ContractRight {} => Self::ContractRight,
            trellis_ipc::Action::ContractUp {} => Self::ContractUp,
            trellis_ipc::Action::ContractDown {} => Self::ContractDown,
            trellis_ipc::Action::ExpandLeft {} => Self::ExpandLeft,
            trellis_ipc::Action::ExpandRight {} => Self::ExpandRight,
            trellis_ipc::Action::ExpandUp {} => Self::ExpandUp,
            trellis_ipc::Action::ExpandDown {} => Self::ExpandDown,
            trellis_ipc::Action::CloseWindow {} => Self::CloseWindow,
            trellis_ipc::Action::Spawn { command } => Self::Spawn(command),
            trellis_ipc::Action::SpawnSh { command } => Self::SpawnSh(command),
        }
    }
}

impl Binds {
    /// Finds the bind for a key, if any.
    pub fn find(&self, key: &Key) -> Option<&Bind> {
        self.0.iter().find(|bind| bind.key == *key)
    }
}

impl<S> knuffel::Decode<S> for Binds
where
    S: knuffel::traits::ErrorSpan,
{
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        expect_only_children(node, ctx);

        let mut seen_keys = HashSet::new();

        let mut binds = Vec::new();

        for child in node.children() {
            match Bind::decode_node(child, ctx) {
                Err(e) => {
                    ctx.emit_error(e);
                }
                Ok(bind) => {
                    if seen_keys.insert(bind.key.clone()) {
                        binds.push(bind);
                    } else {
                        // DecodeError can't carry a second span, so this can't point at the
                        // earlier bind.
                        ctx.emit_error(DecodeError::unexpected(
                            &child.node_name,
                            "keybind",
                            "duplicate keybind",
                        ));
                    }
                }
            }
        }

        Ok(Self(binds))
    }
}

impl<S> knuffel::Decode<S> for Bind
where
    S: knuffel::traits::ErrorSpan,
{
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        if let Some(type_name) = &node.type_name {
            ctx.emit_error(DecodeError::unexpected(
                type_name,
                "type name",
                "no type name expected for this node",
            ));
        }

        for val in node.arguments.iter() {
            ctx.emit_error(DecodeError::unexpected(
                &val.literal,
                "argument",
                "no arguments expected for this node",
            ));
        }

        let key = node
            .node_name
            .parse::<Key>()
            .map_err(|e| DecodeError::conversion(&node.node_name, e.wrap_err("invalid keybind")))?;

        let mut repeat = true;
        for (name, val) in &node.properties {
            match &***name {
                "repeat" => {
                    repeat = knuffel::traits::DecodeScalar::decode(val, ctx)?;
                }
                name_str => {
                    ctx.emit_error(DecodeError::unexpected(
                        name,
                        "property",
                        format!("unexpected property `{}`", name_str.escape_default()),
                    ));
                }
            }
        }

        let mut children = node.children();

        // Still return a bind when only the action is broken, so that the parent can report
        // duplicate keys.
        let dummy = Self {
            key: key.clone(),
            action: Action::Spawn(vec![]),
            repeat: true,
        };

        if let Some(child) = children.next() {
            for unwanted_child in children {
                ctx.emit_error(DecodeError::unexpected(
                    unwanted_child,
                    "node",
                    "only one action is allowed per keybind",
                ));
            }
            match Action::decode_node(child, ctx) {
                Ok(action) => Ok(Self {
                    key,
                    action,
                    repeat,
                }),
                Err(e) => {
                    ctx.emit_error(e);
                    Ok(dummy)
                }
            }
        } else {
            ctx.emit_error(DecodeError::missing(
                node,
                "expected an action for this keybind",
            ));
            Ok(dummy)
        }
    }
}

impl FromStr for Key {
    type Err = miette::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut modifiers = Modifiers::empty();

        let mut split = s.split('+');
        let key = split.next_back().unwrap_or_default().trim();

        for part in split {
            let part = part.trim();
            if part.eq_ignore_ascii_case("mod") {
                modifiers |= Modifiers::COMPOSITOR
            } else if part.eq_ignore_ascii_case("ctrl") || part.eq_ignore_ascii_case("control") {
                modifiers |= Modifiers::CTRL;
            } else if part.eq_ignore_ascii_case("shift") {
                modifiers |= Modifiers::SHIFT;
            } else if part.eq_ignore_ascii_case("alt") {
                modifiers |= Modifiers::ALT;
            } else if part.eq_ignore_ascii_case("super") || part.eq_ignore_ascii_case("win") {
                modifiers |= Modifiers::SUPER;
            } else if part.eq_ignore_ascii_case("iso_level3_shift")
                || part.eq_ignore_ascii_case("mod5")
            {
                modifiers |= Modifiers::ISO_LEVEL3_SHIFT;
            } else if part.eq_ignore_ascii_case("iso_level5_shift")
                || part.eq_ignore_ascii_case("mod3")
            {
                modifiers |= Modifiers::ISO_LEVEL5_SHIFT;
            } else {
                return Err(miette!("invalid modifier: {part}"));
            }
        }

        let trigger = if key.eq_ignore_ascii_case("MouseLeft") {
            Trigger::MouseLeft
        } else if key.eq_ignore_ascii_case("MouseRight") {
            Trigger::MouseRight
        } else if key.eq_ignore_ascii_case("MouseMiddle") {
            Trigger::MouseMiddle
        } else if key.eq_ignore_ascii_case("MouseBack") {
            Trigger::MouseBack
        } else if key.eq_ignore_ascii_case("MouseForward") {
            Trigger::MouseForward
        } else if key.eq_ignore_ascii_case("WheelScrollDown") {
            Trigger::WheelScrollDown
        } else if key.eq_ignore_ascii_case("WheelScrollUp") {
            Trigger::WheelScrollUp
        } else if key.eq_ignore_ascii_case("WheelScrollLeft") {
            Trigger::WheelScrollLeft
        } else if key.eq_ignore_ascii_case("WheelScrollRight") {
            Trigger::WheelScrollRight
        } else if key.eq_ignore_ascii_case("TouchpadScrollDown") {
            Trigger::TouchpadScrollDown
        } else if key.eq_ignore_ascii_case("TouchpadScrollUp") {
            Trigger::TouchpadScrollUp
        } else if key.eq_ignore_ascii_case("TouchpadScrollLeft") {
            Trigger::TouchpadScrollLeft
        } else if key.eq_ignore_ascii_case("TouchpadScrollRight") {
            Trigger::TouchpadScrollRight
        } else {
            // Keysym names are ASCII identifiers like `Return`, `onehalf` or
            // `XF86AudioRaiseVolume`. Matching is case-insensitive.
            if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(miette!("invalid key: {key}"));
            }
            Trigger::Keysym(key.to_ascii_lowercase())
        };

        Ok(Key { trigger, modifiers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keysym(name: &str) -> Trigger {
        Trigger::Keysym(String::from(name))
    }

    #[test]
    fn parse_keysyms_case_insensitively() {
        assert_eq!(
            "Alt+L".parse::<Key>().unwrap(),
            Key {
                trigger: keysym("l"),
                modifiers: Modifiers::ALT,
            },
        );
        assert_eq!(
            "XF86MonBrightnessUp".parse::<Key>().unwrap(),
            "xf86monbrightnessup".parse::<Key>().unwrap(),
        );
        assert_eq!(
            "Super+Shift+u".parse::<Key>().unwrap(),
            Key {
                trigger: keysym("u"),
                modifiers: Modifiers::SUPER | Modifiers::SHIFT,
            },
        );
    }

    #[test]
    fn parse_iso_level_shifts() {
        assert_eq!(
            "ISO_Level3_Shift+A".parse::<Key>().unwrap(),
            Key {
                trigger: keysym("a"),
                modifiers: Modifiers::ISO_LEVEL3_SHIFT
            },
        );
        assert_eq!(
            "Mod5+A".parse::<Key>().unwrap(),
            Key {
                trigger: keysym("a"),
                modifiers: Modifiers::ISO_LEVEL3_SHIFT
            },
        );

        assert_eq!(
            "ISO_Level5_Shift+A".parse::<Key>().unwrap(),
            Key {
                trigger: keysym("a"),
                modifiers: Modifiers::ISO_LEVEL5_SHIFT
            },
        );
        assert_eq!(
            "Mod3+A".parse::<Key>().unwrap(),
            Key {
                trigger: keysym("a"),
                modifiers: Modifiers::ISO_LEVEL5_SHIFT
            },
        );
    }

    #[test]
    fn parse_scroll_triggers() {
        assert_eq!(
            "Mod+WheelScrollDown".parse::<Key>().unwrap(),
            Key {
                trigger: Trigger::WheelScrollDown,
                modifiers: Modifiers::COMPOSITOR,
            }
        );
        assert_eq!(
            "Ctrl+TouchpadScrollUp".parse::<Key>().unwrap(),
            Key {
                trigger: Trigger::TouchpadScrollUp,
                modifiers: Modifiers::CTRL,
            }
        );
    }

    #[test]
    fn reject_invalid_keys() {
        assert!("Hyper+A".parse::<Key>().is_err());
        assert!("Alt+".parse::<Key>().is_err());
        assert!("Alt+a-b".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn ipc_actions_convert() {
        let action: trellis_ipc::Action = "focus-parent-next".parse().unwrap();
        assert_eq!(Action::from(action), Action::FocusParentNext);

        let action = trellis_ipc::Action::Spawn {
            command: vec![String::from("firefox"), String::from("--private-window")],
        };
        assert_eq!(
            Action::from(action),
            Action::Spawn(vec![
                String::from("firefox"),
                String::from("--private-window")
            ])
        );
    }
}
