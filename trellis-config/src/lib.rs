//! Configuration of trellis, written in KDL.

use std::path::Path;

use miette::{Context as _, IntoDiagnostic as _};

pub mod binds;
pub mod utils;

pub use crate::binds::*;

const DEFAULT_CONFIG: &str = include_str!("../resources/default-config.kdl");

#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub layout: Layout,
    #[knuffel(child, default)]
    pub selection: Selection,
    #[knuffel(child, default)]
    pub binds: Binds,
}

#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct Layout {
    #[knuffel(child, unwrap(argument), default)]
    pub default_split: SplitOrientation,
    #[knuffel(child, default)]
    pub min_size: MinSize,
    #[knuffel(child, unwrap(argument), default = Self::default().canvas_step)]
    pub canvas_step: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            default_split: SplitOrientation::default(),
            min_size: MinSize::default(),
            canvas_step: 0.1,
        }
    }
}

#[derive(knuffel::DecodeScalar, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SplitOrientation {
    #[default]
    SplitH,
    SplitV,
}

/// Smallest normalized size of a node along each axis.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct MinSize {
    #[knuffel(argument)]
    pub width: f64,
    #[knuffel(argument)]
    pub height: f64,
}

impl Default for MinSize {
    fn default() -> Self {
        Self {
            width: 0.4,
            height: 0.3,
        }
    }
}

#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    #[knuffel(child)]
    pub clear_after_paste: bool,
}

impl Config {
    /// Reads and parses the config file at `path`.
    pub fn load(path: &Path) -> miette::Result<Self> {
        let _span = tracing::debug_span!("Config::load").entered();

        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let config = Self::parse(
            path.file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("config.kdl"),
            &contents,
        )
        .context("error parsing")?;
        tracing::debug!("loaded config from {path:?}");
        Ok(config)
    }

    /// Parses the built-in default config.
    pub fn load_default() -> Self {
        match Self::parse("default-config.kdl", DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(err) => {
                // Covered by a test, so this only fires on a broken build.
                tracing::error!("error parsing the default config: {err:?}");
                Self {
                    layout: Layout::default(),
                    selection: Selection::default(),
                    binds: Binds::default(),
                }
            }
        }
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracing::debug_span!("Config::parse").entered();
        knuffel::parse(filename, text)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::load_default()
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_debug_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn do_parse(text: &str) -> Config {
        Config::parse("test.kdl", text)
            .map_err(miette::Report::new)
            .unwrap()
    }

    #[test]
    fn default_config_parses() {
        let config = Config::parse("default-config.kdl", DEFAULT_CONFIG)
            .map_err(miette::Report::new)
            .unwrap();

        assert_eq!(config.layout, Layout::default());
        assert_eq!(config.selection, Selection::default());

        let alt_l: Key = "Alt+L".parse().unwrap();
        assert_eq!(
            config.binds.find(&alt_l).map(|bind| &bind.action),
            Some(&Action::FocusNext)
        );

        let private: Key = "Super+2".parse().unwrap();
        assert_eq!(
            config.binds.find(&private).map(|bind| &bind.action),
            Some(&Action::Spawn(vec![
                String::from("firefox"),
                String::from("--private-window"),
            ]))
        );
    }

    #[test]
    fn parse() {
        let parsed = do_parse(
            r#"
            layout {
                default-split "split-v"
                min-size 0.25 0.5
                canvas-step 0.05
            }

            selection {
                clear-after-paste
            }

            binds {
                Mod+T { spawn "alacritty"; }
                Mod+Y repeat=false { yank; }
                Mod+Shift+Tab { focus-float-prev; }
                Super+Return { spawn-sh "foot -e htop"; }
            }
            "#,
        );

        assert_debug_snapshot!(parsed, @r#"
        Config {
            layout: Layout {
                default_split: SplitV,
                min_size: MinSize {
                    width: 0.25,
                    height: 0.5,
                },
                canvas_step: 0.05,
            },
            selection: Selection {
                clear_after_paste: true,
            },
            binds: Binds(
                [
                    Bind {
                        key: Key {
                            trigger: Keysym(
                                "t",
                            ),
                            modifiers: Modifiers(
                                COMPOSITOR,
                            ),
                        },
                        action: Spawn(
                            [
                                "alacritty",
                            ],
                        ),
                        repeat: true,
                    },
                    Bind {
                        key: Key {
                            trigger: Keysym(
                                "y",
                            ),
                            modifiers: Modifiers(
                                COMPOSITOR,
                            ),
                        },
                        action: Yank,
                        repeat: false,
                    },
                    Bind {
                        key: Key {
                            trigger: Keysym(
                                "tab",
                            ),
                            modifiers: Modifiers(
                                SHIFT | COMPOSITOR,
                            ),
                        },
                        action: FocusFloatPrev,
                        repeat: true,
                    },
                    Bind {
                        key: Key {
                            trigger: Keysym(
                                "return",
                            ),
                            modifiers: Modifiers(
                                SUPER,
                            ),
                        },
                        action: SpawnSh(
                            "foot -e htop",
                        ),
                        repeat: true,
                    },
                ],
            ),
        }
        "#);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let parsed = do_parse("binds {}");
        assert_eq!(parsed.layout, Layout::default());
        assert!(!parsed.selection.clear_after_paste);
        assert!(parsed.binds.0.is_empty());
    }

    #[test]
    fn duplicate_binds_are_rejected() {
        let result = Config::parse(
            "test.kdl",
            r#"
            binds {
                Alt+Y { yank; }
                alt+y { paste; }
            }
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn multiple_actions_are_rejected() {
        let result = Config::parse(
            "test.kdl",
            r#"
            binds {
                Alt+Y { yank; paste; }
            }
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_split_is_rejected() {
        let result = Config::parse("test.kdl", r#"layout { default-split "tabbed"; }"#);
        assert!(result.is_err());
    }
}
