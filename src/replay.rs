//! Scripted sessions against headless windows.
//!
//! A script has one command per line: a key combo looked up in the binds (`Alt+L`), an action
//! name (`focus-next`), or an action in JSON form (`{"spawn":{"command":["foot"]}}`). Empty
//! lines and lines starting with `#` are skipped.

use tracing::{debug, info, warn};
use trellis_config::{Config, Key};

use crate::headless::{HeadlessWindow, WindowId};
use crate::input::{DispatchOutcome, Dispatcher};
use crate::layout::{LayoutElement, Rect};

/// Builds a dispatcher with `windows` tiled and `floating` floating headless windows.
pub fn populate(config: &Config, windows: u64, floating: u64) -> Dispatcher<HeadlessWindow> {
    let mut dispatcher = Dispatcher::new(config);

    for id in 1..=windows {
        dispatcher.add_window(HeadlessWindow::new(id));
    }
    for i in 0..floating {
        let offset = 0.1 + 0.05 * i as f32;
        let rect = Rect::from_xywh(offset, offset, 0.4, 0.4);
        dispatcher.add_floating_window(HeadlessWindow::new(windows + i + 1), rect);
    }

    dispatcher
}

/// Runs one script line. Returns `None` for blank and comment lines.
pub fn dispatch_line(
    dispatcher: &mut Dispatcher<HeadlessWindow>,
    line: &str,
) -> Option<DispatchOutcome> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let outcome = if line.starts_with('{') {
        match serde_json::from_str::<trellis_ipc::Action>(line) {
            Ok(action) => dispatcher.handle_action(action.into()),
            Err(err) => {
                warn!("invalid JSON action {line:?}: {err}");
                DispatchOutcome::Noop
            }
        }
    } else {
        match line.parse::<Key>() {
            Ok(key) if dispatcher.binds().find(&key).is_some() => {
                dispatcher.handle_key(&key, false)
            }
            _ => dispatcher.dispatch_name(line),
        }
    };

    reap_closed(dispatcher);
    Some(outcome)
}

/// Runs a whole script and returns the outcome of every command.
pub fn run_script(
    dispatcher: &mut Dispatcher<HeadlessWindow>,
    script: &str,
) -> Vec<DispatchOutcome> {
    let mut outcomes = Vec::new();
    for line in script.lines() {
        let Some(outcome) = dispatch_line(dispatcher, line) else {
            continue;
        };

        match &outcome {
            DispatchOutcome::Spawn(command) => info!("not spawning {command:?}"),
            DispatchOutcome::SpawnSh(command) => info!("not spawning `{command}`"),
            _ => (),
        }
        outcomes.push(outcome);
    }
    outcomes
}

/// Removes windows that were asked to close, the way a host would once they are gone.
fn reap_closed(dispatcher: &mut Dispatcher<HeadlessWindow>) {
    let closed: Vec<WindowId> = dispatcher
        .tree()
        .windows()
        .into_iter()
        .filter(|window| window.close_requested())
        .map(|window| *window.id())
        .collect();

    for id in closed {
        debug!("window {id} closed");
        dispatcher.remove_window(&id);
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn script_mixes_keys_names_and_json() {
        let config = Config::default();
        let mut dispatcher = populate(&config, 3, 0);

        let outcomes = run_script(
            &mut dispatcher,
            r#"
            # focus the first window, then yank it
            focus-prev
            Alt+H
            Alt+Y

            Alt+L
            Alt+L
            paste
            {"spawn":{"command":["foot"]}}
            no-such-action
            "#,
        );

        assert_eq!(outcomes.len(), 8);
        assert_eq!(
            outcomes[6],
            DispatchOutcome::Spawn(vec![String::from("foot")])
        );
        assert_eq!(outcomes[7], DispatchOutcome::Noop);

        assert_snapshot!(dispatcher.tree().debug_tree(), @r"
        SplitH
          Window 2
          SplitH
            Window 3 *
            Window 1
        ");
    }

    #[test]
    fn closed_windows_are_removed() {
        let config = Config::default();
        let mut dispatcher = populate(&config, 2, 1);

        run_script(&mut dispatcher, "Alt+Shift+Q\nclose-window\n");

        assert_snapshot!(dispatcher.tree().debug_tree(), @r"
        SplitH
          Window 1 *
        ");
    }
}
