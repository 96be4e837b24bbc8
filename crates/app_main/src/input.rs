//! Keyboard input: one key name per line on stdin

use app_core::{AppError, KeyMap, SessionAction, SessionHandle};
use std::io::BufRead;
use std::thread::{self, JoinHandle};

/// Key name an empty line stands for
const ENTER: &str = "Enter";

/// Read lines from `reader`, resolve each through `keymap` and hand the
/// action to `send`. End of input counts as quit. Stops early once `send`
/// fails with a fatal error, which means the session is gone.
pub fn read_actions<R, S, U>(reader: R, keymap: &KeyMap, mut send: S, mut on_unbound: U)
where
    R: BufRead,
    S: FnMut(SessionAction) -> Result<(), AppError>,
    U: FnMut(&str),
{
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };

        let key = match line.trim() {
            "" => ENTER,
            key => key,
        };

        let Some(action) = keymap.resolve(key).and_then(|cmd| cmd.action()) else {
            on_unbound(key);
            continue;
        };

        if let Err(e) = send(action) {
            if e.is_fatal() {
                tracing::debug!("Session gone, input reader stopping: {}", e);
                return;
            }
            tracing::warn!("{:?} was not delivered: {}", action, e);
        }
        if action == SessionAction::Quit {
            return;
        }
    }

    let _ = send(SessionAction::Quit);
}

/// Feed stdin into the session from a dedicated thread
pub fn spawn_stdin_reader<U>(keymap: KeyMap, handle: SessionHandle, on_unbound: U) -> std::io::Result<JoinHandle<()>>
where
    U: FnMut(&str) + Send + 'static,
{
    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            read_actions(stdin.lock(), &keymap, |action| handle.send(action), on_unbound);
            tracing::debug!("Input reader finished");
        })
}
