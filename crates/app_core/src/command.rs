//! Command system: key bindings resolved to session actions

use crate::controller::SessionAction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Command identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandId(pub String);

impl CommandId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub const NAV_NEXT_ITEM: &'static str = "nav.next_item";
    pub const FILE_DELETE: &'static str = "file.delete";
    pub const FILE_EMPTY_TRASH: &'static str = "file.empty_trash";
    pub const APP_RELOAD: &'static str = "app.reload";
    pub const APP_QUIT: &'static str = "app.quit";
}

/// Command bound to a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub id: CommandId,
}

impl Command {
    pub fn new(id: &str) -> Self {
        Self {
            id: CommandId::new(id),
        }
    }

    /// Session action this command triggers, if it is one the session knows
    pub fn action(&self) -> Option<SessionAction> {
        match self.id.as_str() {
            CommandId::NAV_NEXT_ITEM => Some(SessionAction::Advance),
            CommandId::FILE_DELETE => Some(SessionAction::Delete),
            CommandId::FILE_EMPTY_TRASH => Some(SessionAction::CommitTrash),
            CommandId::APP_RELOAD => Some(SessionAction::Reload),
            CommandId::APP_QUIT => Some(SessionAction::Quit),
            _ => None,
        }
    }
}

/// Key → command lookup built from the `keybindings` config table
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    bindings: HashMap<String, Command>,
}

impl KeyMap {
    pub fn from_config(keybindings: &HashMap<String, Vec<String>>) -> Self {
        let mut bindings = HashMap::new();

        // Sorted so a key bound twice resolves the same way on every run
        let mut commands: Vec<_> = keybindings.iter().collect();
        commands.sort_by(|a, b| a.0.cmp(b.0));

        for (command_id, keys) in commands {
            let command = Command::new(command_id);
            if command.action().is_none() {
                tracing::warn!("Unknown command in keybindings: {}", command_id);
                continue;
            }

            for key in keys {
                if let Some(previous) = bindings.insert(normalize_key(key), command.clone()) {
                    tracing::warn!(
                        "Key {} bound to both {} and {}",
                        key,
                        previous.id.as_str(),
                        command_id
                    );
                }
            }
        }

        Self { bindings }
    }

    pub fn resolve(&self, key: &str) -> Option<&Command> {
        self.bindings.get(&normalize_key(key))
    }

    /// Keys bound to a command, for help output
    pub fn keys_for(&self, command_id: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .bindings
            .iter()
            .filter(|(_, c)| c.id.as_str() == command_id)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}

/// Single characters keep their case ("x" vs "X"), named keys do not
fn normalize_key(key: &str) -> String {
    let key = key.trim();
    if key.chars().count() == 1 {
        key.to_string()
    } else {
        key.to_lowercase()
    }
}
