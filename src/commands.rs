//! Named editor commands and their key bindings.

use crate::editor::Editor;
use crate::utils::levenshtein_distance;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Signature of a built-in command.
pub type CommandFn = fn(&mut Editor) -> Result<()>;

/// A user-invokable action, bound to at most one key chord.
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub description: String,
    /// Canonical chord, e.g. `"Ctrl+S"`.
    pub key: Option<String>,
    pub action: CommandFn,
}

impl Command {
    pub fn new(name: &str, description: &str, key: Option<&str>, action: CommandFn) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            key: key.map(str::to_string),
            action,
        }
    }
}

/// Registry of known commands with name and key lookup tables.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    by_name: HashMap<String, usize>,
    by_key: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command, replacing any command of the same (case-insensitive) name.
    pub fn register(&mut self, cmd: Command) {
        let name_key = cmd.name.to_lowercase();
        let idx = match self.by_name.get(&name_key) {
            Some(&idx) => {
                if let Some(old_key) = self.commands[idx].key.take() {
                    self.by_key.remove(&old_key);
                }
                idx
            }
            None => {
                self.commands.push(cmd.clone());
                self.by_name.insert(name_key, self.commands.len() - 1);
                self.commands.len() - 1
            }
        };
        if let Some(key) = &cmd.key {
            self.by_key.insert(key.clone(), idx);
        }
        self.commands[idx] = cmd;
    }

    /// Lookup by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(*self.by_name.get(&name.to_lowercase())?)
    }

    /// Command bound to a canonical key chord.
    pub fn resolve_key(&self, key: &str) -> Option<&Command> {
        self.commands.get(*self.by_key.get(key)?)
    }

    /// All commands sorted by name.
    pub fn list(&self) -> Vec<&Command> {
        let mut v: Vec<&Command> = self.commands.iter().collect();
        v.sort_by(|a, b| a.name.cmp(&b.name));
        v
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Closest command name for a typo, if it is close enough.
    pub fn suggest_command(&self, name: &str) -> Option<&Command> {
        let name = name.to_lowercase();
        let (dist, cmd) = self
            .commands
            .iter()
            .map(|c| (levenshtein_distance(&name, &c.name.to_lowercase()), c))
            .min_by_key(|(d, _)| *d)?;

        // within 40% of the longer word, but always allow two edits
        let longest = name.chars().count().max(cmd.name.chars().count());
        let threshold = (longest * 2).div_ceil(5).max(2);
        (dist <= threshold).then_some(cmd)
    }
}

/// Canonical string for a key event: modifiers in `Ctrl`, `Alt`, `Shift` order, then the key,
/// joined with `+` (e.g. `"Ctrl+S"`, `"F1"`).
pub fn canonical_key_string(key: &KeyEvent) -> String {
    let mut parts: Vec<String> = Vec::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".into());
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".into());
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift".into());
    }

    let name = match key.code {
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        other => format!("{other:?}"),
    };
    parts.push(name);
    parts.join("+")
}
