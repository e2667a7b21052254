//! Editor: the application context tying the buffer, overlays, commands and status together.

mod builtin_commands;
mod clipboard;
mod file_ops;
mod input;
mod screens;

use crate::buffer::TextBuffer;
use crate::commands::CommandRegistry;
use crate::config::Config;
use crate::error::EditorError;
use crate::render::CuiRender;
use crate::scene::ScenePainter;
use crate::sink::OutputSink;
use crate::widget::Widget;
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub use builtin_commands::register_builtin_commands;
pub use screens::DocumentStats;

/// Whether `err` is the quit signal rather than a failure.
pub fn is_interrupt(err: &anyhow::Error) -> bool {
    err.downcast_ref::<EditorError>().is_some_and(|e| !e.is_recoverable())
}

/// Short-lived status message shown in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMsg {
    pub text: String,
    pub until: Instant,
}

/// What a mounted widget is asking about, so its outcome can be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Alert,
    QuitConfirm,
}

#[derive(Debug, Clone)]
pub struct Overlay {
    pub widget: Widget,
    pub kind: OverlayKind,
}

/// The top-level application state.
pub struct Editor {
    pub(crate) buffer: TextBuffer,
    pub(crate) file_path: Option<PathBuf>,
    /// Unsaved changes.
    pub(crate) dirty: bool,
    /// Lines as last opened or saved, so undo can tell when the document is clean again.
    pub(crate) saved: Vec<String>,
    pub(crate) status: Option<StatusMsg>,
    /// At most one mounted widget; while set it receives every key.
    pub(crate) overlay: Option<Overlay>,
    pub(crate) commands: CommandRegistry,
    pub(crate) config: Config,
    /// Document rows visible at the last draw, for paging.
    pub(crate) viewport_rows: usize,
}

impl Editor {
    /// Create an editor, loading `path` when it exists.
    pub fn new(path: Option<PathBuf>, config: Config) -> Result<Self> {
        let mut commands = CommandRegistry::new();
        register_builtin_commands(&mut commands);

        let mut ed = Self {
            buffer: TextBuffer::new(config.history_limit),
            file_path: None,
            dirty: false,
            saved: vec![String::new()],
            status: None,
            overlay: None,
            commands,
            config,
            viewport_rows: 1,
        };

        if let Some(p) = path {
            if p.exists() {
                ed.open_path(p)?;
            } else {
                tracing::info!(path = %p.display(), "new file");
                ed.file_path = Some(p);
            }
        }

        ed.set_status("F1 help | Ctrl+S save | Ctrl+Q quit");
        Ok(ed)
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    /// Show a message in the status bar for the configured time.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        let until = Instant::now() + self.config.status_ttl();
        self.status = Some(StatusMsg { text: msg.into(), until });
    }

    /// Expire the status message. Returns whether the screen needs a redraw.
    pub fn tick(&mut self) -> bool {
        let expired = self.status.as_ref().is_some_and(|st| Instant::now() >= st.until);
        if expired {
            self.status = None;
        }
        expired
    }

    /// Remember the current lines as the on-disk state.
    pub(crate) fn mark_saved(&mut self) {
        self.saved = self.buffer.lines().to_vec();
        self.dirty = false;
    }

    /// Recompute the dirty flag after history moved the document.
    pub(crate) fn refresh_dirty(&mut self) {
        self.dirty = self.buffer.lines() != self.saved.as_slice();
    }

    pub fn show_alert(&mut self, title: &str, text: &str) {
        self.overlay = Some(Overlay { widget: Widget::alert(title, text), kind: OverlayKind::Alert });
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    /// Log a failed command and tell the user about it.
    pub fn report(&mut self, err: &anyhow::Error) {
        tracing::warn!("{err:#}");
        self.show_alert("Error", &format!("{err:#}"));
    }

    /// Status bar text: dirty marker, file, position and the transient message.
    pub fn status_line(&self) -> String {
        let name = self.file_path.as_ref().map_or_else(|| "<new file>".to_string(), |p| p.display().to_string());
        let dirty = if self.dirty { "*" } else { " " };
        let pos = self.buffer.cursor_position();
        let col = pos.left - self.buffer.prefix_length() + 1;
        let mut bar = format!(
            " {dirty} {name}  Ln {}, Col {}  ({} lines)",
            pos.top + 1,
            col,
            self.buffer.size()
        );
        if let Some(msg) = self.status_text() {
            bar.push_str(" | ");
            bar.push_str(msg);
        }
        bar
    }

    /// Render one frame, with the mounted widget (if any) painted over the text.
    pub fn draw<S: OutputSink>(&mut self, render: &mut CuiRender<S>) -> Result<()> {
        self.viewport_rows = render.viewport_rows();
        render.set_cursor_visible(self.overlay.is_none());
        let status = self.status_line();
        let painters: Vec<&dyn ScenePainter> =
            self.overlay.iter().map(|o| &o.widget as &dyn ScenePainter).collect();
        render.render(&mut self.buffer, &painters, &status)
    }

    /// Run a command by name; unknown names get a "did you mean" hint.
    pub fn run_command_by_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if let Some(cmd) = self.commands.get(name) {
            let action = cmd.action;
            tracing::debug!(command = name, "run");
            return action(self);
        }

        let mut msg = format!("Unknown command: '{name}'");
        if let Some(suggestion) = self.commands.suggest_command(name) {
            msg.push_str(&format!(". Did you mean '{}'?", suggestion.name));
        }
        self.set_status(msg);
        Ok(())
    }
}

/// The editor and the renderer it draws with, kept together behind one lock.
pub struct Session<S: OutputSink> {
    pub editor: Editor,
    pub render: CuiRender<S>,
}

impl<S: OutputSink> Session<S> {
    pub fn new(editor: Editor, render: CuiRender<S>) -> Self {
        Self { editor, render }
    }

    pub fn draw(&mut self) -> Result<()> {
        self.editor.draw(&mut self.render)
    }

    /// Apply one key and redraw. The quit signal is returned before drawing.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.editor.handle_key(key)?;
        self.draw()
    }

    /// Repaint from scratch after the surface changed size.
    pub fn on_resize(&mut self) -> Result<()> {
        tracing::debug!(size = ?self.render.sink().size(), "resize");
        self.render.clear()?;
        self.draw()
    }

    /// Expire the status message, redrawing if it went away.
    pub fn tick(&mut self) -> Result<()> {
        if self.editor.tick() {
            self.draw()?;
        }
        Ok(())
    }
}
