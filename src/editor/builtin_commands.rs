//! Built-in command registration.

use crate::commands::{Command, CommandRegistry};

/// Register all built-in editor commands.
pub fn register_builtin_commands(reg: &mut CommandRegistry) {
    reg.register(Command::new("save", "Save file", Some("Ctrl+S"), |ed| ed.cmd_save()));
    reg.register(Command::new("quit", "Quit (asks if unsaved)", Some("Ctrl+Q"), |ed| ed.try_quit()));

    reg.register(Command::new("undo", "Undo", Some("Ctrl+Z"), |ed| {
        ed.buffer.undo()?;
        ed.refresh_dirty();
        Ok(())
    }));

    reg.register(Command::new("redo", "Redo", Some("Ctrl+Y"), |ed| {
        ed.buffer.redo()?;
        ed.refresh_dirty();
        Ok(())
    }));

    reg.register(Command::new("paste", "Paste clipboard", Some("Ctrl+V"), |ed| ed.paste()));
    reg.register(Command::new("copy_line", "Copy current line", Some("Ctrl+C"), |ed| ed.copy_line()));

    reg.register(Command::new("delete_line", "Delete current line", Some("Ctrl+K"), |ed| {
        let line = ed.buffer.cursor_position_from_top() + 1;
        if ed.buffer.size() > 1 {
            ed.buffer.remove_line_at(line)?;
        } else {
            ed.buffer.remove_text_block(line..line + 1)?;
        }
        ed.dirty = true;
        Ok(())
    }));

    reg.register(Command::new("help", "Show key reference", Some("F1"), |ed| {
        ed.show_help();
        Ok(())
    }));

    reg.register(Command::new("stats", "Show document statistics", Some("F2"), |ed| {
        ed.show_stats();
        Ok(())
    }));
}
