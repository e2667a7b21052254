//! `gutterpad`: a terminal text editor that shows every line with a numbered gutter.
//!
//! ## Reading guide
//! - **`formatter`**: raw lines to `"  N |content"` display lines, gutter widths, reflow.
//! - **`cursor`**: a cursor over display columns that wraps across line ends.
//! - **`history`** and **`buffer`**: the document with bounded undo/redo.
//! - **`scene`**, **`sink`**, **`render`**: reflow, scroll and paint a frame with a virtual
//!   cursor onto any output sink.
//! - **`widget`**: modal alerts and dialogs painted over the scene.
//! - **`editor`**: the application context (commands, file I/O, clipboard, status bar).

pub mod buffer;
pub mod commands;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod formatter;
pub mod history;
pub mod logging;
pub mod poller;
pub mod render;
pub mod scene;
pub mod sink;
pub mod terminal;
pub mod utils;
pub mod widget;
