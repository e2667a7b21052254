//! `gutterpad`: terminal entry point.
//!
//! - **`run()`**: parses arguments, loads config, sets up logging and the terminal.
//! - The editor and its renderer sit behind one mutex shared by the input loop and the
//!   resize poller thread, so a frame is never drawn mid-edit.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use gutterpad::config::Config;
use gutterpad::editor::{is_interrupt, Editor, Session};
use gutterpad::logging;
use gutterpad::poller::ResizePoller;
use gutterpad::render::CuiRender;
use gutterpad::sink::CrosstermSink;
use gutterpad::terminal::TerminalGuard;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

type SharedSession = Arc<Mutex<Session<CrosstermSink<Stdout>>>>;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}

fn print_help() {
    println!("gutterpad: a line-numbered terminal text editor");
    println!();
    println!("USAGE:");
    println!("    gutterpad [FILE]          Open a file (created on first save)");
    println!("    gutterpad -h, --help      Show this help message");
    println!("    gutterpad -v, --version   Show version information");
    println!();
    println!("KEYBINDINGS:");
    println!("    Ctrl+S    Save            Ctrl+Q    Quit");
    println!("    Ctrl+Z    Undo            Ctrl+Y    Redo");
    println!("    Ctrl+C    Copy line       Ctrl+V    Paste");
    println!("    Ctrl+K    Delete line     F1 / F2   Help / Statistics");
    println!();
    println!("CONFIG:");
    println!("    ./gutterpad.toml, ./.gutterpad.toml or ~/.config/gutterpad/config.toml");
    println!("    Set GUTTERPAD_LOG to override the log filter.");
}

/// Lock the session, carrying on with the data if a previous holder panicked.
fn lock(session: &SharedSession) -> MutexGuard<'_, Session<CrosstermSink<Stdout>>> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut file_to_open = None;

    if let Some(arg) = args.get(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-v" | "--version" => {
                println!("gutterpad v{}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            flag if flag.starts_with('-') => {
                eprintln!("Error: Unknown flag '{flag}'");
                eprintln!("Try 'gutterpad --help' for more information.");
                std::process::exit(1);
            }
            path => file_to_open = Some(PathBuf::from(path)),
        }
    }

    let config = Config::discover()?;
    logging::init(&config)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let editor = Editor::new(file_to_open, config.clone())?;

    let mut stdout = io::stdout();
    let _term = TerminalGuard::new(&mut stdout)?;
    let sink = CrosstermSink::new(stdout).context("Querying terminal size")?;
    let session: SharedSession = Arc::new(Mutex::new(Session::new(editor, CuiRender::new(sink))));
    lock(&session).draw()?;

    let polled = Arc::clone(&session);
    let mut poller = ResizePoller::spawn(config.resize_poll_interval(), move || {
        let mut s = lock(&polled);
        if s.render.sink_mut().refresh_size()? {
            s.on_resize()?;
        }
        Ok(())
    });

    let result = event_loop(&session);
    poller.stop();

    match result {
        Err(e) if is_interrupt(&e) => {
            tracing::info!("quit");
            Ok(())
        }
        other => other,
    }
}

/// Read input until the quit signal (or a fatal error) comes back.
fn event_loop(session: &SharedSession) -> Result<()> {
    loop {
        // poll so transient status messages can expire
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => lock(session).handle_key(key)?,
                Event::Resize(_, _) => {
                    let mut s = lock(session);
                    s.render.sink_mut().refresh_size()?;
                    s.on_resize()?;
                }
                _ => {}
            }
        } else {
            lock(session).tick()?;
        }
    }
}
