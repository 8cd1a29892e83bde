//! # Console Adapter
//!
//! The line-oriented terminal front end. Clears the screen, prints the todo
//! table and the numbered menu, reads one choice per line from standard
//! input and turns it into a `core::Action`.
//!
//! This is the only module that touches stdin/stdout and crossterm.
//!
//! ## Loop States
//!
//! ```text
//!   Running ──draw──▶ AwaitingChoice ──1-5 / bad input──▶ Running
//!                           │
//!                           └──6 / EOF──▶ Exiting
//! ```
//!
//! Sub-prompts (title, index) read one more line each. Bad input there
//! cancels only that command; the list is left alone.

pub mod menu;
pub mod table;

use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use log::{debug, error, info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::console::menu::{InputError, MENU, MenuChoice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    AwaitingChoice,
    Exiting,
}

/// Builds the app from config and runs the menu loop on stdin/stdout.
pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let mut app = App::from_config(&config);
    info!(
        "Starting with {} todos from {}",
        app.todos.len(),
        app.storage.path().display()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    console.run(&mut app)
}

/// Menu loop over any line reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Hands back the writer, e.g. to inspect what was printed.
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self, app: &mut App) -> io::Result<()> {
        let mut state = LoopState::Running;
        while state != LoopState::Exiting {
            state = self.step(app, state)?;
        }
        info!("Exiting");
        Ok(())
    }

    fn step(&mut self, app: &mut App, state: LoopState) -> io::Result<LoopState> {
        match state {
            LoopState::Running => {
                self.draw(app)?;
                Ok(LoopState::AwaitingChoice)
            }
            LoopState::AwaitingChoice => self.await_choice(app),
            LoopState::Exiting => Ok(LoopState::Exiting),
        }
    }

    fn draw(&mut self, app: &App) -> io::Result<()> {
        queue!(self.output, MoveTo(0, 0), Clear(ClearType::All))?;
        write!(self.output, "{}", table::render(&app.todos.rows()))?;
        if !app.status_message.is_empty() {
            writeln!(self.output, "{}", app.status_message)?;
        }
        writeln!(self.output)?;
        writeln!(self.output, "{MENU}")?;
        write!(self.output, "Enter your choice: ")?;
        self.output.flush()
    }

    fn await_choice(&mut self, app: &mut App) -> io::Result<LoopState> {
        let choice = match self.read_line()? {
            Some(line) => match line.and_then(|line| menu::parse_choice(&line)) {
                Ok(choice) => choice,
                Err(e) => {
                    warn!("Bad menu input: {}", e);
                    app.status_message = match e {
                        InputError::UnknownChoice(_) => format!("Invalid choice: {e}"),
                        _ => format!("Warning: {e}"),
                    };
                    return Ok(LoopState::Running);
                }
            },
            None => {
                debug!("End of input, treating as Exit");
                MenuChoice::Exit
            }
        };

        let action = match self.prompt_action(choice)? {
            Ok(action) => action,
            Err(e) => {
                warn!("Cancelled {:?}: {}", choice, e);
                app.status_message = format!("Cancelled: {e}");
                return Ok(LoopState::Running);
            }
        };

        match update(app, action) {
            Effect::None => Ok(LoopState::Running),
            Effect::Save => {
                save(app);
                Ok(LoopState::Running)
            }
            Effect::SaveAndQuit => {
                if !save(app) {
                    writeln!(self.output, "\n{}", app.status_message)?;
                }
                Ok(LoopState::Exiting)
            }
            Effect::Quit => Ok(LoopState::Exiting),
        }
    }

    /// Reads whatever extra input a command needs and builds its action.
    fn prompt_action(&mut self, choice: MenuChoice) -> io::Result<Result<Action, InputError>> {
        let action = match choice {
            MenuChoice::Add => self.prompt("Title: ", menu::parse_title)?.map(Action::Add),
            MenuChoice::Delete => self
                .prompt("Index to delete: ", menu::parse_index)?
                .map(Action::Delete),
            MenuChoice::Toggle => self
                .prompt("Index to toggle: ", menu::parse_index)?
                .map(Action::Toggle),
            MenuChoice::Edit => match self.prompt("Index to edit: ", menu::parse_index)? {
                Ok(index) => self
                    .prompt("New title: ", menu::parse_title)?
                    .map(|title| Action::Edit { index, title }),
                Err(e) => Err(e),
            },
            MenuChoice::Save => Ok(Action::Save),
            MenuChoice::Exit => Ok(Action::Exit),
        };
        Ok(action)
    }

    fn prompt<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> io::Result<Result<T, InputError>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        // EOF mid-command reads as an empty line and fails to parse
        let line = self.read_line()?.unwrap_or_else(|| Ok(String::new()));
        Ok(line.and_then(|line| parse(&line)))
    }

    /// One line without its terminator, or None at end of input.
    ///
    /// Bytes that aren't UTF-8 are bad input, not an I/O failure: the line
    /// is consumed and reported as `InputError::NotUtf8`.
    fn read_line(&mut self) -> io::Result<Option<Result<String, InputError>>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        Ok(Some(String::from_utf8(buf).map_err(|_| InputError::NotUtf8)))
    }
}

/// Writes the list to storage. Returns false (and sets the status) on failure.
fn save(app: &mut App) -> bool {
    match app.storage.save(&app.todos) {
        Ok(()) => {
            app.dirty = false;
            app.status_message = format!(
                "Saved {} todos to {}",
                app.todos.len(),
                app.storage.path().display()
            );
            info!("{}", app.status_message);
            true
        }
        Err(e) => {
            error!("Failed to save todos: {}", e);
            app.status_message = format!("Save failed: {e}");
            false
        }
    }
}
