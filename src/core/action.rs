//! # Actions
//!
//! Every menu command becomes an `Action`.
//! User picks "Add" and types a title? That's `Action::Add(title)`.
//!
//! The `update()` function applies an action to the app state and returns
//! an `Effect` telling the adapter what I/O to perform next. Saving to disk
//! and quitting happen in the console, not here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(String),
    Delete(usize),
    Toggle(usize),
    Edit { index: usize, title: String },
    Save,
    Exit,
}

/// I/O the adapter must perform after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Write the list to storage.
    Save,
    /// Save first (exit policy), then quit.
    SaveAndQuit,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("Applying action: {:?}", action);
    match action {
        Action::Add(title) => {
            let index = app.todos.add(title);
            app.dirty = true;
            app.status_message = format!("Added #{index}");
            Effect::None
        }
        Action::Delete(index) => {
            match app.todos.delete(index) {
                Ok(todo) => {
                    app.dirty = true;
                    app.status_message = format!("Deleted #{index} ({})", todo.title());
                }
                Err(e) => reject(app, "delete", e),
            }
            Effect::None
        }
        Action::Toggle(index) => {
            match app.todos.toggle(index) {
                Ok(completed) => {
                    app.dirty = true;
                    app.status_message = if completed {
                        format!("Marked #{index} as completed")
                    } else {
                        format!("Marked #{index} as not completed")
                    };
                }
                Err(e) => reject(app, "toggle", e),
            }
            Effect::None
        }
        Action::Edit { index, title } => {
            match app.todos.edit(index, title) {
                Ok(()) => {
                    app.dirty = true;
                    app.status_message = format!("Edited #{index}");
                }
                Err(e) => reject(app, "edit", e),
            }
            Effect::None
        }
        Action::Save => Effect::Save,
        Action::Exit => {
            if app.dirty && app.save_on_exit {
                info!("Exiting with unsaved changes, saving first");
                Effect::SaveAndQuit
            } else {
                if app.dirty {
                    warn!("Exiting with unsaved changes (save_on_exit disabled)");
                }
                Effect::Quit
            }
        }
    }
}

fn reject(app: &mut App, command: &str, err: impl std::fmt::Display) {
    warn!("Rejected {}: {}", command, err);
    app.status_message = format!("Cannot {command}: {err}");
}
