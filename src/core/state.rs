//! # Application State
//!
//! Core business state for the todo manager. No terminal types live here;
//! presentation is the `console` module's job.
//!
//! ```text
//! App
//! ├── todos: TodoList           // the live, ordered list
//! ├── storage: Storage          // where the list is persisted
//! ├── save_on_exit: bool        // exit policy
//! ├── dirty: bool               // unsaved changes since last load/save
//! └── status_message: String    // one-line feedback under the table
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::storage::Storage;
use crate::core::todo::TodoList;

pub struct App {
    pub todos: TodoList,
    pub storage: Storage,
    pub save_on_exit: bool,
    /// True once the list differs from what was last loaded or saved.
    pub dirty: bool,
    pub status_message: String,
}

impl App {
    pub fn new(todos: TodoList, storage: Storage) -> Self {
        Self {
            todos,
            storage,
            save_on_exit: true,
            dirty: false,
            status_message: String::from("Welcome!"),
        }
    }

    /// Builds the app from resolved config, loading the list from storage.
    ///
    /// A missing or unreadable file yields an empty list; the reason ends up
    /// in the status line.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let storage = Storage::new(config.storage_path.clone());
        let (todos, load_error) = storage.load_or_default();
        let mut app = Self::new(todos, storage);
        app.save_on_exit = config.save_on_exit;
        app.status_message = match load_error {
            None => format!(
                "Loaded {} todos from {}",
                app.todos.len(),
                app.storage.path().display()
            ),
            Some(e) if e.is_not_found() => format!(
                "No todos yet, they will be saved to {}",
                app.storage.path().display()
            ),
            Some(e) => format!("Warning: {e}. Starting with an empty list"),
        };
        app
    }
}
