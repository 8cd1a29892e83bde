//! # Core Application Logic
//!
//! This module contains the todo manager's business logic.
//! It knows nothing about terminals or menus.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • TodoList (data)      │
//!                    │  • Storage (JSON file)  │
//!                    │  • Action (commands)    │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │  Console   │
//!                         │  Adapter   │
//!                         │ (menu loop)│
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`todo`]: `Todo` and `TodoList`, index-addressed mutations
//! - [`storage`]: whole-file JSON load/save
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`config`]: layered settings

pub mod action;
pub mod config;
pub mod state;
pub mod storage;
pub mod todo;

pub use action::{Action, Effect, update};
pub use state::App;
pub use storage::{Storage, StorageError};
pub use todo::{Todo, TodoError, TodoList, TodoRow};
