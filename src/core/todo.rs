//! # Todo List
//!
//! The ordered, in-memory collection of tasks. Position in the list is the
//! user-facing index, so deleting index `i` shifts everything after it down
//! by one. Callers must re-read indices after a delete.
//!
//! ```text
//! TodoList
//! └── items: Vec<Todo>
//!     ├── title: String
//!     ├── completed: bool
//!     ├── created_at: DateTime<Local>          // set once
//!     └── completed_at: Option<DateTime<Local>> // Some iff completed
//! ```
//!
//! On disk a list is a bare JSON array whose objects use the field names
//! `Title`, `Completed`, `CreatedAt` and `CompletedAt`.

use std::fmt;

use chrono::{DateTime, Local};
use log::warn;
use serde::{Deserialize, Serialize};

/// Timestamp format used in the table (`2006-01-02 15:04:05` style).
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single task.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Todo {
    title: String,
    completed: bool,
    created_at: DateTime<Local>,
    #[serde(default)]
    completed_at: Option<DateTime<Local>>,
}

impl Todo {
    fn new(title: String, now: DateTime<Local>) -> Self {
        Self {
            title,
            completed: false,
            created_at: now,
            completed_at: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        self.completed_at
    }

    fn toggle_at(&mut self, now: DateTime<Local>) {
        if self.completed {
            self.completed = false;
            self.completed_at = None;
        } else {
            self.completed = true;
            self.completed_at = Some(now);
        }
    }

    /// Restores `completed_at.is_some() == completed` for records read from disk.
    /// Returns true if anything had to change.
    fn repair(&mut self) -> bool {
        match (self.completed, self.completed_at) {
            (false, Some(_)) => {
                self.completed_at = None;
                true
            }
            (true, None) => {
                self.completed_at = Some(self.created_at);
                true
            }
            _ => false,
        }
    }
}

/// One display-ready line of the todo table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub index: usize,
    pub title: String,
    pub completed: bool,
    pub created_at: String,
    /// Blank when the task is not completed.
    pub completed_at: String,
}

/// Errors from index-addressed list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// The index does not address a current element. The list is unchanged.
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for TodoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoError::OutOfRange { index, len: 0 } => {
                write!(f, "index {index} is out of range: the list is empty")
            }
            TodoError::OutOfRange { index, len } => {
                write!(f, "index {index} is out of range (valid: 0..={})", len - 1)
            }
        }
    }
}

impl std::error::Error for TodoError {}

/// Ordered collection of todos, addressed by 0-based position.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct TodoList {
    items: Vec<Todo>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Todo> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Todo> {
        self.items.iter()
    }

    /// Appends a new, incomplete todo and returns its index.
    pub fn add(&mut self, title: impl Into<String>) -> usize {
        self.items.push(Todo::new(title.into(), Local::now()));
        self.items.len() - 1
    }

    /// Removes and returns the todo at `index`, shifting later items left.
    pub fn delete(&mut self, index: usize) -> Result<Todo, TodoError> {
        self.check(index)?;
        Ok(self.items.remove(index))
    }

    /// Flips the completion flag at `index` and returns the new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool, TodoError> {
        self.check(index)?;
        let todo = &mut self.items[index];
        todo.toggle_at(Local::now());
        Ok(todo.completed)
    }

    /// Replaces the title at `index`. Nothing else changes.
    pub fn edit(&mut self, index: usize, title: impl Into<String>) -> Result<(), TodoError> {
        self.check(index)?;
        self.items[index].title = title.into();
        Ok(())
    }

    /// Display rows in list order.
    pub fn rows(&self) -> Vec<TodoRow> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, todo)| TodoRow {
                index,
                title: todo.title.clone(),
                completed: todo.completed,
                created_at: todo.created_at.format(DATE_TIME_FORMAT).to_string(),
                completed_at: match (todo.completed, todo.completed_at) {
                    (true, Some(at)) => at.format(DATE_TIME_FORMAT).to_string(),
                    _ => String::new(),
                },
            })
            .collect()
    }

    /// Fixes records whose completion fields disagree. Returns how many were touched.
    pub(crate) fn repair(&mut self) -> usize {
        let mut repaired = 0;
        for (index, todo) in self.items.iter_mut().enumerate() {
            if todo.repair() {
                warn!(
                    "Todo {} ({:?}) had inconsistent completion fields, repaired",
                    index, todo.title
                );
                repaired += 1;
            }
        }
        repaired
    }

    fn check(&self, index: usize) -> Result<(), TodoError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(TodoError::OutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(titles: &[&str]) -> TodoList {
        let mut list = TodoList::new();
        for title in titles {
            list.add(*title);
        }
        list
    }

    #[test]
    fn test_add_appends_incomplete_todo() {
        let mut list = list_of(&["first"]);
        let index = list.add("second");

        assert_eq!(index, 1);
        assert_eq!(list.len(), 2);
        let todo = list.get(1).unwrap();
        assert_eq!(todo.title(), "second");
        assert!(!todo.completed());
        assert!(todo.completed_at().is_none());
    }

    #[test]
    fn test_delete_removes_exactly_that_element() {
        let mut list = list_of(&["a", "b", "c"]);
        let removed = list.delete(1).unwrap();

        assert_eq!(removed.title(), "b");
        let titles: Vec<_> = list.iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn test_delete_out_of_range_leaves_list_unchanged() {
        let mut list = list_of(&["a", "b"]);
        let before = list.clone();

        let err = list.delete(2).unwrap_err();
        assert_eq!(err, TodoError::OutOfRange { index: 2, len: 2 });
        assert_eq!(list, before);
    }

    #[test]
    fn test_delete_on_empty_list_fails() {
        let mut list = TodoList::new();
        let err = list.delete(0).unwrap_err();
        assert_eq!(err, TodoError::OutOfRange { index: 0, len: 0 });
        assert!(list.is_empty());
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_toggle_stamps_and_clears_completed_at() {
        let mut list = list_of(&["task"]);

        assert!(list.toggle(0).unwrap());
        let todo = list.get(0).unwrap();
        assert!(todo.completed());
        assert!(todo.completed_at().is_some());

        assert!(!list.toggle(0).unwrap());
        let todo = list.get(0).unwrap();
        assert!(!todo.completed());
        assert!(todo.completed_at().is_none());
    }

    #[test]
    fn test_double_toggle_restores_original() {
        let mut list = list_of(&["a", "b"]);
        list.toggle(1).unwrap();
        let before = list.clone();

        list.toggle(1).unwrap();
        list.toggle(1).unwrap();
        assert!(list.get(1).unwrap().completed());

        list.toggle(0).unwrap();
        list.toggle(0).unwrap();
        assert_eq!(list.get(0), before.get(0));
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut list = list_of(&["a"]);
        assert!(list.toggle(5).is_err());
        assert!(!list.get(0).unwrap().completed());
    }

    #[test]
    fn test_edit_changes_only_title() {
        let mut list = list_of(&["a", "b", "c"]);
        list.toggle(1).unwrap();
        let before = list.clone();

        list.edit(1, "bee").unwrap();

        let edited = list.get(1).unwrap();
        let original = before.get(1).unwrap();
        assert_eq!(edited.title(), "bee");
        assert_eq!(edited.completed(), original.completed());
        assert_eq!(edited.created_at(), original.created_at());
        assert_eq!(edited.completed_at(), original.completed_at());
        assert_eq!(list.get(0), before.get(0));
        assert_eq!(list.get(2), before.get(2));
    }

    #[test]
    fn test_edit_out_of_range() {
        let mut list = list_of(&["a"]);
        assert_eq!(
            list.edit(1, "x"),
            Err(TodoError::OutOfRange { index: 1, len: 1 })
        );
        assert_eq!(list.get(0).unwrap().title(), "a");
    }

    #[test]
    fn test_buy_milk_scenario() {
        let mut list = TodoList::new();
        list.add("buy milk");
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().title(), "buy milk");
        assert!(!list.get(0).unwrap().completed());

        list.toggle(0).unwrap();
        assert!(list.get(0).unwrap().completed());
        assert!(list.get(0).unwrap().completed_at().is_some());

        list.edit(0, "buy oat milk").unwrap();
        assert_eq!(list.get(0).unwrap().title(), "buy oat milk");
        assert!(list.get(0).unwrap().completed());

        list.delete(0).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_rows_blank_completed_at_for_open_tasks() {
        let mut list = list_of(&["open", "done"]);
        list.toggle(1).unwrap();

        let rows = list.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].title, "open");
        assert!(!rows[0].completed);
        assert_eq!(rows[0].completed_at, "");
        assert_eq!(rows[0].created_at.len(), "2006-01-02 15:04:05".len());
        assert!(rows[1].completed);
        assert_eq!(rows[1].completed_at.len(), "2006-01-02 15:04:05".len());
    }

    #[test]
    fn test_serializes_with_exact_field_names() {
        let mut list = list_of(&["a"]);
        list.toggle(0).unwrap();
        list.add("b");

        let value = serde_json::to_value(&list).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        let first = array[0].as_object().unwrap();
        let mut keys: Vec<_> = first.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["Completed", "CompletedAt", "CreatedAt", "Title"]);
        assert!(array[1]["CompletedAt"].is_null());
    }

    #[test]
    fn test_deserializes_go_style_timestamps() {
        let json = r#"[
            {
                "Title": "吃一个榴莲大福",
                "Completed": true,
                "CreatedAt": "2024-11-02T10:15:30.123456789+08:00",
                "CompletedAt": "2024-11-02T11:00:00.5+08:00"
            },
            {
                "Title": "喝一口豆浆",
                "Completed": false,
                "CreatedAt": "2024-11-02T10:16:00Z",
                "CompletedAt": null
            },
            {
                "Title": "no completed_at key",
                "Completed": false,
                "CreatedAt": "2024-11-02T10:17:00Z"
            }
        ]"#;
        let list: TodoList = serde_json::from_str(json).unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.get(0).unwrap().completed_at().is_some());
        assert!(list.get(1).unwrap().completed_at().is_none());
        assert!(list.get(2).unwrap().completed_at().is_none());
        assert_eq!(
            list.get(0).unwrap().created_at().timestamp_subsec_nanos(),
            123_456_789
        );
    }

    #[test]
    fn test_repair_restores_invariant() {
        let json = r#"[
            {"Title": "stray", "Completed": false, "CreatedAt": "2024-01-01T00:00:00Z", "CompletedAt": "2024-01-02T00:00:00Z"},
            {"Title": "missing", "Completed": true, "CreatedAt": "2024-01-01T00:00:00Z", "CompletedAt": null},
            {"Title": "fine", "Completed": false, "CreatedAt": "2024-01-01T00:00:00Z", "CompletedAt": null}
        ]"#;
        let mut list: TodoList = serde_json::from_str(json).unwrap();

        assert_eq!(list.repair(), 2);
        for todo in list.iter() {
            assert_eq!(todo.completed(), todo.completed_at().is_some());
        }
        let missing = list.get(1).unwrap();
        assert_eq!(missing.completed_at(), Some(missing.created_at()));
    }
}
