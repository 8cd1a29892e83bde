//! Todos library exports for testing

pub mod console;
pub mod core;
