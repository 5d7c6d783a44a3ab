//! Core type definitions used across the Proctor workspace.

pub mod id;

pub use id::*;
