//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory todo list and apply user intents to it.
//! - Keep presentation layers decoupled from storage details.

pub mod todo_service;
