//! # qsheet-core
//!
//! Core types, ID generation, and error types for qsheet.
//!
//! This crate provides the foundational types shared across all qsheet crates:
//! - Entity structs for the sheet hierarchy (sheet, topics, subtopics, questions)
//! - Entity factories that assign fresh identities
//! - The `EntityKind` and `LoadSource` enums
//! - ID prefix constants and generation
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;

pub use entities::{Identified, Question, Sheet, SubTopic, Topic};
pub use enums::{EntityKind, LoadSource};
pub use errors::CoreError;
