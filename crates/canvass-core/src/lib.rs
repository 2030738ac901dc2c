//! # canvass-core
//!
//! Core types, ID prefixes, error types, and repository contracts for canvass.
//!
//! This crate provides the foundational types shared across all canvass crates:
//! - Entity structs for surveys, question links, bank questions, and answers
//! - The survey state machine and question bank states
//! - ID prefix constants
//! - Cross-cutting error types
//! - Repository traits implemented by the storage crate
//! - Read models returned by list/detail operations

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod repos;
pub mod responses;

/// Number of question links a survey must hold to be activated, and the
/// maximum it may ever hold.
pub const SURVEY_QUESTION_COUNT: usize = 12;
