//! Academy domain model.
//!
//! # Responsibility
//! - Define the student and class records owned by the roster store.
//! - Define explicit create requests and partial-update patches.
//!
//! # Invariants
//! - Every record is identified by a stable UUID assigned at creation.
//! - A class attendee set only references existing students.

pub mod class_session;
pub mod student;
