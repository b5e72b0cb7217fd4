//! In-memory stores owned by the academy root.
//!
//! # Responsibility
//! - Hold session and roster state for the lifetime of the process.
//! - Expose controlled mutations and change subscriptions to UI callers.
//!
//! # Invariants
//! - All mutations are synchronous and complete before returning.
//! - Listeners run after state is updated, so reads inside a listener see
//!   the new state.
//! - A failed mutation changes nothing and notifies nobody.

pub mod listeners;
pub mod roster_store;
pub mod session_store;
