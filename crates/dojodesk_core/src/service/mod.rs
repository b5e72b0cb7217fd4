//! Use-case layer.
//!
//! # Responsibility
//! - Compose the stores behind one application root.
//! - Keep UI/FFI callers away from raw store wiring.

pub mod academy;
pub mod projections;
