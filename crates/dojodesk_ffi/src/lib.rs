//! Flutter bridge for DojoDesk core.

pub mod api;
