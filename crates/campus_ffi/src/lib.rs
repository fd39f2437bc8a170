//! Flutter-facing bindings for campus core use-cases.

pub mod api;
