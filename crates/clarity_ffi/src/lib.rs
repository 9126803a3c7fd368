//! Flutter-facing bindings for the Clarity wellness core.

pub mod api;
