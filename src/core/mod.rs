//! Core domain types
//!
//! Domain models shared between the auth component, the resource
//! controllers and the storage layer.

pub mod models;
