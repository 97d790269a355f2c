//! Domain logic shared by the quotd data and API layers.
//!
//! This crate has no internal dependencies so it can be used by the
//! repository layer, the HTTP layer, and any future CLI tooling.

pub mod error;
pub mod ordering;
pub mod search;
pub mod types;
