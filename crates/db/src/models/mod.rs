//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` row structs matching query projections
//! - `Deserialize` parameter structs for the corresponding endpoints

pub mod author;
pub mod day_of;
pub mod quote;
pub mod search;
pub mod topic;
