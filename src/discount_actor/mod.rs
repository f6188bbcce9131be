//! Stored discount codes. Ids are the normalised codes themselves.

mod actions;
pub mod entity;

pub use actions::*;
