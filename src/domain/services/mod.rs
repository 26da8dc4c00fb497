//! Domain services containing core business logic.

mod formal_rewrite;

pub use formal_rewrite::*;
