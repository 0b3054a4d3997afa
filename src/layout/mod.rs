//! Layout: visual tree types and the template layout functions.

pub mod templates;
pub mod tree;
