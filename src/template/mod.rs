//! Template catalog and lookup.

pub mod registry;
