//! Composition state, persistence, and the studio controller.

pub mod persist;
pub mod state;
pub mod studio;
