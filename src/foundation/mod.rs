pub mod core;
pub mod date;
pub mod error;
