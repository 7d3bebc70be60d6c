//! Request middleware for cross-cutting request lifecycle concerns.

pub mod trace;

pub use trace::Trace;
