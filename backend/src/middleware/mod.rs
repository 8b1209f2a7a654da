//! Request middleware.
//!
//! Purpose: cross-cutting request concerns. [`Trace`] correlates logs and
//! error bodies; [`Cors`] admits browser clients.

pub mod cors;
pub mod trace;

pub use cors::Cors;
pub use trace::Trace;
