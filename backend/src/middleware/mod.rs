//! Request middleware.
//!
//! Request-lifecycle concerns shared by every route. Authentication lives
//! with the HTTP adapter in [`crate::inbound::http::bearer`].

pub mod trace;

pub use trace::Trace;
