//! Actix middleware shared by the admin API and the learner portal.
//!
//! [`Trace`] must wrap both scopes so domain errors can report the
//! request's trace identifier.

pub mod trace;

pub use trace::Trace;
