//! LearnHub backend: course administration API and learner portal.
//!
//! The crate follows a ports-and-adapters layout. [`domain`] holds the
//! records, ports and services; [`inbound`] adapts HTTP onto the driving
//! ports; [`outbound`] implements the driven ports over PostgreSQL and an
//! in-memory store; [`server`] wires everything into an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
