//! Daily diet backend: session-cookie users and their meal history.
//!
//! Layout follows ports and adapters: [`domain`] owns entities, services and
//! port traits; [`inbound`] exposes them over HTTP; [`outbound`] provides the
//! PostgreSQL and in-memory repositories.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
