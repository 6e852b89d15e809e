//! Hotel front-office backend.
//!
//! Hexagonal layout: [`domain`] holds the business rules and port traits,
//! [`inbound`] adapts HTTP and WebSocket traffic onto the driving ports, and
//! [`outbound`] implements the driven ports over PostgreSQL, memory, Gemini
//! and the broadcast change feed.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
