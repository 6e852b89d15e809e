//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: in-process repositories for development and tests
//! - **realtime**: broadcast change feed behind the `/ws` endpoint
//! - **gemini**: hosted text completion for the assistant
//! - **security**: argon2id password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They hold no business rules.

pub mod gemini;
pub mod memory;
pub mod persistence;
pub mod realtime;
pub mod security;
