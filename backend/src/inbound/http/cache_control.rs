//! Cache-control policies for HTTP handlers.
//!
//! Desk data changes constantly and is pushed over the change feed, so reads
//! are revalidated and exports or probes are never stored.

use actix_web::http::header::CACHE_CONTROL;

/// Per-user reads that browsers may keep but must revalidate.
pub const PRIVATE_NO_CACHE: &str = "private, no-cache, must-revalidate";

/// Responses that must never be written to a cache.
pub const NO_STORE: &str = "no-store";

/// Header tuple for private API reads.
#[must_use]
pub const fn private_no_cache_header() -> (actix_web::http::header::HeaderName, &'static str) {
    (CACHE_CONTROL, PRIVATE_NO_CACHE)
}

/// Header tuple for exports and probes.
#[must_use]
pub const fn no_store_header() -> (actix_web::http::header::HeaderName, &'static str) {
    (CACHE_CONTROL, NO_STORE)
}
