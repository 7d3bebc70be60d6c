//! Shared cache-control policies for HTTP handlers.

/// Responses carrying credentials or health results must never be stored.
pub const NO_STORE: &str = "no-store";

/// Build the standard cache-control header tuple for uncacheable responses.
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}
