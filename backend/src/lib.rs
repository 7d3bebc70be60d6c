//! Campus complaint-tracking backend.
//!
//! Students file complaints and follow them; administrators register student
//! accounts and move complaints through `Pending`, `In Progress` and
//! `Resolved`. The crate follows a hexagonal layout: [`domain`] owns the
//! rules and ports, [`inbound`] adapts HTTP onto them and [`outbound`]
//! implements storage and security.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
