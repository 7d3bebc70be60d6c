//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::{fmt, sync::Arc};

use crate::domain::ports::{
    ComplaintsCommand, ComplaintsQuery, LoginService, StudentAccountsCommand,
    StudentAccountsQuery, TokenService,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenService>,
    pub students: Arc<dyn StudentAccountsCommand>,
    pub students_query: Arc<dyn StudentAccountsQuery>,
    pub complaints: Arc<dyn ComplaintsCommand>,
    pub complaints_query: Arc<dyn ComplaintsQuery>,
}

/// Dependency bundle for HTTP handlers.
///
/// `tokens` backs the bearer gate; the remaining ports back the handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenService>,
    pub students: Arc<dyn StudentAccountsCommand>,
    pub students_query: Arc<dyn StudentAccountsQuery>,
    pub complaints: Arc<dyn ComplaintsCommand>,
    pub complaints_query: Arc<dyn ComplaintsQuery>,
}

impl fmt::Debug for HttpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpState").finish_non_exhaustive()
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            tokens,
            students,
            students_query,
            complaints,
            complaints_query,
        } = ports;
        Self {
            login,
            tokens,
            students,
            students_query,
            complaints,
            complaints_query,
        }
    }
}
