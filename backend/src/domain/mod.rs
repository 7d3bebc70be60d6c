//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, the ports connecting them, and the services implementing the
//! driving ports. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, StudentId, Email, PersonName, Role: account model.
//! - Complaint, ComplaintStatus, Category, StatusEntry: complaint lifecycle.
//! - PasswordLoginService, StudentAccountsService, ComplaintService: use-case
//!   implementations behind the driving ports in [`ports`].

pub mod auth;
pub mod complaint;
pub mod complaint_service;
pub mod error;
pub mod login_service;
pub(crate) mod port_error_mapping;
pub mod ports;
pub mod student_accounts_service;
pub mod trace_id;
pub mod user;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::auth::{
    Identity, LoginCredentials, LoginOutcome, LoginValidationError, NewPassword, PASSWORD_MIN,
};
pub use self::complaint::{
    Category, Complaint, ComplaintId, ComplaintStatus, ComplaintValidationError, ComplaintView,
    NewComplaint, OwnerSummary, StatusEntry, StatusUpdate,
};
pub use self::complaint_service::ComplaintService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::login_service::PasswordLoginService;
pub use self::student_accounts_service::StudentAccountsService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, NewAdmin, NewStudent, PasswordHash, PersonName, Role, StudentId, User, UserId,
    UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use complaints::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("Forbidden"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
