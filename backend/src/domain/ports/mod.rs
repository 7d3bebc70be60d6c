//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher, tokens) are implemented by outbound
//! adapters. Driving ports (login, accounts, complaints) are implemented by
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod complaint_repository;
mod complaints;
mod login_service;
mod password_hasher;
mod student_accounts;
mod token_service;
mod user_repository;

#[cfg(test)]
pub use complaint_repository::MockComplaintRepository;
pub use complaint_repository::{ComplaintPersistenceError, ComplaintRepository};
#[cfg(test)]
pub use complaints::{MockComplaintsCommand, MockComplaintsQuery};
pub use complaints::{ComplaintsCommand, ComplaintsQuery};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use student_accounts::{MockStudentAccountsCommand, MockStudentAccountsQuery};
pub use student_accounts::{DeletedStudent, StudentAccountsCommand, StudentAccountsQuery};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

#[cfg(test)]
mod tests;
