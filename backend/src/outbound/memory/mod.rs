//! In-process repositories used when no database is configured and in tests.
//!
//! They honour the same contracts as the PostgreSQL adapters, including sparse
//! uniqueness of student identifiers and emails and newest-first listings.
//! State lives for the lifetime of the process.

mod complaint_repository;
mod user_repository;

pub use complaint_repository::InMemoryComplaintRepository;
pub use user_repository::InMemoryUserRepository;

fn newest_first<T>(rows: &mut [T], created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>) {
    // Rows arrive in insertion order; reverse first so equal timestamps keep
    // the most recent insert on top after the stable sort.
    rows.reverse();
    rows.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
}
