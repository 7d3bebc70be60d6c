//! In-memory implementation of the [`UserRepository`] port.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, Role, StudentId, User, UserId};

use super::newest_first;

/// Account store held in a mutex-guarded vector, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

fn collision(existing: &User, candidate: &User) -> Option<UserPersistenceError> {
    match (&existing.student_id, &candidate.student_id) {
        (Some(a), Some(b)) if a == b => {
            return Some(UserPersistenceError::duplicate_student_id(b.to_string()));
        }
        _ => {}
    }
    match (&existing.email, &candidate.email) {
        (Some(a), Some(b)) if a == b => Some(UserPersistenceError::duplicate_email(b.to_string())),
        _ => None,
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.lock()?;
        if let Some(error) = users.iter().find_map(|existing| collision(existing, user)) {
            return Err(error);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_login(
        &self,
        student_id: &str,
        email: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|user| {
                user.student_id.as_ref().is_some_and(|id| id.as_ref() == student_id)
                    || user.email.as_ref().is_some_and(|e| e.as_ref() == email)
            })
            .cloned())
    }

    async fn find_by_student_id(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|user| user.student_id.as_ref() == Some(student_id))
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|user| user.email.as_ref() == Some(email))
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|user| ids.contains(&user.id))
            .cloned()
            .collect())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserPersistenceError> {
        let mut users: Vec<User> = self
            .lock()?
            .iter()
            .filter(|user| user.role == role)
            .cloned()
            .collect();
        newest_first(&mut users, |user| user.created_at);
        Ok(users)
    }

    async fn set_active(
        &self,
        id: &UserId,
        is_active: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, UserPersistenceError> {
        let mut users = self.lock()?;
        let Some(user) = users.iter_mut().find(|user| user.id == *id) else {
            return Ok(false);
        };
        user.is_active = is_active;
        user.updated_at = updated_at;
        Ok(true)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut users = self.lock()?;
        let before = users.len();
        users.retain(|user| user.id != *id);
        Ok(users.len() != before)
    }
}
