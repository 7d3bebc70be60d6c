//! Administrator management of student accounts, plus the out-of-band
//! administrator bootstrap used by the `create-admin` binary.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::port_error_mapping::{
    duplicate_email, duplicate_student_id, map_password_hash_error, map_user_persistence_error,
};
use crate::domain::ports::{
    DeletedStudent, PasswordHasher, StudentAccountsCommand, StudentAccountsQuery, UserRepository,
};
use crate::domain::{Error, ErrorCode, NewAdmin, NewPassword, NewStudent, Role, User, UserId};

/// Service implementing the student account driving ports.
#[derive(Clone)]
pub struct StudentAccountsService<U> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl<U> StudentAccountsService<U> {
    /// Create a new service over the given collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<dyn PasswordHasher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

impl<U> StudentAccountsService<U>
where
    U: UserRepository,
{
    async fn find_student(&self, id: &UserId, action: &str) -> Result<User, Error> {
        let user = self
            .users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;
        if user.role != Role::Student {
            return Err(Error::invalid_request(format!(
                "Only student accounts can be {action}"
            )));
        }
        Ok(user)
    }

    /// Create an administrator account. Admins are never created over HTTP.
    ///
    /// # Errors
    /// Returns `conflict` when the email is taken and propagates store and
    /// hashing failures.
    pub async fn create_admin(&self, admin: NewAdmin, password: NewPassword) -> Result<User, Error> {
        if self
            .users
            .find_by_email(&admin.email)
            .await
            .map_err(map_user_persistence_error)?
            .is_some()
        {
            return Err(duplicate_email(admin.email.as_ref()));
        }

        let password_hash = self
            .hasher
            .hash(password.expose())
            .map_err(map_password_hash_error)?;
        let now = self.clock.utc();
        let user = User {
            id: UserId::random(),
            role: Role::Admin,
            name: admin.name,
            student_id: None,
            email: Some(admin.email),
            department: None,
            class_level: None,
            password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.users
            .insert(&user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id, "administrator created");
        Ok(user)
    }

    /// Create the administrator unless its email is already registered.
    ///
    /// Returns the new account, or `None` when the email was taken.
    ///
    /// # Errors
    /// Propagates store and hashing failures.
    pub async fn ensure_admin(
        &self,
        admin: NewAdmin,
        password: NewPassword,
    ) -> Result<Option<User>, Error> {
        match self.create_admin(admin, password).await {
            Ok(user) => Ok(Some(user)),
            Err(error) if error.code() == ErrorCode::Conflict => Ok(None),
            Err(error) => Err(error),
        }
    }
}

#[async_trait]
impl<U> StudentAccountsCommand for StudentAccountsService<U>
where
    U: UserRepository,
{
    async fn create_student(
        &self,
        student: NewStudent,
        password: NewPassword,
    ) -> Result<User, Error> {
        // Advisory only; the store's unique index has the final say.
        if self
            .users
            .find_by_student_id(&student.student_id)
            .await
            .map_err(map_user_persistence_error)?
            .is_some()
        {
            return Err(duplicate_student_id(student.student_id.as_ref()));
        }

        let password_hash = self
            .hasher
            .hash(password.expose())
            .map_err(map_password_hash_error)?;
        let now = self.clock.utc();
        let NewStudent {
            student_id,
            name,
            department,
            class_level,
        } = student;
        let user = User {
            id: UserId::random(),
            role: Role::Student,
            name,
            student_id: Some(student_id),
            email: None,
            department: Some(department),
            class_level: Some(class_level),
            password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.users
            .insert(&user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id, "student account created");
        Ok(user)
    }

    async fn toggle_active(&self, id: &UserId) -> Result<User, Error> {
        let mut user = self.find_student(id, "toggled").await?;
        let now = self.clock.utc();
        let next = !user.is_active;
        let updated = self
            .users
            .set_active(id, next, now)
            .await
            .map_err(map_user_persistence_error)?;
        if !updated {
            return Err(Error::not_found("User not found"));
        }
        user.is_active = next;
        user.updated_at = now;
        info!(user_id = %user.id, is_active = next, "student account toggled");
        Ok(user)
    }

    async fn delete_student(&self, id: &UserId) -> Result<DeletedStudent, Error> {
        let user = self.find_student(id, "deleted").await?;
        let deleted = self
            .users
            .delete(id)
            .await
            .map_err(map_user_persistence_error)?;
        if !deleted {
            return Err(Error::not_found("User not found"));
        }
        info!(user_id = %user.id, "student account deleted");
        Ok(DeletedStudent {
            id: user.id,
            student_id: user.student_id,
            name: user.name,
        })
    }
}

#[async_trait]
impl<U> StudentAccountsQuery for StudentAccountsService<U>
where
    U: UserRepository,
{
    async fn list_students(&self) -> Result<Vec<User>, Error> {
        self.users
            .list_by_role(Role::Student)
            .await
            .map_err(map_user_persistence_error)
    }
}
