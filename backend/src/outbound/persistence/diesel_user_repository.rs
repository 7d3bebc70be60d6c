//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Uniqueness of `student_id` and `email` is enforced by partial unique
//! indexes; a violation surfaces as the matching duplicate error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    Email, PasswordHash, PersonName, Role, StudentId, User, UserId, UserValidationError,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, unique_violation_constraint};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Partial unique index on `users.student_id`.
pub(crate) const STUDENT_ID_INDEX: &str = "users_student_id_key";
/// Partial unique index on `users.email`.
pub(crate) const EMAIL_INDEX: &str = "users_email_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: &DieselError) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn insert_error(error: &DieselError, user: &User) -> UserPersistenceError {
    let Some(constraint) = unique_violation_constraint(error) else {
        return diesel_error(error);
    };
    let student_id = user.student_id.as_ref().map(ToString::to_string);
    let email = user.email.as_ref().map(ToString::to_string);
    match (constraint, student_id, email) {
        (EMAIL_INDEX, _, Some(email)) => UserPersistenceError::duplicate_email(email),
        (STUDENT_ID_INDEX, Some(student_id), _) => {
            UserPersistenceError::duplicate_student_id(student_id)
        }
        (other, student_id, email) => {
            warn!(constraint = other, "unrecognised unique violation on users");
            match (student_id, email) {
                (Some(student_id), _) => UserPersistenceError::duplicate_student_id(student_id),
                (None, Some(email)) => UserPersistenceError::duplicate_email(email),
                (None, None) => UserPersistenceError::query("duplicate user record"),
            }
        }
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    let invalid = |err: UserValidationError| {
        UserPersistenceError::query(format!("invalid stored user {id}: {err}"))
    };
    Ok(User {
        id: UserId::from(id),
        role: row.role.parse().map_err(invalid)?,
        name: PersonName::new(&row.name).map_err(invalid)?,
        student_id: row
            .student_id
            .as_deref()
            .map(StudentId::new)
            .transpose()
            .map_err(invalid)?,
        email: row.email.as_deref().map(Email::new).transpose().map_err(invalid)?,
        department: row.department,
        class_level: row.class_level,
        password_hash: PasswordHash::new(row.password_hash),
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserPersistenceError> {
    rows.into_iter().map(row_to_user).collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserRow {
            id: *user.id.as_uuid(),
            role: user.role.as_str(),
            name: user.name.as_ref(),
            student_id: user.student_id.as_ref().map(AsRef::as_ref),
            email: user.email.as_ref().map(AsRef::as_ref),
            department: user.department.as_deref(),
            class_level: user.class_level.as_deref(),
            password_hash: user.password_hash.as_str(),
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| insert_error(&err, user))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?
            .map(row_to_user)
            .transpose()
    }

    async fn find_by_login(
        &self,
        student_id: &str,
        email: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        users::table
            .filter(users::student_id.eq(student_id).or(users::email.eq(email)))
            .order(users::created_at.asc())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?
            .map(row_to_user)
            .transpose()
    }

    async fn find_by_student_id(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        users::table
            .filter(users::student_id.eq(student_id.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?
            .map(row_to_user)
            .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?
            .map(row_to_user)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = users::table
            .filter(users::id.eq_any(uuids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;
        rows_to_users(rows)
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = users::table
            .filter(users::role.eq(role.as_str()))
            .order(users::created_at.desc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;
        rows_to_users(rows)
    }

    async fn set_active(
        &self,
        id: &UserId,
        is_active: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(users::table.find(*id.as_uuid()))
            .set((
                users::is_active.eq(is_active),
                users::updated_at.eq(updated_at),
            ))
            .execute(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(users::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;
        Ok(deleted > 0)
    }
}
