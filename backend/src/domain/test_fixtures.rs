//! Shared builders for domain unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{
    Category, Complaint, ComplaintId, Email, NewComplaint, PasswordHash, PersonName, Role,
    StudentId, User, UserId,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 8, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) struct FixtureClock {
    pub(crate) utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn student(student_id: &str, is_active: bool) -> User {
    User {
        id: UserId::random(),
        role: Role::Student,
        name: PersonName::new("Ada Lovelace").expect("valid name"),
        student_id: Some(StudentId::new(student_id).expect("valid student id")),
        email: None,
        department: Some("CS".to_owned()),
        class_level: Some("2A".to_owned()),
        password_hash: PasswordHash::new("$argon2id$fixture"),
        is_active,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn admin() -> User {
    User {
        id: UserId::random(),
        role: Role::Admin,
        name: PersonName::new("Grace Hopper").expect("valid name"),
        student_id: None,
        email: Some(Email::new("admin@campus.edu").expect("valid email")),
        department: None,
        class_level: None,
        password_hash: PasswordHash::new("$argon2id$fixture"),
        is_active: true,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn complaint_for(owner: UserId) -> Complaint {
    Complaint::file(
        ComplaintId::random(),
        owner,
        NewComplaint {
            category: Category::It,
            title: "Wifi down".to_owned(),
            description: "Lab 3 offline".to_owned(),
        },
        fixture_timestamp(),
    )
}
