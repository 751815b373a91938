//! Test utilities for the learnhub crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Course, CourseId, CourseStatus, Email, User, UserId};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Clock reading midnight UTC on the given day.
    ///
    /// # Panics
    /// Panics when the date is not a valid calendar day.
    #[must_use]
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        Self(timestamp(year, month, day))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Midnight UTC on the given day.
///
/// # Panics
/// Panics when the date is not a valid calendar day.
#[must_use]
pub fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// The day most fixtures are anchored to: 15 June 2026.
#[must_use]
pub fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date")
}

/// Course with only the required fields set. Higher ids are created later.
///
/// # Panics
/// Panics when `id` is not positive.
#[must_use]
pub fn sample_course(id: i64, status: CourseStatus) -> Course {
    let created = timestamp(2026, 1, 1) + chrono::Duration::days(id);
    Course {
        id: CourseId::new(id).expect("valid id"),
        title: format!("Course {id}"),
        category: None,
        description: None,
        prerequisites: None,
        start_date: None,
        end_date: None,
        max_capacity: None,
        status,
        level: None,
        duration_weeks: None,
        instructor_name: None,
        price: None,
        created_at: created,
        updated_at: created,
    }
}

/// Account named after its address. Higher ids are created later.
///
/// # Panics
/// Panics when `id` is not positive or `email` lacks an `@`.
#[must_use]
pub fn sample_user(id: i64, email: &str) -> User {
    let email = Email::new(email).expect("valid email");
    let created = timestamp(2026, 1, 1) + chrono::Duration::days(id);
    User {
        id: UserId::new(id).expect("valid id"),
        first_name: email.local_part().to_owned(),
        last_name: "User".to_owned(),
        email,
        phone_number: None,
        age: None,
        location: None,
        experience: None,
        created_at: created,
        updated_at: created,
    }
}
