//! In-process store implementing every driven port.
//!
//! Used when no database URL is configured, and by the HTTP integration
//! suites. Ordering, uniqueness and cascade rules mirror the PostgreSQL
//! schema so the two adapters are interchangeable behind the ports. Each port
//! call takes the store's single lock for its whole duration, which makes
//! multi-step writes such as trainer reassignment atomic.

mod repositories;
mod roster;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;

use crate::domain::{
    Certification, CertificationId, Course, CourseMaterial, Enrollment, EnrollmentId, Role,
    TrainerAssignment, User, UserId,
};

/// Monotonic identifier source for one table.
#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
    fn next(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Default)]
struct State {
    user_ids: Sequence,
    course_ids: Sequence,
    material_ids: Sequence,
    enrollment_ids: Sequence,
    certification_ids: Sequence,
    assignment_ids: Sequence,
    users: BTreeMap<i64, User>,
    user_roles: BTreeMap<i64, Vec<Role>>,
    courses: BTreeMap<i64, Course>,
    materials: BTreeMap<i64, CourseMaterial>,
    enrollments: BTreeMap<i64, Enrollment>,
    certifications: BTreeMap<i64, Certification>,
    assignments: BTreeMap<i64, TrainerAssignment>,
}

impl State {
    fn has_role(&self, user_id: i64, role: Role) -> bool {
        self.user_roles
            .get(&user_id)
            .is_some_and(|roles| roles.contains(&role))
    }

    fn users_with_role(&self, role: Role) -> Vec<User> {
        self.users
            .values()
            .filter(|user| self.has_role(user.id.get(), role))
            .cloned()
            .collect()
    }

    /// Drop a course together with every row that references it.
    fn remove_course(&mut self, course_id: i64) -> bool {
        if self.courses.remove(&course_id).is_none() {
            return false;
        }
        self.materials
            .retain(|_, material| material.course_id.get() != course_id);
        let removed: Vec<i64> = self
            .enrollments
            .values()
            .filter(|enrollment| enrollment.course_id.get() == course_id)
            .map(|enrollment| enrollment.id.get())
            .collect();
        for id in &removed {
            self.remove_enrollment(*id);
        }
        self.assignments
            .retain(|_, assignment| assignment.course_id.get() != course_id);
        true
    }

    fn remove_enrollment(&mut self, enrollment_id: i64) -> bool {
        if self.enrollments.remove(&enrollment_id).is_none() {
            return false;
        }
        self.certifications
            .retain(|_, cert| cert.enrollment_id.get() != enrollment_id);
        true
    }
}

/// Thread-safe in-memory implementation of the persistence ports.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use learnhub::outbound::memory::InMemoryStore;
/// use mockable::DefaultClock;
///
/// let store = InMemoryStore::new(Arc::new(DefaultClock));
/// assert_eq!(store.user_count(), 0);
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    /// Create an empty store stamping rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    /// Grant an additional role to an existing account.
    ///
    /// Returns `false` when the user does not exist.
    pub fn grant_role(&self, user_id: UserId, role: Role) -> bool {
        let mut state = self.lock();
        if !state.users.contains_key(&user_id.get()) {
            return false;
        }
        let roles = state.user_roles.entry(user_id.get()).or_default();
        if !roles.contains(&role) {
            roles.push(role);
        }
        true
    }

    /// Record a certificate for an enrollment.
    ///
    /// Returns `None` when the enrollment does not exist or already holds a
    /// certificate.
    pub fn issue_certification(
        &self,
        enrollment_id: EnrollmentId,
        title: impl Into<String>,
        issue_date: NaiveDate,
        certificate_url: Option<String>,
    ) -> Option<Certification> {
        let mut state = self.lock();
        let raw = enrollment_id.get();
        let taken = state
            .certifications
            .values()
            .any(|cert| cert.enrollment_id == enrollment_id);
        if !state.enrollments.contains_key(&raw) || taken {
            return None;
        }
        let id = state.certification_ids.next();
        let certification = Certification {
            id: CertificationId::from_db(id),
            enrollment_id,
            title: title.into(),
            issue_date,
            certificate_url,
        };
        state.certifications.insert(id, certification.clone());
        Some(certification)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
