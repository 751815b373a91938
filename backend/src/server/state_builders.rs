//! Builders for the HTTP state from repository adapters.
//!
//! Every driving port is served by a domain service generic over the driven
//! ports. The same wiring is used for the Diesel adapters and the in-memory
//! store so integration tests exercise the production service graph.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use crate::domain::ports::{
    CertificationRepository, CourseMaterialRepository, CourseRepository, EnrollmentRepository,
    RosterQuery, TrainerAssignmentRepository, UserRepository,
};
use crate::domain::{
    AdminReportingService, CourseAdministrationService, CourseCatalogueService,
    EnrollmentAdministrationService, LearnerDashboardService, StudentService,
    TrainerAssignmentService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;
use super::ServerConfig;
use crate::outbound::persistence::{
    DbPool, DieselCertificationRepository, DieselCourseMaterialRepository,
    DieselCourseRepository, DieselEnrollmentRepository, DieselRosterQuery,
    DieselTrainerAssignmentRepository, DieselUserRepository,
};

/// Driven adapters the services are generic over.
struct Adapters<U, C, M, E, Z, A, Q> {
    users: Arc<U>,
    courses: Arc<C>,
    materials: Arc<M>,
    enrollments: Arc<E>,
    certifications: Arc<Z>,
    assignments: Arc<A>,
    rosters: Arc<Q>,
}

impl<U, C, M, E, Z, A, Q> Adapters<U, C, M, E, Z, A, Q>
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    M: CourseMaterialRepository + 'static,
    E: EnrollmentRepository + 'static,
    Z: CertificationRepository + 'static,
    A: TrainerAssignmentRepository + 'static,
    Q: RosterQuery + 'static,
{
    fn into_http_state(self, clock: Arc<dyn Clock>) -> HttpState {
        let Self {
            users,
            courses,
            materials,
            enrollments,
            certifications,
            assignments,
            rosters,
        } = self;

        let student = Arc::new(StudentService::new(
            users.clone(),
            courses.clone(),
            enrollments.clone(),
            clock.clone(),
        ));

        HttpState {
            catalogue: Arc::new(CourseCatalogueService::new(
                courses.clone(),
                enrollments.clone(),
            )),
            accounts: student.clone(),
            enrollment: student,
            dashboard: Arc::new(LearnerDashboardService::new(
                users.clone(),
                courses.clone(),
                enrollments.clone(),
                certifications,
                clock.clone(),
            )),
            reporting: Arc::new(AdminReportingService::new(rosters, courses.clone())),
            courses: Arc::new(CourseAdministrationService::new(courses.clone(), materials)),
            enrollments: Arc::new(EnrollmentAdministrationService::new(
                users.clone(),
                courses.clone(),
                enrollments,
                clock.clone(),
            )),
            assignments: Arc::new(TrainerAssignmentService::new(
                users,
                courses,
                assignments,
                clock,
            )),
        }
    }
}

/// Build the HTTP state over PostgreSQL.
pub fn diesel_http_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    Adapters {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        courses: Arc::new(DieselCourseRepository::new(pool.clone())),
        materials: Arc::new(DieselCourseMaterialRepository::new(pool.clone())),
        enrollments: Arc::new(DieselEnrollmentRepository::new(pool.clone())),
        certifications: Arc::new(DieselCertificationRepository::new(pool.clone())),
        assignments: Arc::new(DieselTrainerAssignmentRepository::new(pool.clone())),
        rosters: Arc::new(DieselRosterQuery::new(pool.clone())),
    }
    .into_http_state(clock)
}

/// Build the HTTP state over a shared [`InMemoryStore`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use learnhub::outbound::memory::InMemoryStore;
/// use learnhub::server::memory_http_state;
/// use mockable::DefaultClock;
///
/// let clock = Arc::new(DefaultClock);
/// let store = Arc::new(InMemoryStore::new(clock.clone()));
/// let state = memory_http_state(&store, clock);
/// let _catalogue = state.catalogue.clone();
/// ```
pub fn memory_http_state(store: &Arc<InMemoryStore>, clock: Arc<dyn Clock>) -> HttpState {
    Adapters {
        users: store.clone(),
        courses: store.clone(),
        materials: store.clone(),
        enrollments: store.clone(),
        certifications: store.clone(),
        assignments: store.clone(),
        rosters: store.clone(),
    }
    .into_http_state(clock)
}

/// Build the HTTP state for a server configuration.
///
/// Uses PostgreSQL when a pool is configured. Otherwise every port is served
/// by a fresh in-memory store, which loses its data on restart.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => diesel_http_state(pool, clock),
        None => {
            warn!("no database configured; using the in-memory store");
            let store = Arc::new(InMemoryStore::new(clock.clone()));
            memory_http_state(&store, clock)
        }
    };
    web::Data::new(state)
}
