//! Entity repository ports over [`InMemoryStore`].

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::ports::{
    CertificationRepository, CertificationRepositoryError, CourseMaterialRepository,
    CourseMaterialRepositoryError, CourseRepository, CourseRepositoryError, EnrollmentRepository,
    EnrollmentRepositoryError, TrainerAssignmentRepository, TrainerAssignmentRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    AssignmentId, Certification, Course, CourseDraft, CourseFilter, CourseId, CourseMaterial,
    CourseStatus, CourseSummary, Email, Enrollment, EnrollmentDetail, EnrollmentId,
    EnrollmentStatus, MaterialId, NewCourseMaterial, NewEnrollment, NewUser, PageRequest,
    TrainerAssignment, User, UserId,
};

use super::{InMemoryStore, State};

fn course_from_draft(
    id: CourseId,
    draft: &CourseDraft,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Course {
    Course {
        id,
        title: draft.title.clone(),
        category: draft.category.clone(),
        description: draft.description.clone(),
        prerequisites: draft.prerequisites.clone(),
        start_date: draft.start_date,
        end_date: draft.end_date,
        max_capacity: draft.max_capacity,
        status: draft.status,
        level: draft.level,
        duration_weeks: draft.duration_weeks,
        instructor_name: draft.instructor_name.clone(),
        price: draft.price,
        created_at,
        updated_at,
    }
}

fn enrollment_from_new(id: EnrollmentId, enrollment: &NewEnrollment) -> Enrollment {
    Enrollment {
        id,
        student_id: enrollment.student_id,
        course_id: enrollment.course_id,
        enrollment_date: enrollment.enrollment_date,
        completion_percentage: enrollment.completion_percentage,
        score: enrollment.score,
        status: enrollment.status,
    }
}

fn newest_courses_first(courses: &mut [Course]) {
    courses.sort_by_key(|course| Reverse((course.created_at, course.id)));
}

fn latest_enrollments_first(enrollments: &mut [Enrollment]) {
    enrollments.sort_by_key(|enrollment| Reverse((enrollment.enrollment_date, enrollment.id)));
}

/// Enforce the enrollment foreign keys and the (student, course) unique key.
fn check_enrollment_write(
    state: &State,
    enrollment: &NewEnrollment,
    updating: Option<EnrollmentId>,
) -> Result<(), EnrollmentRepositoryError> {
    if !state.users.contains_key(&enrollment.student_id.get())
        || !state.courses.contains_key(&enrollment.course_id.get())
    {
        return Err(EnrollmentRepositoryError::query(
            "enrollment references a missing student or course",
        ));
    }
    let clash = state.enrollments.values().any(|existing| {
        Some(existing.id) != updating
            && existing.student_id == enrollment.student_id
            && existing.course_id == enrollment.course_id
    });
    if clash {
        return Err(EnrollmentRepositoryError::duplicate(
            enrollment.student_id,
            enrollment.course_id,
        ));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock().users.get(&id.get()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|user| user.email == *email)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let now = self.now();
        let mut state = self.lock();
        if state.users.values().any(|existing| existing.email == user.email) {
            return Err(UserRepositoryError::duplicate_email(user.email.as_ref()));
        }
        let id = state.user_ids.next();
        let created = User {
            id: UserId::from_db(id),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: None,
            age: None,
            location: None,
            experience: None,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(id, created.clone());
        state.user_roles.insert(id, vec![user.role]);
        Ok(created)
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self.lock().courses.get(&id.get()).cloned())
    }

    async fn list(
        &self,
        status: Option<CourseStatus>,
        filter: &CourseFilter,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut courses: Vec<Course> = self
            .lock()
            .courses
            .values()
            .filter(|course| status.is_none_or(|wanted| course.status == wanted))
            .filter(|course| filter.matches(course))
            .cloned()
            .collect();
        newest_courses_first(&mut courses);
        Ok(courses)
    }

    async fn page(
        &self,
        status: CourseStatus,
        request: PageRequest,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut courses: Vec<Course> = self
            .lock()
            .courses
            .values()
            .filter(|course| course.status == status)
            .cloned()
            .collect();
        newest_courses_first(&mut courses);
        let offset = usize::try_from(request.offset())
            .map_err(|_| CourseRepositoryError::query("page offset out of range"))?;
        Ok(courses
            .into_iter()
            .skip(offset)
            .take(request.size() as usize)
            .collect())
    }

    async fn count(&self, status: Option<CourseStatus>) -> Result<u64, CourseRepositoryError> {
        let count = self
            .lock()
            .courses
            .values()
            .filter(|course| status.is_none_or(|wanted| course.status == wanted))
            .count();
        Ok(count as u64)
    }

    async fn categories(&self) -> Result<Vec<String>, CourseRepositoryError> {
        let mut categories: Vec<String> = self
            .lock()
            .courses
            .values()
            .filter_map(|course| course.category.as_deref())
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .map(str::to_owned)
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn create(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        let now = self.now();
        let mut state = self.lock();
        let id = state.course_ids.next();
        let course = course_from_draft(CourseId::from_db(id), draft, now, now);
        state.courses.insert(id, course.clone());
        Ok(course)
    }

    async fn update(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let now = self.now();
        let mut state = self.lock();
        let Some(existing) = state.courses.get_mut(&id.get()) else {
            return Ok(None);
        };
        *existing = course_from_draft(id, draft, existing.created_at, now);
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        Ok(self.lock().remove_course(id.get()))
    }
}

#[async_trait]
impl CourseMaterialRepository for InMemoryStore {
    async fn list_for_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseMaterial>, CourseMaterialRepositoryError> {
        let mut materials: Vec<CourseMaterial> = self
            .lock()
            .materials
            .values()
            .filter(|material| material.course_id == course_id)
            .cloned()
            .collect();
        materials.sort_by_key(|material| (material.created_at, material.id));
        Ok(materials)
    }

    async fn create(
        &self,
        course_id: CourseId,
        material: &NewCourseMaterial,
    ) -> Result<CourseMaterial, CourseMaterialRepositoryError> {
        let now = self.now();
        let mut state = self.lock();
        if !state.courses.contains_key(&course_id.get()) {
            return Err(CourseMaterialRepositoryError::query(
                "material references a missing course",
            ));
        }
        let id = state.material_ids.next();
        let created = CourseMaterial {
            id: MaterialId::from_db(id),
            course_id,
            material_url: material.material_url.clone(),
            material_description: material.material_description.clone(),
            created_at: now,
        };
        state.materials.insert(id, created.clone());
        Ok(created)
    }

    async fn delete(&self, id: MaterialId) -> Result<bool, CourseMaterialRepositoryError> {
        Ok(self.lock().materials.remove(&id.get()).is_some())
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        id: EnrollmentId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        Ok(self.lock().enrollments.get(&id.get()).cloned())
    }

    async fn find_for_student_and_course(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        Ok(self
            .lock()
            .enrollments
            .values()
            .find(|enrollment| {
                enrollment.student_id == student_id && enrollment.course_id == course_id
            })
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let mut enrollments: Vec<Enrollment> = self.lock().enrollments.values().cloned().collect();
        latest_enrollments_first(&mut enrollments);
        Ok(enrollments)
    }

    async fn list_for_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let mut enrollments: Vec<Enrollment> = self
            .lock()
            .enrollments
            .values()
            .filter(|enrollment| enrollment.course_id == course_id)
            .cloned()
            .collect();
        latest_enrollments_first(&mut enrollments);
        Ok(enrollments)
    }

    async fn details_for_student(
        &self,
        student_id: UserId,
        status: Option<EnrollmentStatus>,
    ) -> Result<Vec<EnrollmentDetail>, EnrollmentRepositoryError> {
        let state = self.lock();
        let mut enrollments: Vec<Enrollment> = state
            .enrollments
            .values()
            .filter(|enrollment| enrollment.student_id == student_id)
            .filter(|enrollment| status.is_none_or(|wanted| enrollment.status == wanted))
            .cloned()
            .collect();
        latest_enrollments_first(&mut enrollments);
        Ok(enrollments
            .into_iter()
            .filter_map(|enrollment| {
                let course = state.courses.get(&enrollment.course_id.get())?;
                Some(EnrollmentDetail {
                    course: CourseSummary::from(course),
                    enrollment,
                })
            })
            .collect())
    }

    async fn create(
        &self,
        enrollment: &NewEnrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut state = self.lock();
        check_enrollment_write(&state, enrollment, None)?;
        let id = state.enrollment_ids.next();
        let created = enrollment_from_new(EnrollmentId::from_db(id), enrollment);
        state.enrollments.insert(id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: EnrollmentId,
        enrollment: &NewEnrollment,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut state = self.lock();
        if !state.enrollments.contains_key(&id.get()) {
            return Ok(None);
        }
        check_enrollment_write(&state, enrollment, Some(id))?;
        let updated = enrollment_from_new(id, enrollment);
        state.enrollments.insert(id.get(), updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: EnrollmentId) -> Result<bool, EnrollmentRepositoryError> {
        Ok(self.lock().remove_enrollment(id.get()))
    }
}

#[async_trait]
impl CertificationRepository for InMemoryStore {
    async fn list_for_student(
        &self,
        student_id: UserId,
    ) -> Result<Vec<Certification>, CertificationRepositoryError> {
        let state = self.lock();
        let mut certifications: Vec<Certification> = state
            .certifications
            .values()
            .filter(|cert| {
                state
                    .enrollments
                    .get(&cert.enrollment_id.get())
                    .is_some_and(|enrollment| enrollment.student_id == student_id)
            })
            .cloned()
            .collect();
        certifications.sort_by_key(|cert| Reverse((cert.issue_date, cert.id)));
        Ok(certifications)
    }
}

#[async_trait]
impl TrainerAssignmentRepository for InMemoryStore {
    async fn exists(
        &self,
        course_id: CourseId,
        trainer_id: UserId,
    ) -> Result<bool, TrainerAssignmentRepositoryError> {
        Ok(self.lock().assignments.values().any(|assignment| {
            assignment.course_id == course_id && assignment.trainer_id == trainer_id
        }))
    }

    async fn replace_for_course(
        &self,
        course_id: CourseId,
        trainer_id: UserId,
        assignment_date: NaiveDate,
    ) -> Result<TrainerAssignment, TrainerAssignmentRepositoryError> {
        let mut state = self.lock();
        if !state.courses.contains_key(&course_id.get())
            || !state.users.contains_key(&trainer_id.get())
        {
            return Err(TrainerAssignmentRepositoryError::query(
                "assignment references a missing trainer or course",
            ));
        }
        state
            .assignments
            .retain(|_, assignment| assignment.course_id != course_id);
        let id = state.assignment_ids.next();
        let assignment = TrainerAssignment {
            id: AssignmentId::from_db(id),
            trainer_id,
            course_id,
            assignment_date,
        };
        state.assignments.insert(id, assignment.clone());
        Ok(assignment)
    }

    async fn list_for_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<TrainerAssignment>, TrainerAssignmentRepositoryError> {
        Ok(self
            .lock()
            .assignments
            .values()
            .rev()
            .filter(|assignment| assignment.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn list_for_trainer(
        &self,
        trainer_id: UserId,
    ) -> Result<Vec<TrainerAssignment>, TrainerAssignmentRepositoryError> {
        let mut assignments: Vec<TrainerAssignment> = self
            .lock()
            .assignments
            .values()
            .filter(|assignment| assignment.trainer_id == trainer_id)
            .cloned()
            .collect();
        assignments.sort_by_key(|assignment| Reverse((assignment.assignment_date, assignment.id)));
        Ok(assignments)
    }

    async fn delete(
        &self,
        course_id: CourseId,
        trainer_id: UserId,
    ) -> Result<bool, TrainerAssignmentRepositoryError> {
        let mut state = self.lock();
        let before = state.assignments.len();
        state.assignments.retain(|_, assignment| {
            assignment.course_id != course_id || assignment.trainer_id != trainer_id
        });
        Ok(state.assignments.len() < before)
    }
}
