//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations, and to decode stored enum
//! columns through the domain's `FromStr` impls.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::domain::{
    AssignmentId, Certification, CertificationId, Course, CourseDraft, CourseId, CourseLevel,
    CourseMaterial, Email, EmailValidationError, Enrollment, EnrollmentId, MaterialId,
    NewCourseMaterial, NewEnrollment, NewUser, TrainerAssignment, UnknownVariant, User, UserId,
};

use super::schema::{
    certifications, coursematerials, courses, enrollments, trainerscourses, users,
};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub age: Option<i32>,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = EmailValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_db(row.id),
            email: Email::new(row.email)?,
            first_name: row.first_name,
            last_name: row.last_name,
            phone_number: row.phone_number,
            age: row.age,
            location: row.location,
            experience: row.experience,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            email: user.email.as_ref(),
            first_name: &user.first_name,
            last_name: &user.last_name,
        }
    }
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// Row struct for reading from the courses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub prerequisites: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_capacity: Option<i32>,
    pub status: String,
    pub level: Option<String>,
    pub duration_weeks: Option<i32>,
    pub instructor_name: Option<String>,
    pub price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CourseRow> for Course {
    type Error = UnknownVariant;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CourseId::from_db(row.id),
            title: row.title,
            category: row.category,
            description: row.description,
            prerequisites: row.prerequisites,
            start_date: row.start_date,
            end_date: row.end_date,
            max_capacity: row.max_capacity,
            status: row.status.parse()?,
            level: row.level.as_deref().map(str::parse::<CourseLevel>).transpose()?,
            duration_weeks: row.duration_weeks,
            instructor_name: row.instructor_name,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Column values written on course insert and full update.
///
/// `None` clears the column on update so a PUT replaces the whole record.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseValues<'a> {
    pub title: &'a str,
    pub category: Option<&'a str>,
    pub description: Option<&'a str>,
    pub prerequisites: Option<&'a str>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_capacity: Option<i32>,
    pub status: &'static str,
    pub level: Option<&'static str>,
    pub duration_weeks: Option<i32>,
    pub instructor_name: Option<&'a str>,
    pub price: Option<f64>,
}

impl<'a> From<&'a CourseDraft> for CourseValues<'a> {
    fn from(draft: &'a CourseDraft) -> Self {
        Self {
            title: draft.title.trim(),
            category: draft.category.as_deref(),
            description: draft.description.as_deref(),
            prerequisites: draft.prerequisites.as_deref(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            max_capacity: draft.max_capacity,
            status: draft.status.as_str(),
            level: draft.level.map(|level| level.as_str()),
            duration_weeks: draft.duration_weeks,
            instructor_name: draft.instructor_name.as_deref(),
            price: draft.price,
        }
    }
}

// ---------------------------------------------------------------------------
// Course materials
// ---------------------------------------------------------------------------

/// Row struct for reading from the coursematerials table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = coursematerials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseMaterialRow {
    pub id: i64,
    pub course_id: i64,
    pub material_url: String,
    pub material_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CourseMaterialRow> for CourseMaterial {
    fn from(row: CourseMaterialRow) -> Self {
        Self {
            id: MaterialId::from_db(row.id),
            course_id: CourseId::from_db(row.course_id),
            material_url: row.material_url,
            material_description: row.material_description,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for attaching a material to a course.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = coursematerials)]
pub(crate) struct NewCourseMaterialRow<'a> {
    pub course_id: i64,
    pub material_url: &'a str,
    pub material_description: Option<&'a str>,
}

impl<'a> NewCourseMaterialRow<'a> {
    pub(crate) fn new(course_id: CourseId, material: &'a NewCourseMaterial) -> Self {
        Self {
            course_id: course_id.get(),
            material_url: material.material_url.trim(),
            material_description: material.material_description.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Enrollments
// ---------------------------------------------------------------------------

/// Row struct for reading from the enrollments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub id: i64,
    pub student_user_id: i64,
    pub course_id: i64,
    pub enrollment_date: NaiveDate,
    pub completion_percentage: i32,
    pub score: Option<f64>,
    pub status: String,
}

impl TryFrom<EnrollmentRow> for Enrollment {
    type Error = UnknownVariant;

    fn try_from(row: EnrollmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EnrollmentId::from_db(row.id),
            student_id: UserId::from_db(row.student_user_id),
            course_id: CourseId::from_db(row.course_id),
            enrollment_date: row.enrollment_date,
            completion_percentage: row.completion_percentage,
            score: row.score,
            status: row.status.parse()?,
        })
    }
}

/// Column values written on enrollment insert and full update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = enrollments)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct EnrollmentValues {
    pub student_user_id: i64,
    pub course_id: i64,
    pub enrollment_date: NaiveDate,
    pub completion_percentage: i32,
    pub score: Option<f64>,
    pub status: &'static str,
}

impl From<&NewEnrollment> for EnrollmentValues {
    fn from(enrollment: &NewEnrollment) -> Self {
        Self {
            student_user_id: enrollment.student_id.get(),
            course_id: enrollment.course_id.get(),
            enrollment_date: enrollment.enrollment_date,
            completion_percentage: enrollment.completion_percentage,
            score: enrollment.score,
            status: enrollment.status.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// Certifications
// ---------------------------------------------------------------------------

/// Row struct for reading from the certifications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = certifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CertificationRow {
    pub id: i64,
    pub enrollment_id: i64,
    pub title: String,
    pub issue_date: NaiveDate,
    pub certificate_url: Option<String>,
}

impl From<CertificationRow> for Certification {
    fn from(row: CertificationRow) -> Self {
        Self {
            id: CertificationId::from_db(row.id),
            enrollment_id: EnrollmentId::from_db(row.enrollment_id),
            title: row.title,
            issue_date: row.issue_date,
            certificate_url: row.certificate_url,
        }
    }
}

// ---------------------------------------------------------------------------
// Trainer assignments
// ---------------------------------------------------------------------------

/// Row struct for reading from the trainerscourses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = trainerscourses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TrainerAssignmentRow {
    pub id: i64,
    pub trainer_user_id: i64,
    pub course_id: i64,
    pub assignment_date: NaiveDate,
}

impl From<TrainerAssignmentRow> for TrainerAssignment {
    fn from(row: TrainerAssignmentRow) -> Self {
        Self {
            id: AssignmentId::from_db(row.id),
            trainer_id: UserId::from_db(row.trainer_user_id),
            course_id: CourseId::from_db(row.course_id),
            assignment_date: row.assignment_date,
        }
    }
}

/// Insertable struct for binding a trainer to a course.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trainerscourses)]
pub(crate) struct NewTrainerAssignmentRow {
    pub trainer_user_id: i64,
    pub course_id: i64,
    pub assignment_date: NaiveDate,
}
