//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Role catalogue seeded by the initial migration.
    roles (id) {
        id -> Int8,
        /// `Student`, `Trainer` or `Admin`.
        role_name -> Varchar,
    }
}

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int8,
        /// Unique login address.
        email -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        phone_number -> Nullable<Varchar>,
        age -> Nullable<Int4>,
        location -> Nullable<Varchar>,
        experience -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Role grants; a user may hold several roles.
    userroles (user_id, role_id) {
        user_id -> Int8,
        role_id -> Int8,
    }
}

diesel::table! {
    /// Course catalogue.
    courses (id) {
        id -> Int8,
        title -> Varchar,
        category -> Nullable<Varchar>,
        description -> Nullable<Text>,
        prerequisites -> Nullable<Text>,
        start_date -> Nullable<Date>,
        end_date -> Nullable<Date>,
        max_capacity -> Nullable<Int4>,
        /// `active`, `upcoming` or `archived`.
        status -> Varchar,
        level -> Nullable<Varchar>,
        duration_weeks -> Nullable<Int4>,
        instructor_name -> Nullable<Varchar>,
        price -> Nullable<Float8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Learning resources attached to a course.
    coursematerials (id) {
        id -> Int8,
        course_id -> Int8,
        material_url -> Text,
        material_description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Student-to-course enrollments; unique per (student, course).
    enrollments (id) {
        id -> Int8,
        student_user_id -> Int8,
        course_id -> Int8,
        enrollment_date -> Date,
        completion_percentage -> Int4,
        score -> Nullable<Float8>,
        /// `assigned`, `in_progress`, `completed` or `overdue`.
        status -> Varchar,
    }
}

diesel::table! {
    /// Certificates; at most one per enrollment.
    certifications (id) {
        id -> Int8,
        enrollment_id -> Int8,
        title -> Varchar,
        issue_date -> Date,
        certificate_url -> Nullable<Text>,
    }
}

diesel::table! {
    /// Trainer assignments; unique per course.
    trainerscourses (id) {
        id -> Int8,
        trainer_user_id -> Int8,
        course_id -> Int8,
        assignment_date -> Date,
    }
}

diesel::joinable!(userroles -> users (user_id));
diesel::joinable!(userroles -> roles (role_id));
diesel::joinable!(coursematerials -> courses (course_id));
diesel::joinable!(enrollments -> users (student_user_id));
diesel::joinable!(enrollments -> courses (course_id));
diesel::joinable!(certifications -> enrollments (enrollment_id));
diesel::joinable!(trainerscourses -> users (trainer_user_id));
diesel::joinable!(trainerscourses -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(
    roles,
    users,
    userroles,
    courses,
    coursematerials,
    enrollments,
    certifications,
    trainerscourses,
);
