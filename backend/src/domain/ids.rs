//! Typed surrogate identifiers.
//!
//! Every table uses a `BIGINT` identity column. Wrapping the raw value keeps
//! a course id from being passed where a user id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raised when a raw identifier is zero, negative or not a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// Identity columns start at 1.
    #[error("{kind} must be a positive integer, got {value}")]
    NotPositive {
        /// Identifier type name.
        kind: &'static str,
        /// Rejected value.
        value: i64,
    },
    /// Text could not be parsed as an integer.
    #[error("{kind} must be an integer, got '{value}'")]
    NotANumber {
        /// Identifier type name.
        kind: &'static str,
        /// Rejected text.
        value: String,
    },
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
        )]
        #[serde(try_from = "i64", into = "i64")]
        #[schema(value_type = i64, example = 1)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw identifier, rejecting values below 1.
            pub const fn new(raw: i64) -> Result<Self, IdValidationError> {
                if raw > 0 {
                    Ok(Self(raw))
                } else {
                    Err(IdValidationError::NotPositive {
                        kind: stringify!($name),
                        value: raw,
                    })
                }
            }

            /// Wrap a value read back from an identity column.
            pub(crate) const fn from_db(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw integer value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(raw: i64) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.trim().parse::<i64>().map_err(|_| IdValidationError::NotANumber {
                    kind: stringify!($name),
                    value: s.to_owned(),
                })?;
                Self::new(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(
    /// Identifier of a row in `users`.
    UserId
);
define_id!(
    /// Identifier of a row in `courses`.
    CourseId
);
define_id!(
    /// Identifier of a row in `enrollments`.
    EnrollmentId
);
define_id!(
    /// Identifier of a row in `certifications`.
    CertificationId
);
define_id!(
    /// Identifier of a row in `coursematerials`.
    MaterialId
);
define_id!(
    /// Identifier of a row in `trainerscourses`.
    AssignmentId
);
