//! Courses, their materials and catalogue filtering.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CourseId, MaterialId};

/// Raised when a stored or submitted enum value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// Rejected text.
    pub value: String,
}

/// Publication state of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    /// Open for enrollment.
    Active,
    /// Announced but not yet open.
    #[default]
    Upcoming,
    /// Closed.
    Archived,
}

impl CourseStatus {
    /// Column value in `courses.status`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Upcoming => "upcoming",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for CourseStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "upcoming" => Ok(Self::Upcoming),
            "archived" => Ok(Self::Archived),
            _ => Err(UnknownVariant {
                kind: "course status",
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty band of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum CourseLevel {
    /// No prior knowledge assumed.
    Beginner,
    /// Some prior knowledge assumed.
    Intermediate,
    /// Significant prior knowledge assumed.
    Advanced,
}

impl CourseLevel {
    /// Column value in `courses.level`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl FromStr for CourseLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(UnknownVariant {
                kind: "course level",
                value: s.to_owned(),
            }),
        }
    }
}

/// A course as stored in `courses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Surrogate key.
    pub id: CourseId,
    /// Display title, never blank.
    pub title: String,
    /// Optional catalogue category.
    pub category: Option<String>,
    /// Optional long description.
    pub description: Option<String>,
    /// Optional prerequisite notes.
    pub prerequisites: Option<String>,
    /// First teaching day.
    pub start_date: Option<NaiveDate>,
    /// Last teaching day.
    pub end_date: Option<NaiveDate>,
    /// Seat limit.
    pub max_capacity: Option<i32>,
    /// Publication state.
    pub status: CourseStatus,
    /// Difficulty band.
    pub level: Option<CourseLevel>,
    /// Length in weeks, used for learning-hour estimates.
    pub duration_weeks: Option<i32>,
    /// Name shown on the catalogue card.
    pub instructor_name: Option<String>,
    /// List price.
    pub price: Option<f64>,
    /// Creation time; catalogue listings are newest first.
    pub created_at: DateTime<Utc>,
    /// Last change.
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Whether learners may enroll.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == CourseStatus::Active
    }
}

/// Field-level validation failures for [`CourseDraft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseValidationError {
    /// Title is empty once trimmed.
    #[error("title must not be blank")]
    BlankTitle,
    /// End date precedes start date.
    #[error("endDate must not be before startDate")]
    EndBeforeStart,
    /// Capacity below zero.
    #[error("maxCapacity must not be negative")]
    NegativeCapacity,
    /// Duration below zero.
    #[error("durationWeeks must not be negative")]
    NegativeDuration,
    /// Price below zero or not a number.
    #[error("price must be a non-negative number")]
    InvalidPrice,
}

impl CourseValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BlankTitle => "title",
            Self::EndBeforeStart => "endDate",
            Self::NegativeCapacity => "maxCapacity",
            Self::NegativeDuration => "durationWeeks",
            Self::InvalidPrice => "price",
        }
    }
}

/// Values for creating or replacing a course.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CourseDraft {
    /// Display title.
    pub title: String,
    /// Optional catalogue category.
    pub category: Option<String>,
    /// Optional long description.
    pub description: Option<String>,
    /// Optional prerequisite notes.
    pub prerequisites: Option<String>,
    /// First teaching day.
    pub start_date: Option<NaiveDate>,
    /// Last teaching day.
    pub end_date: Option<NaiveDate>,
    /// Seat limit.
    pub max_capacity: Option<i32>,
    /// Publication state; new courses default to upcoming.
    pub status: CourseStatus,
    /// Difficulty band.
    pub level: Option<CourseLevel>,
    /// Length in weeks.
    pub duration_weeks: Option<i32>,
    /// Instructor display name.
    pub instructor_name: Option<String>,
    /// List price.
    pub price: Option<f64>,
}

impl CourseDraft {
    /// Check the invariants every stored course satisfies.
    ///
    /// # Examples
    /// ```
    /// use learnhub::domain::{CourseDraft, CourseValidationError};
    ///
    /// let draft = CourseDraft { title: " ".into(), ..CourseDraft::default() };
    /// assert_eq!(draft.validate(), Err(CourseValidationError::BlankTitle));
    /// ```
    pub fn validate(&self) -> Result<(), CourseValidationError> {
        if self.title.trim().is_empty() {
            return Err(CourseValidationError::BlankTitle);
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(CourseValidationError::EndBeforeStart);
            }
        }
        if self.max_capacity.is_some_and(|capacity| capacity < 0) {
            return Err(CourseValidationError::NegativeCapacity);
        }
        if self.duration_weeks.is_some_and(|weeks| weeks < 0) {
            return Err(CourseValidationError::NegativeDuration);
        }
        if self
            .price
            .is_some_and(|price| !price.is_finite() || price.is_sign_negative())
        {
            return Err(CourseValidationError::InvalidPrice);
        }
        Ok(())
    }
}

/// Learning resource attached to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseMaterial {
    /// Surrogate key.
    pub id: MaterialId,
    /// Owning course.
    pub course_id: CourseId,
    /// Link to the resource.
    pub material_url: String,
    /// Optional caption.
    pub material_description: Option<String>,
    /// Upload time.
    pub created_at: DateTime<Utc>,
}

/// Material to attach to a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourseMaterial {
    /// Link to the resource; must not be blank.
    pub material_url: String,
    /// Optional caption.
    pub material_description: Option<String>,
}

/// Narrowing applied to the active catalogue.
///
/// A blank category, or the literal `all` used by the portal's dropdown,
/// means "no category filter". Keywords match title or description without
/// regard to case.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CourseFilter {
    category: Option<String>,
    level: Option<CourseLevel>,
    keyword: Option<String>,
}

impl CourseFilter {
    /// Build a filter, dropping blank criteria.
    #[must_use]
    pub fn new(category: Option<&str>, level: Option<CourseLevel>, keyword: Option<&str>) -> Self {
        let category = category
            .map(str::trim)
            .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("all"))
            .map(str::to_owned);
        let keyword = keyword
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        Self {
            category,
            level,
            keyword,
        }
    }

    /// Exact category to match, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Level to match, if any.
    #[must_use]
    pub const fn level(&self) -> Option<CourseLevel> {
        self.level
    }

    /// Trimmed search keyword, if any.
    #[must_use]
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// Evaluate the filter against a course. Status is not considered here.
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|wanted| course.category.as_deref() == Some(wanted));
        let level_ok = self.level.is_none_or(|wanted| course.level == Some(wanted));
        let keyword_ok = self.keyword.as_deref().is_none_or(|keyword| {
            let needle = keyword.to_lowercase();
            course.title.to_lowercase().contains(&needle)
                || course
                    .description
                    .as_deref()
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
        });
        category_ok && level_ok && keyword_ok
    }
}

/// Largest page the catalogue will serve.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raised when paging parameters are out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("size must be between 1 and {MAX_PAGE_SIZE}, got {0}")]
pub struct PageSizeError(pub u32);

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Validate paging parameters.
    pub const fn new(page: u32, size: u32) -> Result<Self, PageSizeError> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(PageSizeError(size));
        }
        Ok(Self { page, size })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Number of rows to skip.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// Zero-based page index.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
    /// Rows across all pages.
    pub total_items: u64,
    /// Number of pages.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Assemble a page from its rows and the overall row count.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page(),
            size: request.size(),
            total_items,
            total_pages: total_items.div_ceil(u64::from(request.size())),
        }
    }
}

#[cfg(test)]
#[path = "course_tests.rs"]
mod tests;
