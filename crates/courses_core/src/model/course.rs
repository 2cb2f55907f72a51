//! Course template and course instance records.
//!
//! # Invariants
//! - `CourseTemplate::course_id` is unique.
//! - Every `CourseInstance` is one offering of a template in one term; many
//!   instances may share a template.

use serde::{Deserialize, Serialize};

/// Course code such as `T-514-VEFT`.
pub type CourseCode = String;

/// Numeric identity of a course instance.
pub type CourseInstanceId = i64;

/// Reusable definition of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseTemplate {
    pub course_id: CourseCode,
    /// Name in the default locale.
    pub name: String,
    /// English name.
    pub name_en: String,
    pub description: String,
}

impl CourseTemplate {
    pub fn new(
        course_id: impl Into<String>,
        name: impl Into<String>,
        name_en: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            name: name.into(),
            name_en: name_en.into(),
            description: String::new(),
        }
    }

    /// Sets the free-form description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One offering of a course template in an academic term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInstance {
    pub id: CourseInstanceId,
    /// Code of the backing `CourseTemplate`.
    pub course_id: CourseCode,
    /// Term identifier, e.g. `20153`.
    pub semester_id: String,
}

impl CourseInstance {
    pub fn new(
        id: CourseInstanceId,
        course_id: impl Into<String>,
        semester_id: impl Into<String>,
    ) -> Self {
        Self {
            id,
            course_id: course_id.into(),
            semester_id: semester_id.into(),
        }
    }
}
