//! Teacher registration join record.
//!
//! # Invariants
//! - At most one `MainTeacher` registration per course instance.
//! - A given SSN appears at most once per course instance, whatever the role.
//! - `id` is `None` until the registration has been committed.

use super::course::CourseInstanceId;
use serde::{Deserialize, Serialize};

/// Numeric identity of a teacher registration.
pub type RegistrationId = i64;

/// Role of a teacher within one course instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeacherType {
    /// Teacher of record. Unique per course instance.
    MainTeacher,
    AssistantTeacher,
}

impl TeacherType {
    /// Stable storage tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MainTeacher => "main_teacher",
            Self::AssistantTeacher => "assistant_teacher",
        }
    }

    /// Parses a storage tag written by `as_str`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "main_teacher" => Some(Self::MainTeacher),
            "assistant_teacher" => Some(Self::AssistantTeacher),
            _ => None,
        }
    }
}

/// Links a person (by SSN) to a course instance in a given role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRegistration {
    pub id: Option<RegistrationId>,
    pub course_instance_id: CourseInstanceId,
    pub ssn: String,
    #[serde(rename = "type")]
    pub role: TeacherType,
}

impl TeacherRegistration {
    /// Builds a registration that has not been persisted yet.
    pub fn new(
        course_instance_id: CourseInstanceId,
        ssn: impl Into<String>,
        role: TeacherType,
    ) -> Self {
        Self {
            id: None,
            course_instance_id,
            ssn: ssn.into(),
            role,
        }
    }

    /// Builds a registration with a known stable id.
    ///
    /// Used when seeding or loading persisted rows.
    pub fn with_id(
        id: RegistrationId,
        course_instance_id: CourseInstanceId,
        ssn: impl Into<String>,
        role: TeacherType,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(course_instance_id, ssn, role)
        }
    }

    pub fn is_main_teacher(&self) -> bool {
        self.role == TeacherType::MainTeacher
    }
}
