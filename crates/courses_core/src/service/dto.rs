//! Request and view models exchanged with service callers.

use crate::model::course::{CourseCode, CourseInstanceId};
use crate::model::teacher::TeacherType;
use serde::{Deserialize, Serialize};

/// One row of the semester listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CourseInstanceView {
    /// Localized course name.
    pub name: String,
    /// Course code of the backing template.
    #[serde(rename = "TemplateID")]
    pub template_id: CourseCode,
    #[serde(rename = "CourseInstanceID")]
    pub course_instance_id: CourseInstanceId,
    /// Main teacher name, or empty when none is registered or resolvable.
    pub main_teacher: String,
}

/// Basic identity of a person, returned after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonSummary {
    pub name: String,
    #[serde(rename = "SSN")]
    pub ssn: String,
}

/// Input for registering a teacher to a course instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTeacherRequest {
    pub ssn: String,
    #[serde(rename = "type")]
    pub role: TeacherType,
}

impl AddTeacherRequest {
    pub fn new(ssn: impl Into<String>, role: TeacherType) -> Self {
        Self {
            ssn: ssn.into(),
            role,
        }
    }
}
