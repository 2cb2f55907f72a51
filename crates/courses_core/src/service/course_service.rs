//! Course catalog use-case service.
//!
//! # Responsibility
//! - List course instances taught in a term, localized and paged.
//! - Register teachers to course instances under uniqueness rules.
//!
//! # Invariants
//! - At most one main teacher per course instance.
//! - A person is registered at most once per course instance.
//! - The semester listing never raises a business error.
//! - Registration checks run in a fixed order; the first failure wins.
//!
//! The registration check-then-save sequence is not atomic against
//! concurrent writers on the same store. The SQLite schema rejects the
//! losing commit with a constraint error, which surfaces as
//! `ServiceError::Store`.

use crate::config::{CatalogConfig, ConfigError};
use crate::envelope::{Envelope, PagingInfo};
use crate::model::course::{CourseInstance, CourseInstanceId, CourseTemplate};
use crate::model::person::Person;
use crate::model::teacher::{TeacherRegistration, TeacherType};
use crate::repo::{RepoError, Repository, UnitOfWork};
use crate::service::dto::{AddTeacherRequest, CourseInstanceView, PersonSummary};
use crate::service::query::{
    filter_by_semester, join_templates, project, resolve_main_teachers, slice_page,
    sort_by_instance_id,
};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Business-rule violation codes. The string form is the caller contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCode {
    CourseAlreadyHasMainTeacher,
    PersonAlreadyRegisteredTeacherInCourse,
}

impl ValidationCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CourseAlreadyHasMainTeacher => "COURSE_ALREADY_HAS_A_MAIN_TEACHER",
            Self::PersonAlreadyRegisteredTeacherInCourse => {
                "PERSON_ALREADY_REGISTERED_TEACHER_IN_COURSE"
            }
        }
    }
}

impl Display for ValidationCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service error for course catalog use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Referenced course instance or person does not exist.
    ObjectNotFound,
    /// Business rule violated.
    Validation(ValidationCode),
    /// Store or commit failure, passed through from the repository layer.
    Store(RepoError),
}

impl ServiceError {
    /// Validation code when this is a business-rule violation.
    pub fn validation_code(&self) -> Option<ValidationCode> {
        match self {
            Self::Validation(code) => Some(*code),
            _ => None,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ObjectNotFound => write!(f, "object not found"),
            Self::Validation(code) => write!(f, "{code}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

/// Course catalog service over a unit of work.
pub struct CourseService<U: UnitOfWork> {
    uow: U,
    config: CatalogConfig,
}

impl<U: UnitOfWork> CourseService<U> {
    /// Creates a service with validated configuration.
    pub fn new(uow: U, config: CatalogConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { uow, config })
    }

    /// Creates a service with `CatalogConfig::default()`.
    pub fn with_defaults(uow: U) -> Self {
        Self {
            uow,
            config: CatalogConfig::default(),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn unit_of_work(&self) -> &U {
        &self.uow
    }

    pub fn into_unit_of_work(self) -> U {
        self.uow
    }

    /// Lists course instances taught in `semester`, one page at a time.
    ///
    /// # Contract
    /// - Absent or empty `semester`/`language` fall back to configured
    ///   defaults.
    /// - Items are sorted by course instance id; at most `page_size` items.
    /// - `page` is 1-based and reported as requested; out-of-range pages are
    ///   empty with unchanged totals.
    /// - Only store faults can fail this call.
    pub fn list_course_instances_for_semester(
        &self,
        language: Option<&str>,
        semester: Option<&str>,
        page: u32,
    ) -> Result<Envelope<Vec<CourseInstanceView>>, ServiceError> {
        let semester = non_empty_or(semester, &self.config.default_semester);
        let language = non_empty_or(language, &self.config.default_language);
        let page_size = self.config.page_size;

        let instances = self.uow.repository::<CourseInstance>().all()?;
        let templates = self.uow.repository::<CourseTemplate>().all()?;

        let joined = join_templates(filter_by_semester(&instances, semester), &templates);
        let total = u32::try_from(joined.len()).unwrap_or(u32::MAX);
        let sorted = sort_by_instance_id(project(
            joined,
            language,
            &self.config.default_language,
        ));
        let mut items = slice_page(sorted, page, page_size);

        if !items.is_empty() {
            let registrations = self.uow.repository::<TeacherRegistration>().all()?;
            let persons = self.uow.repository::<Person>().all()?;
            resolve_main_teachers(&mut items, &registrations, &persons);
        }

        info!(
            "event=semester_query module=service status=ok semester={} language={} page={} items={} total={}",
            semester,
            language,
            page,
            items.len(),
            total
        );

        Ok(Envelope::new(items, PagingInfo::new(total, page_size, page)))
    }

    /// Registers a person as teacher of a course instance.
    ///
    /// # Contract
    /// - Checks run in order: course instance exists, person exists, main
    ///   teacher uniqueness, per-person uniqueness.
    /// - On success exactly one registration is staged and committed.
    /// - Returns the registered person's summary.
    pub fn add_teacher_to_course(
        &mut self,
        course_instance_id: CourseInstanceId,
        request: &AddTeacherRequest,
    ) -> Result<PersonSummary, ServiceError> {
        let result = self.register_teacher(course_instance_id, request);
        match &result {
            Ok(_) => info!(
                "event=teacher_register module=service status=ok course_instance_id={} role={}",
                course_instance_id,
                request.role.as_str()
            ),
            Err(err) => warn!(
                "event=teacher_register module=service status=error course_instance_id={} role={} error={}",
                course_instance_id,
                request.role.as_str(),
                err
            ),
        }
        result
    }

    fn register_teacher(
        &mut self,
        course_instance_id: CourseInstanceId,
        request: &AddTeacherRequest,
    ) -> Result<PersonSummary, ServiceError> {
        let course_instances = Repository::<CourseInstance>::filter(&self.uow, |instance| {
            instance.id == course_instance_id
        })?;
        if course_instances.is_empty() {
            return Err(ServiceError::ObjectNotFound);
        }

        let teacher = Repository::<Person>::filter(&self.uow, |person| person.ssn == request.ssn)?
            .into_iter()
            .next()
            .ok_or(ServiceError::ObjectNotFound)?;

        let registered = Repository::<TeacherRegistration>::filter(&self.uow, |registration| {
            registration.course_instance_id == course_instance_id
        })?;

        if request.role == TeacherType::MainTeacher
            && registered.iter().any(TeacherRegistration::is_main_teacher)
        {
            return Err(ServiceError::Validation(
                ValidationCode::CourseAlreadyHasMainTeacher,
            ));
        }

        if registered
            .iter()
            .any(|registration| registration.ssn == request.ssn)
        {
            return Err(ServiceError::Validation(
                ValidationCode::PersonAlreadyRegisteredTeacherInCourse,
            ));
        }

        self.uow
            .repository_mut::<TeacherRegistration>()
            .add(TeacherRegistration::new(
                course_instance_id,
                request.ssn.clone(),
                request.role,
            ))?;
        self.uow.save()?;

        Ok(PersonSummary {
            name: teacher.name,
            ssn: teacher.ssn,
        })
    }
}

fn non_empty_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => fallback,
    }
}
