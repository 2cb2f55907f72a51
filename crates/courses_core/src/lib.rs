//! Core business logic for the university course catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod calendar;
pub mod config;
pub mod db;
pub mod envelope;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::{is_leap_year, Season, Semester};
pub use config::{CatalogConfig, ConfigError};
pub use envelope::{Envelope, PagingInfo};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::course::{CourseCode, CourseInstance, CourseInstanceId, CourseTemplate};
pub use model::person::{Person, PersonId};
pub use model::teacher::{RegistrationId, TeacherRegistration, TeacherType};
pub use repo::{
    InMemoryUnitOfWork, RepoError, RepoResult, Repository, SqliteUnitOfWork, UnitOfWork,
};
pub use service::course_service::{CourseService, ServiceError, ValidationCode};
pub use service::dto::{AddTeacherRequest, CourseInstanceView, PersonSummary};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
