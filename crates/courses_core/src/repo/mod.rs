//! Repository layer: entity-store contracts and their backends.
//!
//! # Responsibility
//! - Define typed read (`all`, `filter`) and staged write (`add`) access per
//!   entity type.
//! - Group repositories under a unit of work that commits staged writes
//!   atomically on `save`.
//!
//! # Invariants
//! - Staged records are invisible to reads until `save` succeeds.
//! - `save` is all-or-nothing.
//! - Repository errors are storage faults only; business rules live in the
//!   service layer.

use crate::db::DbError;
use crate::model::course::{CourseInstance, CourseTemplate};
use crate::model::person::Person;
use crate::model::teacher::TeacherRegistration;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryUnitOfWork;
pub use sqlite::SqliteUnitOfWork;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage fault raised by a repository backend.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Typed store for one entity type.
pub trait Repository<T> {
    /// Returns every committed record. Order is unspecified.
    fn all(&self) -> RepoResult<Vec<T>>;

    /// Stages a record for the next `UnitOfWork::save`.
    fn add(&mut self, record: T) -> RepoResult<()>;

    /// Returns committed records matching `predicate`.
    fn filter<P>(&self, predicate: P) -> RepoResult<Vec<T>>
    where
        P: FnMut(&T) -> bool,
        Self: Sized,
    {
        Ok(self.all()?.into_iter().filter(predicate).collect())
    }
}

/// Groups the catalog repositories and commits their staged writes together.
pub trait UnitOfWork:
    Repository<Person>
    + Repository<CourseTemplate>
    + Repository<CourseInstance>
    + Repository<TeacherRegistration>
{
    /// Commits every record staged since the last save.
    fn save(&mut self) -> RepoResult<()>;

    /// Returns the repository for entity type `T`.
    fn repository<T>(&self) -> &dyn Repository<T>
    where
        Self: Repository<T> + Sized,
    {
        self
    }

    /// Returns the repository for entity type `T` with write access.
    fn repository_mut<T>(&mut self) -> &mut dyn Repository<T>
    where
        Self: Repository<T> + Sized,
    {
        self
    }
}
