//! In-memory unit of work.
//!
//! Backs service tests and small embedded callers. Data is seeded as already
//! committed; `add` stages records until `save`.
//!
//! # Invariants
//! - Registrations committed without an id get `max(existing id) + 1`.
//! - No uniqueness or reference checks happen here; those belong to the
//!   service layer (and to the SQLite schema).

use super::{RepoResult, Repository, UnitOfWork};
use crate::model::course::{CourseInstance, CourseTemplate};
use crate::model::person::Person;
use crate::model::teacher::TeacherRegistration;
use log::debug;

#[derive(Debug, Clone)]
struct Table<T> {
    committed: Vec<T>,
    staged: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            committed: Vec::new(),
            staged: Vec::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    fn seeded(rows: impl IntoIterator<Item = T>) -> Self {
        Self {
            committed: rows.into_iter().collect(),
            staged: Vec::new(),
        }
    }

    fn flush(&mut self) -> usize {
        let count = self.staged.len();
        self.committed.append(&mut self.staged);
        count
    }
}

/// Unit of work holding all catalog tables in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUnitOfWork {
    persons: Table<Person>,
    course_templates: Table<CourseTemplate>,
    course_instances: Table<CourseInstance>,
    teacher_registrations: Table<TeacherRegistration>,
    save_count: usize,
}

impl InMemoryUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persons(mut self, rows: impl IntoIterator<Item = Person>) -> Self {
        self.persons = Table::seeded(rows);
        self
    }

    pub fn with_course_templates(
        mut self,
        rows: impl IntoIterator<Item = CourseTemplate>,
    ) -> Self {
        self.course_templates = Table::seeded(rows);
        self
    }

    pub fn with_course_instances(
        mut self,
        rows: impl IntoIterator<Item = CourseInstance>,
    ) -> Self {
        self.course_instances = Table::seeded(rows);
        self
    }

    pub fn with_teacher_registrations(
        mut self,
        rows: impl IntoIterator<Item = TeacherRegistration>,
    ) -> Self {
        self.teacher_registrations = Table::seeded(rows);
        self
    }

    /// Number of `save` calls so far, successful or not.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// Number of records staged across all tables.
    pub fn staged_count(&self) -> usize {
        self.persons.staged.len()
            + self.course_templates.staged.len()
            + self.course_instances.staged.len()
            + self.teacher_registrations.staged.len()
    }

    fn assign_registration_ids(&mut self) {
        let mut next_id = self
            .teacher_registrations
            .committed
            .iter()
            .chain(self.teacher_registrations.staged.iter())
            .filter_map(|registration| registration.id)
            .max()
            .unwrap_or(0)
            + 1;

        for registration in &mut self.teacher_registrations.staged {
            if registration.id.is_none() {
                registration.id = Some(next_id);
                next_id += 1;
            }
        }
    }
}

macro_rules! in_memory_repository {
    ($entity:ty, $table:ident) => {
        impl Repository<$entity> for InMemoryUnitOfWork {
            fn all(&self) -> RepoResult<Vec<$entity>> {
                Ok(self.$table.committed.clone())
            }

            fn add(&mut self, record: $entity) -> RepoResult<()> {
                self.$table.staged.push(record);
                Ok(())
            }
        }
    };
}

in_memory_repository!(Person, persons);
in_memory_repository!(CourseTemplate, course_templates);
in_memory_repository!(CourseInstance, course_instances);
in_memory_repository!(TeacherRegistration, teacher_registrations);

impl UnitOfWork for InMemoryUnitOfWork {
    fn save(&mut self) -> RepoResult<()> {
        self.save_count += 1;
        self.assign_registration_ids();

        let committed = self.persons.flush()
            + self.course_templates.flush()
            + self.course_instances.flush()
            + self.teacher_registrations.flush();

        debug!(
            "event=uow_save module=repo status=ok backend=memory committed={} save_count={}",
            committed, self.save_count
        );
        Ok(())
    }
}
