//! SQLite-backed unit of work.
//!
//! # Responsibility
//! - Read catalog tables from a migrated connection.
//! - Buffer staged records and write them in one immediate transaction.
//!
//! # Invariants
//! - `save` either commits every staged record or none of them.
//! - Staged records are dropped after `save`, whatever its outcome.
//! - Schema constraints (references, teacher uniqueness) are enforced by
//!   SQLite at commit time and surface as `RepoError::Db`.

use super::{RepoError, RepoResult, Repository, UnitOfWork};
use crate::db::migrations::ensure_schema_current;
use crate::model::course::{CourseInstance, CourseTemplate};
use crate::model::person::Person;
use crate::model::teacher::{TeacherRegistration, TeacherType};
use log::{debug, error};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::time::Instant;

#[derive(Debug, Default)]
struct StagedRecords {
    persons: Vec<Person>,
    course_templates: Vec<CourseTemplate>,
    course_instances: Vec<CourseInstance>,
    teacher_registrations: Vec<TeacherRegistration>,
}

impl StagedRecords {
    fn len(&self) -> usize {
        self.persons.len()
            + self.course_templates.len()
            + self.course_instances.len()
            + self.teacher_registrations.len()
    }
}

/// Unit of work over one SQLite connection.
pub struct SqliteUnitOfWork<'conn> {
    conn: &'conn mut Connection,
    staged: StagedRecords,
}

impl<'conn> SqliteUnitOfWork<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    ///
    /// # Errors
    /// - `RepoError::Db(DbError::SchemaBehind)` when migrations have not run.
    /// - `RepoError::Db(DbError::UnsupportedSchemaVersion)` for newer schemas.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_schema_current(conn)?;
        Ok(Self {
            conn,
            staged: StagedRecords::default(),
        })
    }

    /// Number of records staged across all tables.
    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    fn query_all<T>(
        &self,
        sql: &str,
        parse: impl Fn(&Row<'_>) -> RepoResult<T>,
    ) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse(row)?);
        }
        Ok(records)
    }
}

impl Repository<Person> for SqliteUnitOfWork<'_> {
    fn all(&self) -> RepoResult<Vec<Person>> {
        self.query_all("SELECT id, name, ssn, email FROM persons;", |row| {
            Ok(Person {
                id: row.get("id")?,
                name: row.get("name")?,
                ssn: row.get("ssn")?,
                email: row.get("email")?,
            })
        })
    }

    fn add(&mut self, record: Person) -> RepoResult<()> {
        self.staged.persons.push(record);
        Ok(())
    }
}

impl Repository<CourseTemplate> for SqliteUnitOfWork<'_> {
    fn all(&self) -> RepoResult<Vec<CourseTemplate>> {
        self.query_all(
            "SELECT course_id, name, name_en, description FROM course_templates;",
            |row| {
                Ok(CourseTemplate {
                    course_id: row.get("course_id")?,
                    name: row.get("name")?,
                    name_en: row.get("name_en")?,
                    description: row.get("description")?,
                })
            },
        )
    }

    fn add(&mut self, record: CourseTemplate) -> RepoResult<()> {
        self.staged.course_templates.push(record);
        Ok(())
    }
}

impl Repository<CourseInstance> for SqliteUnitOfWork<'_> {
    fn all(&self) -> RepoResult<Vec<CourseInstance>> {
        self.query_all(
            "SELECT id, course_id, semester_id FROM course_instances;",
            |row| {
                Ok(CourseInstance {
                    id: row.get("id")?,
                    course_id: row.get("course_id")?,
                    semester_id: row.get("semester_id")?,
                })
            },
        )
    }

    fn add(&mut self, record: CourseInstance) -> RepoResult<()> {
        self.staged.course_instances.push(record);
        Ok(())
    }
}

impl Repository<TeacherRegistration> for SqliteUnitOfWork<'_> {
    fn all(&self) -> RepoResult<Vec<TeacherRegistration>> {
        self.query_all(
            "SELECT id, course_instance_id, ssn, type FROM teacher_registrations;",
            parse_registration_row,
        )
    }

    fn add(&mut self, record: TeacherRegistration) -> RepoResult<()> {
        self.staged.teacher_registrations.push(record);
        Ok(())
    }
}

impl UnitOfWork for SqliteUnitOfWork<'_> {
    fn save(&mut self) -> RepoResult<()> {
        let started_at = Instant::now();
        let staged = std::mem::take(&mut self.staged);
        let count = staged.len();
        if count == 0 {
            return Ok(());
        }

        let result = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(RepoError::from)
            .and_then(|tx| {
                write_staged(&tx, &staged)?;
                tx.commit()?;
                Ok(())
            });

        match &result {
            Ok(()) => debug!(
                "event=uow_save module=repo status=ok backend=sqlite committed={} duration_ms={}",
                count,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=uow_save module=repo status=error backend=sqlite staged={} duration_ms={} error={}",
                count,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn write_staged(tx: &Transaction<'_>, staged: &StagedRecords) -> RepoResult<()> {
    for person in &staged.persons {
        tx.execute(
            "INSERT INTO persons (id, name, ssn, email) VALUES (?1, ?2, ?3, ?4);",
            params![person.id, person.name, person.ssn, person.email],
        )?;
    }

    for template in &staged.course_templates {
        tx.execute(
            "INSERT INTO course_templates (course_id, name, name_en, description)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                template.course_id,
                template.name,
                template.name_en,
                template.description
            ],
        )?;
    }

    for instance in &staged.course_instances {
        tx.execute(
            "INSERT INTO course_instances (id, course_id, semester_id) VALUES (?1, ?2, ?3);",
            params![instance.id, instance.course_id, instance.semester_id],
        )?;
    }

    for registration in &staged.teacher_registrations {
        tx.execute(
            "INSERT INTO teacher_registrations (id, course_instance_id, ssn, type)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                registration.id,
                registration.course_instance_id,
                registration.ssn,
                registration.role.as_str()
            ],
        )?;
    }

    Ok(())
}

fn parse_registration_row(row: &Row<'_>) -> RepoResult<TeacherRegistration> {
    let type_text: String = row.get("type")?;
    let role = TeacherType::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid teacher type `{type_text}` in teacher_registrations.type"
        ))
    })?;

    Ok(TeacherRegistration {
        id: Some(row.get("id")?),
        course_instance_id: row.get("course_instance_id")?,
        ssn: row.get("ssn")?,
        role,
    })
}
