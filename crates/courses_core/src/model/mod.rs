//! Course catalog domain model.
//!
//! # Responsibility
//! - Define the entity records consumed by catalog business logic.
//! - Keep references between entities by value (ids, codes, SSNs).
//!
//! # Invariants
//! - Persons, templates and instances are provisioned outside this crate.
//! - Teacher registrations are only created by the registration workflow.

pub mod course;
pub mod person;
pub mod teacher;
