//! Core use-case services.
//!
//! # Responsibility
//! - Enforce catalog business rules above the repository layer.
//! - Compose paged, localized read models for callers.

pub mod course_service;
pub mod dto;
pub mod query;
