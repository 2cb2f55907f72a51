//! Person identity record.

use serde::{Deserialize, Serialize};

/// Numeric identity of a person record.
pub type PersonId = i64;

/// Identity record for anyone known to the catalog.
///
/// `ssn` is the national identifier and is unique across persons. Teacher
/// registrations reference a person through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    /// Legal name.
    pub name: String,
    pub ssn: String,
    pub email: String,
}

impl Person {
    pub fn new(
        id: PersonId,
        name: impl Into<String>,
        ssn: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            ssn: ssn.into(),
            email: email.into(),
        }
    }
}
