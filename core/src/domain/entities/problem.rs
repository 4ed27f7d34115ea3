//! Room problem records (maintenance issues signaled against a room).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::ProblemSeverity;
use crate::errors::{DomainError, DomainResult};

/// A maintenance problem signaled against a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: i64,
    pub severity: ProblemSeverity,
    pub description: String,
    pub signaled_when: DateTime<Utc>,
    pub is_resolved: bool,
    /// Present iff the problem is resolved
    pub resolution_date: Option<DateTime<Utc>>,
}

impl Problem {
    /// Create a validated problem record
    pub fn new(
        id: i64,
        severity: ProblemSeverity,
        description: impl Into<String>,
        signaled_when: DateTime<Utc>,
        is_resolved: bool,
        resolution_date: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        let problem = Self {
            id,
            severity,
            description: description.into(),
            signaled_when,
            is_resolved,
            resolution_date,
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Check the resolution invariants without consuming the value
    pub fn validate(&self) -> DomainResult<()> {
        if self.id < 0 {
            return Err(DomainError::validation("Problem id cannot be negative"));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::validation(
                "Problem description cannot be empty",
            ));
        }
        match (self.is_resolved, self.resolution_date) {
            (true, None) => Err(DomainError::validation(
                "Problem is resolved but carries no resolution date",
            )),
            (true, Some(resolved)) if resolved < self.signaled_when => Err(
                DomainError::validation("Resolution date cannot precede the signal date"),
            ),
            (false, Some(_)) => Err(DomainError::validation(
                "Unresolved problem cannot carry a resolution date",
            )),
            _ => Ok(()),
        }
    }
}
