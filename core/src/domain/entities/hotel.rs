//! Hotel entity, minimal: the availability core only needs the
//! room -> hotel -> chain association and the city for zone reporting.

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// A hotel belonging to a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i64,
    pub chain_id: i64,
    pub name: String,
    pub city: String,
}

impl Hotel {
    pub fn new(
        id: i64,
        chain_id: i64,
        name: impl Into<String>,
        city: impl Into<String>,
    ) -> DomainResult<Self> {
        if id < 0 {
            return Err(DomainError::validation("Hotel id cannot be negative"));
        }
        if chain_id < 0 {
            return Err(DomainError::validation("Chain id cannot be negative"));
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Hotel name cannot be empty"));
        }
        Ok(Self {
            id,
            chain_id,
            name,
            city: city.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_validation() {
        assert!(Hotel::new(1, 2, "Grand Plaza", "Montreal").is_ok());
        assert!(Hotel::new(-1, 2, "Grand Plaza", "Montreal").is_err());
        assert!(Hotel::new(1, 2, "", "Montreal").is_err());
    }
}
