//! Room entity: the static catalog side of availability.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::enums::{Amenity, RoomType, ViewType};
use super::problem::Problem;
use crate::errors::{DomainError, DomainResult};

/// Mutable attributes of a room, as supplied by admin room management.
///
/// Updates replace view types, amenities and problems wholesale; there is no
/// partial merge at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomAttributes {
    pub hotel_id: i64,
    /// Display number, unique within the hotel (e.g. "R101")
    pub number: String,
    pub floor: String,
    pub capacity: i32,
    pub surface_area: f64,
    pub price: f64,
    pub telephone: String,
    pub room_type: RoomType,
    pub is_extensible: bool,
    pub view_types: HashSet<ViewType>,
    pub amenities: HashSet<Amenity>,
    pub problems: Vec<Problem>,
}

/// A room in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Database id; 0 before first persistence
    pub id: i64,
    pub hotel_id: i64,
    pub number: String,
    pub floor: String,
    pub capacity: i32,
    pub surface_area: f64,
    pub price: f64,
    pub telephone: String,
    pub room_type: RoomType,
    pub is_extensible: bool,
    pub view_types: HashSet<ViewType>,
    pub amenities: HashSet<Amenity>,
    pub problems: Vec<Problem>,
}

impl Room {
    /// Create a validated room from its attributes
    pub fn new(id: i64, attributes: RoomAttributes) -> DomainResult<Self> {
        if id < 0 {
            return Err(DomainError::validation("Room id cannot be negative"));
        }
        if attributes.hotel_id < 0 {
            return Err(DomainError::validation("Hotel id cannot be negative"));
        }
        if attributes.capacity < 1 {
            return Err(DomainError::validation(
                "Room capacity must be at least 1",
            ));
        }
        if attributes.surface_area <= 0.0 {
            return Err(DomainError::validation(
                "Room surface area must be positive",
            ));
        }
        if attributes.price < 0.0 {
            return Err(DomainError::validation("Room price cannot be negative"));
        }
        if attributes.number.trim().is_empty() {
            return Err(DomainError::validation("Room number cannot be empty"));
        }
        if attributes.floor.trim().is_empty() {
            return Err(DomainError::validation("Room floor cannot be empty"));
        }
        if attributes.telephone.trim().is_empty() {
            return Err(DomainError::validation(
                "Room telephone number cannot be empty",
            ));
        }
        for problem in &attributes.problems {
            problem.validate()?;
        }

        Ok(Self {
            id,
            hotel_id: attributes.hotel_id,
            number: attributes.number,
            floor: attributes.floor,
            capacity: attributes.capacity,
            surface_area: attributes.surface_area,
            price: attributes.price,
            telephone: attributes.telephone,
            room_type: attributes.room_type,
            is_extensible: attributes.is_extensible,
            view_types: attributes.view_types,
            amenities: attributes.amenities,
            problems: attributes.problems,
        })
    }

    /// Unresolved problems currently open against this room
    pub fn open_problems(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter().filter(|p| !p.is_resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn attributes() -> RoomAttributes {
        RoomAttributes {
            hotel_id: 1,
            number: "R101".to_string(),
            floor: "1".to_string(),
            capacity: 2,
            surface_area: 24.5,
            price: 100.0,
            telephone: "555-0101".to_string(),
            room_type: RoomType::Double,
            is_extensible: false,
            view_types: HashSet::from([ViewType::Sea]),
            amenities: HashSet::from([Amenity::Wifi, Amenity::Tv]),
            problems: Vec::new(),
        }
    }

    #[test]
    fn test_valid_room() {
        let room = Room::new(1, attributes()).unwrap();
        assert_eq!(room.number, "R101");
        assert_eq!(room.capacity, 2);
        assert!(room.view_types.contains(&ViewType::Sea));
    }

    #[test]
    fn test_negative_ids_rejected() {
        assert!(Room::new(-1, attributes()).is_err());

        let mut attrs = attributes();
        attrs.hotel_id = -1;
        assert!(Room::new(0, attrs).is_err());
    }

    #[test]
    fn test_capacity_must_be_at_least_one() {
        let mut attrs = attributes();
        attrs.capacity = 0;
        assert!(Room::new(0, attrs).is_err());
    }

    #[test]
    fn test_surface_area_must_be_positive() {
        let mut attrs = attributes();
        attrs.surface_area = 0.0;
        assert!(Room::new(0, attrs).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut attrs = attributes();
        attrs.price = -1.0;
        assert!(Room::new(0, attrs).is_err());
    }

    #[test]
    fn test_empty_required_strings_rejected() {
        for field in ["number", "floor", "telephone"] {
            let mut attrs = attributes();
            match field {
                "number" => attrs.number = String::new(),
                "floor" => attrs.floor = String::new(),
                _ => attrs.telephone = String::new(),
            }
            assert!(Room::new(0, attrs).is_err(), "{field} should be required");
        }
    }

    #[test]
    fn test_invalid_problem_rejects_room() {
        use crate::domain::entities::enums::ProblemSeverity;
        use chrono::Utc;

        let mut attrs = attributes();
        attrs.problems.push(Problem {
            id: 1,
            severity: ProblemSeverity::Major,
            description: "Broken window".to_string(),
            signaled_when: Utc::now(),
            is_resolved: true,
            resolution_date: None, // inconsistent pairing
        });
        assert!(Room::new(0, attrs).is_err());
    }

    #[test]
    fn test_open_problems_filters_resolved() {
        use crate::domain::entities::enums::ProblemSeverity;
        use chrono::Utc;

        let now = Utc::now();
        let mut attrs = attributes();
        attrs.problems = vec![
            Problem::new(1, ProblemSeverity::Minor, "Leaky tap", now, false, None).unwrap(),
            Problem::new(2, ProblemSeverity::Major, "Broken AC", now, true, Some(now)).unwrap(),
        ];
        let room = Room::new(1, attrs).unwrap();
        assert_eq!(room.open_problems().count(), 1);
    }
}
