//! Type-safe enumerations for the room catalog and reservation lifecycle.
//!
//! Every enum carries an explicit integer representation (stable, starts at 1)
//! and a storage-boundary name used by the lookup tables. The spellings are
//! load-bearing: rows are matched by name, so "Junior Suite" keeps its space.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Room category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Simple = 1,
    Double = 2,
    Twin = 3,
    Queen = 4,
    King = 5,
    #[serde(rename = "Junior Suite")]
    JuniorSuite = 6,
    #[serde(rename = "Deluxe Suite")]
    DeluxeSuite = 7,
    #[serde(rename = "Familial Suite")]
    FamilialSuite = 8,
}

impl RoomType {
    /// Name as persisted in the `room_type` lookup table
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Double => "Double",
            Self::Twin => "Twin",
            Self::Queen => "Queen",
            Self::King => "King",
            Self::JuniorSuite => "Junior Suite",
            Self::DeluxeSuite => "Deluxe Suite",
            Self::FamilialSuite => "Familial Suite",
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Simple),
            2 => Some(Self::Double),
            3 => Some(Self::Twin),
            4 => Some(Self::Queen),
            5 => Some(Self::King),
            6 => Some(Self::JuniorSuite),
            7 => Some(Self::DeluxeSuite),
            8 => Some(Self::FamilialSuite),
            _ => None,
        }
    }

    pub const ALL: [Self; 8] = [
        Self::Simple,
        Self::Double,
        Self::Twin,
        Self::Queen,
        Self::King,
        Self::JuniorSuite,
        Self::DeluxeSuite,
        Self::FamilialSuite,
    ];
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("Unknown room type: {s}")))
    }
}

/// View offered by a room's windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewType {
    Sea = 1,
    Mountain = 2,
    City = 3,
    Park = 4,
    Courtyard = 5,
    Pool = 6,
}

impl ViewType {
    /// Name as persisted in the `view_type` lookup table
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sea => "Sea",
            Self::Mountain => "Mountain",
            Self::City => "City",
            Self::Park => "Park",
            Self::Courtyard => "Courtyard",
            Self::Pool => "Pool",
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Sea),
            2 => Some(Self::Mountain),
            3 => Some(Self::City),
            4 => Some(Self::Park),
            5 => Some(Self::Courtyard),
            6 => Some(Self::Pool),
            _ => None,
        }
    }

    pub const ALL: [Self; 6] = [
        Self::Sea,
        Self::Mountain,
        Self::City,
        Self::Park,
        Self::Courtyard,
        Self::Pool,
    ];
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("Unknown view type: {s}")))
    }
}

/// Amenity available in a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Amenity {
    #[serde(rename = "WIFI")]
    Wifi = 1,
    #[serde(rename = "TV")]
    Tv = 2,
    #[serde(rename = "AC")]
    Ac = 3,
    #[serde(rename = "Mini Fridge")]
    MiniFridge = 4,
    #[serde(rename = "Coffee Machine")]
    CoffeeMachine = 5,
    #[serde(rename = "Air Dryer")]
    AirDryer = 6,
    Safe = 7,
    Jacuzzi = 8,
    Balcony = 9,
    #[serde(rename = "Room Service")]
    RoomService = 10,
    #[serde(rename = "King Size Bed")]
    KingSizeBed = 11,
    #[serde(rename = "Queen Size Bed")]
    QueenSizeBed = 12,
    #[serde(rename = "Simple Bed")]
    SimpleBed = 13,
    Office = 14,
}

impl Amenity {
    /// Name as persisted in the `amenity` lookup table
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wifi => "WIFI",
            Self::Tv => "TV",
            Self::Ac => "AC",
            Self::MiniFridge => "Mini Fridge",
            Self::CoffeeMachine => "Coffee Machine",
            Self::AirDryer => "Air Dryer",
            Self::Safe => "Safe",
            Self::Jacuzzi => "Jacuzzi",
            Self::Balcony => "Balcony",
            Self::RoomService => "Room Service",
            Self::KingSizeBed => "King Size Bed",
            Self::QueenSizeBed => "Queen Size Bed",
            Self::SimpleBed => "Simple Bed",
            Self::Office => "Office",
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Wifi),
            2 => Some(Self::Tv),
            3 => Some(Self::Ac),
            4 => Some(Self::MiniFridge),
            5 => Some(Self::CoffeeMachine),
            6 => Some(Self::AirDryer),
            7 => Some(Self::Safe),
            8 => Some(Self::Jacuzzi),
            9 => Some(Self::Balcony),
            10 => Some(Self::RoomService),
            11 => Some(Self::KingSizeBed),
            12 => Some(Self::QueenSizeBed),
            13 => Some(Self::SimpleBed),
            14 => Some(Self::Office),
            _ => None,
        }
    }

    pub const ALL: [Self; 14] = [
        Self::Wifi,
        Self::Tv,
        Self::Ac,
        Self::MiniFridge,
        Self::CoffeeMachine,
        Self::AirDryer,
        Self::Safe,
        Self::Jacuzzi,
        Self::Balcony,
        Self::RoomService,
        Self::KingSizeBed,
        Self::QueenSizeBed,
        Self::SimpleBed,
        Self::Office,
    ];
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Amenity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("Unknown amenity: {s}")))
    }
}

/// Severity of a signaled room problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProblemSeverity {
    Minor = 1,
    Moderate = 2,
    Major = 3,
    Critical = 4,
}

impl ProblemSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minor => "Minor",
            Self::Moderate => "Moderate",
            Self::Major => "Major",
            Self::Critical => "Critical",
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Minor),
            2 => Some(Self::Moderate),
            3 => Some(Self::Major),
            4 => Some(Self::Critical),
            _ => None,
        }
    }

    pub const ALL: [Self; 4] = [Self::Minor, Self::Moderate, Self::Major, Self::Critical];
}

impl fmt::Display for ProblemSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProblemSeverity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("Unknown problem severity: {s}")))
    }
}

/// Lifecycle state of a reservation
///
/// Transitions: Confirmed -> {Cancelled, Finished}; Waiting -> {Confirmed,
/// Cancelled}. Cancelled and Finished are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    Confirmed = 1,
    Waiting = 2,
    Cancelled = 3,
    Finished = 4,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Waiting => "Waiting",
            Self::Cancelled => "Cancelled",
            Self::Finished => "Finished",
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Confirmed),
            2 => Some(Self::Waiting),
            3 => Some(Self::Cancelled),
            4 => Some(Self::Finished),
            _ => None,
        }
    }

    /// Whether a reservation in this state still holds its room
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Whether the state admits no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Finished)
    }

    /// Whether `self -> next` is a legal lifecycle transition
    pub fn can_transition_to(&self, next: Self) -> bool {
        match self {
            Self::Confirmed => matches!(next, Self::Cancelled | Self::Finished),
            Self::Waiting => matches!(next, Self::Confirmed | Self::Cancelled),
            Self::Cancelled | Self::Finished => false,
        }
    }

    pub const ALL: [Self; 4] = [
        Self::Confirmed,
        Self::Waiting,
        Self::Cancelled,
        Self::Finished,
    ];
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("Unknown reservation status: {s}")))
    }
}
