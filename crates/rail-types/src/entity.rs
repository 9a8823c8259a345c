use std::fmt;

use serde::{Deserialize, Serialize};

use crate::principal::Principal;

/// The kinds of record the ledger stores. Used to parameterize lookups and
/// `NotFound` errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Station,
    Train,
    Traveller,
    Ticket,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Station => "station",
            Self::Train => "train",
            Self::Traveller => "traveller",
            Self::Ticket => "ticket",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single station that owns the ledger.
///
/// Created once by whoever initializes the ledger; that caller becomes the
/// only identity allowed to add or update trains.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub identity: Principal,
}

/// A scheduled train with count-only seat capacity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Train {
    pub id: String,
    pub capacity: u32,
    /// Seats not yet sold. Always within `0..=capacity`.
    pub empty_seats: u32,
    pub time: String,
    pub starting_point: String,
    pub stops: Vec<String>,
}

impl Train {
    /// Number of tickets issued against this train so far. Zero for a
    /// record whose `empty_seats` exceeds `capacity`.
    pub fn seats_taken(&self) -> u32 {
        self.capacity.saturating_sub(self.empty_seats)
    }

    pub fn has_empty_seats(&self) -> bool {
        self.empty_seats > 0
    }

    pub fn stops_at(&self, place: &str) -> bool {
        self.stops.iter().any(|stop| stop == place)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traveller {
    pub id: String,
    pub name: String,
    pub phone: String,
}

/// An issued ticket.
///
/// `traveller` is a copy of the traveller record taken at issue time, not a
/// reference: tickets are historical records and never change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub time: String,
    pub seat_no: u32,
    pub train_id: String,
    pub traveller: Traveller,
    pub boarding: String,
    pub destination: String,
}
