//! Request payloads accepted by the ledger operations.
//!
//! Payloads are plain data. Field presence and blankness are validated by the
//! ledger, not here, so a payload deserialized from an untrusted client may
//! still be rejected with `InvalidInput`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainPayload {
    pub capacity: u32,
    pub time: String,
    pub starting_point: String,
    pub stops: Vec<String>,
}

/// Replaces the schedule of an existing train. Capacity is not updatable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainUpdatePayload {
    pub id: String,
    pub time: String,
    pub starting_point: String,
    pub stops: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPayload {
    pub time: String,
    pub train_id: String,
    pub traveller_id: String,
    pub boarding: String,
    pub destination: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravellerPayload {
    pub name: String,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainSearchPayload {
    pub time: String,
    pub starting_point: String,
    pub destination: String,
}
