//! Foundation types for the station booking ledger.
//!
//! Every other crate in the workspace depends on `rail-types`.
//!
//! # Key Types
//!
//! - [`Station`], [`Train`], [`Traveller`], [`Ticket`] -- stored entity records
//! - [`TrainPayload`], [`TicketPayload`], ... -- request payloads
//! - [`Principal`] -- opaque authenticated caller identity
//! - [`IdGenerator`] -- source of unique entity identifiers

pub mod entity;
pub mod id;
pub mod payload;
pub mod principal;

pub use entity::{EntityKind, Station, Ticket, Train, Traveller};
pub use id::{IdGenerator, SequentialIds, UuidV7Generator};
pub use payload::{
    TicketPayload, TrainPayload, TrainSearchPayload, TrainUpdatePayload, TravellerPayload,
};
pub use principal::Principal;
