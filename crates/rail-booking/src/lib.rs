//! Booking invariant engine for the station booking ledger.
//!
//! This crate is the heart of the system. It provides:
//! - [`StationRegistrar`] -- single-station initialization and caller authorization
//! - [`TrainRegistry`] / [`TravellerRegistry`] -- record creation, update, lookup
//! - [`BookingEngine`] -- ticket issuance with seat-capacity enforcement
//! - [`QueryLayer`] -- read-only filters over issued tickets
//! - [`BookingLedger`] -- the facade that wires all of the above over one
//!   set of [`rail_store::Stores`]
//!
//! # Quick Start
//!
//! ```rust
//! use rail_booking::BookingLedger;
//! use rail_store::Stores;
//! use rail_types::{Principal, TrainPayload};
//!
//! let ledger = BookingLedger::new(Stores::in_memory());
//! let station = Principal::new("station");
//! ledger.init_station("Central", &station).unwrap();
//! let train = ledger
//!     .add_train(
//!         &TrainPayload {
//!             capacity: 2,
//!             time: "10:00".into(),
//!             starting_point: "A".into(),
//!             stops: vec!["B".into(), "C".into()],
//!         },
//!         &station,
//!     )
//!     .unwrap();
//! assert_eq!(train.empty_seats, 2);
//! ```

pub mod booking;
pub mod error;
pub mod ledger;
pub mod locks;
pub mod query;
pub mod registrar;
pub mod trains;
pub mod travellers;
pub mod validation;

pub use booking::BookingEngine;
pub use error::{BookingError, BookingResult};
pub use ledger::BookingLedger;
pub use locks::TrainLocks;
pub use query::QueryLayer;
pub use registrar::StationRegistrar;
pub use trains::TrainRegistry;
pub use travellers::TravellerRegistry;
pub use validation::Validate;
