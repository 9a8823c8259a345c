use std::sync::Arc;

use rail_store::Stores;
use rail_types::{
    IdGenerator, Principal, Station, Ticket, TicketPayload, Train, TrainPayload,
    TrainSearchPayload, TrainUpdatePayload, Traveller, TravellerPayload, UuidV7Generator,
};

use crate::booking::BookingEngine;
use crate::error::BookingResult;
use crate::locks::TrainLocks;
use crate::query::QueryLayer;
use crate::registrar::StationRegistrar;
use crate::trains::TrainRegistry;
use crate::travellers::TravellerRegistry;

/// The station booking ledger.
///
/// Wires the registrar, registries, booking engine, and query layer over a
/// single injected set of [`Stores`]. This is the main entry point for
/// anything that exposes ledger operations to clients.
pub struct BookingLedger {
    registrar: Arc<StationRegistrar>,
    trains: Arc<TrainRegistry>,
    travellers: Arc<TravellerRegistry>,
    booking: BookingEngine,
    queries: QueryLayer,
}

impl BookingLedger {
    /// Build a ledger that issues UUID v7 identifiers.
    pub fn new(stores: Stores) -> Self {
        Self::with_id_generator(stores, Arc::new(UuidV7Generator))
    }

    pub fn with_id_generator(stores: Stores, ids: Arc<dyn IdGenerator>) -> Self {
        let locks = Arc::new(TrainLocks::new());
        let registrar = Arc::new(StationRegistrar::new(stores.stations, Arc::clone(&ids)));
        let trains = Arc::new(TrainRegistry::new(
            stores.trains,
            Arc::clone(&registrar),
            Arc::clone(&ids),
            locks,
        ));
        let travellers = Arc::new(TravellerRegistry::new(
            stores.travellers,
            Arc::clone(&registrar),
            Arc::clone(&ids),
        ));
        let booking = BookingEngine::new(
            Arc::clone(&registrar),
            Arc::clone(&trains),
            Arc::clone(&travellers),
            Arc::clone(&stores.tickets),
            ids,
        );
        let queries = QueryLayer::new(stores.tickets);

        Self {
            registrar,
            trains,
            travellers,
            booking,
            queries,
        }
    }

    // ---- Station ----

    pub fn init_station(&self, name: &str, caller: &Principal) -> BookingResult<Station> {
        self.registrar.initialize(name, caller)
    }

    pub fn station(&self) -> BookingResult<Station> {
        self.registrar.station()
    }

    pub fn is_station(&self, caller: &Principal) -> bool {
        self.registrar.is_authorized(caller)
    }

    // ---- Trains ----

    pub fn add_train(&self, payload: &TrainPayload, caller: &Principal) -> BookingResult<Train> {
        self.trains.add_train(payload, caller)
    }

    pub fn update_train(
        &self,
        payload: &TrainUpdatePayload,
        caller: &Principal,
    ) -> BookingResult<Train> {
        self.trains.update_train(payload, caller)
    }

    pub fn get_train_by_id(&self, id: &str) -> BookingResult<Train> {
        self.trains.get_by_id(id)
    }

    pub fn trains_with_empty_seats(&self) -> BookingResult<Vec<Train>> {
        self.trains.list_with_availability()
    }

    pub fn search_trains(&self, query: &TrainSearchPayload) -> BookingResult<Vec<Train>> {
        self.trains.search(query)
    }

    // ---- Travellers ----

    pub fn add_traveller(&self, payload: &TravellerPayload) -> BookingResult<Traveller> {
        self.travellers.register(payload)
    }

    pub fn get_traveller_by_id(&self, id: &str) -> BookingResult<Traveller> {
        self.travellers.get_by_id(id)
    }

    // ---- Tickets ----

    pub fn add_ticket(&self, payload: &TicketPayload) -> BookingResult<Ticket> {
        self.booking.issue_ticket(payload)
    }

    pub fn ticket_by_id(&self, id: &str) -> BookingResult<Ticket> {
        self.queries.ticket_by_id(id)
    }

    pub fn tickets_by_train(&self, train_id: &str) -> BookingResult<Vec<Ticket>> {
        self.queries.tickets_by_train(train_id)
    }

    pub fn tickets_by_traveller(&self, traveller_id: &str) -> BookingResult<Vec<Ticket>> {
        self.queries.tickets_by_traveller(traveller_id)
    }

    pub fn travellers_by_train(&self, train_id: &str) -> BookingResult<Vec<Traveller>> {
        self.queries.travellers_by_train(train_id)
    }

    // ---- Accessors ----

    pub fn registrar(&self) -> &StationRegistrar { &self.registrar }
    pub fn trains(&self) -> &TrainRegistry { &self.trains }
    pub fn travellers(&self) -> &TravellerRegistry { &self.travellers }
    pub fn booking(&self) -> &BookingEngine { &self.booking }
    pub fn queries(&self) -> &QueryLayer { &self.queries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookingError;
    use crate::fixtures::{station, ticket_payload, train_payload, traveller_payload};

    #[test]
    fn station_singleton_across_many_calls() {
        let ledger = crate::fixtures::ledger();
        assert!(ledger.init_station("", &station()).is_err());
        assert!(ledger.init_station("Central", &station()).is_ok());
        for name in ["Central", "North", "South"] {
            assert_eq!(
                ledger.init_station(name, &Principal::new(name)).unwrap_err(),
                BookingError::AlreadyInitialized
            );
        }
        assert!(ledger.is_station(&station()));
    }

    #[test]
    fn file_backed_ledger_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let (train_id, traveller_id) = {
            let ledger = BookingLedger::new(Stores::open_dir(dir.path()).unwrap());
            ledger.init_station("Central", &station()).unwrap();
            let train = ledger.add_train(&train_payload(2), &station()).unwrap();
            let traveller = ledger.add_traveller(&traveller_payload("Ada")).unwrap();
            ledger.add_ticket(&ticket_payload(&train.id, &traveller.id)).unwrap();
            (train.id, traveller.id)
        };

        let ledger = BookingLedger::new(Stores::open_dir(dir.path()).unwrap());
        assert_eq!(
            ledger.init_station("Central", &station()).unwrap_err(),
            BookingError::AlreadyInitialized
        );
        assert_eq!(ledger.get_train_by_id(&train_id).unwrap().empty_seats, 1);
        let next = ledger.add_ticket(&ticket_payload(&train_id, &traveller_id)).unwrap();
        assert_eq!(next.seat_no, 1);
        assert_eq!(ledger.tickets_by_traveller(&traveller_id).unwrap().len(), 2);
    }

    #[test]
    fn availability_tracks_bookings() {
        let ledger = crate::fixtures::initialized_ledger();
        let small = ledger.add_train(&train_payload(1), &station()).unwrap();
        let big = ledger.add_train(&train_payload(5), &station()).unwrap();
        let ada = ledger.add_traveller(&traveller_payload("Ada")).unwrap();

        assert_eq!(ledger.trains_with_empty_seats().unwrap().len(), 2);
        ledger.add_ticket(&ticket_payload(&small.id, &ada.id)).unwrap();
        assert_eq!(
            ledger.trains_with_empty_seats().unwrap(),
            vec![ledger.get_train_by_id(&big.id).unwrap()]
        );
    }
}
