use std::sync::Arc;

use rail_store::EntityStore;
use rail_types::{IdGenerator, Ticket, TicketPayload};
use tracing::{debug, error, info};

use crate::error::{store_failure, BookingError, BookingResult};
use crate::locks::acquire;
use crate::registrar::StationRegistrar;
use crate::trains::TrainRegistry;
use crate::travellers::TravellerRegistry;
use crate::validation::Validate;

/// Issues tickets against a train and a traveller.
///
/// Issuance is a single-shot transaction over three records:
///
/// 1. validate the payload (`boarding`, `destination`)
/// 2. require the station to exist
/// 3. resolve the train, then the traveller
/// 4. under the train's lock, re-read the train and require an empty seat
/// 5. decrement `empty_seats` and write the train back
/// 6. write the ticket with `seat_no = capacity - empty_seats` (pre-decrement)
///
/// Steps 4-6 hold the per-train lock, so the capacity gate always sees the
/// last committed seat count and a train is never oversubscribed. If the
/// ticket write fails the previous train record is written back, so a failed
/// booking never leaves a ticket or a lost seat behind.
pub struct BookingEngine {
    registrar: Arc<StationRegistrar>,
    trains: Arc<TrainRegistry>,
    travellers: Arc<TravellerRegistry>,
    tickets: Arc<dyn EntityStore<Ticket>>,
    ids: Arc<dyn IdGenerator>,
}

impl BookingEngine {
    pub fn new(
        registrar: Arc<StationRegistrar>,
        trains: Arc<TrainRegistry>,
        travellers: Arc<TravellerRegistry>,
        tickets: Arc<dyn EntityStore<Ticket>>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            registrar,
            trains,
            travellers,
            tickets,
            ids,
        }
    }

    pub fn issue_ticket(&self, payload: &TicketPayload) -> BookingResult<Ticket> {
        const OPERATION: &str = "allocate traveller space on the train";

        payload.validate()?;
        self.registrar.station()?;

        let train = self.trains.get_by_id(&payload.train_id)?;
        let traveller = self.travellers.get_by_id(&payload.traveller_id)?;

        let handle = self.trains.lock_handle(&train.id)?;
        let _guard = acquire(&handle, OPERATION)?;

        let mut train = self.trains.get_by_id(&train.id)?;
        if !train.has_empty_seats() {
            debug!(train_id = %train.id, capacity = train.capacity, "booking rejected: train full");
            return Err(BookingError::Full { train_id: train.id });
        }

        let ticket = Ticket {
            id: self.ids.next_id(),
            time: payload.time.clone(),
            seat_no: train.seats_taken(),
            train_id: train.id.clone(),
            traveller,
            boarding: payload.boarding.clone(),
            destination: payload.destination.clone(),
        };

        let previous = train.clone();
        train.empty_seats -= 1;
        self.trains.store(&train, OPERATION)?;

        if let Err(err) = self
            .tickets
            .insert(&ticket.id, &ticket)
            .map_err(store_failure(OPERATION))
        {
            if let Err(restore) = self.trains.store(&previous, OPERATION) {
                error!(
                    train_id = %train.id,
                    error = %restore,
                    "ticket write failed and seat count could not be restored"
                );
            }
            return Err(err);
        }

        info!(
            ticket_id = %ticket.id,
            train_id = %ticket.train_id,
            traveller_id = %ticket.traveller.id,
            seat_no = ticket.seat_no,
            empty_seats = train.empty_seats,
            "ticket issued"
        );
        Ok(ticket)
    }
}
