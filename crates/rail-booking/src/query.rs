use std::sync::Arc;

use rail_store::EntityStore;
use rail_types::{EntityKind, Ticket, Traveller};

use crate::error::{store_failure, BookingError, BookingResult};

/// Read-only filters over issued tickets. Results come back in store order.
pub struct QueryLayer {
    tickets: Arc<dyn EntityStore<Ticket>>,
}

impl QueryLayer {
    pub fn new(tickets: Arc<dyn EntityStore<Ticket>>) -> Self {
        Self { tickets }
    }

    pub fn ticket_by_id(&self, id: &str) -> BookingResult<Ticket> {
        self.tickets
            .get(id)
            .map_err(store_failure("get ticket"))?
            .ok_or_else(|| BookingError::not_found(EntityKind::Ticket, id))
    }

    pub fn tickets_by_train(&self, train_id: &str) -> BookingResult<Vec<Ticket>> {
        let tickets = self
            .tickets
            .filter(&|ticket: &Ticket| ticket.train_id == train_id)
            .map_err(store_failure("get tickets"))?;
        non_empty(tickets, "no tickets on this train currently")
    }

    pub fn tickets_by_traveller(&self, traveller_id: &str) -> BookingResult<Vec<Ticket>> {
        let tickets = self
            .tickets
            .filter(&|ticket: &Ticket| ticket.traveller.id == traveller_id)
            .map_err(store_failure("get tickets"))?;
        non_empty(tickets, "no tickets for this traveller currently")
    }

    /// Travellers holding tickets on `train_id`, as captured on each ticket.
    ///
    /// One entry per ticket: a traveller with two tickets appears twice.
    pub fn travellers_by_train(&self, train_id: &str) -> BookingResult<Vec<Traveller>> {
        let travellers = self
            .tickets
            .filter(&|ticket: &Ticket| ticket.train_id == train_id)
            .map_err(store_failure("get travellers"))?
            .into_iter()
            .map(|ticket| ticket.traveller)
            .collect();
        non_empty(travellers, "no travellers on this train currently")
    }
}

fn non_empty<T>(items: Vec<T>, message: &str) -> BookingResult<Vec<T>> {
    if items.is_empty() {
        return Err(BookingError::Empty(message.to_string()));
    }
    Ok(items)
}
