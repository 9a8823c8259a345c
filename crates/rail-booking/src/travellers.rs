use std::sync::Arc;

use rail_store::EntityStore;
use rail_types::{EntityKind, IdGenerator, Traveller, TravellerPayload};
use tracing::info;

use crate::error::{store_failure, BookingError, BookingResult};
use crate::registrar::StationRegistrar;
use crate::validation::Validate;

/// Registers and looks up travellers. Open to any caller once the station
/// exists.
pub struct TravellerRegistry {
    travellers: Arc<dyn EntityStore<Traveller>>,
    registrar: Arc<StationRegistrar>,
    ids: Arc<dyn IdGenerator>,
}

impl TravellerRegistry {
    pub fn new(
        travellers: Arc<dyn EntityStore<Traveller>>,
        registrar: Arc<StationRegistrar>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            travellers,
            registrar,
            ids,
        }
    }

    pub fn register(&self, payload: &TravellerPayload) -> BookingResult<Traveller> {
        self.registrar.station()?;
        payload.validate()?;

        let traveller = Traveller {
            id: self.ids.next_id(),
            name: payload.name.clone(),
            phone: payload.phone.clone(),
        };
        self.travellers
            .insert(&traveller.id, &traveller)
            .map_err(store_failure("add traveller"))?;

        info!(traveller_id = %traveller.id, "traveller registered");
        Ok(traveller)
    }

    pub fn get_by_id(&self, id: &str) -> BookingResult<Traveller> {
        self.travellers
            .get(id)
            .map_err(store_failure("get traveller"))?
            .ok_or_else(|| BookingError::not_found(EntityKind::Traveller, id))
    }
}
