use std::sync::{Arc, Mutex};

use rail_store::EntityStore;
use rail_types::{
    EntityKind, IdGenerator, Principal, Train, TrainPayload, TrainSearchPayload,
    TrainUpdatePayload,
};
use tracing::{debug, info};

use crate::error::{store_failure, BookingError, BookingResult};
use crate::locks::{acquire, TrainLocks};
use crate::registrar::StationRegistrar;
use crate::validation::Validate;

/// Creates, updates, and looks up trains.
///
/// Creation and update are restricted to the station identity. Updates only
/// touch the schedule (`time`, `starting_point`, `stops`); capacity and seat
/// counts are owned by the booking engine.
pub struct TrainRegistry {
    trains: Arc<dyn EntityStore<Train>>,
    registrar: Arc<StationRegistrar>,
    ids: Arc<dyn IdGenerator>,
    locks: Arc<TrainLocks>,
}

impl TrainRegistry {
    pub fn new(
        trains: Arc<dyn EntityStore<Train>>,
        registrar: Arc<StationRegistrar>,
        ids: Arc<dyn IdGenerator>,
        locks: Arc<TrainLocks>,
    ) -> Self {
        Self {
            trains,
            registrar,
            ids,
            locks,
        }
    }

    pub fn add_train(&self, payload: &TrainPayload, caller: &Principal) -> BookingResult<Train> {
        const OPERATION: &str = "add train";

        self.registrar.authorize(caller, "add a train")?;
        payload.validate()?;

        let train = Train {
            id: self.ids.next_id(),
            capacity: payload.capacity,
            empty_seats: payload.capacity,
            time: payload.time.clone(),
            starting_point: payload.starting_point.clone(),
            stops: payload.stops.clone(),
        };
        self.trains
            .insert(&train.id, &train)
            .map_err(store_failure(OPERATION))?;

        info!(
            train_id = %train.id,
            capacity = train.capacity,
            starting_point = %train.starting_point,
            "train added"
        );
        Ok(train)
    }

    pub fn update_train(
        &self,
        payload: &TrainUpdatePayload,
        caller: &Principal,
    ) -> BookingResult<Train> {
        const OPERATION: &str = "update train";

        self.registrar.authorize(caller, "update a train")?;
        payload.validate()?;

        // Resolve before locking so unknown ids never enter the lock table.
        self.get_by_id(&payload.id)?;
        let handle = self.locks.handle(&payload.id)?;
        let _guard = acquire(&handle, OPERATION)?;

        let mut train = self.get_by_id(&payload.id)?;
        train.time = payload.time.clone();
        train.starting_point = payload.starting_point.clone();
        train.stops = payload.stops.clone();
        self.trains
            .insert(&train.id, &train)
            .map_err(store_failure(OPERATION))?;

        info!(train_id = %train.id, time = %train.time, "train schedule updated");
        Ok(train)
    }

    pub fn get_by_id(&self, id: &str) -> BookingResult<Train> {
        self.trains
            .get(id)
            .map_err(store_failure("get train"))?
            .ok_or_else(|| BookingError::not_found(EntityKind::Train, id))
    }

    /// Trains with at least one empty seat, or `Empty`.
    pub fn list_with_availability(&self) -> BookingResult<Vec<Train>> {
        let trains = self
            .trains
            .filter(&|train: &Train| train.has_empty_seats())
            .map_err(store_failure("get trains with empty seats"))?;
        if trains.is_empty() {
            return Err(BookingError::Empty(
                "no train with empty seats currently".into(),
            ));
        }
        Ok(trains)
    }

    /// Route search.
    ///
    /// A train matches when its `time` and `starting_point` equal the query
    /// and it stops at `destination`, **or** when it merely stops at the
    /// queried `starting_point`. The second clause admits transfer routes
    /// and ignores time and destination.
    pub fn search(&self, query: &TrainSearchPayload) -> BookingResult<Vec<Train>> {
        let trains = self
            .trains
            .filter(&|train: &Train| matches_route(train, query))
            .map_err(store_failure("search trains"))?;
        debug!(
            time = %query.time,
            from = %query.starting_point,
            to = %query.destination,
            matches = trains.len(),
            "train search"
        );
        if trains.is_empty() {
            return Err(BookingError::Empty(
                "no train available for this route currently".into(),
            ));
        }
        Ok(trains)
    }

    /// Lock handle for a train known to exist.
    pub(crate) fn lock_handle(&self, train_id: &str) -> BookingResult<Arc<Mutex<()>>> {
        self.locks.handle(train_id)
    }

    /// Persist a train record. Callers must hold the train's lock.
    pub(crate) fn store(&self, train: &Train, operation: &'static str) -> BookingResult<()> {
        self.trains
            .insert(&train.id, train)
            .map_err(store_failure(operation))
    }
}

fn matches_route(train: &Train, query: &TrainSearchPayload) -> bool {
    let direct = train.time == query.time
        && train.starting_point == query.starting_point
        && train.stops_at(&query.destination);
    direct || train.stops_at(&query.starting_point)
}
