use std::sync::{Arc, Mutex};

use rail_store::EntityStore;
use rail_types::{IdGenerator, Principal, Station};
use tracing::{debug, info, warn};

use crate::error::{store_failure, BookingError, BookingResult};
use crate::validation::require_text;

/// Owns the station singleton.
///
/// At most one station is ever created. Its identity is the only principal
/// allowed to add or update trains.
pub struct StationRegistrar {
    stations: Arc<dyn EntityStore<Station>>,
    ids: Arc<dyn IdGenerator>,
    /// Serializes the check-then-insert in [`Self::initialize`].
    init_lock: Mutex<()>,
}

impl StationRegistrar {
    pub fn new(stations: Arc<dyn EntityStore<Station>>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            stations,
            ids,
            init_lock: Mutex::new(()),
        }
    }

    /// Create the station, owned by `caller`.
    ///
    /// Fails with `AlreadyInitialized` once a station exists, whatever the
    /// arguments, and with `InvalidInput` on a blank name.
    pub fn initialize(&self, name: &str, caller: &Principal) -> BookingResult<Station> {
        const OPERATION: &str = "initialize station";

        let _guard = self
            .init_lock
            .lock()
            .map_err(|_| BookingError::failed(OPERATION, "registrar lock poisoned"))?;

        if !self.stations.is_empty().map_err(store_failure(OPERATION))? {
            warn!(caller = %caller, "station initialization rejected: already initialized");
            return Err(BookingError::AlreadyInitialized);
        }
        require_text("station name", name)?;

        let station = Station {
            id: self.ids.next_id(),
            identity: caller.clone(),
        };
        self.stations
            .insert(&station.id, &station)
            .map_err(store_failure(OPERATION))?;

        info!(station_id = %station.id, identity = %caller, name, "station initialized");
        Ok(station)
    }

    /// The station record, or `NotInitialized`.
    pub fn station(&self) -> BookingResult<Station> {
        self.stations
            .values()
            .map_err(store_failure("read station"))?
            .into_iter()
            .next()
            .ok_or(BookingError::NotInitialized)
    }

    /// `true` iff a station exists and `caller` is its identity.
    pub fn is_authorized(&self, caller: &Principal) -> bool {
        matches!(self.station(), Ok(station) if station.identity == *caller)
    }

    /// Check that `caller` may perform the station-only `action`.
    ///
    /// `NotInitialized` takes precedence over `Unauthorized`.
    pub fn authorize(&self, caller: &Principal, action: &str) -> BookingResult<Station> {
        let station = self.station()?;
        if station.identity != *caller {
            debug!(caller = %caller, action, "caller is not the station");
            return Err(BookingError::unauthorized(action));
        }
        Ok(station)
    }
}
