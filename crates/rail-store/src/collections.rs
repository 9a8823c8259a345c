use std::path::Path;
use std::sync::Arc;

use rail_types::{Station, Ticket, Train, Traveller};

use crate::error::StoreResult;
use crate::file::FileEntityStore;
use crate::memory::InMemoryEntityStore;
use crate::traits::EntityStore;

/// The four collections the ledger reads and writes.
///
/// Constructed explicitly and handed to the ledger, so every test can build
/// an isolated set of stores. Cloning shares the underlying collections.
#[derive(Clone)]
pub struct Stores {
    pub stations: Arc<dyn EntityStore<Station>>,
    pub trains: Arc<dyn EntityStore<Train>>,
    pub travellers: Arc<dyn EntityStore<Traveller>>,
    pub tickets: Arc<dyn EntityStore<Ticket>>,
}

impl Stores {
    /// Volatile stores, lost when dropped.
    pub fn in_memory() -> Self {
        Self {
            stations: Arc::new(InMemoryEntityStore::<Station>::new()),
            trains: Arc::new(InMemoryEntityStore::<Train>::new()),
            travellers: Arc::new(InMemoryEntityStore::<Traveller>::new()),
            tickets: Arc::new(InMemoryEntityStore::<Ticket>::new()),
        }
    }

    /// File-backed stores, one snapshot per collection under `dir`.
    pub fn open_dir(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            stations: Arc::new(FileEntityStore::<Station>::open(dir.join("stations.json"))?),
            trains: Arc::new(FileEntityStore::<Train>::open(dir.join("trains.json"))?),
            travellers: Arc::new(FileEntityStore::<Traveller>::open(
                dir.join("travellers.json"),
            )?),
            tickets: Arc::new(FileEntityStore::<Ticket>::open(dir.join("tickets.json"))?),
        })
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("stations", &self.stations.len().ok())
            .field("trains", &self.trains.len().ok())
            .field("travellers", &self.travellers.len().ok())
            .field("tickets", &self.tickets.len().ok())
            .finish()
    }
}
