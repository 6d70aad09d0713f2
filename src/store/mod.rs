pub mod csv_loader;

use std::path::Path;

use thiserror::Error;

use crate::analytics::types::Event;

/// The loaded event log. Never mutated after construction.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("event source is empty or missing data: {0}")]
    TooSmall(String),
}

impl EventStore {
    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Loads the CSV at `path`, keeping at most `max_events` rows.
    pub fn load_csv(path: impl AsRef<Path>, max_events: usize) -> Result<Self, StoreError> {
        let events = csv_loader::load_events(path.as_ref(), max_events)?;
        Ok(Self::from_events(events))
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
