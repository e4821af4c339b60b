use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use oba_core::IdGenerator;

use crate::trip::{CatalogError, Trip, TripCategory, TripDraft, TripPatch};

/// Sort order for trip listings.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TripSort {
    #[default]
    Price,
    Duration,
    Date,
}

/// Browse filter: free-text search over title/destination, category,
/// and a price band.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripFilter {
    pub search: Option<String>,
    pub category: Option<TripCategory>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default)]
    pub sort: TripSort,
}

impl TripFilter {
    fn matches(&self, trip: &Trip) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let hit = trip.title.to_lowercase().contains(&term)
                || trip.destination.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if let Some(category) = self.category {
            if trip.category != category {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if trip.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if trip.price > max {
                return false;
            }
        }
        true
    }
}

/// In-memory trip catalog. Mutations run only through admin flows; the
/// booking engine reads prices and availability from here.
pub struct CatalogStore {
    trips: HashMap<Uuid, Trip>,
    ids: Arc<dyn IdGenerator>,
}

impl CatalogStore {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            trips: HashMap::new(),
            ids,
        }
    }

    /// Catalog pre-populated with the sample trips.
    pub fn with_seed(ids: Arc<dyn IdGenerator>) -> Self {
        let mut store = Self::new(ids);
        for draft in crate::seed::sample_trips() {
            // Seed data is known-valid.
            let _ = store.add_trip(draft);
        }
        store
    }

    /// Validate a draft, assign a fresh id and insert it.
    pub fn add_trip(&mut self, draft: TripDraft) -> Result<Uuid, CatalogError> {
        draft.validate()?;
        let id = self.ids.next_id();
        tracing::info!(trip_id = %id, title = %draft.title, "trip added to catalog");
        self.trips.insert(id, draft.into_trip(id));
        Ok(id)
    }

    /// Merge present patch fields into the matching trip. Returns
    /// `false` (a no-op) when the id is unknown.
    pub fn update_trip(&mut self, id: Uuid, patch: TripPatch) -> bool {
        match self.trips.get_mut(&id) {
            Some(trip) => {
                patch.apply(trip);
                tracing::info!(trip_id = %id, "trip updated");
                true
            }
            None => false,
        }
    }

    /// Plain removal. The referential guard against deleting a trip
    /// with live bookings belongs to the engine, which can see the
    /// ledger.
    pub fn remove_trip(&mut self, id: Uuid) -> Option<Trip> {
        self.trips.remove(&id)
    }

    pub fn trip(&self, id: Uuid) -> Option<&Trip> {
        self.trips.get(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.trips.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Full listing, sorted by start date for stable output.
    pub fn trips(&self) -> Vec<&Trip> {
        let mut all: Vec<&Trip> = self.trips.values().collect();
        all.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        all
    }

    /// Filtered, sorted listing backing the browse page.
    pub fn search(&self, filter: &TripFilter) -> Vec<&Trip> {
        let mut hits: Vec<&Trip> = self
            .trips
            .values()
            .filter(|trip| filter.matches(trip))
            .collect();
        hits.sort_by(|a, b| match filter.sort {
            TripSort::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
            TripSort::Duration => a.duration.cmp(&b.duration),
            TripSort::Date => a.start_date.cmp(&b.start_date),
        });
        hits
    }
}
